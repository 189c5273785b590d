//! Statement binding: variables, functions, classes, interfaces, enums,
//! type aliases and namespaces.

use crate::state::BinderState;
use crate::symbols::{Symbol, SymbolKind, SymbolName, SymbolTable};
use tracing::trace;
use tsdecl_parser::{
    ClassDeclaration, EnumDeclaration, ExportDefaultExpression, FunctionDeclaration,
    InterfaceDeclaration, ModuleDeclaration, ModuleName, Modifiers, PropertyName, Statement,
    TypeAliasDeclaration, VariableKeyword, VariableStatement,
};

impl BinderState {
    pub(crate) fn bind_statements(&mut self, statements: Vec<Statement>, table: &mut SymbolTable) {
        for statement in statements {
            self.bind_statement(statement, table);
        }
    }

    fn bind_statement(&mut self, statement: Statement, table: &mut SymbolTable) {
        match statement {
            Statement::Variable(var) => self.bind_variable_statement(var, table),
            Statement::Function(func) => self.bind_function_declaration(func, table),
            Statement::Class(class) => self.bind_class_declaration(class, table),
            Statement::Interface(interface) => self.bind_interface_declaration(interface, table),
            Statement::Enum(decl) => self.bind_enum_declaration(decl, table),
            Statement::TypeAlias(alias) => self.bind_type_alias_declaration(alias, table),
            Statement::Module(module) => self.bind_module_declaration(module, table),
            Statement::ExportDefault(expr) => self.bind_export_default_expression(expr, table),
            Statement::Import(import) => {
                if self.container_depth == 0 {
                    self.imports.push(import);
                } else {
                    trace!(file = %self.file_name, "nested import not recorded");
                }
            }
            Statement::Export(export) => {
                if self.container_depth == 0 {
                    self.exports.push(export);
                } else {
                    trace!(file = %self.file_name, "nested export not recorded");
                }
            }
        }
    }

    pub(crate) fn is_ambient(&self, modifiers: Modifiers) -> bool {
        self.in_ambient_context || modifiers.contains(Modifiers::AMBIENT)
    }

    fn bind_variable_statement(&mut self, var: VariableStatement, table: &mut SymbolTable) {
        let is_ambient = self.is_ambient(var.modifiers);
        let mut modifiers = var.modifiers;
        if var.keyword == VariableKeyword::Const {
            modifiers |= Modifiers::CONST;
        }

        for decl in var.declarations {
            let mut symbol = Symbol::new(
                SymbolKind::Variable,
                SymbolName::Named(decl.name),
                self.site(decl.span),
            );
            symbol.modifiers = modifiers;
            symbol.is_ambient = is_ambient;
            symbol.type_annotation = decl.type_annotation;
            if let Some(initializer) = decl.initializer {
                symbol.has_implementation = true;
                symbol.signatures.extend(initializer.function);
                symbol.initializer = Some(initializer.text);
            }
            table.declare(symbol, &mut self.diagnostics);
        }
    }

    fn bind_function_declaration(&mut self, func: FunctionDeclaration, table: &mut SymbolTable) {
        let name = func.name.map_or(SymbolName::Default, SymbolName::Named);
        let mut symbol = Symbol::new(SymbolKind::Function, name, self.site(func.span));
        symbol.modifiers = func.modifiers;
        symbol.is_ambient = self.is_ambient(func.modifiers);
        if func.has_body {
            symbol.implementation = Some(func.signature);
            symbol.has_implementation = true;
        } else {
            symbol.signatures.push(func.signature);
        }
        table.declare(symbol, &mut self.diagnostics);
    }

    fn bind_class_declaration(&mut self, class: ClassDeclaration, table: &mut SymbolTable) {
        let is_ambient = self.is_ambient(class.modifiers);
        let name = class.name.map_or(SymbolName::Default, SymbolName::Named);
        let mut symbol = Symbol::new(SymbolKind::Class, name, self.site(class.span));
        symbol.modifiers = class.modifiers;
        symbol.is_ambient = is_ambient;
        symbol.has_implementation = !is_ambient;
        symbol.type_parameters = class.type_parameters;
        symbol.extends = class.extends.into_iter().collect();
        symbol.implements = class.implements;
        symbol.decorators = class.decorators;
        symbol.members =
            self.with_ambient_context(is_ambient, |binder| binder.bind_class_members(class.members));
        table.declare(symbol, &mut self.diagnostics);
    }

    fn bind_interface_declaration(
        &mut self,
        interface: InterfaceDeclaration,
        table: &mut SymbolTable,
    ) {
        let is_ambient = self.is_ambient(interface.modifiers);
        let mut symbol = Symbol::new(
            SymbolKind::Interface,
            SymbolName::Named(interface.name),
            self.site(interface.span),
        );
        symbol.modifiers = interface.modifiers;
        symbol.is_ambient = is_ambient;
        symbol.type_parameters = interface.type_parameters;
        symbol.extends = interface.extends;
        symbol.members = self.with_ambient_context(is_ambient, |binder| {
            binder.bind_type_members(interface.members)
        });
        table.declare(symbol, &mut self.diagnostics);
    }

    fn bind_enum_declaration(&mut self, decl: EnumDeclaration, table: &mut SymbolTable) {
        let is_ambient = self.is_ambient(decl.modifiers);
        let mut symbol = Symbol::new(
            SymbolKind::Enum,
            SymbolName::Named(decl.name),
            self.site(decl.span),
        );
        symbol.modifiers = decl.modifiers;
        symbol.is_ambient = is_ambient;
        symbol.has_implementation = !is_ambient;

        for member in decl.members {
            let name = match member.name {
                PropertyName::Computed(text) => SymbolName::Computed(text),
                other => SymbolName::Named(other.text().to_string()),
            };
            let mut enum_member = Symbol::new(SymbolKind::EnumMember, name, self.site(member.span));
            enum_member.is_ambient = is_ambient;
            enum_member.has_implementation = !is_ambient;
            enum_member.enum_value = Some(member.value);
            symbol.members.declare(enum_member, &mut self.diagnostics);
        }
        table.declare(symbol, &mut self.diagnostics);
    }

    fn bind_type_alias_declaration(&mut self, alias: TypeAliasDeclaration, table: &mut SymbolTable) {
        let mut symbol = Symbol::new(
            SymbolKind::TypeAlias,
            SymbolName::Named(alias.name),
            self.site(alias.span),
        );
        symbol.modifiers = alias.modifiers;
        symbol.is_ambient = self.is_ambient(alias.modifiers);
        symbol.type_parameters = alias.type_parameters;
        symbol.type_annotation = Some(alias.type_expr);
        table.declare(symbol, &mut self.diagnostics);
    }

    /// `export default <expression>` becomes an anonymous default variable.
    fn bind_export_default_expression(
        &mut self,
        expr: ExportDefaultExpression,
        table: &mut SymbolTable,
    ) {
        let mut symbol = Symbol::new(SymbolKind::Variable, SymbolName::Default, self.site(expr.span));
        symbol.modifiers = Modifiers::EXPORT | Modifiers::DEFAULT;
        symbol.is_ambient = self.in_ambient_context;
        symbol.has_implementation = true;
        symbol.initializer = Some(expr.text);
        table.declare(symbol, &mut self.diagnostics);
    }

    /// Namespaces merge into `table`; `declare module "x"` merges into the
    /// file's ambient modules and `declare global` into its global scope,
    /// wherever they appear.
    fn bind_module_declaration(&mut self, module: ModuleDeclaration, table: &mut SymbolTable) {
        let body = module.body.unwrap_or_default();
        match module.name {
            ModuleName::Global => {
                let members = self.bind_module_body(body, true);
                trace!(file = %self.file_name, symbols = members.len(), "global augmentation");
                for symbol in members.into_symbols() {
                    self.global.declare(symbol, &mut self.diagnostics);
                }
            }
            ModuleName::StringLiteral(specifier) => {
                let mut symbol = Symbol::new(
                    SymbolKind::Namespace,
                    SymbolName::Module(specifier),
                    self.site(module.span),
                );
                symbol.modifiers = module.modifiers;
                symbol.is_ambient = true;
                symbol.members = self.bind_module_body(body, true);
                self.ambient_modules.declare(symbol, &mut self.diagnostics);
            }
            ModuleName::Identifier(name) => {
                let is_ambient = self.is_ambient(module.modifiers);
                let mut symbol = Symbol::new(
                    SymbolKind::Namespace,
                    SymbolName::Named(name),
                    self.site(module.span),
                );
                symbol.modifiers = module.modifiers;
                symbol.is_ambient = is_ambient;
                symbol.members = self.bind_module_body(body, is_ambient);
                symbol.has_implementation =
                    !is_ambient && symbol.members.iter().any(|m| m.has_implementation);
                table.declare(symbol, &mut self.diagnostics);
            }
        }
    }

    fn bind_module_body(&mut self, body: Vec<Statement>, ambient: bool) -> SymbolTable {
        let mut members = SymbolTable::new();
        self.container_depth += 1;
        self.with_ambient_context(ambient, |binder| binder.bind_statements(body, &mut members));
        self.container_depth -= 1;
        members
    }
}
