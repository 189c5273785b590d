//! Parser state - statement and declaration parsing methods.

use crate::parser::flags::Modifiers;
use crate::parser::node::{
    ClassDeclaration, Decorator, EnumDeclaration, EnumMember, EnumValue, ExportDeclaration,
    ExportDefaultExpression, ExportKind, ExportSpecifier, FunctionDeclaration, ImportBinding,
    ImportDeclaration, InterfaceDeclaration, ModuleDeclaration, ModuleName, Parameter, Signature,
    SignatureKind, SourceFile, Statement, TypeAliasDeclaration, TypeExpr, VariableDeclaration,
    VariableKeyword, VariableStatement,
};
use crate::parser::state::{ParseError, ParseResult, ParserState};
use tracing::{debug, debug_span, trace};
use tsdecl_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use tsdecl_common::{Diagnostic, Span};
use tsdecl_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse the whole file. Never fails: every problem is reported as a
    /// diagnostic and the parser resumes at the next declaration.
    pub fn parse_source_file(&mut self) -> (SourceFile, Vec<Diagnostic>) {
        let _span = debug_span!("parse_source_file", file = %self.file_name).entered();
        self.next_token();
        let statements = self.parse_statement_list(false);
        let diagnostics = self.take_diagnostics();
        debug!(
            statements = statements.len(),
            diagnostics = diagnostics.len(),
            "parsed source file"
        );
        let source_file = SourceFile {
            file_name: self.file_name.clone(),
            text: self.scanner.source_text_arc(),
            line_map: self.scanner.line_map().clone(),
            statements,
            is_declaration_file: self.options.declaration_file,
        };
        (source_file, diagnostics)
    }

    /// Parse statements until end of file, or until the closing `}` of a
    /// namespace body when `in_block`.
    pub(crate) fn parse_statement_list(&mut self, in_block: bool) -> Vec<Statement> {
        let mut statements = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CloseBraceToken if in_block => break,
                SyntaxKind::CloseBraceToken => {
                    let error = self.error_at_current_token(
                        diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                        diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                    );
                    self.report(error);
                    self.next_token();
                    continue;
                }
                SyntaxKind::SemicolonToken => {
                    self.next_token();
                    continue;
                }
                _ => {}
            }

            let start = self.token_pos();
            match self.parse_statement() {
                Ok(Some(statement)) => statements.push(statement),
                Ok(None) => {}
                Err(error) => {
                    self.report(error);
                    self.resync_after_error(start);
                }
            }

            if self.token_pos() == start
                && !self.is_token(SyntaxKind::EndOfFileToken)
                && !(in_block && self.is_token(SyntaxKind::CloseBraceToken))
            {
                self.next_token();
            }
        }
        statements
    }

    /// Parse one statement. `Ok(None)` for statements that declare nothing.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Option<Statement>> {
        let start = self.token_pos();
        let mut decorators = self.parse_decorators()?;

        if self.is_token(SyntaxKind::ExportKeyword) && self.look_ahead(Self::is_export_declaration)
        {
            self.reject_decorators(&mut decorators);
            let export = self.parse_export_declaration(start)?;
            return Ok(Some(Statement::Export(export)));
        }

        let mut modifiers = Modifiers::empty();
        loop {
            match self.token() {
                SyntaxKind::ExportKeyword => {
                    self.add_modifier(&mut modifiers, Modifiers::EXPORT);
                    self.next_token();
                    if self.is_token(SyntaxKind::DefaultKeyword) {
                        self.add_modifier(&mut modifiers, Modifiers::DEFAULT);
                        self.next_token();
                        if !self.is_default_declaration_start() {
                            self.reject_decorators(&mut decorators);
                            return self.parse_export_default_expression(start).map(Some);
                        }
                    }
                }
                SyntaxKind::DeclareKeyword
                    if self.look_ahead(|p| {
                        p.next_token();
                        !p.has_preceding_line_break()
                            && (p.is_declaration_keyword() || p.is_token(SyntaxKind::GlobalKeyword))
                    }) =>
                {
                    self.add_modifier(&mut modifiers, Modifiers::AMBIENT);
                    self.next_token();
                }
                SyntaxKind::AbstractKeyword
                    if self.look_ahead(|p| {
                        p.next_token() == SyntaxKind::ClassKeyword && !p.has_preceding_line_break()
                    }) =>
                {
                    self.add_modifier(&mut modifiers, Modifiers::ABSTRACT);
                    self.next_token();
                }
                SyntaxKind::AsyncKeyword
                    if self.look_ahead(|p| {
                        p.next_token() == SyntaxKind::FunctionKeyword
                            && !p.has_preceding_line_break()
                    }) =>
                {
                    self.add_modifier(&mut modifiers, Modifiers::ASYNC);
                    self.next_token();
                }
                // `export @dec class C {}`
                SyntaxKind::AtToken if !modifiers.is_empty() => {
                    let more = self.parse_decorators()?;
                    decorators.extend(more);
                    for (index, decorator) in decorators.iter_mut().enumerate() {
                        decorator.index = u32::try_from(index).unwrap_or(u32::MAX);
                    }
                }
                _ => break,
            }
        }

        if !self.is_token(SyntaxKind::ClassKeyword) {
            self.reject_decorators(&mut decorators);
        }

        let statement = match self.token() {
            SyntaxKind::VarKeyword => {
                Statement::Variable(self.parse_variable_statement(start, modifiers)?)
            }
            SyntaxKind::LetKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_identifier()
                        || matches!(
                            p.token(),
                            SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken
                        )
                }) =>
            {
                Statement::Variable(self.parse_variable_statement(start, modifiers)?)
            }
            SyntaxKind::ConstKeyword => {
                if self.look_ahead_next_is(&[SyntaxKind::EnumKeyword]) {
                    self.add_modifier(&mut modifiers, Modifiers::CONST);
                    self.next_token();
                    Statement::Enum(self.parse_enum_declaration(start, modifiers)?)
                } else {
                    Statement::Variable(self.parse_variable_statement(start, modifiers)?)
                }
            }
            SyntaxKind::FunctionKeyword => {
                Statement::Function(self.parse_function_declaration(start, modifiers)?)
            }
            SyntaxKind::ClassKeyword => {
                Statement::Class(self.parse_class_declaration(start, modifiers, decorators)?)
            }
            SyntaxKind::InterfaceKeyword if self.look_ahead_next_is_identifier_on_same_line() => {
                Statement::Interface(self.parse_interface_declaration(start, modifiers)?)
            }
            SyntaxKind::EnumKeyword => {
                Statement::Enum(self.parse_enum_declaration(start, modifiers)?)
            }
            SyntaxKind::TypeKeyword if self.look_ahead_next_is_identifier_on_same_line() => {
                Statement::TypeAlias(self.parse_type_alias_declaration(start, modifiers)?)
            }
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    !p.has_preceding_line_break()
                        && (p.is_identifier() || p.is_token(SyntaxKind::StringLiteral))
                }) =>
            {
                Statement::Module(self.parse_module_declaration(start, modifiers)?)
            }
            SyntaxKind::GlobalKeyword
                if self.look_ahead_next_is(&[SyntaxKind::OpenBraceToken]) =>
            {
                Statement::Module(self.parse_module_declaration(start, modifiers)?)
            }
            SyntaxKind::ImportKeyword
                if !self.look_ahead_next_is(&[SyntaxKind::OpenParenToken, SyntaxKind::DotToken]) =>
            {
                Statement::Import(self.parse_import_declaration(start)?)
            }
            _ if modifiers.is_empty() => {
                self.skip_statement()?;
                return Ok(None);
            }
            _ => {
                return Err(self.error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                ));
            }
        };
        trace!(
            kind = statement_kind_name(&statement),
            name = statement.name().unwrap_or_default(),
            "parsed declaration"
        );
        Ok(Some(statement))
    }

    fn reject_decorators(&mut self, decorators: &mut Vec<Decorator>) {
        if let Some(first) = decorators.first() {
            let span = first.span;
            self.report(ParseError {
                span,
                message: diagnostic_messages::DECORATORS_ARE_NOT_VALID_HERE.to_string(),
                code: diagnostic_codes::DECORATORS_ARE_NOT_VALID_HERE,
            });
            decorators.clear();
        }
    }

    /// After `export default`: a declaration rather than an expression.
    fn is_default_declaration_start(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ClassKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::AtToken => true,
            SyntaxKind::AbstractKeyword => self.look_ahead_next_is(&[SyntaxKind::ClassKeyword]),
            SyntaxKind::AsyncKeyword => self.look_ahead(|p| {
                p.next_token() == SyntaxKind::FunctionKeyword && !p.has_preceding_line_break()
            }),
            SyntaxKind::TypeKeyword => self.look_ahead_next_is_identifier_on_same_line(),
            _ => false,
        }
    }

    // =========================================================================
    // Variables
    // =========================================================================

    fn parse_variable_statement(
        &mut self,
        start: u32,
        modifiers: Modifiers,
    ) -> ParseResult<VariableStatement> {
        let keyword = match self.token() {
            SyntaxKind::VarKeyword => VariableKeyword::Var,
            SyntaxKind::LetKeyword => VariableKeyword::Let,
            _ => VariableKeyword::Const,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            let declaration_start = self.token_pos();
            if matches!(
                self.token(),
                SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken
            ) {
                let mut names = Vec::new();
                self.parse_binding_names(&mut names)?;
                // The annotation types the whole pattern, not each name.
                self.parse_type_annotation()?;
                let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                    let mut initializer = self.parse_initializer(&[SyntaxKind::CommaToken])?;
                    initializer.function = None;
                    Some(initializer)
                } else {
                    None
                };
                declarations.extend(names.into_iter().map(|(name, span)| VariableDeclaration {
                    span,
                    name,
                    type_annotation: None,
                    initializer: initializer.clone(),
                    from_pattern: true,
                }));
            } else {
                let name = self.parse_identifier()?;
                self.parse_optional(SyntaxKind::ExclamationToken);
                let type_annotation = self.parse_type_annotation()?;
                let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                    Some(self.parse_initializer(&[SyntaxKind::CommaToken])?)
                } else {
                    None
                };
                declarations.push(VariableDeclaration {
                    span: self.span_from(declaration_start),
                    name,
                    type_annotation,
                    initializer,
                    from_pattern: false,
                });
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_semicolon()?;

        Ok(VariableStatement {
            span: self.span_from(start),
            modifiers,
            keyword,
            declarations,
        })
    }

    // =========================================================================
    // Functions and parameters
    // =========================================================================

    fn parse_function_declaration(
        &mut self,
        start: u32,
        modifiers: Modifiers,
    ) -> ParseResult<FunctionDeclaration> {
        let signature_start = self.token_pos();
        self.parse_expected(SyntaxKind::FunctionKeyword)?;
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            Some(self.parse_identifier()?)
        } else if modifiers.contains(Modifiers::DEFAULT) {
            None
        } else {
            return Err(self.error_at_current_token(
                diagnostic_messages::IDENTIFIER_EXPECTED,
                diagnostic_codes::IDENTIFIER_EXPECTED,
            ));
        };
        let type_parameters = self.parse_type_parameters()?;
        let parameters = self.parse_parameter_list()?;
        let return_type = self.parse_optional_return_type()?;
        let signature = Signature {
            span: self.span_from(signature_start),
            kind: SignatureKind::Call,
            type_parameters,
            parameters,
            return_type,
            is_generator,
            is_async: modifiers.contains(Modifiers::ASYNC),
        };

        let has_body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.skip_block()?;
            true
        } else {
            self.parse_semicolon()?;
            false
        };

        Ok(FunctionDeclaration {
            span: self.span_from(start),
            modifiers,
            name,
            signature,
            has_body,
        })
    }

    /// `( p1, p2, ... )` with an optional trailing comma.
    pub(crate) fn parse_parameter_list(&mut self) -> ParseResult<Vec<Parameter>> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) {
            parameters.push(self.parse_parameter()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(parameters)
    }

    pub(crate) fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let start = self.token_pos();
        let decorators = self.parse_decorators()?;
        let modifiers = self.parse_parameter_modifiers();
        let rest = self.parse_optional(SyntaxKind::DotDotDotToken);

        let (name, is_pattern) = match self.token() {
            SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken => {
                let pattern_start = self.token_pos();
                let mut names = Vec::new();
                self.parse_binding_names(&mut names)?;
                (self.source_slice(self.span_from(pattern_start)), true)
            }
            SyntaxKind::ThisKeyword => {
                self.next_token();
                ("this".to_string(), false)
            }
            _ => (self.parse_identifier()?, false),
        };
        let optional = self.parse_optional(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation()?;
        let default_value = if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.skip_expression(&[SyntaxKind::CommaToken])?.text)
        } else {
            None
        };

        Ok(Parameter {
            span: self.span_from(start),
            name,
            is_pattern,
            type_annotation,
            optional,
            has_default: default_value.is_some(),
            default_value,
            rest,
            modifiers,
            decorators,
        })
    }

    /// Accessibility, `readonly` and `override` in front of a parameter name.
    fn parse_parameter_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        while matches!(
            self.token(),
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::OverrideKeyword
        ) && self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || matches!(
                    p.token(),
                    SyntaxKind::OpenBraceToken
                        | SyntaxKind::OpenBracketToken
                        | SyntaxKind::DotDotDotToken
                        | SyntaxKind::ThisKeyword
                )
        }) {
            if let Some(flag) = Modifiers::from_keyword(self.token()) {
                self.add_modifier(&mut modifiers, flag);
            }
            self.next_token();
        }
        modifiers
    }

    /// A parameter with only a name, as in `x => x`.
    pub(crate) fn simple_parameter(&self, name: String, span: Span) -> Parameter {
        Parameter {
            span,
            name,
            is_pattern: false,
            type_annotation: None,
            optional: false,
            has_default: false,
            default_value: None,
            rest: false,
            modifiers: Modifiers::empty(),
            decorators: Vec::new(),
        }
    }

    // =========================================================================
    // Classes, interfaces, enums, type aliases
    // =========================================================================

    fn parse_class_declaration(
        &mut self,
        start: u32,
        modifiers: Modifiers,
        decorators: Vec<Decorator>,
    ) -> ParseResult<ClassDeclaration> {
        self.parse_expected(SyntaxKind::ClassKeyword)?;
        let name = if self.is_identifier()
            && !matches!(
                self.token(),
                SyntaxKind::ImplementsKeyword | SyntaxKind::ExtendsKeyword
            ) {
            Some(self.parse_identifier()?)
        } else if modifiers.contains(Modifiers::DEFAULT) {
            None
        } else {
            return Err(self.error_at_current_token(
                diagnostic_messages::IDENTIFIER_EXPECTED,
                diagnostic_codes::IDENTIFIER_EXPECTED,
            ));
        };
        let type_parameters = self.parse_type_parameters()?;

        let mut extends = None;
        let mut implements = Vec::new();
        loop {
            if self.parse_optional(SyntaxKind::ExtendsKeyword) {
                extends = Some(self.parse_heritage_type()?);
            } else if self.parse_optional(SyntaxKind::ImplementsKeyword) {
                loop {
                    implements.push(self.parse_heritage_type()?);
                    if !self.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
            } else {
                break;
            }
        }

        let members = self.parse_class_members()?;
        Ok(ClassDeclaration {
            span: self.span_from(start),
            modifiers,
            name,
            type_parameters,
            extends,
            implements,
            members,
            decorators,
        })
    }

    /// `Base`, `ns.Base<T>`, or an expression such as `mixin(Base)`, which is
    /// kept as text.
    fn parse_heritage_type(&mut self) -> ParseResult<TypeExpr> {
        let start = self.token_pos();
        let mut name = self.parse_entity_name()?;
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skip_expression(&[
                SyntaxKind::CommaToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::ImplementsKeyword,
            ])?;
            name = self.source_slice(self.span_from(start));
            return Ok(TypeExpr::Reference {
                name,
                type_arguments: Vec::new(),
            });
        }
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            self.parse_type_arguments()?
        } else {
            Vec::new()
        };
        Ok(TypeExpr::Reference {
            name,
            type_arguments,
        })
    }

    fn parse_interface_declaration(
        &mut self,
        start: u32,
        modifiers: Modifiers,
    ) -> ParseResult<InterfaceDeclaration> {
        self.parse_expected(SyntaxKind::InterfaceKeyword)?;
        let name = self.parse_identifier()?;
        let type_parameters = self.parse_type_parameters()?;
        let mut extends = Vec::new();
        if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            loop {
                extends.push(self.parse_heritage_type()?);
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        let members = self.parse_type_members(true)?;
        Ok(InterfaceDeclaration {
            span: self.span_from(start),
            modifiers,
            name,
            type_parameters,
            extends,
            members,
        })
    }

    fn parse_enum_declaration(
        &mut self,
        start: u32,
        modifiers: Modifiers,
    ) -> ParseResult<EnumDeclaration> {
        self.parse_expected(SyntaxKind::EnumKeyword)?;
        let name = self.parse_identifier()?;
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let member_start = self.token_pos();
            let member_name = self.parse_property_name()?;
            let value = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.skip_expression(&[SyntaxKind::CommaToken])?
                    .into_enum_value()
            } else {
                EnumValue::Implicit
            };
            members.push(EnumMember {
                span: self.span_from(member_start),
                name: member_name,
                value,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(EnumDeclaration {
            span: self.span_from(start),
            modifiers,
            name,
            members,
        })
    }

    fn parse_type_alias_declaration(
        &mut self,
        start: u32,
        modifiers: Modifiers,
    ) -> ParseResult<TypeAliasDeclaration> {
        self.parse_expected(SyntaxKind::TypeKeyword)?;
        let name = self.parse_identifier()?;
        let type_parameters = self.parse_type_parameters()?;
        self.parse_expected(SyntaxKind::EqualsToken)?;
        let type_expr = self.parse_type()?;
        self.parse_semicolon()?;
        Ok(TypeAliasDeclaration {
            span: self.span_from(start),
            modifiers,
            name,
            type_parameters,
            type_expr,
        })
    }

    // =========================================================================
    // Namespaces and modules
    // =========================================================================

    fn parse_module_declaration(
        &mut self,
        start: u32,
        modifiers: Modifiers,
    ) -> ParseResult<ModuleDeclaration> {
        if self.parse_optional(SyntaxKind::GlobalKeyword) {
            let body = self.parse_module_block()?;
            return Ok(ModuleDeclaration {
                span: self.span_from(start),
                modifiers,
                name: ModuleName::Global,
                body: Some(body),
            });
        }

        self.next_token();
        if self.is_token(SyntaxKind::StringLiteral) {
            let name = ModuleName::StringLiteral(self.token_value());
            self.next_token();
            let body = if self.is_token(SyntaxKind::OpenBraceToken) {
                Some(self.parse_module_block()?)
            } else {
                self.parse_semicolon()?;
                None
            };
            return Ok(ModuleDeclaration {
                span: self.span_from(start),
                modifiers,
                name,
                body,
            });
        }

        let mut names = vec![self.parse_identifier()?];
        while self.parse_optional(SyntaxKind::DotToken) {
            names.push(self.parse_identifier_name()?);
        }
        let mut body = self.parse_module_block()?;
        let span = self.span_from(start);

        // `namespace A.B.C {}` is `namespace A { export namespace B { ... } }`.
        let inner_modifiers = Modifiers::EXPORT | (modifiers & Modifiers::AMBIENT);
        while names.len() > 1 {
            let Some(name) = names.pop() else { break };
            body = vec![Statement::Module(ModuleDeclaration {
                span,
                modifiers: inner_modifiers,
                name: ModuleName::Identifier(name),
                body: Some(body),
            })];
        }
        let name = names.pop().unwrap_or_default();
        Ok(ModuleDeclaration {
            span,
            modifiers,
            name: ModuleName::Identifier(name),
            body: Some(body),
        })
    }

    fn parse_module_block(&mut self) -> ParseResult<Vec<Statement>> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        self.enter_recursion()?;
        let statements = self.parse_statement_list(true);
        self.exit_recursion();
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(statements)
    }

    // =========================================================================
    // Imports and exports
    // =========================================================================

    fn parse_string_literal(&mut self) -> ParseResult<String> {
        if !self.is_token(SyntaxKind::StringLiteral) {
            return Err(self.expected_error("string literal"));
        }
        let value = self.token_value();
        self.next_token();
        Ok(value)
    }

    /// Import attributes: `with { type: "json" }`.
    fn skip_import_attributes(&mut self) -> ParseResult<()> {
        let is_attributes_keyword = self.is_token(SyntaxKind::WithKeyword)
            || (self.is_token(SyntaxKind::Identifier) && self.token_text() == "assert");
        if is_attributes_keyword
            && !self.has_preceding_line_break()
            && self.look_ahead_next_is(&[SyntaxKind::OpenBraceToken])
        {
            self.next_token();
            self.skip_block()?;
        }
        Ok(())
    }

    fn parse_import_declaration(&mut self, start: u32) -> ParseResult<ImportDeclaration> {
        self.parse_expected(SyntaxKind::ImportKeyword)?;
        let mut declaration = ImportDeclaration {
            span: Span::at(start),
            module_specifier: None,
            bindings: Vec::new(),
            is_type_only: false,
            is_import_equals: false,
            entity: None,
        };

        // import "polyfill";
        if self.is_token(SyntaxKind::StringLiteral) {
            declaration.module_specifier = Some(self.parse_string_literal()?);
            self.skip_import_attributes()?;
            self.parse_semicolon()?;
            declaration.span = self.span_from(start);
            return Ok(declaration);
        }

        if self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|p| match p.next_token() {
                SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken => true,
                SyntaxKind::FromKeyword => p.next_token() != SyntaxKind::StringLiteral,
                _ => p.is_identifier(),
            })
        {
            declaration.is_type_only = true;
            self.next_token();
        }

        // `from` is only a default import name in `import from from "m"`.
        let has_default_binding = if self.is_token(SyntaxKind::FromKeyword) {
            self.look_ahead_next_is(&[
                SyntaxKind::FromKeyword,
                SyntaxKind::EqualsToken,
                SyntaxKind::CommaToken,
            ])
        } else {
            self.is_identifier()
        };
        if has_default_binding {
            let local = self.parse_identifier()?;
            if self.parse_optional(SyntaxKind::EqualsToken) {
                declaration.is_import_equals = true;
                declaration.bindings.push(ImportBinding {
                    imported: "=".to_string(),
                    local,
                    is_type_only: declaration.is_type_only,
                });
                if self.is_token(SyntaxKind::RequireKeyword)
                    && self.look_ahead_next_is(&[SyntaxKind::OpenParenToken])
                {
                    self.next_token();
                    self.parse_expected(SyntaxKind::OpenParenToken)?;
                    declaration.module_specifier = Some(self.parse_string_literal()?);
                    self.parse_expected(SyntaxKind::CloseParenToken)?;
                } else {
                    declaration.entity = Some(self.parse_entity_name()?);
                }
                self.parse_semicolon()?;
                declaration.span = self.span_from(start);
                return Ok(declaration);
            }
            declaration.bindings.push(ImportBinding {
                imported: "default".to_string(),
                local,
                is_type_only: declaration.is_type_only,
            });
            self.parse_optional(SyntaxKind::CommaToken);
        }

        if self.parse_optional(SyntaxKind::AsteriskToken) {
            self.parse_expected(SyntaxKind::AsKeyword)?;
            let local = self.parse_identifier()?;
            declaration.bindings.push(ImportBinding {
                imported: "*".to_string(),
                local,
                is_type_only: declaration.is_type_only,
            });
        } else if self.parse_optional(SyntaxKind::OpenBraceToken) {
            while !self.is_token(SyntaxKind::CloseBraceToken) {
                let is_type_only = self.parse_specifier_type_modifier() || declaration.is_type_only;
                let imported = if self.is_token(SyntaxKind::StringLiteral) {
                    self.parse_string_literal()?
                } else {
                    self.parse_identifier_name()?
                };
                let local = if self.parse_optional(SyntaxKind::AsKeyword) {
                    self.parse_identifier_name()?
                } else {
                    imported.clone()
                };
                declaration.bindings.push(ImportBinding {
                    imported,
                    local,
                    is_type_only,
                });
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken)?;
        }

        self.parse_expected(SyntaxKind::FromKeyword)?;
        declaration.module_specifier = Some(self.parse_string_literal()?);
        self.skip_import_attributes()?;
        self.parse_semicolon()?;
        declaration.span = self.span_from(start);
        Ok(declaration)
    }

    /// `type` in front of an import or export specifier.
    fn parse_specifier_type_modifier(&mut self) -> bool {
        if self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                (p.is_identifier_or_keyword() && !p.is_token(SyntaxKind::AsKeyword))
                    || p.is_token(SyntaxKind::StringLiteral)
            })
        {
            self.next_token();
            return true;
        }
        false
    }

    /// At `export`: `export {`, `export *`, `export =`, `export as namespace`,
    /// `export type {` and `export type *` declare no symbol of their own.
    fn is_export_declaration(&mut self) -> bool {
        match self.next_token() {
            SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken | SyntaxKind::EqualsToken => true,
            SyntaxKind::AsKeyword => self.next_token() == SyntaxKind::NamespaceKeyword,
            SyntaxKind::TypeKeyword => matches!(
                self.next_token(),
                SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
            ),
            _ => false,
        }
    }

    fn parse_export_declaration(&mut self, start: u32) -> ParseResult<ExportDeclaration> {
        self.parse_expected(SyntaxKind::ExportKeyword)?;

        if self.parse_optional(SyntaxKind::EqualsToken) {
            let expression = self.skip_expression(&[])?;
            self.parse_semicolon()?;
            return Ok(ExportDeclaration {
                span: self.span_from(start),
                kind: ExportKind::Assignment(expression.text),
            });
        }

        if self.parse_optional(SyntaxKind::AsKeyword) {
            self.parse_expected(SyntaxKind::NamespaceKeyword)?;
            let name = self.parse_identifier()?;
            self.parse_semicolon()?;
            return Ok(ExportDeclaration {
                span: self.span_from(start),
                kind: ExportKind::GlobalNamespace(name),
            });
        }

        let is_type_only = self.parse_optional(SyntaxKind::TypeKeyword);

        if self.parse_optional(SyntaxKind::AsteriskToken) {
            let alias = if self.parse_optional(SyntaxKind::AsKeyword) {
                Some(self.parse_identifier_name()?)
            } else {
                None
            };
            self.parse_expected(SyntaxKind::FromKeyword)?;
            let module_specifier = self.parse_string_literal()?;
            self.skip_import_attributes()?;
            self.parse_semicolon()?;
            return Ok(ExportDeclaration {
                span: self.span_from(start),
                kind: ExportKind::All {
                    alias,
                    module_specifier,
                },
            });
        }

        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut specifiers = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let specifier_type_only = self.parse_specifier_type_modifier() || is_type_only;
            let local = if self.is_token(SyntaxKind::StringLiteral) {
                self.parse_string_literal()?
            } else {
                self.parse_identifier_name()?
            };
            let exported = if self.parse_optional(SyntaxKind::AsKeyword) {
                if self.is_token(SyntaxKind::StringLiteral) {
                    self.parse_string_literal()?
                } else {
                    self.parse_identifier_name()?
                }
            } else {
                local.clone()
            };
            specifiers.push(ExportSpecifier {
                local,
                exported,
                is_type_only: specifier_type_only,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        let module_specifier = if self.parse_optional(SyntaxKind::FromKeyword) {
            Some(self.parse_string_literal()?)
        } else {
            None
        };
        self.skip_import_attributes()?;
        self.parse_semicolon()?;

        Ok(ExportDeclaration {
            span: self.span_from(start),
            kind: ExportKind::Named {
                specifiers,
                module_specifier,
                is_type_only,
            },
        })
    }

    fn parse_export_default_expression(&mut self, start: u32) -> ParseResult<Statement> {
        let expression = self.skip_expression(&[])?;
        self.parse_semicolon()?;
        Ok(Statement::ExportDefault(ExportDefaultExpression {
            span: self.span_from(start),
            text: expression.text,
        }))
    }
}

fn statement_kind_name(statement: &Statement) -> &'static str {
    match statement {
        Statement::Variable(_) => "variable",
        Statement::Function(_) => "function",
        Statement::Class(_) => "class",
        Statement::Interface(_) => "interface",
        Statement::Enum(_) => "enum",
        Statement::Module(_) => "module",
        Statement::TypeAlias(_) => "type alias",
        Statement::Import(_) => "import",
        Statement::Export(_) => "export",
        Statement::ExportDefault(_) => "export default",
    }
}
