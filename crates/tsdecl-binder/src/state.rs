//! Binder state: per-file fold from a parsed `SourceFile` to a `FileScope`.
//!
//! Binding consumes the AST. Signatures, type expressions and decorators are
//! moved into symbols; only `imports` and `exports` keep parser nodes as-is.
//! The binding methods are split across files:
//! - `state_declaration_binding.rs` - statements and namespaces
//! - `state_member_binding.rs` - class and interface members, parameter
//!   property promotion

use crate::symbols::{DeclarationSite, Symbol, SymbolKind, SymbolTable};
use serde::Serialize;
use tracing::{debug, debug_span};
use tsdecl_common::{Diagnostic, LineMap, Span};
use tsdecl_parser::{ExportDeclaration, ImportDeclaration, SourceFile};

/// Binder configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinderOptions {
    /// Report overload signatures that supply fewer arguments than their
    /// implementation requires.
    pub check_overload_arity: bool,
}

impl Default for BinderOptions {
    fn default() -> Self {
        Self {
            check_overload_arity: true,
        }
    }
}

/// Symbols declared by one file.
#[derive(Clone, Debug, Serialize)]
pub struct FileScope {
    pub file_name: String,
    /// Has a top-level import or export; its top-level declarations are
    /// module-scoped.
    pub is_external_module: bool,
    pub is_declaration_file: bool,
    /// Top-level declarations.
    pub symbols: SymbolTable,
    /// `declare module "x"` blocks, keyed by specifier.
    pub ambient_modules: SymbolTable,
    /// Contents of `declare global` blocks.
    pub global: SymbolTable,
    pub imports: Vec<ImportDeclaration>,
    pub exports: Vec<ExportDeclaration>,
}

impl FileScope {
    /// Nothing was declared, imported or exported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
            && self.ambient_modules.is_empty()
            && self.global.is_empty()
            && self.imports.is_empty()
            && self.exports.is_empty()
    }

    /// Top-level symbols carrying `export`.
    pub fn exported_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|symbol| symbol.is_exported())
    }

    #[must_use]
    pub fn resolve(&self, path: &[&str]) -> Option<&Symbol> {
        self.symbols.resolve(path)
    }

    /// Ambient module declared with `specifier`.
    #[must_use]
    pub fn ambient_module(&self, specifier: &str) -> Option<&Symbol> {
        self.ambient_modules.get(specifier, SymbolKind::Namespace)
    }
}

pub struct BinderState {
    pub(crate) file_name: String,
    pub(crate) line_map: LineMap,
    pub(crate) options: BinderOptions,
    /// Inside `declare`, a declaration file, an ambient module or
    /// `declare global`.
    pub(crate) in_ambient_context: bool,
    /// Namespace and ambient module nesting; imports and exports are only
    /// recorded at depth 0.
    pub(crate) container_depth: u32,
    pub(crate) ambient_modules: SymbolTable,
    pub(crate) global: SymbolTable,
    pub(crate) imports: Vec<ImportDeclaration>,
    pub(crate) exports: Vec<ExportDeclaration>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl BinderState {
    #[must_use]
    pub fn new(file_name: String, line_map: LineMap, options: BinderOptions) -> Self {
        Self {
            file_name,
            line_map,
            options,
            in_ambient_context: false,
            container_depth: 0,
            ambient_modules: SymbolTable::new(),
            global: SymbolTable::new(),
            imports: Vec::new(),
            exports: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Fold one parsed file into its `FileScope`. Merge conflicts are
    /// returned in source order.
    #[must_use]
    pub fn bind_file(file: SourceFile, options: BinderOptions) -> (FileScope, Vec<Diagnostic>) {
        let _span = debug_span!("bind_file", file = %file.file_name).entered();
        let is_external_module = file.is_external_module();
        let is_declaration_file = file.is_declaration_file;

        let mut binder = Self::new(file.file_name, file.line_map, options);
        binder.in_ambient_context = is_declaration_file;
        let mut symbols = SymbolTable::new();
        binder.bind_statements(file.statements, &mut symbols);
        binder.finish(symbols, is_external_module, is_declaration_file)
    }

    fn finish(
        mut self,
        mut symbols: SymbolTable,
        is_external_module: bool,
        is_declaration_file: bool,
    ) -> (FileScope, Vec<Diagnostic>) {
        symbols.check_overloads(&self.options, &mut self.diagnostics);
        self.ambient_modules
            .check_overloads(&self.options, &mut self.diagnostics);
        self.global
            .check_overloads(&self.options, &mut self.diagnostics);

        let mut diagnostics = self.diagnostics;
        diagnostics.sort_by_key(|d| d.start);
        debug!(
            file = %self.file_name,
            symbols = symbols.len(),
            ambient_modules = self.ambient_modules.len(),
            global = self.global.len(),
            diagnostics = diagnostics.len(),
            "bound file"
        );

        let scope = FileScope {
            file_name: self.file_name,
            is_external_module,
            is_declaration_file,
            symbols,
            ambient_modules: self.ambient_modules,
            global: self.global,
            imports: self.imports,
            exports: self.exports,
        };
        (scope, diagnostics)
    }

    pub(crate) fn site(&self, span: Span) -> DeclarationSite {
        DeclarationSite {
            file: self.file_name.clone(),
            span,
            position: self.line_map.offset_to_position(span.start),
        }
    }

    /// Run `f` with the ambient flag set to `ambient`, restoring it after.
    pub(crate) fn with_ambient_context<R>(
        &mut self,
        ambient: bool,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let was_in_ambient_context = self.in_ambient_context;
        self.in_ambient_context = ambient;
        let result = f(self);
        self.in_ambient_context = was_in_ambient_context;
        result
    }
}
