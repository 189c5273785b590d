//! Project fold and the final symbol tree.
//!
//! The project fold runs once every file has been bound. It merges the
//! fragments that are shared between files: `declare global` contents,
//! `declare module "x"` blocks and the top-level namespaces of script files
//! (files without imports or exports). Files are folded in the order given.

use crate::state::{BinderOptions, BinderState, FileScope};
use crate::symbols::{Symbol, SymbolKind, SymbolTable};
use serde::Serialize;
use tracing::{debug, debug_span};
use tsdecl_common::Diagnostic;
use tsdecl_parser::SourceFile;

/// Declarations shared by all files of a project.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProjectScope {
    pub global: SymbolTable,
    pub ambient_modules: SymbolTable,
    /// Top-level namespaces of script files, merged by qualified name.
    pub namespaces: SymbolTable,
}

impl ProjectScope {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.ambient_modules.is_empty() && self.namespaces.is_empty()
    }

    #[must_use]
    pub fn ambient_module(&self, specifier: &str) -> Option<&Symbol> {
        self.ambient_modules.get(specifier, SymbolKind::Namespace)
    }

    /// Namespace or namespace member by qualified name.
    #[must_use]
    pub fn resolve_namespace(&self, path: &[&str]) -> Option<&Symbol> {
        self.namespaces.resolve(path)
    }
}

/// Result of extraction: one scope per file plus the project-level scope.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SymbolTree {
    pub files: Vec<FileScope>,
    pub project: ProjectScope,
}

impl SymbolTree {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.iter().all(FileScope::is_empty) && self.project.is_empty()
    }

    #[must_use]
    pub fn file(&self, file_name: &str) -> Option<&FileScope> {
        self.files.iter().find(|file| file.file_name == file_name)
    }

    /// Resolve a qualified name against the project namespaces first, then
    /// against each file's top-level scope in file order.
    #[must_use]
    pub fn resolve(&self, path: &[&str]) -> Option<&Symbol> {
        self.project
            .resolve_namespace(path)
            .or_else(|| self.files.iter().find_map(|file| file.resolve(path)))
    }
}

/// Merge the shared fragments of already bound files.
#[must_use]
pub fn fold_project(files: &[FileScope]) -> (ProjectScope, Vec<Diagnostic>) {
    let _span = debug_span!("project_fold", files = files.len()).entered();
    let mut project = ProjectScope::default();
    let mut diagnostics = Vec::new();

    for file in files {
        for symbol in &file.global {
            project.global.declare(symbol.clone(), &mut diagnostics);
        }
        for symbol in &file.ambient_modules {
            project.ambient_modules.declare(symbol.clone(), &mut diagnostics);
        }
        if !file.is_external_module {
            for symbol in file
                .symbols
                .iter()
                .filter(|symbol| symbol.kind == SymbolKind::Namespace)
            {
                project.namespaces.declare(symbol.clone(), &mut diagnostics);
            }
        }
    }

    project.global.fill_implementation_signatures();
    project.ambient_modules.fill_implementation_signatures();
    project.namespaces.fill_implementation_signatures();

    debug!(
        global = project.global.len(),
        ambient_modules = project.ambient_modules.len(),
        namespaces = project.namespaces.len(),
        diagnostics = diagnostics.len(),
        "project fold complete"
    );
    (project, diagnostics)
}

/// Bind every file, then run the project fold. Diagnostics are the merge
/// conflicts of each file in file order, followed by cross-file conflicts.
#[must_use]
pub fn build_symbol_tree(files: Vec<SourceFile>) -> (SymbolTree, Vec<Diagnostic>) {
    build_symbol_tree_with_options(files, BinderOptions::default())
}

#[must_use]
pub fn build_symbol_tree_with_options(
    files: Vec<SourceFile>,
    options: BinderOptions,
) -> (SymbolTree, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let scopes: Vec<FileScope> = files
        .into_iter()
        .map(|file| {
            let (scope, file_diagnostics) = BinderState::bind_file(file, options);
            diagnostics.extend(file_diagnostics);
            scope
        })
        .collect();
    let (tree, project_diagnostics) = assemble_symbol_tree(scopes);
    diagnostics.extend(project_diagnostics);
    (tree, diagnostics)
}

/// Build the tree from file scopes bound elsewhere, e.g. in parallel.
#[must_use]
pub fn assemble_symbol_tree(files: Vec<FileScope>) -> (SymbolTree, Vec<Diagnostic>) {
    let (project, diagnostics) = fold_project(&files);
    (SymbolTree { files, project }, diagnostics)
}
