//! tsdecl: a declaration extractor for TypeScript sources.
//!
//! The pipeline has three stages, one crate each:
//!
//! 1. `tsdecl-scanner` turns text into tokens, with parser-driven re-scans
//!    for `>` runs, template continuations and regular expressions.
//! 2. `tsdecl-parser` builds a per-file AST of declarations. Bodies and
//!    initializers are kept as source text; type expressions are kept as
//!    unevaluated trees.
//! 3. `tsdecl-binder` folds each file into a `FileScope` (overloads,
//!    interface and namespace merging, accessor pairing, parameter property
//!    promotion), then merges global augmentations, ambient modules and
//!    script namespaces across files into the `ProjectScope`.
//!
//! Every stage reports problems as `Diagnostic` values next to its result.
//! Nothing in the pipeline aborts on malformed input.
//!
//! ```ignore
//! let (file, parse_diagnostics) = tsdecl::parse_file("export interface A { x: number }", "a.ts");
//! let (tree, merge_diagnostics) = tsdecl::build_symbol_tree(vec![file]);
//! ```

use rayon::prelude::*;
use tracing::debug_span;

pub mod tracing_config;

pub use tsdecl_binder::{
    BinderOptions, BinderState, DeclarationSite, FileScope, ProjectScope, Symbol, SymbolKind,
    SymbolName, SymbolTable, SymbolTree, assemble_symbol_tree, build_symbol_tree,
    build_symbol_tree_with_options, fold_project,
};
pub use tsdecl_common::{Diagnostic, DiagnosticCategory, DiagnosticKind, LineMap, Position, Span};
pub use tsdecl_parser::{Modifiers, ParserOptions, SourceFile};

/// Stage crates, for callers that need the full AST or token types.
pub use tsdecl_binder as binder;
pub use tsdecl_common as common;
pub use tsdecl_parser as parser;
pub use tsdecl_scanner as scanner;

/// Parse one file. The result depends only on `source_text` and
/// `file_name`; `.d.ts` names are parsed as ambient declaration files.
#[must_use]
pub fn parse_file(source_text: &str, file_name: &str) -> (SourceFile, Vec<Diagnostic>) {
    let _span = debug_span!("parse_file", file = file_name).entered();
    tsdecl_parser::parse_file(source_text, file_name)
}

/// Parse and bind every `(file_name, source_text)` pair on the rayon pool,
/// then run the project fold once all files are done.
///
/// Diagnostics come back grouped by file in input order (parse diagnostics
/// first, then that file's merge conflicts), followed by cross-file merge
/// conflicts. The output is identical to a sequential run.
#[must_use]
pub fn extract_project<N, T>(sources: &[(N, T)]) -> (SymbolTree, Vec<Diagnostic>)
where
    N: AsRef<str> + Sync,
    T: AsRef<str> + Sync,
{
    extract_project_with_options(sources, BinderOptions::default())
}

#[must_use]
pub fn extract_project_with_options<N, T>(
    sources: &[(N, T)],
    options: BinderOptions,
) -> (SymbolTree, Vec<Diagnostic>)
where
    N: AsRef<str> + Sync,
    T: AsRef<str> + Sync,
{
    let _span = debug_span!("extract_project", files = sources.len()).entered();

    // Each file owns its scanner, parser and binder; the indexed collect
    // keeps input order.
    let bound: Vec<(FileScope, Vec<Diagnostic>)> = sources
        .par_iter()
        .map(|(file_name, source_text)| {
            let (file, mut diagnostics) = parse_file(source_text.as_ref(), file_name.as_ref());
            let (scope, merge_diagnostics) = BinderState::bind_file(file, options);
            diagnostics.extend(merge_diagnostics);
            (scope, diagnostics)
        })
        .collect();

    let mut diagnostics = Vec::new();
    let mut scopes = Vec::with_capacity(bound.len());
    for (scope, file_diagnostics) in bound {
        diagnostics.extend(file_diagnostics);
        scopes.push(scope);
    }

    let (tree, project_diagnostics) = assemble_symbol_tree(scopes);
    diagnostics.extend(project_diagnostics);
    (tree, diagnostics)
}
