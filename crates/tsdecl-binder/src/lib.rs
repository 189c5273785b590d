//! Symbol resolver/merger for the tsdecl declaration extractor.
//!
//! Consumes parsed files and produces the `SymbolTree`:
//! - the per-file fold folds overload sets, merges interfaces, namespaces
//!   and accessor pairs, promotes constructor parameter properties, and
//!   reports non-mergeable duplicates
//! - the project fold merges global augmentations, ambient modules and
//!   script-file namespaces across files
//!
//! Conflicts never abort binding. They are returned as `Merge` diagnostics
//! and also attached to the symbol they concern.

mod merge;
pub mod project;
pub mod state;
mod state_declaration_binding;
mod state_member_binding;
pub mod symbols;

pub use project::{
    ProjectScope, SymbolTree, assemble_symbol_tree, build_symbol_tree,
    build_symbol_tree_with_options, fold_project,
};
pub use state::{BinderOptions, BinderState, FileScope};
pub use symbols::{DeclarationSite, Symbol, SymbolKind, SymbolName, SymbolTable};
