//! TypeScript declaration parser for the tsdecl declaration extractor.
//!
//! The parser turns source text into a per-file AST of declarations
//! (`SourceFile`). Function bodies and initializer expressions are skipped as
//! balanced token runs; only their source text is kept. Type expressions are
//! parsed structurally into `TypeExpr` trees and never evaluated.

pub mod parser;

pub use parser::flags::Modifiers;
pub use parser::node::*;
pub use parser::state::{ParseError, ParseResult, ParserOptions, ParserState};

use tsdecl_common::Diagnostic;

/// Parse one source file. Pure function of its inputs: the returned AST and
/// diagnostics depend only on `source_text` and `file_name`.
#[must_use]
pub fn parse_file(source_text: &str, file_name: &str) -> (SourceFile, Vec<Diagnostic>) {
    let options = ParserOptions::for_file_name(file_name);
    ParserState::with_options(file_name.to_string(), source_text, options).parse_source_file()
}
