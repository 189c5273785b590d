//! TypeScript scanner/tokenizer for the tsdecl declaration extractor.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine with save/restore and the
//!   parser-driven re-scan hooks (`>` merging, template continuation,
//!   regular expressions)
//! - `Token` / `tokenize` - immutable token snapshots
//! - `char_codes` - Character classification utilities

pub mod char_codes;

mod syntax_kind;
pub use syntax_kind::{SyntaxKind, text_to_keyword, token_to_string};

mod scanner;
pub use scanner::{ScannerDiagnostic, ScannerSnapshot, ScannerState};

mod token;
pub use token::{Token, tokenize};
