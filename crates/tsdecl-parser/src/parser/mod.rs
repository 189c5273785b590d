//! Parser module: AST node definitions and the recursive-descent parser.
//!
//! The parser is split by concern, each file adding methods to `ParserState`:
//! - `state.rs` - token cursor, speculation, diagnostics and recovery
//! - `state_statements.rs` - top-level and namespace-level declarations
//! - `state_statements_class_members.rs` - class and interface members
//! - `state_types.rs` - type expressions
//! - `state_expressions.rs` - initializer skipping and function-expression headers

pub mod flags;
pub mod node;
mod node_display;
pub mod state;
mod state_expressions;
mod state_statements;
mod state_statements_class_members;
mod state_types;
