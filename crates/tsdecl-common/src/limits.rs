//! Centralized limits for the parser.
//!
//! These prevent stack overflow on pathological input. Exceeding a limit is
//! reported as a diagnostic; the offending construct is then skipped.

/// Maximum nesting depth for type expressions, namespace bodies and
/// balanced-token skipping.
///
/// ```typescript
/// type Deep = Array<Array<Array</* ... hundreds of levels ... */>>>;
/// ```
pub const MAX_PARSER_DEPTH: u32 = 512;
