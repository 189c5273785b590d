//! Diagnostic types and message lookup.
//!
//! Every stage reports problems as data rather than aborting: the scanner
//! (unterminated literals and comments), the parser (unexpected tokens,
//! recovered at the next declaration boundary) and the binder (merge
//! conflicts). Codes follow the TypeScript compiler's numbering so that
//! tooling built around `tsc` output can consume them unchanged.

use crate::position::{LineMap, Position};
use crate::span::Span;
use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category (severity).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// Which pipeline stage produced a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// Unterminated string, template or comment.
    Lex,
    /// Unexpected token; the parser resynchronised at the next declaration.
    Parse,
    /// Incompatible overloads, duplicate implementations or duplicate names.
    Merge,
}

/// A position-tagged, non-fatal report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    /// 0-based line of `start`.
    pub line: u32,
    /// 0-based byte column of `start`.
    pub column: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub kind: DiagnosticKind,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic, resolving line/column through `line_map`.
    #[must_use]
    pub fn error(
        file: &str,
        line_map: &LineMap,
        span: Span,
        kind: DiagnosticKind,
        message: String,
        code: u32,
    ) -> Self {
        let position = line_map.offset_to_position(span.start);
        Self {
            file: file.to_string(),
            start: span.start,
            length: span.len(),
            line: position.line,
            column: position.character,
            message_text: message,
            category: DiagnosticCategory::Error,
            kind,
            code,
        }
    }

    /// Create an error diagnostic at an already resolved position. Used when
    /// the line map of the reporting file is no longer at hand.
    #[must_use]
    pub fn error_at(
        file: &str,
        span: Span,
        position: Position,
        kind: DiagnosticKind,
        message: String,
        code: u32,
    ) -> Self {
        Self {
            file: file.to_string(),
            start: span.start,
            length: span.len(),
            line: position.line,
            column: position.character,
            message_text: message,
            category: DiagnosticCategory::Error,
            kind,
            code,
        }
    }

    /// Downgrade or change the category.
    #[must_use]
    pub const fn with_category(mut self, category: DiagnosticCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.start + self.length)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = match self.category {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        write!(
            f,
            "{}({},{}): {} TS{}: {}",
            self.file,
            self.line + 1,
            self.column + 1,
            category,
            self.code,
            self.message_text
        )
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
///
/// Returns the template string with `{0}`, `{1}`, etc. placeholders.
/// Use `format_message()` to fill in the placeholders.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_templates_are_filled_in_order() {
        let template = get_message_template(diagnostic_codes::DUPLICATE_IDENTIFIER).unwrap_or("");
        assert_eq!(format_message(template, &["x"]), "Duplicate identifier 'x'.");
    }

    #[test]
    fn display_uses_one_based_positions() {
        let map = LineMap::build("let a\nlet b");
        let diag = Diagnostic::error(
            "a.ts",
            &map,
            Span::new(6, 9),
            DiagnosticKind::Parse,
            "';' expected.".to_string(),
            diagnostic_codes::EXPECTED,
        );
        assert_eq!(diag.to_string(), "a.ts(2,1): error TS1005: ';' expected.");
    }
}
