//! Immutable token snapshots.

use crate::scanner::{ScannerDiagnostic, ScannerState};
use crate::syntax_kind::SyntaxKind;
use serde::Serialize;
use tsdecl_common::{Position, Span};

/// A single token, detached from the scanner that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Raw source text.
    pub text: String,
    /// Cooked value (unescaped literal contents, identifier name).
    pub value: String,
    pub span: Span,
    /// Line/column of `span.start`.
    pub position: Position,
    pub preceded_by_line_break: bool,
}

/// Tokenize a whole source text without parser feedback.
///
/// Template substitutions are tracked with a brace stack so that the `}`
/// closing a `${...}` span continues the template. `>` is never merged and
/// `/` is never treated as a regular expression, since both require the
/// parser to know whether it is in expression position.
#[must_use]
pub fn tokenize(source: &str, skip_trivia: bool) -> (Vec<Token>, Vec<ScannerDiagnostic>) {
    let mut scanner = ScannerState::new(source, skip_trivia);
    let mut tokens = Vec::new();
    // Brace depth at which each open template substitution started.
    let mut template_stack: Vec<u32> = Vec::new();
    let mut depth = 0u32;

    loop {
        let mut kind = scanner.scan();
        match kind {
            SyntaxKind::OpenBraceToken => depth += 1,
            SyntaxKind::CloseBraceToken => {
                if template_stack.last() == Some(&depth) {
                    template_stack.pop();
                    kind = scanner.re_scan_template_token();
                } else {
                    depth = depth.saturating_sub(1);
                }
            }
            _ => {}
        }
        if matches!(
            kind,
            SyntaxKind::TemplateHead | SyntaxKind::TemplateMiddle
        ) {
            template_stack.push(depth);
        }
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push(scanner.current_token());
    }

    (tokens, scanner.get_scanner_diagnostics().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_carry_line_and_column() {
        let (tokens, diags) = tokenize("let a\n  = 1;", true);
        assert!(diags.is_empty());
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[2].kind, SyntaxKind::EqualsToken);
        assert_eq!(tokens[2].position, Position::new(1, 2));
        assert!(tokens[2].preceded_by_line_break);
    }

    #[test]
    fn nested_template_spans() {
        let (tokens, _) = tokenize("`a${ {x: `b${c}`} }d`", true);
        let kinds: Vec<SyntaxKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::TemplateHead,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::Identifier,
                SyntaxKind::ColonToken,
                SyntaxKind::TemplateHead,
                SyntaxKind::Identifier,
                SyntaxKind::TemplateTail,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::TemplateTail,
            ]
        );
        assert_eq!(tokens[8].value, "d");
    }
}
