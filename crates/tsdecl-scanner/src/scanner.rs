//! Scanner state machine.
//!
//! The scanner is pull-based: the parser calls `scan()` for the next token and
//! reads the current token through accessors. Where the grammar is not
//! regular the parser feeds context back by asking for a re-scan of the
//! current token:
//!
//! - `re_scan_greater_token` merges `>` with following `>`/`=` characters.
//!   The scanner always produces a lone `>` so that `Array<Array<T>>` closes
//!   two type argument lists; the parser asks for the merged operator only in
//!   expression position.
//! - `re_scan_template_token` continues a template literal after the `}` that
//!   closes an embedded `${...}` span, producing `TemplateMiddle` or
//!   `TemplateTail`.
//! - `re_scan_slash_token` turns `/` or `/=` into a regular expression
//!   literal where the parser expects an operand.
//!
//! `save_state`/`restore_state` make the scanner seekable so the parser can
//! speculate and backtrack.

use crate::char_codes::{
    is_digit, is_hex_digit, is_identifier_part, is_identifier_start, is_line_break,
    is_white_space_single_line,
};
use crate::syntax_kind::{SyntaxKind, text_to_keyword};
use crate::token::Token;
use std::sync::Arc;
use tsdecl_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use tsdecl_common::{LineMap, Span};

/// A lexical error recorded by the scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

/// Everything needed to resume scanning from a previous token.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    unterminated: bool,
    diagnostics_len: usize,
}

pub struct ScannerState {
    text: Arc<str>,
    line_map: LineMap,
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    unterminated: bool,
    skip_trivia: bool,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    /// Create a scanner over `text`. With `skip_trivia == false`, comments are
    /// returned as `SingleLineCommentTrivia`/`MultiLineCommentTrivia` tokens;
    /// whitespace is always skipped.
    pub fn new(text: impl Into<Arc<str>>, skip_trivia: bool) -> Self {
        let text = text.into();
        let line_map = LineMap::build(&text);
        Self {
            text,
            line_map,
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            preceding_line_break: false,
            unterminated: false,
            skip_trivia,
            diagnostics: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    #[must_use]
    pub const fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    #[must_use]
    pub const fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Start of the current token, after leading trivia.
    #[must_use]
    pub fn token_pos(&self) -> u32 {
        to_offset(self.token_start)
    }

    /// Start of the current token including its leading trivia.
    #[must_use]
    pub fn token_full_start(&self) -> u32 {
        to_offset(self.full_start)
    }

    #[must_use]
    pub fn token_end(&self) -> u32 {
        to_offset(self.pos)
    }

    #[must_use]
    pub fn token_span(&self) -> Span {
        Span::new(self.token_pos(), self.token_end())
    }

    /// Raw source text of the current token.
    #[must_use]
    pub fn token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    /// Cooked value: identifier name, unescaped string/template contents, or
    /// the numeric literal without separators.
    #[must_use]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    #[must_use]
    pub const fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    #[must_use]
    pub const fn is_unterminated(&self) -> bool {
        self.unterminated
    }

    #[must_use]
    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    /// Immutable snapshot of the current token.
    #[must_use]
    pub fn current_token(&self) -> Token {
        Token {
            kind: self.token,
            text: self.token_text().to_string(),
            value: self.token_value.clone(),
            span: self.token_span(),
            position: self.line_map.offset_to_position(self.token_pos()),
            preceded_by_line_break: self.preceding_line_break,
        }
    }

    // =========================================================================
    // Seeking
    // =========================================================================

    #[must_use]
    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            unterminated: self.unterminated,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    /// Rewind to a snapshot. Diagnostics reported after the snapshot are
    /// dropped so that speculative scanning never reports twice.
    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.unterminated = snapshot.unterminated;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    /// Position the scanner at `pos` without scanning; the next `scan()`
    /// starts from there. Diagnostics at or after `pos` are dropped, since
    /// rescanning reports them again.
    pub fn reset_to(&mut self, pos: usize) {
        self.pos = pos.min(self.text.len());
        let pos = self.pos;
        self.diagnostics.retain(|d| d.pos < pos);
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token = SyntaxKind::Unknown;
        self.token_value.clear();
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    fn char_at(&self, pos: usize) -> Option<char> {
        let bytes = self.text.as_bytes();
        let b = *bytes.get(pos)?;
        if b.is_ascii() {
            Some(b as char)
        } else {
            self.text.get(pos..)?.chars().next()
        }
    }

    fn byte_at(&self, pos: usize) -> u8 {
        self.text.as_bytes().get(pos).copied().unwrap_or(0)
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
            code,
        });
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.preceding_line_break = false;
        self.unterminated = false;
        self.token_value.clear();

        loop {
            self.token_start = self.pos;
            let Some(ch) = self.char_at(self.pos) else {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };

            if self.pos == 0 && ch == '#' && self.byte_at(1) == b'!' {
                self.skip_to_line_end();
                continue;
            }

            if is_line_break(ch) {
                self.preceding_line_break = true;
                self.pos += ch.len_utf8();
                continue;
            }
            if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
                continue;
            }

            if ch == '/' {
                match self.byte_at(self.pos + 1) {
                    b'/' => {
                        self.skip_to_line_end();
                        if self.skip_trivia {
                            continue;
                        }
                        self.token = SyntaxKind::SingleLineCommentTrivia;
                        return self.token;
                    }
                    b'*' => {
                        self.scan_multi_line_comment();
                        if self.skip_trivia {
                            continue;
                        }
                        self.token = SyntaxKind::MultiLineCommentTrivia;
                        return self.token;
                    }
                    _ => {}
                }
            }

            self.token = self.scan_token(ch);
            return self.token;
        }
    }

    fn skip_to_line_end(&mut self) {
        let rest = &self.text.as_bytes()[self.pos..];
        self.pos += memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
    }

    fn scan_multi_line_comment(&mut self) {
        let start = self.pos;
        let rest = &self.text.as_bytes()[self.pos + 2..];
        match memchr::memmem::find(rest, b"*/") {
            Some(offset) => {
                let body = &rest[..offset];
                if memchr::memchr2(b'\n', b'\r', body).is_some() {
                    self.preceding_line_break = true;
                }
                self.pos += 2 + offset + 2;
            }
            None => {
                self.pos = self.text.len();
                self.unterminated = true;
                self.error(
                    start,
                    self.pos - start,
                    diagnostic_messages::ASTERISK_SLASH_EXPECTED,
                    diagnostic_codes::ASTERISK_SLASH_EXPECTED,
                );
            }
        }
    }

    fn scan_token(&mut self, ch: char) -> SyntaxKind {
        use SyntaxKind as K;
        let next = self.byte_at(self.pos + 1);
        let next2 = self.byte_at(self.pos + 2);

        // (kind, length) for fixed punctuation.
        let punct = match ch {
            '{' => (K::OpenBraceToken, 1),
            '}' => (K::CloseBraceToken, 1),
            '(' => (K::OpenParenToken, 1),
            ')' => (K::CloseParenToken, 1),
            '[' => (K::OpenBracketToken, 1),
            ']' => (K::CloseBracketToken, 1),
            ';' => (K::SemicolonToken, 1),
            ',' => (K::CommaToken, 1),
            ':' => (K::ColonToken, 1),
            '~' => (K::TildeToken, 1),
            '@' => (K::AtToken, 1),
            // Always a lone `>`; see `re_scan_greater_token`.
            '>' => (K::GreaterThanToken, 1),
            '.' => {
                if is_digit(next) {
                    return self.scan_number();
                }
                if next == b'.' && next2 == b'.' {
                    (K::DotDotDotToken, 3)
                } else {
                    (K::DotToken, 1)
                }
            }
            '?' => match next {
                b'.' if !is_digit(next2) => (K::QuestionDotToken, 2),
                b'?' if next2 == b'=' => (K::QuestionQuestionEqualsToken, 3),
                b'?' => (K::QuestionQuestionToken, 2),
                _ => (K::QuestionToken, 1),
            },
            '<' => match next {
                b'<' if next2 == b'=' => (K::LessThanLessThanEqualsToken, 3),
                b'<' => (K::LessThanLessThanToken, 2),
                b'=' => (K::LessThanEqualsToken, 2),
                _ => (K::LessThanToken, 1),
            },
            '=' => match next {
                b'=' if next2 == b'=' => (K::EqualsEqualsEqualsToken, 3),
                b'=' => (K::EqualsEqualsToken, 2),
                b'>' => (K::EqualsGreaterThanToken, 2),
                _ => (K::EqualsToken, 1),
            },
            '!' => match next {
                b'=' if next2 == b'=' => (K::ExclamationEqualsEqualsToken, 3),
                b'=' => (K::ExclamationEqualsToken, 2),
                _ => (K::ExclamationToken, 1),
            },
            '+' => match next {
                b'+' => (K::PlusPlusToken, 2),
                b'=' => (K::PlusEqualsToken, 2),
                _ => (K::PlusToken, 1),
            },
            '-' => match next {
                b'-' => (K::MinusMinusToken, 2),
                b'=' => (K::MinusEqualsToken, 2),
                _ => (K::MinusToken, 1),
            },
            '*' => match next {
                b'*' if next2 == b'=' => (K::AsteriskAsteriskEqualsToken, 3),
                b'*' => (K::AsteriskAsteriskToken, 2),
                b'=' => (K::AsteriskEqualsToken, 2),
                _ => (K::AsteriskToken, 1),
            },
            '/' => match next {
                b'=' => (K::SlashEqualsToken, 2),
                _ => (K::SlashToken, 1),
            },
            '%' => match next {
                b'=' => (K::PercentEqualsToken, 2),
                _ => (K::PercentToken, 1),
            },
            '&' => match next {
                b'&' if next2 == b'=' => (K::AmpersandAmpersandEqualsToken, 3),
                b'&' => (K::AmpersandAmpersandToken, 2),
                b'=' => (K::AmpersandEqualsToken, 2),
                _ => (K::AmpersandToken, 1),
            },
            '|' => match next {
                b'|' if next2 == b'=' => (K::BarBarEqualsToken, 3),
                b'|' => (K::BarBarToken, 2),
                b'=' => (K::BarEqualsToken, 2),
                _ => (K::BarToken, 1),
            },
            '^' => match next {
                b'=' => (K::CaretEqualsToken, 2),
                _ => (K::CaretToken, 1),
            },
            '"' | '\'' => return self.scan_string(ch),
            '`' => return self.scan_template_and_set_token(),
            '#' => {
                let after = self.char_at(self.pos + 1);
                if after.is_some_and(is_identifier_start) {
                    self.pos += 1;
                    self.scan_identifier_rest();
                    self.token_value = self.token_text().to_string();
                    return K::PrivateIdentifier;
                }
                self.invalid_character(ch);
                return K::Unknown;
            }
            c if c.is_ascii_digit() => return self.scan_number(),
            c if is_identifier_start(c) => return self.scan_identifier(),
            _ => {
                self.invalid_character(ch);
                return K::Unknown;
            }
        };
        self.pos += punct.1;
        punct.0
    }

    fn invalid_character(&mut self, ch: char) {
        let start = self.pos;
        self.pos += ch.len_utf8();
        self.error(
            start,
            ch.len_utf8(),
            diagnostic_messages::INVALID_CHARACTER,
            diagnostic_codes::INVALID_CHARACTER,
        );
    }

    fn scan_identifier_rest(&mut self) {
        while let Some(c) = self.char_at(self.pos) {
            if !is_identifier_part(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        self.scan_identifier_rest();
        let text = self.token_text();
        let kind = text_to_keyword(text).unwrap_or(SyntaxKind::Identifier);
        self.token_value = text.to_string();
        kind
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        let len = bytes.len();
        let mut pos = self.pos;
        let radix_prefix = bytes[pos] == b'0'
            && matches!(
                bytes.get(pos + 1),
                Some(b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
            );
        if radix_prefix {
            pos += 2;
            while pos < len && (is_hex_digit(bytes[pos]) || bytes[pos] == b'_') {
                pos += 1;
            }
        } else {
            while pos < len && (is_digit(bytes[pos]) || bytes[pos] == b'_') {
                pos += 1;
            }
            if pos < len && bytes[pos] == b'.' {
                pos += 1;
                while pos < len && (is_digit(bytes[pos]) || bytes[pos] == b'_') {
                    pos += 1;
                }
            }
            if pos < len && matches!(bytes[pos], b'e' | b'E') {
                let mut exp = pos + 1;
                if exp < len && matches!(bytes[exp], b'+' | b'-') {
                    exp += 1;
                }
                if exp < len && is_digit(bytes[exp]) {
                    pos = exp;
                    while pos < len && is_digit(bytes[pos]) {
                        pos += 1;
                    }
                }
            }
        }
        let kind = if pos < len && bytes[pos] == b'n' {
            pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.pos = pos;
        self.token_value = self.token_text().replace('_', "");
        kind
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.char_at(self.pos) {
                None => {
                    self.report_unterminated_string(start);
                    break;
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => {
                    self.pos += 1;
                    self.scan_escape_sequence(&mut value);
                }
                Some('\n' | '\r') => {
                    self.report_unterminated_string(start);
                    break;
                }
                Some(c) => {
                    value.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    fn report_unterminated_string(&mut self, start: usize) {
        self.unterminated = true;
        self.error(
            start,
            self.pos - start,
            diagnostic_messages::UNTERMINATED_STRING_LITERAL,
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        );
    }

    /// Scan the escape after a backslash (already consumed) into `value`.
    fn scan_escape_sequence(&mut self, value: &mut String) {
        let Some(ch) = self.char_at(self.pos) else {
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            'b' => value.push('\u{0008}'),
            'f' => value.push('\u{000C}'),
            'v' => value.push('\u{000B}'),
            '0' if !is_digit(self.byte_at(self.pos)) => value.push('\0'),
            'x' => {
                let digits = self.text.get(self.pos..self.pos + 2).unwrap_or("");
                match u32::from_str_radix(digits, 16).ok().and_then(char::from_u32) {
                    Some(c) if digits.len() == 2 => {
                        value.push(c);
                        self.pos += 2;
                    }
                    _ => value.push('x'),
                }
            }
            'u' => {
                let (digits, consumed) = if self.byte_at(self.pos) == b'{' {
                    let rest = &self.text.as_bytes()[self.pos..];
                    match memchr::memchr(b'}', rest) {
                        Some(close) => (
                            self.text.get(self.pos + 1..self.pos + close).unwrap_or(""),
                            close + 1,
                        ),
                        None => ("", 0),
                    }
                } else {
                    (self.text.get(self.pos..self.pos + 4).unwrap_or(""), 4)
                };
                match u32::from_str_radix(digits, 16).ok().and_then(char::from_u32) {
                    Some(c) => {
                        value.push(c);
                        self.pos += consumed;
                    }
                    None => value.push('u'),
                }
            }
            // Line continuation.
            '\r' => {
                if self.byte_at(self.pos) == b'\n' {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => value.push(other),
        }
    }

    /// Scan template text starting at a '`' or at the `}` closing a
    /// substitution.
    fn scan_template_and_set_token(&mut self) -> SyntaxKind {
        let start = self.pos;
        let started_with_backtick = self.byte_at(self.pos) == b'`';
        self.pos += 1;
        let mut value = String::new();
        let kind = loop {
            match self.char_at(self.pos) {
                None => {
                    self.unterminated = true;
                    self.error(
                        start,
                        self.pos - start,
                        diagnostic_messages::UNTERMINATED_TEMPLATE_LITERAL,
                        diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
                    );
                    break if started_with_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                Some('`') => {
                    self.pos += 1;
                    break if started_with_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                Some('$') if self.byte_at(self.pos + 1) == b'{' => {
                    self.pos += 2;
                    break if started_with_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                Some('\\') => {
                    self.pos += 1;
                    self.scan_escape_sequence(&mut value);
                }
                Some('\r') => {
                    self.pos += 1;
                    if self.byte_at(self.pos) == b'\n' {
                        self.pos += 1;
                    }
                    value.push('\n');
                }
                Some(c) => {
                    value.push(c);
                    self.pos += c.len_utf8();
                }
            }
        };
        self.token_value = value;
        kind
    }

    // =========================================================================
    // Re-scanning (parser feedback)
    // =========================================================================

    /// Merge the current `>` with following `>`/`=` characters. Only valid in
    /// expression position.
    pub fn re_scan_greater_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::GreaterThanToken {
            return self.token;
        }
        let p = self.token_start + 1;
        let (kind, len) = match (self.byte_at(p), self.byte_at(p + 1), self.byte_at(p + 2)) {
            (b'>', b'>', b'=') => (SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 4),
            (b'>', b'>', _) => (SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3),
            (b'>', b'=', _) => (SyntaxKind::GreaterThanGreaterThanEqualsToken, 3),
            (b'>', _, _) => (SyntaxKind::GreaterThanGreaterThanToken, 2),
            (b'=', _, _) => (SyntaxKind::GreaterThanEqualsToken, 2),
            _ => (SyntaxKind::GreaterThanToken, 1),
        };
        self.pos = self.token_start + len;
        self.token = kind;
        kind
    }

    /// Continue a template literal at the current `}` token.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::CloseBraceToken {
            return self.token;
        }
        self.pos = self.token_start;
        self.token = self.scan_template_and_set_token();
        self.token
    }

    /// Re-scan the current `/` or `/=` as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(
            self.token,
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
        ) {
            return self.token;
        }
        let start = self.token_start;
        let mut pos = start + 1;
        let mut in_class = false;
        loop {
            let Some(c) = self.char_at(pos) else {
                self.unterminated = true;
                self.error(
                    start,
                    pos - start,
                    diagnostic_messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                    diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                );
                break;
            };
            if is_line_break(c) {
                self.unterminated = true;
                self.error(
                    start,
                    pos - start,
                    diagnostic_messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                    diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                );
                break;
            }
            pos += c.len_utf8();
            match c {
                '\\' => {
                    if let Some(escaped) = self.char_at(pos) {
                        if !is_line_break(escaped) {
                            pos += escaped.len_utf8();
                        }
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        self.pos = pos;
        if !self.unterminated {
            self.scan_identifier_rest();
        }
        self.token_value = self.token_text().to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }
}

/// Byte position as a `u32` offset, saturating on inputs past 4 GiB.
#[inline]
fn to_offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_saturate_instead_of_wrapping() {
        assert_eq!(to_offset(17), 17);
        assert_eq!(to_offset(u32::MAX as usize), u32::MAX);
        assert_eq!(to_offset(usize::MAX), u32::MAX);
    }

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        let mut scanner = ScannerState::new(source, true);
        let mut out = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFileToken {
                break;
            }
            out.push(kind);
        }
        out
    }

    #[test]
    fn greater_than_is_never_merged_by_default() {
        assert_eq!(
            kinds("a >> b"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::GreaterThanToken,
                SyntaxKind::GreaterThanToken,
                SyntaxKind::Identifier
            ]
        );
    }

    #[test]
    fn re_scan_greater_merges_shift_operators() {
        let mut scanner = ScannerState::new("a >>>= b", true);
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(
            scanner.re_scan_greater_token(),
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
        );
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    }

    #[test]
    fn decorator_and_private_sigils_are_distinct() {
        assert_eq!(
            kinds("@dec #secret plain"),
            vec![
                SyntaxKind::AtToken,
                SyntaxKind::Identifier,
                SyntaxKind::PrivateIdentifier,
                SyntaxKind::Identifier
            ]
        );
    }

    #[test]
    fn template_continues_after_substitution() {
        let mut scanner = ScannerState::new("`on${Name}tail`", true);
        assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
        assert_eq!(scanner.token_value(), "on");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateTail);
        assert_eq!(scanner.token_value(), "tail");
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn unterminated_literals_are_reported() {
        let mut scanner = ScannerState::new("'abc\n/* open", true);
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert!(scanner.is_unterminated());
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        let codes: Vec<u32> = scanner
            .get_scanner_diagnostics()
            .iter()
            .map(|d| d.code)
            .collect();
        assert_eq!(
            codes,
            vec![
                diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                diagnostic_codes::ASTERISK_SLASH_EXPECTED
            ]
        );
    }

    #[test]
    fn restore_state_rewinds_token_and_diagnostics() {
        let mut scanner = ScannerState::new("a `b", true);
        scanner.scan();
        let snapshot = scanner.save_state();
        scanner.scan();
        assert_eq!(scanner.get_scanner_diagnostics().len(), 1);
        scanner.restore_state(snapshot);
        assert_eq!(scanner.token(), SyntaxKind::Identifier);
        assert!(scanner.get_scanner_diagnostics().is_empty());
    }

    #[test]
    fn comments_are_tokens_when_trivia_is_kept() {
        let mut scanner = ScannerState::new("// hi\nx /* c */", false);
        assert_eq!(scanner.scan(), SyntaxKind::SingleLineCommentTrivia);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.scan(), SyntaxKind::MultiLineCommentTrivia);
    }

    #[test]
    fn regex_is_scanned_on_request() {
        let mut scanner = ScannerState::new("/a[/]b/gi.x", true);
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(
            scanner.re_scan_slash_token(),
            SyntaxKind::RegularExpressionLiteral
        );
        assert_eq!(scanner.token_text(), "/a[/]b/gi");
        assert_eq!(scanner.scan(), SyntaxKind::DotToken);
    }

    #[test]
    fn numbers_and_keywords() {
        let mut scanner = ScannerState::new("0x1F 1_000 1e3 10n interface", true);
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "1000");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
        assert_eq!(scanner.scan(), SyntaxKind::InterfaceKeyword);
    }
}
