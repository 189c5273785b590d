//! Parser state: token cursor, speculation, diagnostics and recovery.
//!
//! Parse methods return `ParseResult`. An `Err` unwinds to the nearest
//! recovery point (the statement loop, or the member loop of a class or
//! interface body), which reports it as a diagnostic and resynchronizes at
//! the next declaration boundary. Problems that do not prevent building the
//! node, such as conflicting modifiers, are reported directly and parsing
//! continues.

use std::fmt;
use tracing::{debug, trace};
use tsdecl_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use tsdecl_common::limits::MAX_PARSER_DEPTH;
use tsdecl_common::{Diagnostic, DiagnosticKind, Span};
use tsdecl_scanner::{ScannerSnapshot, ScannerState, SyntaxKind, token_to_string};

// =============================================================================
// Options
// =============================================================================

/// Per-file parser configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Every declaration in the file is ambient.
    pub declaration_file: bool,
}

impl ParserOptions {
    /// Derive options from a file name: `.d.ts`, `.d.mts` and `.d.cts` files
    /// are declaration files.
    #[must_use]
    pub fn for_file_name(file_name: &str) -> Self {
        let lower = file_name.to_ascii_lowercase();
        let declaration_file = [".d.ts", ".d.mts", ".d.cts"]
            .iter()
            .any(|ext| lower.ends_with(ext));
        Self { declaration_file }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// An unexpected token that prevents building the current declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub span: Span,
    pub message: String,
    pub code: u32,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (TS{}) at {}..{}",
            self.message, self.code, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// A parse diagnostic before line/column resolution.
#[derive(Clone, Debug)]
pub(crate) struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
    pub kind: DiagnosticKind,
}

/// Everything needed to backtrack the parser.
pub(crate) struct ParserSnapshot {
    scanner: ScannerSnapshot,
    current_token: SyntaxKind,
    previous_token_end: u32,
    diagnostics_len: usize,
    last_error_pos: Option<u32>,
}

// =============================================================================
// ParserState
// =============================================================================

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) file_name: String,
    pub(crate) options: ParserOptions,
    pub(crate) current_token: SyntaxKind,
    pub(crate) previous_token_end: u32,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    /// Position of the last reported error, to suppress cascades.
    pub(crate) last_error_pos: Option<u32>,
    pub(crate) recursion_depth: u32,
}

impl ParserState {
    #[must_use]
    pub fn new(file_name: String, source_text: &str) -> Self {
        let options = ParserOptions::for_file_name(&file_name);
        Self::with_options(file_name, source_text, options)
    }

    #[must_use]
    pub fn with_options(file_name: String, source_text: &str, options: ParserOptions) -> Self {
        Self {
            scanner: ScannerState::new(source_text, true),
            file_name,
            options,
            current_token: SyntaxKind::Unknown,
            previous_token_end: 0,
            parse_diagnostics: Vec::new(),
            last_error_pos: None,
            recursion_depth: 0,
        }
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) const fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos()
    }

    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end()
    }

    pub(crate) fn token_value(&self) -> String {
        self.scanner.token_value().to_string()
    }

    pub(crate) fn token_text(&self) -> &str {
        self.scanner.token_text()
    }

    pub(crate) const fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.previous_token_end = self.scanner.token_end();
        self.current_token = self.scanner.scan();
        self.current_token
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.previous_token_end.max(start))
    }

    pub(crate) fn source_slice(&self, span: Span) -> String {
        span.text(self.scanner.source_text()).to_string()
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        if self.parse_optional(kind) {
            Ok(())
        } else {
            Err(self.expected_error(token_to_string(kind)))
        }
    }

    /// `'x' expected.` at the current token.
    pub(crate) fn expected_error(&self, expected: &str) -> ParseError {
        self.error_at_current_token(
            format_message(diagnostic_messages::EXPECTED, &[expected]),
            diagnostic_codes::EXPECTED,
        )
    }

    pub(crate) fn error_at_current_token(&self, message: impl Into<String>, code: u32) -> ParseError {
        ParseError {
            span: self.scanner.token_span(),
            message: message.into(),
            code,
        }
    }

    /// Identifier that may be used as a binding name: identifiers and
    /// contextual keywords.
    pub(crate) fn is_identifier(&self) -> bool {
        self.token().is_identifier_like()
    }

    /// Any identifier or keyword, as allowed in property names.
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.token() == SyntaxKind::Identifier || self.token().is_keyword()
    }

    pub(crate) fn parse_identifier(&mut self) -> ParseResult<String> {
        if !self.is_identifier() {
            return Err(self.error_at_current_token(
                diagnostic_messages::IDENTIFIER_EXPECTED,
                diagnostic_codes::IDENTIFIER_EXPECTED,
            ));
        }
        let name = self.token_value();
        self.next_token();
        Ok(name)
    }

    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<String> {
        if !self.is_identifier_or_keyword() {
            return Err(self.error_at_current_token(
                diagnostic_messages::IDENTIFIER_EXPECTED,
                diagnostic_codes::IDENTIFIER_EXPECTED,
            ));
        }
        let name = self.token_value();
        self.next_token();
        Ok(name)
    }

    /// `A.B.C` as text.
    pub(crate) fn parse_entity_name(&mut self) -> ParseResult<String> {
        let mut name = self.parse_identifier_name()?;
        while self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            name.push('.');
            name.push_str(&self.parse_identifier_name()?);
        }
        Ok(name)
    }

    /// Whether automatic semicolon insertion applies before the current token.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) -> ParseResult<()> {
        if self.parse_optional(SyntaxKind::SemicolonToken) || self.can_parse_semicolon() {
            Ok(())
        } else {
            Err(self.expected_error(";"))
        }
    }

    // =========================================================================
    // Speculation
    // =========================================================================

    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.save_state(),
            current_token: self.current_token,
            previous_token_end: self.previous_token_end,
            diagnostics_len: self.parse_diagnostics.len(),
            last_error_pos: self.last_error_pos,
        }
    }

    pub(crate) fn rewind(&mut self, snapshot: ParserSnapshot) {
        self.scanner.restore_state(snapshot.scanner);
        self.current_token = snapshot.current_token;
        self.previous_token_end = snapshot.previous_token_end;
        self.parse_diagnostics.truncate(snapshot.diagnostics_len);
        self.last_error_pos = snapshot.last_error_pos;
    }

    /// Run `f` and rewind, whatever it consumed.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = f(self);
        self.rewind(snapshot);
        result
    }

    /// Run `f`, keeping its progress only when it produces a value.
    pub(crate) fn try_parse<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<Option<T>>,
    ) -> Option<T> {
        let snapshot = self.snapshot();
        match f(self) {
            Ok(Some(value)) => Some(value),
            Ok(None) | Err(_) => {
                self.rewind(snapshot);
                None
            }
        }
    }

    pub(crate) fn next_token_is_on_same_line(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break()
        })
    }

    pub(crate) fn look_ahead_next_is(&mut self, kinds: &[SyntaxKind]) -> bool {
        self.look_ahead(|p| kinds.contains(&p.next_token()))
    }

    pub(crate) fn look_ahead_next_is_identifier_on_same_line(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && p.is_identifier()
        })
    }

    // =========================================================================
    // Depth guard
    // =========================================================================

    pub(crate) fn enter_recursion(&mut self) -> ParseResult<()> {
        if self.recursion_depth >= MAX_PARSER_DEPTH {
            return Err(self.error_at_current_token(
                diagnostic_messages::NESTING_TOO_DEEP,
                diagnostic_codes::NESTING_TOO_DEEP,
            ));
        }
        self.recursion_depth += 1;
        Ok(())
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Record a parse error. Errors at the position of the previous one are
    /// dropped.
    pub(crate) fn report(&mut self, error: ParseError) {
        if self.last_error_pos == Some(error.span.start) {
            return;
        }
        debug!(
            file = %self.file_name,
            pos = error.span.start,
            code = error.code,
            "parse error: {}",
            error.message
        );
        self.last_error_pos = Some(error.span.start);
        self.parse_diagnostics.push(ParseDiagnostic {
            start: error.span.start,
            length: error.span.len(),
            message: error.message,
            code: error.code,
            kind: DiagnosticKind::Parse,
        });
    }

    /// Move scanner diagnostics into the parse diagnostics and resolve every
    /// diagnostic to a line and column, in source order.
    pub(crate) fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        for diag in self.scanner.get_scanner_diagnostics() {
            self.parse_diagnostics.push(ParseDiagnostic {
                start: u32::try_from(diag.pos).unwrap_or(u32::MAX),
                length: u32::try_from(diag.length).unwrap_or(0),
                message: diag.message.to_string(),
                code: diag.code,
                kind: DiagnosticKind::Lex,
            });
        }
        let mut diagnostics = std::mem::take(&mut self.parse_diagnostics);
        diagnostics.sort_by_key(|d| d.start);
        let line_map = self.scanner.line_map();
        diagnostics
            .into_iter()
            .map(|d| {
                Diagnostic::error(
                    &self.file_name,
                    line_map,
                    Span::new(d.start, d.start + d.length),
                    d.kind,
                    d.message,
                    d.code,
                )
            })
            .collect()
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Tokens that begin a declaration at statement level.
    pub(crate) fn is_declaration_keyword(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::ExportKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::NamespaceKeyword
                | SyntaxKind::ModuleKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::ImportKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::AtToken
        )
    }

    /// Discard the failed declaration that began at `start` and stop at the
    /// next declaration boundary: a declaration keyword starting a new line
    /// (or following `;`/`}`), the `}` closing the enclosing block, or end
    /// of file. Nesting is tracked from `start` so braces inside the failed
    /// declaration are skipped as a unit; an unclosed `(` or `[` does not
    /// hide the next declaration.
    pub(crate) fn resync_after_error(&mut self, start: u32) {
        self.scanner.reset_to(start as usize);
        self.next_token();
        let mut nesting = Vec::new();
        let mut previous = self.token();
        self.next_token_balanced(&mut nesting);
        loop {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                break;
            }
            if nesting.is_empty() {
                if self.is_token(SyntaxKind::CloseBraceToken) {
                    break;
                }
                if self.is_token(SyntaxKind::SemicolonToken) {
                    self.next_token();
                    break;
                }
            }
            let in_block = nesting.iter().any(|kind| {
                matches!(
                    kind,
                    SyntaxKind::OpenBraceToken | SyntaxKind::TemplateHead
                )
            });
            if !in_block {
                let after_terminator = matches!(
                    previous,
                    SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken
                );
                if (self.has_preceding_line_break() || after_terminator)
                    && self.is_declaration_keyword()
                {
                    break;
                }
            }
            previous = self.token();
            self.next_token_balanced(&mut nesting);
        }
        trace!(from = start, to = self.token_pos(), "resynchronized");
    }

    /// Member-level variant of `resync_after_error`: stop after a `;` or `,`,
    /// before the closing `}`, or before the first token on a new line.
    pub(crate) fn resync_member(&mut self, start: u32) {
        self.scanner.reset_to(start as usize);
        self.next_token();
        let mut nesting = Vec::new();
        self.next_token_balanced(&mut nesting);
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            if nesting.is_empty() {
                if self.is_token(SyntaxKind::CloseBraceToken) || self.has_preceding_line_break() {
                    break;
                }
                if matches!(
                    self.token(),
                    SyntaxKind::SemicolonToken | SyntaxKind::CommaToken
                ) {
                    self.next_token();
                    break;
                }
            }
            self.next_token_balanced(&mut nesting);
        }
    }
}
