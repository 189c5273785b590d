//! Parser state - expression skipping.
//!
//! Expressions are not part of the declaration model. Function bodies,
//! initializers, default values and decorator arguments are consumed as
//! balanced token runs and recorded as source text. The skipper drives the
//! scanner's re-scan hooks so that template literals, regular expressions and
//! merged `>` operators inside skipped code never unbalance the brackets.

use crate::parser::node::{Decorator, EnumValue, Initializer, Signature, SignatureKind};
use crate::parser::state::{ParseResult, ParserState};
use smallvec::SmallVec;
use tsdecl_common::Span;
use tsdecl_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use tsdecl_scanner::SyntaxKind;

/// What a skipped expression looked like.
pub(crate) struct ExpressionSummary {
    pub span: Span,
    pub text: String,
    /// Kind and cooked value of the first tokens.
    pub leading: SmallVec<[(SyntaxKind, String); 2]>,
    pub token_count: usize,
}

impl ExpressionSummary {
    /// Classify as an enum member value without evaluating it.
    pub(crate) fn into_enum_value(self) -> EnumValue {
        match (self.token_count, self.leading.as_slice()) {
            (1, [(SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral, value)]) => {
                EnumValue::String(value.clone())
            }
            (1, [(SyntaxKind::NumericLiteral, _)]) => EnumValue::Number(self.text),
            (2, [(SyntaxKind::MinusToken | SyntaxKind::PlusToken, _), (SyntaxKind::NumericLiteral, _)]) => {
                EnumValue::Number(self.text.split_whitespace().collect())
            }
            _ => EnumValue::Computed(self.text),
        }
    }
}

/// Tokens after which `/` is a division operator rather than the start of a
/// regular expression.
fn ends_operand(kind: SyntaxKind) -> bool {
    kind.is_identifier_like()
        || kind.is_literal()
        || matches!(
            kind,
            SyntaxKind::ThisKeyword
                | SyntaxKind::SuperKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::TemplateTail
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
        )
}

/// Tokens that can end an expression statement, for automatic semicolon
/// insertion.
fn ends_expression(kind: SyntaxKind) -> bool {
    ends_operand(kind) || kind == SyntaxKind::CloseBraceToken
}

impl ParserState {
    // =========================================================================
    // Balanced token skipping
    // =========================================================================

    /// Consume the current token, keeping `nesting` balanced, and scan the
    /// next one in expression position.
    pub(crate) fn next_token_balanced(&mut self, nesting: &mut Vec<SyntaxKind>) {
        let consumed = self.token();
        match consumed {
            SyntaxKind::OpenBraceToken
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::TemplateHead => nesting.push(consumed),
            SyntaxKind::CloseBraceToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken => {
                nesting.pop();
            }
            _ => {}
        }
        self.next_token();

        // `}` closing a `${...}` substitution continues the template.
        if self.is_token(SyntaxKind::CloseBraceToken)
            && nesting.last() == Some(&SyntaxKind::TemplateHead)
        {
            self.current_token = self.scanner.re_scan_template_token();
            if self.is_token(SyntaxKind::TemplateTail) {
                nesting.pop();
            }
        }
        match self.token() {
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken if !ends_operand(consumed) => {
                self.current_token = self.scanner.re_scan_slash_token();
            }
            SyntaxKind::GreaterThanToken => {
                self.current_token = self.scanner.re_scan_greater_token();
            }
            _ => {}
        }
    }

    /// Skip a `{ ... }` block, including the closing brace.
    pub(crate) fn skip_block(&mut self) -> ParseResult<Span> {
        let start = self.token_pos();
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            return Err(self.expected_error("{"));
        }
        let mut nesting = Vec::new();
        loop {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.expected_error("}"));
            }
            let closes = self.is_token(SyntaxKind::CloseBraceToken) && nesting.len() == 1;
            self.next_token_balanced(&mut nesting);
            if closes {
                break;
            }
        }
        Ok(self.span_from(start))
    }

    /// Skip an expression. Stops, without consuming, at a depth-0 token in
    /// `stops`, at `;`, at an unmatched closing bracket, or where automatic
    /// semicolon insertion ends the expression.
    pub(crate) fn skip_expression(&mut self, stops: &[SyntaxKind]) -> ParseResult<ExpressionSummary> {
        if matches!(
            self.token(),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
        ) {
            self.current_token = self.scanner.re_scan_slash_token();
        }
        let start = self.token_pos();
        let mut end = start;
        let mut nesting = Vec::new();
        let mut leading = SmallVec::new();
        let mut token_count = 0usize;
        let mut previous: Option<SyntaxKind> = None;

        loop {
            let kind = self.token();
            if kind == SyntaxKind::EndOfFileToken {
                if nesting.is_empty() {
                    break;
                }
                return Err(self.expected_error(closing_text(nesting.last().copied())));
            }
            if nesting.is_empty() {
                if stops.contains(&kind)
                    || matches!(
                        kind,
                        SyntaxKind::SemicolonToken
                            | SyntaxKind::CloseBraceToken
                            | SyntaxKind::CloseParenToken
                            | SyntaxKind::CloseBracketToken
                    )
                {
                    break;
                }
                if let Some(previous) = previous {
                    let continues = kind.continues_expression()
                        || matches!(
                            kind,
                            SyntaxKind::OpenParenToken
                                | SyntaxKind::OpenBracketToken
                                | SyntaxKind::TemplateHead
                                | SyntaxKind::NoSubstitutionTemplateLiteral
                        );
                    if self.has_preceding_line_break() && ends_expression(previous) && !continues {
                        break;
                    }
                }
            }
            if leading.len() < 2 {
                leading.push((kind, self.token_value()));
            }
            token_count += 1;
            end = self.token_end();
            previous = Some(kind);
            self.next_token_balanced(&mut nesting);
        }

        if token_count == 0 {
            return Err(self.error_at_current_token(
                diagnostic_messages::EXPRESSION_EXPECTED,
                diagnostic_codes::EXPRESSION_EXPECTED,
            ));
        }
        let span = Span::new(start, end);
        Ok(ExpressionSummary {
            text: self.source_slice(span),
            span,
            leading,
            token_count,
        })
    }

    /// Skip a statement that declares nothing (expression statements, control
    /// flow). Always consumes at least one token.
    pub(crate) fn skip_statement(&mut self) -> ParseResult<()> {
        match self.token() {
            SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken => {
                return Err(self.error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                ));
            }
            SyntaxKind::OpenBraceToken => {
                self.skip_block()?;
                return Ok(());
            }
            _ => {}
        }
        let mut nesting = Vec::new();
        let mut previous = None;
        loop {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                break;
            }
            if nesting.is_empty() && previous.is_some() {
                if self.parse_optional(SyntaxKind::SemicolonToken) {
                    break;
                }
                // `if (x) {} class C {}`: a closed block ends the statement.
                let after_block = previous == Some(SyntaxKind::CloseBraceToken);
                if self.is_token(SyntaxKind::CloseBraceToken)
                    || ((self.has_preceding_line_break() || after_block)
                        && self.is_declaration_keyword())
                {
                    break;
                }
            }
            previous = Some(self.token());
            self.next_token_balanced(&mut nesting);
        }
        Ok(())
    }

    // =========================================================================
    // Initializers
    // =========================================================================

    /// Parse an initializer after `=`, detecting arrow functions and function
    /// expressions so their signatures can be recorded.
    pub(crate) fn parse_initializer(&mut self, stops: &[SyntaxKind]) -> ParseResult<Initializer> {
        let start = self.token_pos();
        let function = self.try_parse(Self::parse_function_expression_header);
        if function.is_some() {
            if self.is_token(SyntaxKind::OpenBraceToken) {
                self.skip_block()?;
                if !self.can_parse_semicolon() && !stops.contains(&self.token()) {
                    self.skip_expression(stops)?;
                }
            } else {
                self.skip_expression(stops)?;
            }
        } else {
            self.skip_expression(stops)?;
        }
        let span = self.span_from(start);
        Ok(Initializer {
            span,
            text: self.source_slice(span),
            function,
        })
    }

    /// Parse the header of `function (...) {`, `async (...) =>`, `x =>` or
    /// `<T>(...): R =>`, leaving the body as the current token. `Ok(None)`
    /// when the expression is something else.
    pub(crate) fn parse_function_expression_header(&mut self) -> ParseResult<Option<Signature>> {
        let start = self.token_pos();
        let is_async = self.is_token(SyntaxKind::AsyncKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && (p.is_identifier()
                        || matches!(
                            p.token(),
                            SyntaxKind::FunctionKeyword
                                | SyntaxKind::OpenParenToken
                                | SyntaxKind::LessThanToken
                        ))
            });
        if is_async {
            self.next_token();
        }

        if self.is_token(SyntaxKind::FunctionKeyword) {
            self.next_token();
            let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
            if self.is_identifier() {
                self.next_token();
            }
            let type_parameters = self.parse_type_parameters()?;
            let parameters = self.parse_parameter_list()?;
            let return_type = self.parse_optional_return_type()?;
            if !self.is_token(SyntaxKind::OpenBraceToken) {
                return Ok(None);
            }
            return Ok(Some(Signature {
                span: self.span_from(start),
                kind: SignatureKind::Call,
                type_parameters,
                parameters,
                return_type,
                is_generator,
                is_async,
            }));
        }

        // `x => ...`
        if self.is_identifier() && self.look_ahead_next_is(&[SyntaxKind::EqualsGreaterThanToken]) {
            let param_start = self.token_pos();
            let name = self.parse_identifier()?;
            let parameter = self.simple_parameter(name, self.span_from(param_start));
            self.parse_expected(SyntaxKind::EqualsGreaterThanToken)?;
            return Ok(Some(Signature {
                span: self.span_from(start),
                kind: SignatureKind::Call,
                type_parameters: Vec::new(),
                parameters: vec![parameter],
                return_type: None,
                is_generator: false,
                is_async,
            }));
        }

        if !matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            return Ok(None);
        }
        let type_parameters = self.parse_type_parameters()?;
        let parameters = self.parse_parameter_list()?;
        let return_type = self.parse_optional_return_type()?;
        if !self.is_token(SyntaxKind::EqualsGreaterThanToken) || self.has_preceding_line_break() {
            return Ok(None);
        }
        let span = self.span_from(start);
        self.next_token();
        Ok(Some(Signature {
            span,
            kind: SignatureKind::Call,
            type_parameters,
            parameters,
            return_type,
            is_generator: false,
            is_async,
        }))
    }

    // =========================================================================
    // Decorators
    // =========================================================================

    /// Parse `@expr` and `@expr(args)` decorators in source order.
    pub(crate) fn parse_decorators(&mut self) -> ParseResult<Vec<Decorator>> {
        let mut decorators = Vec::new();
        while self.is_token(SyntaxKind::AtToken) {
            let start = self.token_pos();
            self.next_token();
            let expression = if self.is_token(SyntaxKind::OpenParenToken) {
                let open = self.token_pos();
                let mut nesting = Vec::new();
                loop {
                    if self.is_token(SyntaxKind::EndOfFileToken) {
                        return Err(self.expected_error(")"));
                    }
                    let closes = self.is_token(SyntaxKind::CloseParenToken) && nesting.len() == 1;
                    self.next_token_balanced(&mut nesting);
                    if closes {
                        break;
                    }
                }
                self.source_slice(self.span_from(open))
            } else {
                self.parse_entity_name()?
            };
            if self.is_token(SyntaxKind::LessThanToken) {
                self.parse_type_arguments()?;
            }
            let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
                Some(self.parse_argument_texts()?)
            } else {
                None
            };
            decorators.push(Decorator {
                span: self.span_from(start),
                expression,
                invoked: arguments.is_some(),
                arguments,
                index: u32::try_from(decorators.len()).unwrap_or(u32::MAX),
            });
        }
        Ok(decorators)
    }

    /// `(a, b, ...)` as a list of argument source texts.
    fn parse_argument_texts(&mut self) -> ParseResult<Vec<String>> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) {
            let argument = self.skip_expression(&[SyntaxKind::CommaToken])?;
            arguments.push(argument.text);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(arguments)
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    /// Collect every name bound by an identifier or destructuring pattern.
    pub(crate) fn parse_binding_names(&mut self, names: &mut Vec<(String, Span)>) -> ParseResult<()> {
        self.enter_recursion()?;
        let result = match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_names(names),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_names(names),
            _ => {
                let start = self.token_pos();
                self.parse_identifier()
                    .map(|name| names.push((name, self.span_from(start))))
            }
        };
        self.exit_recursion();
        result
    }

    fn parse_object_binding_names(&mut self, names: &mut Vec<(String, Span)>) -> ParseResult<()> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.parse_optional(SyntaxKind::DotDotDotToken) {
                self.parse_binding_names(names)?;
            } else {
                let start = self.token_pos();
                let shorthand = self.is_identifier();
                let key = self.parse_property_name()?;
                if self.parse_optional(SyntaxKind::ColonToken) {
                    self.parse_binding_names(names)?;
                } else if shorthand {
                    names.push((key.text().to_string(), self.span_from(start)));
                } else {
                    return Err(self.expected_error(":"));
                }
                if self.parse_optional(SyntaxKind::EqualsToken) {
                    self.skip_expression(&[SyntaxKind::CommaToken])?;
                }
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)
    }

    fn parse_array_binding_names(&mut self, names: &mut Vec<(String, Span)>) -> ParseResult<()> {
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            if self.parse_optional(SyntaxKind::CommaToken) {
                continue;
            }
            self.parse_optional(SyntaxKind::DotDotDotToken);
            self.parse_binding_names(names)?;
            if self.parse_optional(SyntaxKind::EqualsToken) {
                self.skip_expression(&[SyntaxKind::CommaToken])?;
            }
            if !self.is_token(SyntaxKind::CloseBracketToken) {
                self.parse_expected(SyntaxKind::CommaToken)?;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)
    }
}

fn closing_text(open: Option<SyntaxKind>) -> &'static str {
    match open {
        Some(SyntaxKind::OpenParenToken) => ")",
        Some(SyntaxKind::OpenBracketToken) => "]",
        Some(SyntaxKind::TemplateHead) => "`",
        _ => "}",
    }
}
