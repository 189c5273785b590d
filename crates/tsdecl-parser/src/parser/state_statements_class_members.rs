//! Parser state - class members, interface and type literal members,
//! property names and modifier bookkeeping.

use crate::parser::flags::Modifiers;
use crate::parser::node::{
    Decorator, MemberDeclaration, MemberKind, PropertyName, Signature, SignatureKind,
};
use crate::parser::state::{ParseResult, ParserState};
use tsdecl_common::Span;
use tsdecl_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use tsdecl_scanner::SyntaxKind;

/// Modifier pairs that may not appear on the same declaration.
const CONFLICTING_MODIFIERS: [(Modifiers, Modifiers); 4] = [
    (Modifiers::STATIC, Modifiers::ABSTRACT),
    (Modifiers::PRIVATE, Modifiers::ABSTRACT),
    (Modifiers::ASYNC, Modifiers::ABSTRACT),
    (Modifiers::ACCESSOR, Modifiers::READONLY),
];

fn conflicting_modifier(existing: Modifiers, flag: Modifiers) -> Option<Modifiers> {
    CONFLICTING_MODIFIERS.iter().find_map(|&(a, b)| {
        if flag == a && existing.contains(b) {
            Some(b)
        } else if flag == b && existing.contains(a) {
            Some(a)
        } else {
            None
        }
    })
}

impl ParserState {
    // =========================================================================
    // Modifiers
    // =========================================================================

    /// Add `flag`, read from the current token, to `modifiers`. A repeated or
    /// conflicting modifier is reported and dropped.
    pub(crate) fn add_modifier(&mut self, modifiers: &mut Modifiers, flag: Modifiers) {
        let problem = if modifiers.contains(flag) {
            Some((
                format_message(diagnostic_messages::MODIFIER_ALREADY_SEEN, &[flag.keyword_text()]),
                diagnostic_codes::MODIFIER_ALREADY_SEEN,
            ))
        } else if flag.intersects(Modifiers::ACCESSIBILITY)
            && modifiers.intersects(Modifiers::ACCESSIBILITY)
        {
            Some((
                diagnostic_messages::ACCESSIBILITY_MODIFIER_ALREADY_SEEN.to_string(),
                diagnostic_codes::ACCESSIBILITY_MODIFIER_ALREADY_SEEN,
            ))
        } else {
            conflicting_modifier(*modifiers, flag).map(|existing| {
                (
                    format_message(
                        diagnostic_messages::MODIFIER_CANNOT_BE_USED_WITH_MODIFIER,
                        &[flag.keyword_text(), existing.keyword_text()],
                    ),
                    diagnostic_codes::MODIFIER_CANNOT_BE_USED_WITH_MODIFIER,
                )
            })
        };

        match problem {
            Some((message, code)) => {
                let error = self.error_at_current_token(message, code);
                self.report(error);
            }
            None => *modifiers |= flag,
        }
    }

    /// A modifier keyword is only a modifier when a member name follows it on
    /// the same line; `static: number` declares a property named `static`.
    fn is_class_member_modifier(&mut self) -> bool {
        if !matches!(
            self.token(),
            SyntaxKind::StaticKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::AccessorKeyword
        ) {
            return false;
        }
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break()
                && (p.is_property_name() || p.is_token(SyntaxKind::AsteriskToken))
        })
    }

    // =========================================================================
    // Property names
    // =========================================================================

    pub(crate) fn is_property_name(&self) -> bool {
        self.is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::BigIntLiteral
                    | SyntaxKind::PrivateIdentifier
                    | SyntaxKind::OpenBracketToken
            )
    }

    /// Identifier, keyword, `#private`, string, number or `[computed]`. A
    /// computed key that is a single literal normalizes to that literal.
    pub(crate) fn parse_property_name(&mut self) -> ParseResult<PropertyName> {
        let name = match self.token() {
            SyntaxKind::PrivateIdentifier => {
                PropertyName::Private(self.token_value().trim_start_matches('#').to_string())
            }
            SyntaxKind::StringLiteral => PropertyName::StringLiteral(self.token_value()),
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                PropertyName::NumericLiteral(self.token_value())
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expression = self.skip_expression(&[])?;
                self.parse_expected(SyntaxKind::CloseBracketToken)?;
                let name = match (expression.token_count, expression.leading.first()) {
                    (
                        1,
                        Some((
                            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral,
                            value,
                        )),
                    ) => PropertyName::StringLiteral(value.clone()),
                    (1, Some((SyntaxKind::NumericLiteral, value))) => {
                        PropertyName::NumericLiteral(value.clone())
                    }
                    _ => PropertyName::Computed(expression.text),
                };
                return Ok(name);
            }
            _ if self.is_identifier_or_keyword() => PropertyName::Identifier(self.token_value()),
            _ => {
                return Err(self.error_at_current_token(
                    diagnostic_messages::IDENTIFIER_EXPECTED,
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                ));
            }
        };
        self.next_token();
        Ok(name)
    }

    // =========================================================================
    // Class bodies
    // =========================================================================

    /// `{ members }`. A malformed member is reported and skipped; the rest of
    /// the body is still parsed.
    pub(crate) fn parse_class_members(&mut self) -> ParseResult<Vec<MemberDeclaration>> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => break,
                SyntaxKind::SemicolonToken => {
                    self.next_token();
                    continue;
                }
                _ => {}
            }
            let start = self.token_pos();
            match self.parse_class_member() {
                Ok(member) => members.push(member),
                Err(error) => {
                    self.report(error);
                    self.resync_member(start);
                }
            }
            if self.token_pos() == start
                && !matches!(
                    self.token(),
                    SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
                )
            {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(members)
    }

    fn parse_class_member(&mut self) -> ParseResult<MemberDeclaration> {
        let start = self.token_pos();
        let decorators = self.parse_decorators()?;

        if self.is_token(SyntaxKind::StaticKeyword)
            && self.look_ahead_next_is(&[SyntaxKind::OpenBraceToken])
        {
            self.next_token();
            self.skip_block()?;
            return Ok(MemberDeclaration {
                span: self.span_from(start),
                kind: MemberKind::StaticBlock,
                name: PropertyName::None,
                modifiers: Modifiers::STATIC,
                decorators,
                signature: None,
                type_annotation: None,
                initializer: None,
                has_body: true,
            });
        }

        let mut modifiers = Modifiers::empty();
        while self.is_class_member_modifier() {
            if let Some(flag) = Modifiers::from_keyword(self.token()) {
                self.add_modifier(&mut modifiers, flag);
            }
            self.next_token();
        }

        let member = self.parse_member_rest(start, modifiers, decorators, true)?;
        if !member.has_body {
            self.parse_semicolon()?;
        }
        Ok(member)
    }

    // =========================================================================
    // Interface and type literal bodies
    // =========================================================================

    /// `{ members }` of an interface (`recover`) or a type literal, where an
    /// error unwinds to the enclosing declaration.
    pub(crate) fn parse_type_members(&mut self, recover: bool) -> ParseResult<Vec<MemberDeclaration>> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        self.enter_recursion()?;
        let members = self.parse_type_member_list(recover);
        self.exit_recursion();
        let members = members?;
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(members)
    }

    fn parse_type_member_list(&mut self, recover: bool) -> ParseResult<Vec<MemberDeclaration>> {
        let mut members = Vec::new();
        while !matches!(
            self.token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            let start = self.token_pos();
            match self.parse_type_member() {
                Ok(member) => members.push(member),
                Err(error) if recover => {
                    self.report(error);
                    self.resync_member(start);
                    if self.token_pos() == start
                        && !matches!(
                            self.token(),
                            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
                        )
                    {
                        self.next_token();
                    }
                }
                Err(error) => return Err(error),
            }
        }
        Ok(members)
    }

    fn parse_type_member(&mut self) -> ParseResult<MemberDeclaration> {
        let start = self.token_pos();
        let mut modifiers = Modifiers::empty();
        if self.is_token(SyntaxKind::ReadonlyKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break() && p.is_property_name()
            })
        {
            self.add_modifier(&mut modifiers, Modifiers::READONLY);
            self.next_token();
        }

        let member = self.parse_member_rest(start, modifiers, Vec::new(), false)?;
        if !self.parse_optional(SyntaxKind::SemicolonToken)
            && !self.parse_optional(SyntaxKind::CommaToken)
            && !self.can_parse_semicolon()
        {
            return Err(self.expected_error(";"));
        }
        Ok(member)
    }

    // =========================================================================
    // Shared member grammar
    // =========================================================================

    /// Everything after the modifiers of a class member (`in_class`) or a
    /// type member. Does not consume the trailing separator.
    fn parse_member_rest(
        &mut self,
        start: u32,
        mut modifiers: Modifiers,
        decorators: Vec<Decorator>,
        in_class: bool,
    ) -> ParseResult<MemberDeclaration> {
        let mut member = MemberDeclaration {
            span: Span::at(start),
            kind: MemberKind::Property,
            name: PropertyName::None,
            modifiers,
            decorators,
            signature: None,
            type_annotation: None,
            initializer: None,
            has_body: false,
        };

        if !in_class
            && matches!(
                self.token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            member.kind = MemberKind::CallSignature;
            member.signature =
                Some(self.parse_member_signature(SignatureKind::Call, false, false)?);
        } else if !in_class
            && self.is_token(SyntaxKind::NewKeyword)
            && self.look_ahead_next_is(&[SyntaxKind::OpenParenToken, SyntaxKind::LessThanToken])
        {
            self.next_token();
            member.kind = MemberKind::ConstructSignature;
            member.signature =
                Some(self.parse_member_signature(SignatureKind::Construct, false, false)?);
        } else if self.is_token(SyntaxKind::OpenBracketToken)
            && self.look_ahead_is_index_signature()
        {
            member.kind = MemberKind::IndexSignature;
            member.signature = Some(self.parse_index_signature()?);
        } else if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.look_ahead_is_accessor()
        {
            let (kind, signature_kind) = if self.is_token(SyntaxKind::GetKeyword) {
                (MemberKind::GetAccessor, SignatureKind::Get)
            } else {
                (MemberKind::SetAccessor, SignatureKind::Set)
            };
            self.next_token();
            member.kind = kind;
            member.name = self.parse_property_name()?;
            member.signature = Some(self.parse_member_signature(signature_kind, false, false)?);
            member.has_body = in_class && self.skip_member_body()?;
        } else if in_class && self.is_constructor_start() {
            self.next_token();
            member.kind = MemberKind::Constructor;
            member.signature =
                Some(self.parse_member_signature(SignatureKind::Construct, false, false)?);
            member.has_body = self.skip_member_body()?;
        } else {
            let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
            member.name = self.parse_property_name()?;
            if self.parse_optional(SyntaxKind::QuestionToken) {
                modifiers |= Modifiers::OPTIONAL;
                member.modifiers = modifiers;
            } else if in_class {
                self.parse_optional(SyntaxKind::ExclamationToken);
            }

            if is_generator
                || matches!(
                    self.token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                )
            {
                member.kind = MemberKind::Method;
                member.signature = Some(self.parse_member_signature(
                    SignatureKind::Call,
                    is_generator,
                    modifiers.contains(Modifiers::ASYNC),
                )?);
                member.has_body = in_class && self.skip_member_body()?;
            } else {
                member.type_annotation = self.parse_type_annotation()?;
                if in_class && self.parse_optional(SyntaxKind::EqualsToken) {
                    member.initializer = Some(self.skip_expression(&[])?.text);
                }
            }
        }

        member.span = self.span_from(start);
        Ok(member)
    }

    /// `<T>(params): R` starting at the current token.
    fn parse_member_signature(
        &mut self,
        kind: SignatureKind,
        is_generator: bool,
        is_async: bool,
    ) -> ParseResult<Signature> {
        let start = self.token_pos();
        let type_parameters = self.parse_type_parameters()?;
        let parameters = self.parse_parameter_list()?;
        let return_type = self.parse_optional_return_type()?;
        Ok(Signature {
            span: self.span_from(start),
            kind,
            type_parameters,
            parameters,
            return_type,
            is_generator,
            is_async,
        })
    }

    /// `[key: K]: T`
    fn parse_index_signature(&mut self) -> ParseResult<Signature> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            parameters.push(self.parse_parameter()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        let return_type = self.parse_type_annotation()?;
        Ok(Signature {
            span: self.span_from(start),
            kind: SignatureKind::Index,
            type_parameters: Vec::new(),
            parameters,
            return_type,
            is_generator: false,
            is_async: false,
        })
    }

    /// Skip a `{ body }` if present. Returns whether there was one.
    fn skip_member_body(&mut self) -> ParseResult<bool> {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.skip_block()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// `constructor(` or `"constructor"(`.
    fn is_constructor_start(&mut self) -> bool {
        let names_constructor = self.is_token(SyntaxKind::ConstructorKeyword)
            || (self.is_token(SyntaxKind::StringLiteral) && self.token_value() == "constructor");
        names_constructor
            && self.look_ahead_next_is(&[SyntaxKind::OpenParenToken, SyntaxKind::LessThanToken])
    }

    /// `get`/`set` followed by a member name: `get x()`, not `get()` or
    /// `get: T`.
    fn look_ahead_is_accessor(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !matches!(
                p.token(),
                SyntaxKind::ColonToken
                    | SyntaxKind::EqualsToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::LessThanToken
                    | SyntaxKind::QuestionToken
            ) && p.is_property_name()
        })
    }

    /// `[id:`, `[id,`, `[id?:` or `[...` rather than a computed name.
    fn look_ahead_is_index_signature(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::DotDotDotToken) {
                return true;
            }
            if !p.is_identifier_or_keyword() {
                return false;
            }
            match p.next_token() {
                SyntaxKind::ColonToken | SyntaxKind::CommaToken => true,
                SyntaxKind::QuestionToken => matches!(
                    p.next_token(),
                    SyntaxKind::ColonToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::CloseBracketToken
                ),
                _ => false,
            }
        })
    }
}
