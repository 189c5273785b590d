//! Parser state - type parsing methods.
//!
//! Precedence, loosest first: function/constructor types, conditional
//! types, unions, intersections, type operators (`keyof`, `unique`,
//! `readonly`, `infer`), postfix array and indexed access, primary types.

use crate::parser::node::{
    ConditionalType, FunctionType, MappedModifier, MappedType, TemplateSpan, TupleElement,
    TypeExpr, TypeOperator, TypeParameter,
};
use crate::parser::state::{ParseResult, ParserState};
use tsdecl_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use tsdecl_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Entry points
    // =========================================================================

    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        self.enter_recursion()?;
        let result = self.parse_type_worker(true);
        self.exit_recursion();
        result
    }

    /// A type in the `extends` clause of a conditional type, where a nested
    /// conditional must be parenthesized.
    fn parse_type_no_conditional(&mut self) -> ParseResult<TypeExpr> {
        self.enter_recursion()?;
        let result = self.parse_type_worker(false);
        self.exit_recursion();
        result
    }

    fn parse_type_worker(&mut self, allow_conditional: bool) -> ParseResult<TypeExpr> {
        if self.is_start_of_function_or_constructor_type() {
            return self.parse_function_or_constructor_type();
        }
        let check_type = self.parse_union_type()?;
        if allow_conditional
            && self.is_token(SyntaxKind::ExtendsKeyword)
            && !self.has_preceding_line_break()
        {
            self.next_token();
            let extends_type = self.parse_type_no_conditional()?;
            self.parse_expected(SyntaxKind::QuestionToken)?;
            let true_type = self.parse_type()?;
            self.parse_expected(SyntaxKind::ColonToken)?;
            let false_type = self.parse_type()?;
            return Ok(TypeExpr::Conditional(Box::new(ConditionalType {
                check_type,
                extends_type,
                true_type,
                false_type,
            })));
        }
        Ok(check_type)
    }

    /// `: T` when present.
    pub(crate) fn parse_type_annotation(&mut self) -> ParseResult<Option<TypeExpr>> {
        if self.parse_optional(SyntaxKind::ColonToken) {
            Ok(Some(self.parse_type()?))
        } else {
            Ok(None)
        }
    }

    /// `: R` after a parameter list, where type predicates are allowed.
    pub(crate) fn parse_optional_return_type(&mut self) -> ParseResult<Option<TypeExpr>> {
        if self.parse_optional(SyntaxKind::ColonToken) {
            Ok(Some(self.parse_return_type()?))
        } else {
            Ok(None)
        }
    }

    /// A return type: `x is T`, `asserts x`, `asserts x is T` or any type.
    pub(crate) fn parse_return_type(&mut self) -> ParseResult<TypeExpr> {
        let asserts = self.is_token(SyntaxKind::AssertsKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && (p.is_identifier() || p.is_token(SyntaxKind::ThisKeyword))
            });
        if asserts {
            self.next_token();
        }
        let is_predicate = asserts
            || ((self.is_identifier() || self.is_token(SyntaxKind::ThisKeyword))
                && self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(SyntaxKind::IsKeyword) && !p.has_preceding_line_break()
                }));
        if !is_predicate {
            return self.parse_type();
        }
        let parameter = self.token_value();
        self.next_token();
        let type_expr = if self.is_token(SyntaxKind::IsKeyword) && !self.has_preceding_line_break()
        {
            self.next_token();
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        Ok(TypeExpr::Predicate {
            asserts,
            parameter,
            type_expr,
        })
    }

    /// `<A, B>` type arguments.
    pub(crate) fn parse_type_arguments(&mut self) -> ParseResult<Vec<TypeExpr>> {
        self.parse_expected(SyntaxKind::LessThanToken)?;
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken) {
            arguments.push(self.parse_type()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken)?;
        Ok(arguments)
    }

    /// `<T extends C = D, ...>`, or nothing.
    pub(crate) fn parse_type_parameters(&mut self) -> ParseResult<Vec<TypeParameter>> {
        let mut parameters = Vec::new();
        if !self.parse_optional(SyntaxKind::LessThanToken) {
            return Ok(parameters);
        }
        while !self.is_token(SyntaxKind::GreaterThanToken) {
            // Variance and const modifiers: `in T`, `out T`, `const T`.
            while matches!(
                self.token(),
                SyntaxKind::InKeyword | SyntaxKind::OutKeyword | SyntaxKind::ConstKeyword
            ) && self.look_ahead(|p| {
                p.next_token();
                p.is_identifier()
            }) {
                self.next_token();
            }
            let name = self.parse_identifier()?;
            let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let default = if self.parse_optional(SyntaxKind::EqualsToken) {
                Some(self.parse_type()?)
            } else {
                None
            };
            parameters.push(TypeParameter {
                name,
                constraint,
                default,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken)?;
        Ok(parameters)
    }

    // =========================================================================
    // Function and constructor types
    // =========================================================================

    fn is_start_of_function_or_constructor_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::LessThanToken | SyntaxKind::NewKeyword => true,
            SyntaxKind::AbstractKeyword => self.look_ahead_next_is(&[SyntaxKind::NewKeyword]),
            SyntaxKind::OpenParenToken => self.look_ahead(Self::is_unambiguously_start_of_function_type),
            _ => false,
        }
    }

    /// After `(`: an empty list, a rest parameter, or a parameter followed by
    /// `:`, `,`, `?`, `=` or `) =>`.
    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        if matches!(
            self.token(),
            SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken
        ) {
            return true;
        }
        if self.skip_parameter_start() {
            if matches!(
                self.token(),
                SyntaxKind::ColonToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::EqualsToken
            ) {
                return true;
            }
            if self.parse_optional(SyntaxKind::CloseParenToken)
                && self.is_token(SyntaxKind::EqualsGreaterThanToken)
            {
                return true;
            }
        }
        false
    }

    fn skip_parameter_start(&mut self) -> bool {
        if self.token().is_modifier_keyword()
            && self.look_ahead(|p| {
                p.next_token();
                p.is_identifier()
            })
        {
            self.next_token();
        }
        if self.is_identifier() || self.is_token(SyntaxKind::ThisKeyword) {
            self.next_token();
            return true;
        }
        if matches!(
            self.token(),
            SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken
        ) {
            let mut nesting = Vec::new();
            loop {
                if self.is_token(SyntaxKind::EndOfFileToken) {
                    return false;
                }
                self.next_token_balanced(&mut nesting);
                if nesting.is_empty() {
                    return true;
                }
            }
        }
        false
    }

    fn parse_function_or_constructor_type(&mut self) -> ParseResult<TypeExpr> {
        let is_abstract = self.parse_optional(SyntaxKind::AbstractKeyword);
        let is_constructor = self.parse_optional(SyntaxKind::NewKeyword);
        let type_parameters = self.parse_type_parameters()?;
        let parameters = self.parse_parameter_list()?;
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken)?;
        let return_type = self.parse_return_type()?;
        Ok(TypeExpr::Function(Box::new(FunctionType {
            is_constructor,
            is_abstract,
            type_parameters,
            parameters,
            return_type,
        })))
    }

    // =========================================================================
    // Unions, intersections, operators
    // =========================================================================

    fn parse_union_type(&mut self) -> ParseResult<TypeExpr> {
        self.parse_optional(SyntaxKind::BarToken);
        let first = self.parse_intersection_type()?;
        if !self.is_token(SyntaxKind::BarToken) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::BarToken) {
            types.push(self.parse_intersection_type()?);
        }
        Ok(TypeExpr::Union(types))
    }

    fn parse_intersection_type(&mut self) -> ParseResult<TypeExpr> {
        self.parse_optional(SyntaxKind::AmpersandToken);
        let first = self.parse_constituent_type()?;
        if !self.is_token(SyntaxKind::AmpersandToken) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            types.push(self.parse_constituent_type()?);
        }
        Ok(TypeExpr::Intersection(types))
    }

    fn parse_constituent_type(&mut self) -> ParseResult<TypeExpr> {
        if self.is_start_of_function_or_constructor_type() {
            return self.parse_function_or_constructor_type();
        }
        self.parse_type_operator_or_higher()
    }

    fn parse_type_operator_or_higher(&mut self) -> ParseResult<TypeExpr> {
        let operator = match self.token() {
            SyntaxKind::KeyOfKeyword => TypeOperator::KeyOf,
            SyntaxKind::UniqueKeyword => TypeOperator::Unique,
            SyntaxKind::ReadonlyKeyword => TypeOperator::Readonly,
            SyntaxKind::InferKeyword => return self.parse_infer_type(),
            _ => return self.parse_postfix_type(),
        };
        self.next_token();
        self.enter_recursion()?;
        let operand = self.parse_type_operator_or_higher();
        self.exit_recursion();
        Ok(TypeExpr::Operator {
            operator,
            operand: Box::new(operand?),
        })
    }

    /// `infer U` or `infer U extends C`. The constraint is only taken when
    /// it is not itself the check type of a conditional.
    fn parse_infer_type(&mut self) -> ParseResult<TypeExpr> {
        self.parse_expected(SyntaxKind::InferKeyword)?;
        let name = self.parse_identifier()?;
        let constraint = if self.is_token(SyntaxKind::ExtendsKeyword) {
            self.try_parse(|p| {
                p.next_token();
                let constraint = p.parse_type_no_conditional()?;
                if p.is_token(SyntaxKind::QuestionToken) {
                    return Ok(None);
                }
                Ok(Some(constraint))
            })
        } else {
            None
        };
        Ok(TypeExpr::Infer {
            name,
            constraint: constraint.map(Box::new),
        })
    }

    fn parse_postfix_type(&mut self) -> ParseResult<TypeExpr> {
        let mut type_expr = self.parse_primary_type()?;
        while self.is_token(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                type_expr = TypeExpr::Array(Box::new(type_expr));
            } else {
                let index = self.parse_type()?;
                self.parse_expected(SyntaxKind::CloseBracketToken)?;
                type_expr = TypeExpr::IndexedAccess {
                    object: Box::new(type_expr),
                    index: Box::new(index),
                };
            }
        }
        Ok(type_expr)
    }

    // =========================================================================
    // Primary types
    // =========================================================================

    fn parse_primary_type(&mut self) -> ParseResult<TypeExpr> {
        match self.token() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::IntrinsicKeyword
                if !self.look_ahead_next_is(&[SyntaxKind::DotToken]) =>
            {
                self.parse_keyword_type()
            }
            SyntaxKind::VoidKeyword | SyntaxKind::NullKeyword | SyntaxKind::ThisKeyword => {
                self.parse_keyword_type()
            }
            SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => {
                let text = self.token_text().to_string();
                self.next_token();
                Ok(TypeExpr::Literal(text))
            }
            SyntaxKind::MinusToken
                if self.look_ahead_next_is(&[
                    SyntaxKind::NumericLiteral,
                    SyntaxKind::BigIntLiteral,
                ]) =>
            {
                self.next_token();
                let text = format!("-{}", self.token_text());
                self.next_token();
                Ok(TypeExpr::Literal(text))
            }
            SyntaxKind::TemplateHead => self.parse_template_literal_type(),
            SyntaxKind::TypeOfKeyword => self.parse_type_query(),
            SyntaxKind::ImportKeyword => self.parse_import_type(),
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead(Self::is_start_of_mapped_type) {
                    self.parse_mapped_type()
                } else {
                    Ok(TypeExpr::TypeLiteral(self.parse_type_members(false)?))
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let inner = self.parse_type()?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                Ok(TypeExpr::Parenthesized(Box::new(inner)))
            }
            _ if self.is_identifier() => self.parse_type_reference(),
            _ => Err(self.error_at_current_token(
                diagnostic_messages::TYPE_EXPECTED,
                diagnostic_codes::TYPE_EXPECTED,
            )),
        }
    }

    fn parse_keyword_type(&mut self) -> ParseResult<TypeExpr> {
        let text = self.token_text().to_string();
        self.next_token();
        Ok(TypeExpr::Keyword(text))
    }

    fn parse_type_reference(&mut self) -> ParseResult<TypeExpr> {
        let name = self.parse_entity_name()?;
        let type_arguments =
            if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
                self.parse_type_arguments()?
            } else {
                Vec::new()
            };
        Ok(TypeExpr::Reference {
            name,
            type_arguments,
        })
    }

    fn parse_type_query(&mut self) -> ParseResult<TypeExpr> {
        self.parse_expected(SyntaxKind::TypeOfKeyword)?;
        let expression = if self.is_token(SyntaxKind::ImportKeyword) {
            self.parse_import_type()?.to_string()
        } else {
            self.parse_entity_name()?
        };
        let type_arguments =
            if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
                self.parse_type_arguments()?
            } else {
                Vec::new()
            };
        Ok(TypeExpr::Query {
            expression,
            type_arguments,
        })
    }

    /// `import("m")`, `import("m").A.B<T>`
    fn parse_import_type(&mut self) -> ParseResult<TypeExpr> {
        self.parse_expected(SyntaxKind::ImportKeyword)?;
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        if !self.is_token(SyntaxKind::StringLiteral) {
            return Err(self.expected_error("string literal"));
        }
        let argument = self.token_value();
        self.next_token();
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        let qualifier = if self.parse_optional(SyntaxKind::DotToken) {
            Some(self.parse_entity_name()?)
        } else {
            None
        };
        let type_arguments =
            if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
                self.parse_type_arguments()?
            } else {
                Vec::new()
            };
        Ok(TypeExpr::Import {
            argument,
            qualifier,
            type_arguments,
        })
    }

    fn parse_template_literal_type(&mut self) -> ParseResult<TypeExpr> {
        let head = self.token_value();
        self.next_token();
        let mut spans = Vec::new();
        loop {
            let type_expr = self.parse_type()?;
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                return Err(self.expected_error("}"));
            }
            self.current_token = self.scanner.re_scan_template_token();
            let literal = self.token_value();
            let done = match self.token() {
                SyntaxKind::TemplateMiddle => false,
                SyntaxKind::TemplateTail => true,
                _ => return Err(self.expected_error("`")),
            };
            spans.push(TemplateSpan { type_expr, literal });
            self.next_token();
            if done {
                break;
            }
        }
        Ok(TypeExpr::TemplateLiteral { head, spans })
    }

    fn parse_tuple_type(&mut self) -> ParseResult<TypeExpr> {
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            let rest = self.parse_optional(SyntaxKind::DotDotDotToken);
            let is_named = self.is_identifier_or_keyword()
                && self.look_ahead(|p| {
                    p.next_token();
                    p.parse_optional(SyntaxKind::QuestionToken);
                    p.is_token(SyntaxKind::ColonToken)
                });
            let element = if is_named {
                let name = self.parse_identifier_name()?;
                let optional = self.parse_optional(SyntaxKind::QuestionToken);
                self.parse_expected(SyntaxKind::ColonToken)?;
                TupleElement {
                    name: Some(name),
                    type_expr: self.parse_type()?,
                    optional,
                    rest,
                }
            } else {
                let type_expr = self.parse_type()?;
                TupleElement {
                    name: None,
                    type_expr,
                    optional: self.parse_optional(SyntaxKind::QuestionToken),
                    rest,
                }
            };
            elements.push(element);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(TypeExpr::Tuple(elements))
    }

    // =========================================================================
    // Mapped types
    // =========================================================================

    fn is_start_of_mapped_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
            return self.next_token() == SyntaxKind::ReadonlyKeyword;
        }
        if self.is_token(SyntaxKind::ReadonlyKeyword) {
            self.next_token();
        }
        if !self.parse_optional(SyntaxKind::OpenBracketToken) || !self.is_identifier() {
            return false;
        }
        self.next_token() == SyntaxKind::InKeyword
    }

    fn parse_mapped_modifier(&mut self, keyword: SyntaxKind) -> ParseResult<MappedModifier> {
        let modifier = match self.token() {
            SyntaxKind::PlusToken => MappedModifier::Add,
            SyntaxKind::MinusToken => MappedModifier::Remove,
            kind if kind == keyword => {
                self.next_token();
                return Ok(MappedModifier::Present);
            }
            _ => return Ok(MappedModifier::None),
        };
        self.next_token();
        self.parse_expected(keyword)?;
        Ok(modifier)
    }

    fn parse_mapped_type(&mut self) -> ParseResult<TypeExpr> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let readonly = self.parse_mapped_modifier(SyntaxKind::ReadonlyKeyword)?;
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let type_parameter = self.parse_identifier()?;
        self.parse_expected(SyntaxKind::InKeyword)?;
        let constraint = self.parse_type()?;
        let name_type = if self.parse_optional(SyntaxKind::AsKeyword) {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        let optional = self.parse_mapped_modifier(SyntaxKind::QuestionToken)?;
        let type_expr = self.parse_type_annotation()?;
        if !self.parse_optional(SyntaxKind::SemicolonToken) {
            self.parse_optional(SyntaxKind::CommaToken);
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(TypeExpr::Mapped(Box::new(MappedType {
            readonly,
            type_parameter,
            constraint,
            name_type,
            optional,
            type_expr,
        })))
    }
}
