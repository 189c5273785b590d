//! Canonical text for type expressions and signatures.
//!
//! The printer normalizes whitespace and separators so that the same type
//! written two ways prints the same, which makes type annotations comparable
//! as strings.

use crate::parser::node::{
    Decorator, FunctionType, MappedModifier, MemberDeclaration, MemberKind, Parameter,
    PropertyName, Signature, SignatureKind, TupleElement, TypeExpr, TypeOperator, TypeParameter,
};
use std::fmt::{self, Display, Formatter, Write};

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_type_arguments(f: &mut Formatter<'_>, args: &[TypeExpr]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    f.write_char('<')?;
    write_list(f, args, ", ")?;
    f.write_char('>')
}

fn write_type_parameters(f: &mut Formatter<'_>, params: &[TypeParameter]) -> fmt::Result {
    if params.is_empty() {
        return Ok(());
    }
    f.write_char('<')?;
    write_list(f, params, ", ")?;
    f.write_char('>')
}

fn write_mapped_modifier(f: &mut Formatter<'_>, modifier: MappedModifier) -> fmt::Result {
    match modifier {
        MappedModifier::None | MappedModifier::Present => Ok(()),
        MappedModifier::Add => f.write_char('+'),
        MappedModifier::Remove => f.write_char('-'),
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(text) | Self::Literal(text) => f.write_str(text),
            Self::Reference {
                name,
                type_arguments,
            } => {
                f.write_str(name)?;
                write_type_arguments(f, type_arguments)
            }
            Self::Union(types) => write_list(f, types, " | "),
            Self::Intersection(types) => write_list(f, types, " & "),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Tuple(elements) => {
                f.write_char('[')?;
                write_list(f, elements, ", ")?;
                f.write_char(']')
            }
            Self::Function(function) => write!(f, "{function}"),
            Self::TypeLiteral(members) => {
                if members.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                write_list(f, members, "; ")?;
                f.write_str(" }")
            }
            Self::Conditional(conditional) => write!(
                f,
                "{} extends {} ? {} : {}",
                conditional.check_type,
                conditional.extends_type,
                conditional.true_type,
                conditional.false_type
            ),
            Self::Infer { name, constraint } => {
                write!(f, "infer {name}")?;
                if let Some(constraint) = constraint {
                    write!(f, " extends {constraint}")?;
                }
                Ok(())
            }
            Self::Mapped(mapped) => {
                f.write_str("{ ")?;
                if mapped.readonly != MappedModifier::None {
                    write_mapped_modifier(f, mapped.readonly)?;
                    f.write_str("readonly ")?;
                }
                write!(f, "[{} in {}", mapped.type_parameter, mapped.constraint)?;
                if let Some(name_type) = &mapped.name_type {
                    write!(f, " as {name_type}")?;
                }
                f.write_char(']')?;
                if mapped.optional != MappedModifier::None {
                    write_mapped_modifier(f, mapped.optional)?;
                    f.write_char('?')?;
                }
                if let Some(type_expr) = &mapped.type_expr {
                    write!(f, ": {type_expr}")?;
                }
                f.write_str(" }")
            }
            Self::TemplateLiteral { head, spans } => {
                write!(f, "`{head}")?;
                for span in spans {
                    write!(f, "${{{}}}{}", span.type_expr, span.literal)?;
                }
                f.write_char('`')
            }
            Self::IndexedAccess { object, index } => write!(f, "{object}[{index}]"),
            Self::Operator { operator, operand } => {
                let keyword = match operator {
                    TypeOperator::KeyOf => "keyof",
                    TypeOperator::Unique => "unique",
                    TypeOperator::Readonly => "readonly",
                };
                write!(f, "{keyword} {operand}")
            }
            Self::Query {
                expression,
                type_arguments,
            } => {
                write!(f, "typeof {expression}")?;
                write_type_arguments(f, type_arguments)
            }
            Self::Import {
                argument,
                qualifier,
                type_arguments,
            } => {
                write!(f, "import(\"{argument}\")")?;
                if let Some(qualifier) = qualifier {
                    write!(f, ".{qualifier}")?;
                }
                write_type_arguments(f, type_arguments)
            }
            Self::Predicate {
                asserts,
                parameter,
                type_expr,
            } => {
                if *asserts {
                    f.write_str("asserts ")?;
                }
                f.write_str(parameter)?;
                if let Some(type_expr) = type_expr {
                    write!(f, " is {type_expr}")?;
                }
                Ok(())
            }
            Self::Parenthesized(inner) => write!(f, "({inner})"),
        }
    }
}

impl Display for TupleElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.rest {
            f.write_str("...")?;
        }
        match &self.name {
            Some(name) => {
                f.write_str(name)?;
                if self.optional {
                    f.write_char('?')?;
                }
                write!(f, ": {}", self.type_expr)
            }
            None => {
                write!(f, "{}", self.type_expr)?;
                if self.optional {
                    f.write_char('?')?;
                }
                Ok(())
            }
        }
    }
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_abstract {
            f.write_str("abstract ")?;
        }
        if self.is_constructor {
            f.write_str("new ")?;
        }
        write_type_parameters(f, &self.type_parameters)?;
        f.write_char('(')?;
        write_list(f, &self.parameters, ", ")?;
        write!(f, ") => {}", self.return_type)
    }
}

impl Display for TypeParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(constraint) = &self.constraint {
            write!(f, " extends {constraint}")?;
        }
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.rest {
            f.write_str("...")?;
        }
        f.write_str(&self.name)?;
        if self.optional {
            f.write_char('?')?;
        }
        if let Some(type_annotation) = &self.type_annotation {
            write!(f, ": {type_annotation}")?;
        }
        Ok(())
    }
}

/// `<T>(a: A, b?: B): R`, without any leading name or keyword.
impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.kind == SignatureKind::Index {
            f.write_char('[')?;
            write_list(f, &self.parameters, ", ")?;
            f.write_char(']')?;
        } else {
            write_type_parameters(f, &self.type_parameters)?;
            f.write_char('(')?;
            write_list(f, &self.parameters, ", ")?;
            f.write_char(')')?;
        }
        if let Some(return_type) = &self.return_type {
            write!(f, ": {return_type}")?;
        }
        Ok(())
    }
}

impl Display for PropertyName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) | Self::NumericLiteral(name) => f.write_str(name),
            Self::Private(name) => write!(f, "#{name}"),
            Self::StringLiteral(name) => write!(f, "\"{name}\""),
            Self::Computed(text) => write!(f, "[{text}]"),
            Self::None => Ok(()),
        }
    }
}

impl Display for MemberDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(crate::Modifiers::READONLY) {
            f.write_str("readonly ")?;
        }
        let optional = if self.modifiers.contains(crate::Modifiers::OPTIONAL) {
            "?"
        } else {
            ""
        };
        match (self.kind, &self.signature) {
            (MemberKind::Property, _) | (_, None) => {
                write!(f, "{}{optional}", self.name)?;
                if let Some(type_annotation) = &self.type_annotation {
                    write!(f, ": {type_annotation}")?;
                }
                Ok(())
            }
            (MemberKind::GetAccessor, Some(signature)) => {
                write!(f, "get {}{signature}", self.name)
            }
            (MemberKind::SetAccessor, Some(signature)) => {
                write!(f, "set {}{signature}", self.name)
            }
            (MemberKind::ConstructSignature, Some(signature)) => write!(f, "new {signature}"),
            (MemberKind::Constructor, Some(signature)) => write!(f, "constructor{signature}"),
            (MemberKind::CallSignature | MemberKind::IndexSignature, Some(signature)) => {
                write!(f, "{signature}")
            }
            (_, Some(signature)) => write!(f, "{}{optional}{signature}", self.name),
        }
    }
}

impl Display for Decorator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.expression)?;
        if let Some(arguments) = &self.arguments {
            f.write_char('(')?;
            write_list(f, arguments, ", ")?;
            f.write_char(')')?;
        }
        Ok(())
    }
}
