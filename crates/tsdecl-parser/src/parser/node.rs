//! Owned AST for declaration extraction.
//!
//! Nodes own their data; the tree for one file is produced by a single
//! parse call and handed to the binder, which moves type expressions and
//! signatures into symbols. Expressions are never represented structurally:
//! initializers, default values, decorator arguments and computed keys are
//! kept as source text.

use crate::parser::flags::Modifiers;
use serde::Serialize;
use std::sync::Arc;
use tsdecl_common::{LineMap, Span};

// =============================================================================
// Source file
// =============================================================================

/// Parsed representation of one source file.
#[derive(Clone, Debug, Serialize)]
pub struct SourceFile {
    pub file_name: String,
    #[serde(skip)]
    pub text: Arc<str>,
    #[serde(skip)]
    pub line_map: LineMap,
    pub statements: Vec<Statement>,
    /// `.d.ts` and friends: every declaration is ambient.
    pub is_declaration_file: bool,
}

impl SourceFile {
    /// A file with any top-level import or export is a module; otherwise its
    /// declarations share the global scope with other script files.
    #[must_use]
    pub fn is_external_module(&self) -> bool {
        self.statements.iter().any(|stmt| match stmt {
            Statement::Import(_) | Statement::Export(_) | Statement::ExportDefault(_) => true,
            _ => stmt.modifiers().contains(Modifiers::EXPORT),
        })
    }

    /// Source text covered by `span`.
    #[must_use]
    pub fn text_of(&self, span: Span) -> &str {
        span.text(&self.text)
    }
}

// =============================================================================
// Statements
// =============================================================================

/// A top-level or namespace-level declaration.
#[derive(Clone, Debug, Serialize)]
pub enum Statement {
    Variable(VariableStatement),
    Function(FunctionDeclaration),
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    Module(ModuleDeclaration),
    TypeAlias(TypeAliasDeclaration),
    Import(ImportDeclaration),
    Export(ExportDeclaration),
    ExportDefault(ExportDefaultExpression),
}

impl Statement {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Variable(node) => node.span,
            Self::Function(node) => node.span,
            Self::Class(node) => node.span,
            Self::Interface(node) => node.span,
            Self::Enum(node) => node.span,
            Self::Module(node) => node.span,
            Self::TypeAlias(node) => node.span,
            Self::Import(node) => node.span,
            Self::Export(node) => node.span,
            Self::ExportDefault(node) => node.span,
        }
    }

    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        match self {
            Self::Variable(node) => node.modifiers,
            Self::Function(node) => node.modifiers,
            Self::Class(node) => node.modifiers,
            Self::Interface(node) => node.modifiers,
            Self::Enum(node) => node.modifiers,
            Self::Module(node) => node.modifiers,
            Self::TypeAlias(node) => node.modifiers,
            Self::Import(_) | Self::Export(_) => Modifiers::empty(),
            Self::ExportDefault(_) => Modifiers::EXPORT.union(Modifiers::DEFAULT),
        }
    }

    /// Declared name, if the statement declares exactly one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Function(node) => node.name.as_deref(),
            Self::Class(node) => node.name.as_deref(),
            Self::Interface(node) => Some(&node.name),
            Self::Enum(node) => Some(&node.name),
            Self::TypeAlias(node) => Some(&node.name),
            Self::Module(node) => match &node.name {
                ModuleName::Identifier(name) | ModuleName::StringLiteral(name) => Some(name),
                ModuleName::Global => Some("global"),
            },
            Self::Variable(_) | Self::Import(_) | Self::Export(_) | Self::ExportDefault(_) => None,
        }
    }
}

/// `var`/`let`/`const` with one or more declarators.
#[derive(Clone, Debug, Serialize)]
pub struct VariableStatement {
    pub span: Span,
    pub modifiers: Modifiers,
    pub keyword: VariableKeyword,
    pub declarations: Vec<VariableDeclaration>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum VariableKeyword {
    Var,
    Let,
    Const,
}

/// A single declarator. Destructuring patterns are flattened into one
/// declaration per bound name, with `from_pattern` set.
#[derive(Clone, Debug, Serialize)]
pub struct VariableDeclaration {
    pub span: Span,
    pub name: String,
    pub type_annotation: Option<TypeExpr>,
    pub initializer: Option<Initializer>,
    pub from_pattern: bool,
}

/// Initializer expression text, plus the signature when the expression is an
/// arrow function or function expression.
#[derive(Clone, Debug, Serialize)]
pub struct Initializer {
    pub span: Span,
    pub text: String,
    pub function: Option<Signature>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FunctionDeclaration {
    pub span: Span,
    pub modifiers: Modifiers,
    /// `None` only for `export default function () {}`.
    pub name: Option<String>,
    pub signature: Signature,
    pub has_body: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassDeclaration {
    pub span: Span,
    pub modifiers: Modifiers,
    pub name: Option<String>,
    pub type_parameters: Vec<TypeParameter>,
    pub extends: Option<TypeExpr>,
    pub implements: Vec<TypeExpr>,
    pub members: Vec<MemberDeclaration>,
    pub decorators: Vec<Decorator>,
}

#[derive(Clone, Debug, Serialize)]
pub struct InterfaceDeclaration {
    pub span: Span,
    pub modifiers: Modifiers,
    pub name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub extends: Vec<TypeExpr>,
    pub members: Vec<MemberDeclaration>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EnumDeclaration {
    pub span: Span,
    pub modifiers: Modifiers,
    pub name: String,
    pub members: Vec<EnumMember>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EnumMember {
    pub span: Span,
    pub name: PropertyName,
    pub value: EnumValue,
}

/// Enum member initializer, classified but never evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum EnumValue {
    /// No initializer.
    Implicit,
    /// A string literal value (unescaped).
    String(String),
    /// A numeric literal as written, including a leading sign.
    Number(String),
    /// Any other expression, as source text.
    Computed(String),
}

/// `namespace`, `module`, `declare module "x"` and `declare global`.
///
/// Dotted names (`namespace A.B.C`) are desugared into nested declarations,
/// each inner one carrying `EXPORT`.
#[derive(Clone, Debug, Serialize)]
pub struct ModuleDeclaration {
    pub span: Span,
    pub modifiers: Modifiers,
    pub name: ModuleName,
    /// `None` for the shorthand `declare module "x";`.
    pub body: Option<Vec<Statement>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ModuleName {
    Identifier(String),
    StringLiteral(String),
    Global,
}

#[derive(Clone, Debug, Serialize)]
pub struct TypeAliasDeclaration {
    pub span: Span,
    pub modifiers: Modifiers,
    pub name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub type_expr: TypeExpr,
}

// =============================================================================
// Imports and exports
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct ImportDeclaration {
    pub span: Span,
    /// `None` for `import x = A.B` entity aliases.
    pub module_specifier: Option<String>,
    pub bindings: Vec<ImportBinding>,
    pub is_type_only: bool,
    /// `import x = require("m")` or `import x = A.B`.
    pub is_import_equals: bool,
    /// Right-hand side of an entity alias.
    pub entity: Option<String>,
}

/// One local name introduced by an import. `imported` is `default` for a
/// default import and `*` for a namespace import.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImportBinding {
    pub imported: String,
    pub local: String,
    pub is_type_only: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportDeclaration {
    pub span: Span,
    pub kind: ExportKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ExportKind {
    /// `export { a, b as c } [from "m"]`
    Named {
        specifiers: Vec<ExportSpecifier>,
        module_specifier: Option<String>,
        is_type_only: bool,
    },
    /// `export * [as ns] from "m"`
    All {
        alias: Option<String>,
        module_specifier: String,
    },
    /// `export = expr`
    Assignment(String),
    /// `export as namespace X`
    GlobalNamespace(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
    pub is_type_only: bool,
}

/// `export default <expression>`.
#[derive(Clone, Debug, Serialize)]
pub struct ExportDefaultExpression {
    pub span: Span,
    pub text: String,
}

// =============================================================================
// Members
// =============================================================================

/// A class member, interface member or type literal member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberDeclaration {
    pub span: Span,
    pub kind: MemberKind,
    pub name: PropertyName,
    pub modifiers: Modifiers,
    pub decorators: Vec<Decorator>,
    /// Methods, constructors, accessors, call/construct/index signatures.
    pub signature: Option<Signature>,
    /// Property type annotation.
    pub type_annotation: Option<TypeExpr>,
    /// Property initializer source text.
    pub initializer: Option<String>,
    pub has_body: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MemberKind {
    Property,
    Method,
    Constructor,
    GetAccessor,
    SetAccessor,
    IndexSignature,
    CallSignature,
    ConstructSignature,
    StaticBlock,
}

/// Name of a property, method or enum member.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PropertyName {
    Identifier(String),
    /// `#name`, stored without the `#`.
    Private(String),
    StringLiteral(String),
    NumericLiteral(String),
    /// `[expr]` whose expression is not a literal, as source text.
    Computed(String),
    /// Constructors, index signatures and static blocks.
    None,
}

impl PropertyName {
    /// Lookup text: literal keys normalize to their value, so `"a"`, `a`
    /// and `["a"]` name the same property.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Identifier(name)
            | Self::Private(name)
            | Self::StringLiteral(name)
            | Self::NumericLiteral(name)
            | Self::Computed(name) => name,
            Self::None => "",
        }
    }
}

// =============================================================================
// Signatures, parameters, decorators
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SignatureKind {
    Call,
    Construct,
    Get,
    Set,
    Index,
}

/// One callable shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub span: Span,
    pub kind: SignatureKind,
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeExpr>,
    pub is_generator: bool,
    pub is_async: bool,
}

impl Signature {
    /// Number of parameters a caller must supply.
    #[must_use]
    pub fn min_arity(&self) -> usize {
        self.parameters
            .iter()
            .filter(|p| !p.optional && !p.has_default && !p.rest && p.name != "this")
            .count()
    }

    /// Maximum number of arguments, or `None` with a rest parameter.
    #[must_use]
    pub fn max_arity(&self) -> Option<usize> {
        if self.parameters.iter().any(|p| p.rest) {
            return None;
        }
        Some(self.parameters.iter().filter(|p| p.name != "this").count())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub span: Span,
    /// Identifier, or the source text of a binding pattern.
    pub name: String,
    pub is_pattern: bool,
    pub type_annotation: Option<TypeExpr>,
    pub optional: bool,
    pub has_default: bool,
    pub default_value: Option<String>,
    pub rest: bool,
    /// Accessibility, `readonly` and `override`.
    pub modifiers: Modifiers,
    pub decorators: Vec<Decorator>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<TypeExpr>,
    pub default: Option<TypeExpr>,
}

/// `@expr` or `@expr(args)`. Arguments are recorded as source text and never
/// evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Decorator {
    pub span: Span,
    /// Callee text without the `@` and without arguments.
    pub expression: String,
    pub invoked: bool,
    /// Present exactly when `invoked`.
    pub arguments: Option<Vec<String>>,
    /// Source order among the decorators of the same target.
    pub index: u32,
}

// =============================================================================
// Type expressions
// =============================================================================

/// Structural representation of a type annotation. Never evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TypeExpr {
    /// `string`, `number`, `any`, `void`, `never`, `this`, ...
    Keyword(String),
    /// String, numeric, boolean, bigint or template literal, as written.
    Literal(String),
    Reference {
        name: String,
        type_arguments: Vec<TypeExpr>,
    },
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    Array(Box<TypeExpr>),
    Tuple(Vec<TupleElement>),
    Function(Box<FunctionType>),
    TypeLiteral(Vec<MemberDeclaration>),
    Conditional(Box<ConditionalType>),
    Infer {
        name: String,
        constraint: Option<Box<TypeExpr>>,
    },
    Mapped(Box<MappedType>),
    TemplateLiteral {
        head: String,
        spans: Vec<TemplateSpan>,
    },
    IndexedAccess {
        object: Box<TypeExpr>,
        index: Box<TypeExpr>,
    },
    Operator {
        operator: TypeOperator,
        operand: Box<TypeExpr>,
    },
    /// `typeof expr`
    Query {
        expression: String,
        type_arguments: Vec<TypeExpr>,
    },
    /// `import("m").A.B<T>`
    Import {
        argument: String,
        qualifier: Option<String>,
        type_arguments: Vec<TypeExpr>,
    },
    Predicate {
        asserts: bool,
        parameter: String,
        type_expr: Option<Box<TypeExpr>>,
    },
    Parenthesized(Box<TypeExpr>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeOperator {
    KeyOf,
    Unique,
    Readonly,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TupleElement {
    pub name: Option<String>,
    pub type_expr: TypeExpr,
    pub optional: bool,
    pub rest: bool,
}

/// Function or constructor type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionType {
    pub is_constructor: bool,
    pub is_abstract: bool,
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeExpr,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConditionalType {
    pub check_type: TypeExpr,
    pub extends_type: TypeExpr,
    pub true_type: TypeExpr,
    pub false_type: TypeExpr,
}

/// `readonly`/`?` in a mapped type, optionally prefixed with `+` or `-`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MappedModifier {
    None,
    Present,
    Add,
    Remove,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MappedType {
    pub readonly: MappedModifier,
    pub type_parameter: String,
    pub constraint: TypeExpr,
    pub name_type: Option<TypeExpr>,
    pub optional: MappedModifier,
    pub type_expr: Option<TypeExpr>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateSpan {
    pub type_expr: TypeExpr,
    /// Literal text following the substitution.
    pub literal: String,
}
