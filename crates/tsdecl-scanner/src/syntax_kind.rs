//! Token kinds.
//!
//! Keywords are scanned as their own kinds; the parser decides per position
//! whether a keyword may stand in for an identifier (`get`, `type`, `module`
//! and friends are only keywords in certain positions).

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,
    // Trivia (only produced when the scanner does not skip trivia)
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,
    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    LessThanEqualsToken,
    LessThanLessThanToken,
    LessThanLessThanEqualsToken,
    GreaterThanToken,
    GreaterThanEqualsToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,
    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,
    // Identifiers
    Identifier,
    PrivateIdentifier,
    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,
    // Strict mode reserved words
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    YieldKeyword,
    // Contextual keywords
    AbstractKeyword,
    AccessorKeyword,
    AsKeyword,
    AssertsKeyword,
    AnyKeyword,
    AsyncKeyword,
    AwaitKeyword,
    BigIntKeyword,
    BooleanKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    GetKeyword,
    InferKeyword,
    IntrinsicKeyword,
    IsKeyword,
    KeyOfKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    ReadonlyKeyword,
    RequireKeyword,
    NumberKeyword,
    ObjectKeyword,
    SatisfiesKeyword,
    SetKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    FromKeyword,
    GlobalKeyword,
    OfKeyword,
    OverrideKeyword,
    OutKeyword,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: Self = Self::BreakKeyword;
    pub const LAST_KEYWORD: Self = Self::OutKeyword;
    pub const FIRST_RESERVED_WORD: Self = Self::BreakKeyword;
    pub const LAST_RESERVED_WORD: Self = Self::WithKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: Self = Self::AbstractKeyword;

    #[must_use]
    pub fn is_keyword(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_KEYWORD
    }

    /// Reserved words can never be used as binding identifiers.
    #[must_use]
    pub fn is_reserved_word(self) -> bool {
        self >= Self::FIRST_RESERVED_WORD && self <= Self::LAST_RESERVED_WORD
    }

    /// Identifiers plus every keyword that is not a reserved word.
    #[must_use]
    pub fn is_identifier_like(self) -> bool {
        self == Self::Identifier || (self.is_keyword() && !self.is_reserved_word())
    }

    #[must_use]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NumericLiteral
                | Self::BigIntLiteral
                | Self::StringLiteral
                | Self::RegularExpressionLiteral
                | Self::NoSubstitutionTemplateLiteral
        )
    }

    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::SingleLineCommentTrivia | Self::MultiLineCommentTrivia
        )
    }

    /// Keywords that may appear as class member modifiers.
    #[must_use]
    pub fn is_modifier_keyword(self) -> bool {
        matches!(
            self,
            Self::PublicKeyword
                | Self::PrivateKeyword
                | Self::ProtectedKeyword
                | Self::StaticKeyword
                | Self::ReadonlyKeyword
                | Self::AbstractKeyword
                | Self::OverrideKeyword
                | Self::DeclareKeyword
                | Self::AsyncKeyword
                | Self::AccessorKeyword
                | Self::ExportKeyword
                | Self::DefaultKeyword
                | Self::ConstKeyword
        )
    }

    /// Binary operators and other tokens that continue an expression when
    /// they appear at the start of a new line.
    #[must_use]
    pub fn continues_expression(self) -> bool {
        matches!(
            self,
            Self::DotToken
                | Self::QuestionDotToken
                | Self::QuestionToken
                | Self::QuestionQuestionToken
                | Self::ColonToken
                | Self::EqualsGreaterThanToken
                | Self::PlusToken
                | Self::MinusToken
                | Self::AsteriskToken
                | Self::AsteriskAsteriskToken
                | Self::SlashToken
                | Self::PercentToken
                | Self::AmpersandToken
                | Self::AmpersandAmpersandToken
                | Self::BarToken
                | Self::BarBarToken
                | Self::CaretToken
                | Self::LessThanToken
                | Self::LessThanEqualsToken
                | Self::LessThanLessThanToken
                | Self::GreaterThanToken
                | Self::GreaterThanEqualsToken
                | Self::GreaterThanGreaterThanToken
                | Self::GreaterThanGreaterThanGreaterThanToken
                | Self::EqualsEqualsToken
                | Self::EqualsEqualsEqualsToken
                | Self::ExclamationEqualsToken
                | Self::ExclamationEqualsEqualsToken
                | Self::InstanceOfKeyword
                | Self::InKeyword
                | Self::AsKeyword
                | Self::SatisfiesKeyword
                | Self::TemplateMiddle
                | Self::TemplateTail
        )
    }
}

/// Map identifier text to its keyword kind.
#[must_use]
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    use SyntaxKind as K;
    let kind = match text {
        "break" => K::BreakKeyword,
        "case" => K::CaseKeyword,
        "catch" => K::CatchKeyword,
        "class" => K::ClassKeyword,
        "const" => K::ConstKeyword,
        "continue" => K::ContinueKeyword,
        "debugger" => K::DebuggerKeyword,
        "default" => K::DefaultKeyword,
        "delete" => K::DeleteKeyword,
        "do" => K::DoKeyword,
        "else" => K::ElseKeyword,
        "enum" => K::EnumKeyword,
        "export" => K::ExportKeyword,
        "extends" => K::ExtendsKeyword,
        "false" => K::FalseKeyword,
        "finally" => K::FinallyKeyword,
        "for" => K::ForKeyword,
        "function" => K::FunctionKeyword,
        "if" => K::IfKeyword,
        "import" => K::ImportKeyword,
        "in" => K::InKeyword,
        "instanceof" => K::InstanceOfKeyword,
        "new" => K::NewKeyword,
        "null" => K::NullKeyword,
        "return" => K::ReturnKeyword,
        "super" => K::SuperKeyword,
        "switch" => K::SwitchKeyword,
        "this" => K::ThisKeyword,
        "throw" => K::ThrowKeyword,
        "true" => K::TrueKeyword,
        "try" => K::TryKeyword,
        "typeof" => K::TypeOfKeyword,
        "var" => K::VarKeyword,
        "void" => K::VoidKeyword,
        "while" => K::WhileKeyword,
        "with" => K::WithKeyword,
        "implements" => K::ImplementsKeyword,
        "interface" => K::InterfaceKeyword,
        "let" => K::LetKeyword,
        "package" => K::PackageKeyword,
        "private" => K::PrivateKeyword,
        "protected" => K::ProtectedKeyword,
        "public" => K::PublicKeyword,
        "static" => K::StaticKeyword,
        "yield" => K::YieldKeyword,
        "abstract" => K::AbstractKeyword,
        "accessor" => K::AccessorKeyword,
        "as" => K::AsKeyword,
        "asserts" => K::AssertsKeyword,
        "any" => K::AnyKeyword,
        "async" => K::AsyncKeyword,
        "await" => K::AwaitKeyword,
        "bigint" => K::BigIntKeyword,
        "boolean" => K::BooleanKeyword,
        "constructor" => K::ConstructorKeyword,
        "declare" => K::DeclareKeyword,
        "get" => K::GetKeyword,
        "infer" => K::InferKeyword,
        "intrinsic" => K::IntrinsicKeyword,
        "is" => K::IsKeyword,
        "keyof" => K::KeyOfKeyword,
        "module" => K::ModuleKeyword,
        "namespace" => K::NamespaceKeyword,
        "never" => K::NeverKeyword,
        "readonly" => K::ReadonlyKeyword,
        "require" => K::RequireKeyword,
        "number" => K::NumberKeyword,
        "object" => K::ObjectKeyword,
        "satisfies" => K::SatisfiesKeyword,
        "set" => K::SetKeyword,
        "string" => K::StringKeyword,
        "symbol" => K::SymbolKeyword,
        "type" => K::TypeKeyword,
        "undefined" => K::UndefinedKeyword,
        "unique" => K::UniqueKeyword,
        "unknown" => K::UnknownKeyword,
        "from" => K::FromKeyword,
        "global" => K::GlobalKeyword,
        "of" => K::OfKeyword,
        "override" => K::OverrideKeyword,
        "out" => K::OutKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Fixed source text of a punctuation token, used in "'x' expected." messages.
#[must_use]
pub fn token_to_string(kind: SyntaxKind) -> &'static str {
    use SyntaxKind as K;
    match kind {
        K::OpenBraceToken => "{",
        K::CloseBraceToken => "}",
        K::OpenParenToken => "(",
        K::CloseParenToken => ")",
        K::OpenBracketToken => "[",
        K::CloseBracketToken => "]",
        K::DotToken => ".",
        K::DotDotDotToken => "...",
        K::SemicolonToken => ";",
        K::CommaToken => ",",
        K::QuestionDotToken => "?.",
        K::LessThanToken => "<",
        K::GreaterThanToken => ">",
        K::EqualsToken => "=",
        K::EqualsGreaterThanToken => "=>",
        K::QuestionToken => "?",
        K::ColonToken => ":",
        K::AtToken => "@",
        K::BarToken => "|",
        K::AmpersandToken => "&",
        K::AsteriskToken => "*",
        K::Identifier => "identifier",
        K::StringLiteral => "string literal",
        K::EndOfFileToken => "end of file",
        K::ClassKeyword => "class",
        K::ExtendsKeyword => "extends",
        K::FunctionKeyword => "function",
        K::InKeyword => "in",
        K::FromKeyword => "from",
        K::AsKeyword => "as",
        _ => "token",
    }
}
