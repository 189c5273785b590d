//! Modifier flags for declarations and members.

use bitflags::bitflags;
use serde::Serialize;
use tsdecl_scanner::SyntaxKind;

bitflags! {
    /// Modifiers attached to a declaration, member or parameter.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
    pub struct Modifiers: u32 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const STATIC = 1 << 3;
        const READONLY = 1 << 4;
        const ABSTRACT = 1 << 5;
        const OPTIONAL = 1 << 6;
        const EXPORT = 1 << 7;
        const DEFAULT = 1 << 8;
        /// `declare`
        const AMBIENT = 1 << 9;
        const CONST = 1 << 10;
        const OVERRIDE = 1 << 11;
        const ASYNC = 1 << 12;
        const ACCESSOR = 1 << 13;

        const ACCESSIBILITY = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
        /// Modifiers that turn a constructor parameter into a class property.
        const PARAMETER_PROPERTY = Self::ACCESSIBILITY.bits() | Self::READONLY.bits();
    }
}

impl Modifiers {
    /// The flag a modifier keyword stands for.
    #[must_use]
    pub const fn from_keyword(kind: SyntaxKind) -> Option<Self> {
        let flag = match kind {
            SyntaxKind::PublicKeyword => Self::PUBLIC,
            SyntaxKind::PrivateKeyword => Self::PRIVATE,
            SyntaxKind::ProtectedKeyword => Self::PROTECTED,
            SyntaxKind::StaticKeyword => Self::STATIC,
            SyntaxKind::ReadonlyKeyword => Self::READONLY,
            SyntaxKind::AbstractKeyword => Self::ABSTRACT,
            SyntaxKind::ExportKeyword => Self::EXPORT,
            SyntaxKind::DefaultKeyword => Self::DEFAULT,
            SyntaxKind::DeclareKeyword => Self::AMBIENT,
            SyntaxKind::ConstKeyword => Self::CONST,
            SyntaxKind::OverrideKeyword => Self::OVERRIDE,
            SyntaxKind::AsyncKeyword => Self::ASYNC,
            SyntaxKind::AccessorKeyword => Self::ACCESSOR,
            _ => return None,
        };
        Some(flag)
    }

    /// Source keyword of a single flag.
    #[must_use]
    pub fn keyword_text(self) -> &'static str {
        KEYWORD_TEXT
            .iter()
            .find(|(flag, _)| *flag == self)
            .map_or("modifier", |(_, text)| text)
    }

    #[must_use]
    pub const fn accessibility(self) -> Self {
        self.intersection(Self::ACCESSIBILITY)
    }

    /// Whether a constructor parameter with these modifiers becomes a property.
    #[must_use]
    pub const fn is_parameter_property(self) -> bool {
        self.intersects(Self::PARAMETER_PROPERTY)
    }
}

const KEYWORD_TEXT: [(Modifiers, &str); 14] = [
    (Modifiers::PUBLIC, "public"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::STATIC, "static"),
    (Modifiers::READONLY, "readonly"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::OPTIONAL, "?"),
    (Modifiers::EXPORT, "export"),
    (Modifiers::DEFAULT, "default"),
    (Modifiers::AMBIENT, "declare"),
    (Modifiers::CONST, "const"),
    (Modifiers::OVERRIDE, "override"),
    (Modifiers::ASYNC, "async"),
    (Modifiers::ACCESSOR, "accessor"),
];
