//! Symbol model.
//!
//! A `Symbol` is one logical declaration after merging: every fragment that
//! contributed to it is listed in `declarations`, in merge order. Symbols are
//! stored in a `SymbolTable`, an insertion-ordered map keyed by
//! (name, kind, static), so iteration order is first-occurrence order.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Serialize, Serializer};
use std::fmt;
use tsdecl_common::{Diagnostic, DiagnosticKind, Position, Span};
use tsdecl_parser::{
    Decorator, EnumValue, Modifiers, Signature, SignatureKind, TypeExpr, TypeParameter,
};

// =============================================================================
// Kinds and names
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SymbolKind {
    Variable,
    Function,
    Class,
    Interface,
    Enum,
    EnumMember,
    Namespace,
    TypeAlias,
    Property,
    Method,
    Accessor,
    Constructor,
    IndexSignature,
    StaticInitializer,
}

impl SymbolKind {
    /// Kinds whose repeated declarations in one scope accumulate into a
    /// single symbol instead of conflicting.
    #[must_use]
    pub const fn is_mergeable(self) -> bool {
        matches!(
            self,
            Self::Function
                | Self::Method
                | Self::Constructor
                | Self::Interface
                | Self::Namespace
                | Self::Accessor
        )
    }

    /// Kinds that carry overload signatures and at most one implementation.
    #[must_use]
    pub const fn is_overload_set(self) -> bool {
        matches!(self, Self::Function | Self::Method | Self::Constructor)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Variable => "variable",
            Self::Function => "function",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::EnumMember => "enum member",
            Self::Namespace => "namespace",
            Self::TypeAlias => "type alias",
            Self::Property => "property",
            Self::Method => "method",
            Self::Accessor => "accessor",
            Self::Constructor => "constructor",
            Self::IndexSignature => "index signature",
            Self::StaticInitializer => "static initializer",
        }
    }
}

/// Name of a symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SymbolName {
    /// Identifier, or a string/number literal key normalized to its value.
    Named(String),
    /// `#name`, stored without the `#`.
    Private(String),
    /// Non-literal computed key, as source text. Never evaluated.
    Computed(String),
    /// `declare module "specifier"`.
    Module(String),
    /// Index signature, keyed by its parameter type (`string`, `number`, ...).
    IndexKey(String),
    /// `export default` of an anonymous class, function or expression.
    Default,
    /// Call and construct signatures in interfaces, static blocks.
    Anonymous,
}

impl SymbolName {
    /// Lookup text. Computed names keep their expression text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Named(text)
            | Self::Private(text)
            | Self::Computed(text)
            | Self::Module(text)
            | Self::IndexKey(text) => text,
            Self::Default => "default",
            Self::Anonymous => "",
        }
    }

    /// Renderers show these as "computed" rather than as a resolved name.
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Private(name) => write!(f, "#{name}"),
            Self::Computed(expr) => write!(f, "[{expr}]"),
            Self::Module(specifier) => write!(f, "\"{specifier}\""),
            Self::IndexKey(key) => write!(f, "[index: {key}]"),
            Self::Default => f.write_str("default"),
            Self::Anonymous => f.write_str("(anonymous)"),
        }
    }
}

// =============================================================================
// Symbols
// =============================================================================

/// Where one fragment of a symbol was declared.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeclarationSite {
    pub file: String,
    pub span: Span,
    pub position: Position,
}

#[derive(Clone, Debug, Serialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: SymbolName,
    pub modifiers: Modifiers,
    /// Declared on the symbol itself (classes, interfaces, type aliases).
    /// Callables carry their type parameters per signature.
    pub type_parameters: Vec<TypeParameter>,
    /// Overload signatures; the implementation's own signature when there
    /// are none. Accessors hold their get and set signatures here.
    pub signatures: Vec<Signature>,
    pub implementation: Option<Signature>,
    /// Variable or property annotation, accessor type, index signature
    /// value type, or the right-hand side of a type alias.
    pub type_annotation: Option<TypeExpr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_value: Option<EnumValue>,
    pub extends: Vec<TypeExpr>,
    pub implements: Vec<TypeExpr>,
    pub decorators: Vec<Decorator>,
    pub members: SymbolTable,
    pub is_ambient: bool,
    pub has_implementation: bool,
    pub declarations: Vec<DeclarationSite>,
    /// Merge conflicts reported against this symbol.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Symbol {
    #[must_use]
    pub fn new(kind: SymbolKind, name: SymbolName, site: DeclarationSite) -> Self {
        Self {
            kind,
            name,
            modifiers: Modifiers::empty(),
            type_parameters: Vec::new(),
            signatures: Vec::new(),
            implementation: None,
            type_annotation: None,
            initializer: None,
            enum_value: None,
            extends: Vec::new(),
            implements: Vec::new(),
            decorators: Vec::new(),
            members: SymbolTable::new(),
            is_ambient: false,
            has_implementation: false,
            declarations: vec![site],
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    #[must_use]
    pub const fn is_exported(&self) -> bool {
        self.modifiers.contains(Modifiers::EXPORT)
    }

    #[must_use]
    pub fn get_signature(&self) -> Option<&Signature> {
        self.signatures.iter().find(|s| s.kind == SignatureKind::Get)
    }

    #[must_use]
    pub fn set_signature(&self) -> Option<&Signature> {
        self.signatures.iter().find(|s| s.kind == SignatureKind::Set)
    }

    /// Signatures declared without a body, excluding the implementation
    /// signature that stands in when an overload set has no overloads.
    #[must_use]
    pub fn overload_signatures(&self) -> &[Signature] {
        if self.is_implementation_only() {
            &[]
        } else {
            &self.signatures
        }
    }

    fn is_implementation_only(&self) -> bool {
        match (self.signatures.as_slice(), &self.implementation) {
            ([only], Some(implementation)) => only == implementation,
            _ => false,
        }
    }

    /// Drop the stand-in implementation signature before more overloads
    /// are merged in.
    pub(crate) fn strip_implementation_signature(&mut self) {
        if self.is_implementation_only() {
            self.signatures.clear();
        }
    }

    /// With no overloads, the implementation is the only signature.
    pub(crate) fn fill_implementation_signature(&mut self) {
        if self.signatures.is_empty()
            && let Some(implementation) = &self.implementation
        {
            self.signatures.push(implementation.clone());
        }
    }

    /// The declaration site whose span covers `span`, else the first one.
    #[must_use]
    pub fn site_of(&self, span: Span) -> Option<&DeclarationSite> {
        self.declarations
            .iter()
            .find(|site| site.span.start <= span.start && span.end <= site.span.end)
            .or_else(|| self.declarations.first())
    }

    /// Record a merge conflict on this symbol and in the run's diagnostics.
    pub(crate) fn report(
        &mut self,
        site: &DeclarationSite,
        code: u32,
        message: String,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let diagnostic = Diagnostic::error_at(
            &site.file,
            site.span,
            site.position,
            DiagnosticKind::Merge,
            message,
            code,
        );
        self.diagnostics.push(diagnostic.clone());
        diagnostics.push(diagnostic);
    }

    pub(crate) fn key(&self) -> SymbolKey {
        SymbolKey {
            name: self.name.clone(),
            kind: self.kind,
            is_static: self.is_static(),
            ordinal: 0,
        }
    }
}

// =============================================================================
// Symbol table
// =============================================================================

/// Merge key. `ordinal` separates symbols that never merge but share
/// every other component, such as two static blocks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolKey {
    pub(crate) name: SymbolName,
    pub(crate) kind: SymbolKind,
    pub(crate) is_static: bool,
    pub(crate) ordinal: u32,
}

/// Symbols of one scope in first-occurrence order.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    pub(crate) symbols: IndexMap<SymbolKey, Symbol, FxBuildHasher>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Symbol> {
        self.symbols.values_mut()
    }

    /// Symbol at `index` in declaration order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get_index(index).map(|(_, symbol)| symbol)
    }

    /// First symbol of `kind` whose lookup text is `name`.
    #[must_use]
    pub fn get(&self, name: &str, kind: SymbolKind) -> Option<&Symbol> {
        self.iter()
            .find(|symbol| symbol.kind == kind && symbol.name.text() == name)
    }

    /// Every symbol whose lookup text is `name`, in declaration order.
    pub fn named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Symbol> + use<'a, 'n> {
        self.iter().filter(move |symbol| symbol.name.text() == name)
    }

    /// Follow a qualified name such as `["A", "B", "f"]` through nested
    /// namespaces. Intermediate segments must name namespaces; the last
    /// segment may name a symbol of any kind.
    #[must_use]
    pub fn resolve(&self, path: &[&str]) -> Option<&Symbol> {
        let (last, scopes) = path.split_last()?;
        let mut table = self;
        for segment in scopes {
            table = &table.get(segment, SymbolKind::Namespace)?.members;
        }
        table.named(last).next()
    }

    pub(crate) fn into_symbols(self) -> impl Iterator<Item = Symbol> {
        self.symbols.into_values()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = indexmap::map::Values<'a, SymbolKey, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.values()
    }
}

impl Serialize for SymbolTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.symbols.values())
    }
}
