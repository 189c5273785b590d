//! Member binding for classes and interfaces.

use crate::state::BinderState;
use crate::symbols::{Symbol, SymbolKey, SymbolKind, SymbolName, SymbolTable};
use tracing::trace;
use tsdecl_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use tsdecl_parser::{MemberDeclaration, MemberKind, Modifiers, PropertyName};

/// Name constructors are keyed under.
const CONSTRUCTOR_NAME: &str = "constructor";

fn member_name(name: PropertyName) -> SymbolName {
    match name {
        PropertyName::Identifier(text)
        | PropertyName::StringLiteral(text)
        | PropertyName::NumericLiteral(text) => SymbolName::Named(text),
        PropertyName::Private(text) => SymbolName::Private(text),
        PropertyName::Computed(text) => SymbolName::Computed(text),
        PropertyName::None => SymbolName::Anonymous,
    }
}

const fn member_symbol_kind(kind: MemberKind) -> SymbolKind {
    match kind {
        MemberKind::Property => SymbolKind::Property,
        MemberKind::Method | MemberKind::CallSignature => SymbolKind::Method,
        MemberKind::Constructor | MemberKind::ConstructSignature => SymbolKind::Constructor,
        MemberKind::GetAccessor | MemberKind::SetAccessor => SymbolKind::Accessor,
        MemberKind::IndexSignature => SymbolKind::IndexSignature,
        MemberKind::StaticBlock => SymbolKind::StaticInitializer,
    }
}

impl BinderState {
    pub(crate) fn bind_class_members(&mut self, members: Vec<MemberDeclaration>) -> SymbolTable {
        let mut table = SymbolTable::new();
        for member in members {
            self.bind_member(member, &mut table, true);
        }
        self.promote_parameter_properties(&mut table);
        table
    }

    /// Interface members. Call and construct signatures become anonymous
    /// `Method` and `Constructor` members.
    pub(crate) fn bind_type_members(&mut self, members: Vec<MemberDeclaration>) -> SymbolTable {
        let mut table = SymbolTable::new();
        for member in members {
            self.bind_member(member, &mut table, false);
        }
        table
    }

    fn bind_member(&mut self, member: MemberDeclaration, table: &mut SymbolTable, in_class: bool) {
        let kind = member_symbol_kind(member.kind);
        let name = match member.kind {
            MemberKind::Constructor => SymbolName::Named(CONSTRUCTOR_NAME.to_string()),
            MemberKind::IndexSignature => SymbolName::IndexKey(
                member
                    .signature
                    .as_ref()
                    .and_then(|sig| sig.parameters.first())
                    .and_then(|param| param.type_annotation.as_ref())
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ),
            _ => member_name(member.name),
        };

        let mut symbol = Symbol::new(kind, name, self.site(member.span));
        symbol.modifiers = member.modifiers;
        symbol.is_ambient = self.is_ambient(member.modifiers);
        symbol.decorators = member.decorators;
        symbol.type_annotation = member.type_annotation;
        symbol.initializer = member.initializer;

        match kind {
            SymbolKind::Method | SymbolKind::Constructor => {
                if let Some(signature) = member.signature {
                    if member.has_body {
                        symbol.implementation = Some(signature);
                        symbol.has_implementation = true;
                    } else {
                        if in_class
                            && kind == SymbolKind::Constructor
                            && signature
                                .parameters
                                .iter()
                                .any(|param| param.modifiers.is_parameter_property())
                        {
                            let site = self.site(member.span);
                            symbol.report(
                                &site,
                                diagnostic_codes::PARAMETER_PROPERTY_ONLY_IN_CONSTRUCTOR_IMPLEMENTATION,
                                diagnostic_messages::PARAMETER_PROPERTY_ONLY_IN_CONSTRUCTOR_IMPLEMENTATION
                                    .to_string(),
                                &mut self.diagnostics,
                            );
                        }
                        symbol.signatures.push(signature);
                    }
                }
            }
            SymbolKind::Accessor => {
                if let Some(signature) = member.signature {
                    symbol.type_annotation = match member.kind {
                        MemberKind::GetAccessor => signature.return_type.clone(),
                        _ => signature
                            .parameters
                            .first()
                            .and_then(|param| param.type_annotation.clone()),
                    };
                    symbol.signatures.push(signature);
                }
                symbol.has_implementation = member.has_body;
            }
            SymbolKind::IndexSignature => {
                if let Some(signature) = member.signature {
                    symbol.type_annotation = signature.return_type.clone();
                    symbol.signatures.push(signature);
                }
            }
            SymbolKind::StaticInitializer => {
                symbol.has_implementation = true;
                table.push_distinct(symbol);
                return;
            }
            _ => {
                symbol.has_implementation = symbol.initializer.is_some();
            }
        }
        table.declare(symbol, &mut self.diagnostics);
    }

    /// Turn the implementation constructor's parameters that carry an
    /// accessibility modifier or `readonly` into properties, placed right
    /// after the constructor. Other parameters are never promoted.
    fn promote_parameter_properties(&mut self, members: &mut SymbolTable) {
        let key = SymbolKey {
            name: SymbolName::Named(CONSTRUCTOR_NAME.to_string()),
            kind: SymbolKind::Constructor,
            is_static: false,
            ordinal: 0,
        };
        let Some((index, constructor)) = members.get_full(&key) else {
            return;
        };
        let Some(implementation) = &constructor.implementation else {
            return;
        };

        let promoted: Vec<Symbol> = implementation
            .parameters
            .iter()
            .filter(|param| param.modifiers.is_parameter_property() && !param.is_pattern)
            .map(|param| {
                let mut property = Symbol::new(
                    SymbolKind::Property,
                    SymbolName::Named(param.name.clone()),
                    self.site(param.span),
                );
                property.modifiers = param.modifiers;
                if param.optional {
                    property.modifiers |= Modifiers::OPTIONAL;
                }
                property.is_ambient = constructor.is_ambient;
                property.type_annotation = param.type_annotation.clone();
                property.initializer = param.default_value.clone();
                property.has_implementation = property.initializer.is_some();
                property
            })
            .collect();

        let mut position = index + 1;
        for property in promoted {
            trace!(name = %property.name, "promote parameter property");
            if members.insert_at(position, property, &mut self.diagnostics) {
                position += 1;
            }
        }
    }
}
