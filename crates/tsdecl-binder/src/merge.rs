//! Declaration merging.
//!
//! Both folds go through `SymbolTable::declare`: the per-file fold declares
//! each fragment as it is bound, the project fold re-declares whole symbols
//! from every file. Mergeable kinds accumulate, anything else declared twice
//! under the same key is rejected and reported on the symbol that was kept.

use crate::state::BinderOptions;
use crate::symbols::{Symbol, SymbolKey, SymbolKind, SymbolTable};
use indexmap::map::Entry;
use tracing::trace;
use tsdecl_common::Diagnostic;
use tsdecl_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use tsdecl_parser::Modifiers;

impl SymbolTable {
    /// Add `symbol` to the table, merging with an existing symbol of the
    /// same name, kind and staticness.
    pub(crate) fn declare(&mut self, symbol: Symbol, diagnostics: &mut Vec<Diagnostic>) {
        match self.symbols.entry(symbol.key()) {
            Entry::Vacant(entry) => {
                trace!(
                    name = %symbol.name,
                    kind = symbol.kind.as_str(),
                    outcome = "declared",
                    "declare symbol"
                );
                entry.insert(symbol);
            }
            Entry::Occupied(mut entry) => merge_symbol(entry.get_mut(), symbol, diagnostics),
        }
    }

    /// Add a symbol that never merges, such as a static block.
    pub(crate) fn push_distinct(&mut self, symbol: Symbol) {
        let mut key = symbol.key();
        key.ordinal = u32::try_from(
            self.symbols
                .keys()
                .filter(|k| k.name == key.name && k.kind == key.kind && k.is_static == key.is_static)
                .count(),
        )
        .unwrap_or(u32::MAX);
        self.symbols.insert(key, symbol);
    }

    /// Insert `symbol` at `index`, or report it as a duplicate of the
    /// symbol already holding its key. Returns whether it was inserted.
    pub(crate) fn insert_at(
        &mut self,
        index: usize,
        symbol: Symbol,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        let key = symbol.key();
        if let Some(existing) = self.symbols.get_mut(&key) {
            report_duplicate(existing, &symbol, diagnostics);
            return false;
        }
        let index = index.min(self.symbols.len());
        self.symbols.shift_insert(index, key, symbol);
        true
    }

    pub(crate) fn get_full(&self, key: &SymbolKey) -> Option<(usize, &Symbol)> {
        self.symbols
            .get_full(key)
            .map(|(index, _, symbol)| (index, symbol))
    }

    /// Per-file checks that need the whole scope: missing implementations
    /// and overloads incompatible with their implementation. Also fills in
    /// the stand-in signature of overload sets with no overloads.
    pub(crate) fn check_overloads(
        &mut self,
        options: &BinderOptions,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for symbol in self.iter_mut() {
            match symbol.kind {
                kind if kind.is_overload_set() => {
                    check_overload_set(symbol, options, diagnostics);
                }
                // Interface and type literal members never need bodies.
                SymbolKind::Class | SymbolKind::Namespace => {
                    symbol.members.check_overloads(options, diagnostics);
                }
                _ => {}
            }
        }
    }

    /// Restore stand-in implementation signatures after a project fold.
    pub(crate) fn fill_implementation_signatures(&mut self) {
        for symbol in self.iter_mut() {
            if symbol.kind.is_overload_set() {
                symbol.fill_implementation_signature();
            }
            symbol.members.fill_implementation_signatures();
        }
    }
}

fn merge_symbol(existing: &mut Symbol, incoming: Symbol, diagnostics: &mut Vec<Diagnostic>) {
    let outcome = match existing.kind {
        kind if kind.is_overload_set() => {
            merge_overloads(existing, incoming, diagnostics);
            "overload"
        }
        SymbolKind::Interface | SymbolKind::Namespace => {
            merge_declaration_spaces(existing, incoming, diagnostics);
            "merged"
        }
        SymbolKind::Accessor => {
            merge_accessors(existing, incoming, diagnostics);
            "accessor pair"
        }
        _ => {
            report_duplicate(existing, &incoming, diagnostics);
            "duplicate"
        }
    };
    trace!(
        name = %existing.name,
        kind = existing.kind.as_str(),
        fragments = existing.declarations.len(),
        outcome,
        "declare symbol"
    );
}

/// Fold in what every merge shares: modifiers, declaration sites,
/// decorators and already reported conflicts.
fn absorb_fragment(existing: &mut Symbol, mut incoming: Symbol) {
    existing.modifiers |= incoming.modifiers;
    existing.is_ambient &= incoming.is_ambient;
    existing.has_implementation |= incoming.has_implementation;
    if existing.type_parameters.is_empty() {
        existing.type_parameters = std::mem::take(&mut incoming.type_parameters);
    }
    existing.declarations.append(&mut incoming.declarations);
    existing.decorators.append(&mut incoming.decorators);
    existing.diagnostics.append(&mut incoming.diagnostics);
}

fn merge_overloads(existing: &mut Symbol, mut incoming: Symbol, diagnostics: &mut Vec<Diagnostic>) {
    existing.strip_implementation_signature();
    incoming.strip_implementation_signature();
    existing.signatures.append(&mut incoming.signatures);

    if let Some(implementation) = incoming.implementation.take() {
        if existing.implementation.is_some() {
            let (code, message) = if existing.kind == SymbolKind::Constructor {
                (
                    diagnostic_codes::MULTIPLE_CONSTRUCTOR_IMPLEMENTATIONS,
                    diagnostic_messages::MULTIPLE_CONSTRUCTOR_IMPLEMENTATIONS,
                )
            } else {
                (
                    diagnostic_codes::DUPLICATE_FUNCTION_IMPLEMENTATION,
                    diagnostic_messages::DUPLICATE_FUNCTION_IMPLEMENTATION,
                )
            };
            if let Some(site) = incoming.site_of(implementation.span).cloned() {
                existing.report(&site, code, message.to_string(), diagnostics);
            }
        } else {
            existing.implementation = Some(implementation);
        }
    }
    absorb_fragment(existing, incoming);
    existing.has_implementation = existing.implementation.is_some();
}

fn merge_declaration_spaces(
    existing: &mut Symbol,
    mut incoming: Symbol,
    diagnostics: &mut Vec<Diagnostic>,
) {
    existing.extends.append(&mut incoming.extends);
    let members = std::mem::take(&mut incoming.members);
    for member in members.into_symbols() {
        existing.members.declare(member, diagnostics);
    }
    absorb_fragment(existing, incoming);
}

fn merge_accessors(existing: &mut Symbol, mut incoming: Symbol, diagnostics: &mut Vec<Diagnostic>) {
    for signature in std::mem::take(&mut incoming.signatures) {
        if existing.signatures.iter().any(|s| s.kind == signature.kind) {
            report_duplicate(existing, &incoming, diagnostics);
            continue;
        }
        existing.signatures.push(signature);
    }
    if existing.type_annotation.is_none() {
        existing.type_annotation = incoming.type_annotation.take();
    }
    absorb_fragment(existing, incoming);
}

fn report_duplicate(existing: &mut Symbol, incoming: &Symbol, diagnostics: &mut Vec<Diagnostic>) {
    let Some(site) = incoming.declarations.first() else {
        return;
    };
    let (code, message) = if existing.kind == SymbolKind::IndexSignature {
        (
            diagnostic_codes::DUPLICATE_INDEX_SIGNATURE,
            format_message(
                diagnostic_messages::DUPLICATE_INDEX_SIGNATURE,
                &[existing.name.text()],
            ),
        )
    } else {
        (
            diagnostic_codes::DUPLICATE_IDENTIFIER,
            format_message(
                diagnostic_messages::DUPLICATE_IDENTIFIER,
                &[&existing.name.to_string()],
            ),
        )
    };
    existing.report(site, code, message, diagnostics);
}

fn check_overload_set(symbol: &mut Symbol, options: &BinderOptions, diagnostics: &mut Vec<Diagnostic>) {
    match symbol.implementation.clone() {
        None => {
            if !symbol.is_ambient && !symbol.modifiers.contains(Modifiers::ABSTRACT) {
                let (code, message) = if symbol.kind == SymbolKind::Constructor {
                    (
                        diagnostic_codes::CONSTRUCTOR_IMPLEMENTATION_IS_MISSING,
                        diagnostic_messages::CONSTRUCTOR_IMPLEMENTATION_IS_MISSING,
                    )
                } else {
                    (
                        diagnostic_codes::FUNCTION_IMPLEMENTATION_IS_MISSING,
                        diagnostic_messages::FUNCTION_IMPLEMENTATION_IS_MISSING,
                    )
                };
                if let Some(site) = symbol.declarations.last().cloned() {
                    symbol.report(&site, code, message.to_string(), diagnostics);
                }
            }
        }
        Some(implementation) if options.check_overload_arity => {
            let required = implementation.min_arity();
            let incompatible: Vec<_> = symbol
                .overload_signatures()
                .iter()
                .filter(|overload| overload.max_arity().is_some_and(|max| max < required))
                .filter_map(|overload| symbol.site_of(overload.span).cloned())
                .collect();
            for site in incompatible {
                symbol.report(
                    &site,
                    diagnostic_codes::OVERLOAD_SIGNATURE_NOT_COMPATIBLE,
                    diagnostic_messages::OVERLOAD_SIGNATURE_NOT_COMPATIBLE.to_string(),
                    diagnostics,
                );
            }
        }
        Some(_) => {}
    }
    symbol.fill_implementation_signature();
}
