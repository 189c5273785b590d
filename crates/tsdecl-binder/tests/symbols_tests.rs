//! Tests for the symbol model: names, kinds, exports and serialization.
use tsdecl_binder::{
    BinderOptions, BinderState, FileScope, SymbolKind, SymbolName, build_symbol_tree,
};
use tsdecl_parser::{EnumValue, Modifiers, Statement, parse_file};

fn bind_source(source: &str) -> FileScope {
    let (file, parse_diagnostics) = parse_file(source, "test.ts");
    assert!(parse_diagnostics.is_empty(), "{parse_diagnostics:?}");
    let (scope, diagnostics) = BinderState::bind_file(file, BinderOptions::default());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    scope
}

#[test]
fn empty_and_comment_only_sources_build_an_empty_tree() {
    for source in ["", "// nothing here\n/* or here */\n"] {
        let (file, _) = parse_file(source, "empty.ts");
        let (tree, diagnostics) = build_symbol_tree(vec![file]);
        assert!(tree.is_empty());
        assert!(diagnostics.is_empty());
        assert_eq!(tree.files.len(), 1);
    }

    let (tree, diagnostics) = build_symbol_tree(Vec::new());
    assert!(tree.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn exported_symbol_count_matches_exported_declarations_after_folding() {
    let source = "\
export const a = 1;
export function f(x: string): void;
export function f(x: any) {}
export interface I { x: number }
export interface I { y: number }
export class C {}
export enum E { A }
export type T = string;
export namespace N {}
export default class {}
const hidden = 1;
function helper() {}
";
    let (file, _) = parse_file(source, "test.ts");
    let exported_declarations: std::collections::HashSet<_> = file
        .statements
        .iter()
        .filter(|stmt| stmt.modifiers().contains(Modifiers::EXPORT))
        .map(|stmt| match stmt {
            Statement::Variable(var) => var.declarations[0].name.clone(),
            other => other.name().unwrap_or("default").to_string(),
        })
        .collect();

    let scope = bind_source(source);
    let exported: Vec<_> = scope.exported_symbols().map(|s| s.name.to_string()).collect();
    assert_eq!(exported.len(), exported_declarations.len());
    assert_eq!(exported, ["a", "f", "I", "C", "E", "T", "N", "default"]);
}

#[test]
fn import_and_export_lists_do_not_create_symbols() {
    let scope = bind_source(
        "\
import * as Start from './everything';
import { helper } from './helpers';
export type { A, B, C };
export { helper };
const local = 1;
",
    );
    assert!(scope.is_external_module);
    assert_eq!(scope.imports.len(), 2);
    assert_eq!(scope.exports.len(), 2);
    assert_eq!(scope.symbols.len(), 1);
    assert_eq!(scope.exported_symbols().count(), 0);
}

#[test]
fn default_exports_get_the_default_name() {
    let scope = bind_source(
        "export default type DefaultType = string;\nexport default class DefaultExportClass {}\n",
    );
    let alias = scope.symbols.get("DefaultType", SymbolKind::TypeAlias).unwrap();
    assert!(alias.modifiers.contains(Modifiers::EXPORT | Modifiers::DEFAULT));
    assert_eq!(alias.type_annotation.as_ref().unwrap().to_string(), "string");

    let scope = bind_source("export default someValue;");
    let value = scope.symbols.get_index(0).unwrap();
    assert_eq!(value.kind, SymbolKind::Variable);
    assert_eq!(value.name, SymbolName::Default);
    assert_eq!(value.initializer.as_deref(), Some("someValue"));
}

#[test]
fn enum_members_keep_unevaluated_values() {
    let scope = bind_source(
        "\
enum ComputedEnum {
  A = 1 << 1,
  B = 1 << 2,
  C = A | B,
  D,
}
declare enum DeclaredEnum {
  Option1,
}
const enum ConstEnum {
  Value1 = \"string_value\",
}
",
    );
    let computed = scope.symbols.get("ComputedEnum", SymbolKind::Enum).unwrap();
    let values: Vec<_> = computed
        .members
        .iter()
        .map(|m| m.enum_value.clone().unwrap())
        .collect();
    assert_eq!(
        values,
        [
            EnumValue::Computed("1 << 1".to_string()),
            EnumValue::Computed("1 << 2".to_string()),
            EnumValue::Computed("A | B".to_string()),
            EnumValue::Implicit,
        ]
    );
    assert!(computed.members.iter().all(|m| m.kind == SymbolKind::EnumMember));

    let declared = scope.symbols.get("DeclaredEnum", SymbolKind::Enum).unwrap();
    assert!(declared.is_ambient);
    assert!(!declared.has_implementation);

    let const_enum = scope.symbols.get("ConstEnum", SymbolKind::Enum).unwrap();
    assert!(const_enum.modifiers.contains(Modifiers::CONST));
}

#[test]
fn class_records_heritage_generics_and_decorators() {
    let scope = bind_source(
        "@sealed\nclass MultipleInheritance<T, U = string> extends AbstractClass<T> implements Int, Other {}",
    );
    let class = scope
        .symbols
        .get("MultipleInheritance", SymbolKind::Class)
        .unwrap();
    let extends: Vec<_> = class.extends.iter().map(ToString::to_string).collect();
    let implements: Vec<_> = class.implements.iter().map(ToString::to_string).collect();
    assert_eq!(extends, ["AbstractClass<T>"]);
    assert_eq!(implements, ["Int", "Other"]);
    let generics: Vec<_> = class.type_parameters.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(generics, ["T", "U"]);
    assert_eq!(class.decorators[0].expression, "sealed");
    assert!(class.has_implementation);
}

#[test]
fn declaration_file_makes_everything_ambient() {
    let (file, _) = parse_file("export class Greeter {\n  constructor(greeting: string);\n  showGreeting(): void;\n}", "lib.d.ts");
    let (scope, diagnostics) = BinderState::bind_file(file, BinderOptions::default());
    assert!(diagnostics.is_empty());
    assert!(scope.is_declaration_file);
    let greeter = scope.symbols.get("Greeter", SymbolKind::Class).unwrap();
    assert!(greeter.is_ambient);
    assert!(greeter.members.iter().all(|m| m.is_ambient && !m.has_implementation));
}

#[test]
fn symbol_tree_serializes_to_json() {
    let (file, _) = parse_file("interface Point { x: number; y: number }", "point.ts");
    let (tree, _) = build_symbol_tree(vec![file]);
    let json = serde_json::to_value(&tree).unwrap();
    let point = &json["files"][0]["symbols"][0];
    assert_eq!(point["kind"], "Interface");
    assert_eq!(point["name"]["Named"], "Point");
    assert_eq!(point["members"].as_array().unwrap().len(), 2);
    assert_eq!(point["declarations"][0]["file"], "point.ts");
    assert!(point.get("diagnostics").is_none());
}

#[test]
fn destructured_bindings_share_the_initializer() {
    let scope = bind_source("const { a, b: [c] } = obj;\ndeclare const { d }: Shape;\nconst e = obj;");

    for name in ["a", "c"] {
        let symbol = scope.symbols.get(name, SymbolKind::Variable).unwrap();
        assert_eq!(symbol.initializer.as_deref(), Some("obj"));
        assert!(symbol.has_implementation);
        assert!(symbol.signatures.is_empty());
    }
    // Same as a plain declarator with the same initializer.
    let e = scope.symbols.get("e", SymbolKind::Variable).unwrap();
    assert!(e.has_implementation);

    let d = scope.symbols.get("d", SymbolKind::Variable).unwrap();
    assert!(d.is_ambient);
    assert!(!d.has_implementation);
    assert!(d.initializer.is_none());
}
