//! Tests for the project fold across several files.
use tsdecl_binder::{SymbolKind, SymbolTree, build_symbol_tree, fold_project};
use tsdecl_common::Diagnostic;
use tsdecl_parser::parse_file;

fn build_project(files: &[(&str, &str)]) -> (SymbolTree, Vec<Diagnostic>) {
    let parsed = files
        .iter()
        .map(|(name, text)| {
            let (file, diagnostics) = parse_file(text, name);
            assert!(diagnostics.is_empty(), "{name}: {diagnostics:?}");
            file
        })
        .collect();
    build_symbol_tree(parsed)
}

#[test]
fn script_namespaces_merge_across_files_in_file_order() {
    let (tree, diagnostics) = build_project(&[
        ("a.ts", "namespace Shared {\n    export const a = 1;\n}"),
        ("b.ts", "namespace Shared {\n    export function b() {}\n}"),
    ]);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let shared = tree.project.resolve_namespace(&["Shared"]).unwrap();
    let members: Vec<_> = shared.members.iter().map(|m| m.name.to_string()).collect();
    assert_eq!(members, ["a", "b"]);
    let files: Vec<_> = shared.declarations.iter().map(|d| d.file.as_str()).collect();
    assert_eq!(files, ["a.ts", "b.ts"]);

    // Per-file scopes are untouched by the fold.
    let a = tree.file("a.ts").unwrap();
    assert_eq!(a.resolve(&["Shared"]).unwrap().members.len(), 1);
    assert_eq!(tree.resolve(&["Shared", "b"]).unwrap().kind, SymbolKind::Function);
}

#[test]
fn module_file_namespaces_stay_module_scoped() {
    let (tree, diagnostics) = build_project(&[
        ("a.ts", "export namespace M { export const a = 1; }"),
        ("b.ts", "export namespace M { export const a = 2; }"),
    ]);
    assert!(diagnostics.is_empty());
    assert!(tree.project.namespaces.is_empty());
    assert_eq!(tree.files.len(), 2);
}

#[test]
fn global_augmentations_merge_project_wide() {
    let (tree, diagnostics) = build_project(&[
        (
            "a.ts",
            "export {};\ndeclare global {\n  interface Window {\n    first: string;\n  }\n}",
        ),
        (
            "b.ts",
            "export {};\ndeclare global {\n  interface Window {\n    second: number;\n  }\n  function helper(): void;\n}",
        ),
    ]);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let window = tree.project.global.get("Window", SymbolKind::Interface).unwrap();
    let members: Vec<_> = window.members.iter().map(|m| m.name.to_string()).collect();
    assert_eq!(members, ["first", "second"]);
    assert!(tree.project.global.get("helper", SymbolKind::Function).is_some());
}

#[test]
fn ambient_modules_merge_by_specifier() {
    let (tree, diagnostics) = build_project(&[
        ("a.d.ts", "declare module \"lib\" {\n  export function f(a: string): void;\n}"),
        ("b.d.ts", "declare module \"lib\" {\n  export function f(a: number): void;\n  export const version: string;\n}"),
        ("c.d.ts", "declare module \"other\";"),
    ]);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let lib = tree.project.ambient_module("lib").unwrap();
    let f = lib.members.get("f", SymbolKind::Function).unwrap();
    assert_eq!(f.signatures.len(), 2);
    assert!(!f.has_implementation);
    assert!(lib.members.get("version", SymbolKind::Variable).is_some());
    assert!(tree.project.ambient_module("other").unwrap().members.is_empty());
}

#[test]
fn cross_file_duplicates_are_reported_by_the_fold() {
    let (tree, diagnostics) = build_project(&[
        ("a.ts", "namespace Dup {\n    export const x = 1;\n}"),
        ("b.ts", "namespace Dup {\n    export const x = 2;\n}"),
    ]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 2300);
    assert_eq!(diagnostics[0].file, "b.ts");
    assert_eq!(diagnostics[0].line, 1);

    let dup = tree.project.resolve_namespace(&["Dup"]).unwrap();
    let x = dup.members.get("x", SymbolKind::Variable).unwrap();
    assert_eq!(x.initializer.as_deref(), Some("1"));
    assert_eq!(x.diagnostics.len(), 1);
}

#[test]
fn overloads_split_across_files_keep_the_implementation() {
    let (tree, diagnostics) = build_project(&[
        ("a.ts", "namespace Util {\n    export function g(a: string): void;\n    export function g(a: any) {}\n}"),
        ("b.ts", "namespace Util {\n    export function h() {}\n}"),
    ]);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let g = tree.project.resolve_namespace(&["Util", "g"]).unwrap();
    assert_eq!(g.signatures.len(), 1);
    assert!(g.has_implementation);
    let h = tree.project.resolve_namespace(&["Util", "h"]).unwrap();
    assert_eq!(h.signatures.len(), 1);
    assert_eq!(h.signatures[0], *h.implementation.as_ref().unwrap());
}

#[test]
fn folding_a_single_file_adds_no_diagnostics() {
    let (tree, _) = build_project(&[("only.ts", "namespace Solo { export function f() {} }")]);
    let (project, diagnostics) = fold_project(&tree.files);
    assert!(diagnostics.is_empty());
    assert_eq!(project.namespaces.len(), 1);
}
