//! Multi-file extraction: parallel parse and bind, then the project fold.

use tsdecl::{
    BinderOptions, SymbolKind, build_symbol_tree, extract_project, extract_project_with_options,
    parse_file,
};

const EVERYTHING: &str = include_str!("fixtures/everything.ts");

fn sample_project() -> Vec<(String, String)> {
    vec![
        (
            "shapes.ts".to_string(),
            "\
namespace Geometry {
    export interface Shape {
        area(): number;
    }
}
"
            .to_string(),
        ),
        (
            "circle.ts".to_string(),
            "\
namespace Geometry {
    export class Circle implements Shape {
        constructor(public radius: number) {}
        area() { return Math.PI * this.radius ** 2; }
    }
}
"
            .to_string(),
        ),
        (
            "augment.ts".to_string(),
            "\
export {};
declare global {
    interface Array<T> {
        last(): T | undefined;
    }
}
declare module \"geometry-extras\" {
    export function scale(factor: number): void;
}
"
            .to_string(),
        ),
        (
            "more.d.ts".to_string(),
            "\
declare module \"geometry-extras\" {
    export function scale(x: number, y: number): void;
}
declare namespace Geometry {
    const ORIGIN: [number, number];
}
"
            .to_string(),
        ),
        ("everything.ts".to_string(), EVERYTHING.to_string()),
    ]
}

#[test]
fn parallel_extraction_matches_sequential_build() {
    let sources = sample_project();
    let (parallel_tree, parallel_diagnostics) = extract_project(&sources);

    let parsed: Vec<_> = sources
        .iter()
        .map(|(name, text)| parse_file(text, name))
        .collect();
    let mut sequential_diagnostics: Vec<_> = Vec::new();
    let mut files = Vec::new();
    for (file, diagnostics) in parsed {
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        files.push(file);
    }
    let (sequential_tree, merge_diagnostics) = build_symbol_tree(files);
    sequential_diagnostics.extend(merge_diagnostics);

    assert_eq!(parallel_diagnostics, sequential_diagnostics);
    assert_eq!(
        serde_json::to_value(&parallel_tree).unwrap(),
        serde_json::to_value(&sequential_tree).unwrap()
    );
}

#[test]
fn files_keep_input_order() {
    let (tree, _) = extract_project(&sample_project());
    let names: Vec<_> = tree.files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(
        names,
        ["shapes.ts", "circle.ts", "augment.ts", "more.d.ts", "everything.ts"]
    );
    assert!(tree.file("more.d.ts").unwrap().is_declaration_file);
}

#[test]
fn script_namespaces_merge_across_files() {
    let (tree, _) = extract_project(&sample_project());
    let geometry = tree.project.resolve_namespace(&["Geometry"]).unwrap();
    let members: Vec<_> = geometry.members.iter().map(|m| m.name.to_string()).collect();
    assert_eq!(members, ["Shape", "Circle", "ORIGIN"]);
    let files: Vec<_> = geometry.declarations.iter().map(|d| d.file.as_str()).collect();
    assert_eq!(files, ["shapes.ts", "circle.ts", "more.d.ts"]);
    // One fragment has code, so the merged namespace is not ambient.
    assert!(!geometry.is_ambient);
    assert!(geometry.has_implementation);

    let circle = tree.resolve(&["Geometry", "Circle"]).unwrap();
    assert_eq!(circle.kind, SymbolKind::Class);
    assert!(circle.members.get("radius", SymbolKind::Property).is_some());
    let area = circle.members.get("area", SymbolKind::Method).unwrap();
    assert_eq!(area.signatures.len(), 1);
    assert!(area.has_implementation);
}

#[test]
fn augmentations_merge_across_module_files() {
    let (tree, diagnostics) = extract_project(&sample_project());
    // Only the fixture's own duplicate `MySymbol`.
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].file, "everything.ts");

    let extras = tree.project.ambient_module("geometry-extras").unwrap();
    let scale = extras.members.get("scale", SymbolKind::Function).unwrap();
    assert_eq!(scale.signatures.len(), 2);
    let files: Vec<_> = scale.declarations.iter().map(|d| d.file.as_str()).collect();
    assert_eq!(files, ["augment.ts", "more.d.ts"]);

    let globals: Vec<_> = tree
        .project
        .global
        .iter()
        .map(|s| s.name.to_string())
        .collect();
    assert_eq!(globals, ["Array", "Window"]);
    assert!(tree.project.ambient_module("some-module").is_some());
    assert!(tree.project.ambient_module("shorthand").is_some());
}

#[test]
fn cross_file_conflicts_follow_per_file_diagnostics() {
    let sources = [
        ("a.ts", "namespace Shared {\n    export const value = 1;\n}\nfunction lonely(): void;\n"),
        ("b.ts", "namespace Shared {\n    export const value = 2;\n}\n"),
    ];
    let (tree, diagnostics) = extract_project(&sources);
    let codes: Vec<_> = diagnostics
        .iter()
        .map(|d| (d.file.as_str(), d.code))
        .collect();
    assert_eq!(codes, [("a.ts", 2391), ("b.ts", 2300)]);

    let shared = tree.project.resolve_namespace(&["Shared"]).unwrap();
    let value = shared.members.get("value", SymbolKind::Variable).unwrap();
    assert_eq!(value.initializer.as_deref(), Some("1"));
}

#[test]
fn parse_diagnostics_are_reported_with_their_file() {
    let sources = [
        ("good.ts", "export const ok = 1;"),
        ("bad.ts", "const broken = \"unterminated\nexport const fine = 2;"),
    ];
    let (tree, diagnostics) = extract_project(&sources);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].file, "bad.ts");
    assert_eq!(diagnostics[0].code, 1002);
    let bad = tree.file("bad.ts").unwrap();
    assert!(bad.symbols.get("fine", SymbolKind::Variable).is_some());
}

#[test]
fn options_reach_every_file() {
    let sources = [(
        "arity.ts",
        "function f(): void;\nfunction f(a: string, b: string) {}\n",
    )];
    let (_, diagnostics) = extract_project(&sources);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 2394);

    let options = BinderOptions {
        check_overload_arity: false,
    };
    let (_, diagnostics) = extract_project_with_options(&sources, options);
    assert!(diagnostics.is_empty());
}

#[test]
fn empty_project_yields_an_empty_tree() {
    let sources: [(&str, &str); 0] = [];
    let (tree, diagnostics) = extract_project(&sources);
    assert!(tree.is_empty());
    assert!(tree.files.is_empty());
    assert!(diagnostics.is_empty());

    let (tree, diagnostics) = extract_project(&[("blank.ts", "  \n// only a comment\n")]);
    assert!(tree.is_empty());
    assert!(diagnostics.is_empty());
}
