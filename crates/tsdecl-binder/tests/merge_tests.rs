//! Tests for the per-file fold: overload sets, interface and namespace
//! merging, accessor pairing, parameter property promotion and conflicts.
use tsdecl_binder::{BinderOptions, BinderState, FileScope, Symbol, SymbolKind, SymbolName};
use tsdecl_common::{Diagnostic, DiagnosticKind};
use tsdecl_parser::{Modifiers, parse_file};

fn bind_source_with(source: &str, file_name: &str, options: BinderOptions) -> (FileScope, Vec<Diagnostic>) {
    let (file, parse_diagnostics) = parse_file(source, file_name);
    assert!(
        parse_diagnostics.is_empty(),
        "unexpected parse diagnostics: {parse_diagnostics:?}"
    );
    BinderState::bind_file(file, options)
}

fn bind_source(source: &str) -> (FileScope, Vec<Diagnostic>) {
    bind_source_with(source, "test.ts", BinderOptions::default())
}

fn bind_clean(source: &str) -> FileScope {
    let (scope, diagnostics) = bind_source(source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    scope
}

fn member_names(symbol: &Symbol) -> Vec<String> {
    symbol.members.iter().map(|m| m.name.to_string()).collect()
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<u32> {
    diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn fold_overload_signatures_into_one_function() {
    let scope = bind_clean(
        "\
function f(x: string): string;
function f(x: number): number;
function f(x: boolean): boolean;
function f(x: string | number | boolean): string | number | boolean {
    return x;
}
",
    );
    assert_eq!(scope.symbols.len(), 1);
    let f = scope.symbols.get("f", SymbolKind::Function).unwrap();
    assert_eq!(f.signatures.len(), 3);
    assert!(f.has_implementation);
    assert_eq!(
        f.implementation.as_ref().unwrap().to_string(),
        "(x: string | number | boolean): string | number | boolean"
    );
    assert_eq!(f.declarations.len(), 4);
    let lines: Vec<_> = f.declarations.iter().map(|d| d.position.line).collect();
    assert_eq!(lines, [0, 1, 2, 3]);
}

#[test]
fn implementation_alone_is_the_single_signature() {
    let scope = bind_clean("function solo(a: number): void {}");
    let solo = scope.symbols.get("solo", SymbolKind::Function).unwrap();
    assert_eq!(solo.signatures.len(), 1);
    assert_eq!(solo.signatures[0], *solo.implementation.as_ref().unwrap());
    assert!(solo.overload_signatures().is_empty());
}

#[test]
fn missing_implementation_is_reported_outside_ambient_contexts() {
    let (scope, diagnostics) = bind_source("function lonely(): void;");
    assert_eq!(codes(&diagnostics), [2391]);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Merge);
    let lonely = scope.symbols.get("lonely", SymbolKind::Function).unwrap();
    assert!(!lonely.has_implementation);
    assert_eq!(lonely.diagnostics.len(), 1);

    let scope = bind_clean(
        "declare function getWidget(n: number): Widget;\ndeclare function getWidget(s: string): Widget[];",
    );
    let widget = scope.symbols.get("getWidget", SymbolKind::Function).unwrap();
    assert_eq!(widget.signatures.len(), 2);
    assert!(widget.is_ambient);
    assert!(!widget.has_implementation);

    let (_, diagnostics) =
        bind_source_with("function typed(): void;", "types.d.ts", BinderOptions::default());
    assert!(diagnostics.is_empty());
}

#[test]
fn duplicate_implementation_keeps_the_first() {
    let (scope, diagnostics) = bind_source("function twice() {}\nfunction twice(a?: number) {}");
    assert_eq!(codes(&diagnostics), [2393]);
    assert_eq!(diagnostics[0].line, 1);
    let twice = scope.symbols.get("twice", SymbolKind::Function).unwrap();
    assert!(twice.has_implementation);
    assert!(twice.implementation.as_ref().unwrap().parameters.is_empty());
    assert_eq!(twice.diagnostics[0].code, 2393);
}

#[test]
fn overload_with_too_few_arguments_is_incompatible() {
    let source = "function pick(): void;\nfunction pick(a: string, b: number): void;\nfunction pick(a: string) {}";
    let (_, diagnostics) = bind_source(source);
    assert_eq!(codes(&diagnostics), [2394]);
    assert_eq!(diagnostics[0].line, 0);

    let options = BinderOptions {
        check_overload_arity: false,
    };
    let (_, diagnostics) = bind_source_with(source, "test.ts", options);
    assert!(diagnostics.is_empty());
}

#[test]
fn merge_interface_members_in_source_order() {
    let scope = bind_clean(
        "\
interface MergedInterface {
  prop1: string;
}

interface MergedInterface {
  prop2: number;
}
",
    );
    assert_eq!(scope.symbols.len(), 1);
    let merged = scope
        .symbols
        .get("MergedInterface", SymbolKind::Interface)
        .unwrap();
    assert_eq!(member_names(merged), ["prop1", "prop2"]);
    assert_eq!(merged.declarations.len(), 2);
}

#[test]
fn interface_call_and_construct_signatures_are_anonymous() {
    let scope = bind_clean(
        "interface Callable {\n    (param: string): number;\n    (param: number): number;\n    new (param: string): SomeClass;\n}",
    );
    let callable = scope.symbols.get("Callable", SymbolKind::Interface).unwrap();
    let members: Vec<_> = callable.members.iter().map(|m| (m.kind, m.name.clone())).collect();
    assert_eq!(
        members,
        [
            (SymbolKind::Method, SymbolName::Anonymous),
            (SymbolKind::Constructor, SymbolName::Anonymous),
        ]
    );
    assert_eq!(callable.members.get_index(0).unwrap().signatures.len(), 2);
}

#[test]
fn promote_only_parameters_with_property_modifiers() {
    let scope = bind_clean(
        "\
class A {
    methodFirst() {}

    regularProp: string = \"test\";

    constructor(
        public publicProp: string,
        private privateProp: number,
        normalParam: any
    ) {}

    methodSecond() {}
}
",
    );
    let class = scope.symbols.get("A", SymbolKind::Class).unwrap();
    assert_eq!(
        member_names(class),
        [
            "methodFirst",
            "regularProp",
            "constructor",
            "publicProp",
            "privateProp",
            "methodSecond",
        ]
    );
    let promoted: Vec<_> = class
        .members
        .iter()
        .filter(|m| m.kind == SymbolKind::Property && m.name.text() != "regularProp")
        .map(|m| (m.name.text(), m.modifiers))
        .collect();
    assert_eq!(
        promoted,
        [
            ("publicProp", Modifiers::PUBLIC),
            ("privateProp", Modifiers::PRIVATE)
        ]
    );
    assert!(class.members.get("normalParam", SymbolKind::Property).is_none());
    let public_prop = class.members.get("publicProp", SymbolKind::Property).unwrap();
    assert_eq!(public_prop.type_annotation.as_ref().unwrap().to_string(), "string");
}

#[test]
fn promote_from_implementation_constructor_only() {
    let scope = bind_clean(
        "\
class ConstructorOverloads {
    constructor(name: string);
    constructor(id: number);
    constructor(readonly nameOrId: string | number, suffix?: string) {}
}
",
    );
    let class = scope
        .symbols
        .get("ConstructorOverloads", SymbolKind::Class)
        .unwrap();
    let ctor = class.members.get("constructor", SymbolKind::Constructor).unwrap();
    assert_eq!(ctor.signatures.len(), 2);
    assert!(ctor.has_implementation);
    assert_eq!(member_names(class), ["constructor", "nameOrId"]);
}

#[test]
fn promoted_property_colliding_with_field_is_a_duplicate() {
    let (scope, diagnostics) =
        bind_source("class C {\n    x: number;\n    constructor(public x: number, x2: number) {}\n}");
    assert_eq!(codes(&diagnostics), [2300]);
    let class = scope.symbols.get("C", SymbolKind::Class).unwrap();
    assert_eq!(member_names(class), ["x", "constructor"]);

    // Unmodified parameters never collide.
    bind_clean("class D {\n    y: number;\n    constructor(y: number) {}\n}");
}

#[test]
fn parameter_property_on_overload_is_reported() {
    let (scope, diagnostics) = bind_source("declare class E {\n    constructor(public x: number);\n}");
    assert_eq!(codes(&diagnostics), [2369]);
    let class = scope.symbols.get("E", SymbolKind::Class).unwrap();
    assert_eq!(member_names(class), ["constructor"]);
}

#[test]
fn pair_get_and_set_accessors() {
    let scope = bind_clean(
        "\
class PropertyExamples {
    get fullName(): string {
        return this.name;
    }

    set fullName(value: string) {
        this.name = value;
    }

    get readOnly(): number { return 1; }
}
",
    );
    let class = scope
        .symbols
        .get("PropertyExamples", SymbolKind::Class)
        .unwrap();
    assert_eq!(class.members.len(), 2);
    let full_name = class.members.get("fullName", SymbolKind::Accessor).unwrap();
    assert!(full_name.get_signature().is_some());
    assert!(full_name.set_signature().is_some());
    assert_eq!(full_name.type_annotation.as_ref().unwrap().to_string(), "string");
    assert_eq!(full_name.declarations.len(), 2);

    let read_only = class.members.get("readOnly", SymbolKind::Accessor).unwrap();
    assert!(read_only.get_signature().is_some());
    assert!(read_only.set_signature().is_none());
}

#[test]
fn second_getter_is_a_duplicate() {
    let (_, diagnostics) =
        bind_source("class G {\n    get v(): number { return 1; }\n    get v(): number { return 2; }\n}");
    assert_eq!(codes(&diagnostics), [2300]);
    assert_eq!(diagnostics[0].line, 2);
}

#[test]
fn decorators_keep_source_order() {
    let scope = bind_clean(
        "class DecoratedProps {\n    @validate\n    @transform\n    decoratedProp: string = \"test\";\n}",
    );
    let class = scope.symbols.get("DecoratedProps", SymbolKind::Class).unwrap();
    let prop = class.members.get("decoratedProp", SymbolKind::Property).unwrap();
    let decorators: Vec<_> = prop
        .decorators
        .iter()
        .map(|d| (d.expression.as_str(), d.invoked, d.arguments.is_none()))
        .collect();
    assert_eq!(
        decorators,
        [("validate", false, true), ("transform", false, true)]
    );
}

#[test]
fn static_and_instance_members_coexist() {
    let scope = bind_clean("class S {\n    static x = 1;\n    x = 2;\n    static {}\n    static {}\n}");
    let class = scope.symbols.get("S", SymbolKind::Class).unwrap();
    let kinds: Vec<_> = class.members.iter().map(|m| (m.kind, m.is_static())).collect();
    assert_eq!(
        kinds,
        [
            (SymbolKind::Property, true),
            (SymbolKind::Property, false),
            (SymbolKind::StaticInitializer, true),
            (SymbolKind::StaticInitializer, true),
        ]
    );
}

#[test]
fn index_signatures_are_keyed_by_parameter_type() {
    let scope = bind_clean("class ClassIndexSignature {\n  [key: string]: any;\n  [index: number]: string;\n}");
    let class = scope
        .symbols
        .get("ClassIndexSignature", SymbolKind::Class)
        .unwrap();
    let names: Vec<_> = class.members.iter().map(|m| m.name.clone()).collect();
    assert_eq!(
        names,
        [
            SymbolName::IndexKey("string".to_string()),
            SymbolName::IndexKey("number".to_string()),
        ]
    );
    assert_eq!(
        class.members.get_index(1).unwrap().type_annotation.as_ref().unwrap().to_string(),
        "string"
    );

    let (_, diagnostics) = bind_source("interface Twice {\n  [a: string]: any;\n  [b: string]: any;\n}");
    assert_eq!(codes(&diagnostics), [2374]);
}

#[test]
fn computed_keys_stay_opaque_and_literal_keys_normalize() {
    let scope = bind_clean("class ComputedProperties {\n    [key]: string;\n    [\"literalKey\"]: number;\n    #privateVar = 123;\n}");
    let class = scope
        .symbols
        .get("ComputedProperties", SymbolKind::Class)
        .unwrap();
    let names: Vec<_> = class.members.iter().map(|m| m.name.clone()).collect();
    assert_eq!(
        names,
        [
            SymbolName::Computed("key".to_string()),
            SymbolName::Named("literalKey".to_string()),
            SymbolName::Private("privateVar".to_string()),
        ]
    );
    assert!(names[0].is_computed());
}

#[test]
fn duplicate_non_mergeable_declaration_is_rejected() {
    let (scope, diagnostics) =
        bind_source("const MySymbol: unique symbol;\ndeclare const MySymbol: unique symbol;");
    assert_eq!(codes(&diagnostics), [2300]);
    assert_eq!(diagnostics[0].message_text, "Duplicate identifier 'MySymbol'.");
    assert_eq!(diagnostics[0].line, 1);
    assert_eq!(scope.symbols.len(), 1);
    let symbol = scope.symbols.get("MySymbol", SymbolKind::Variable).unwrap();
    assert_eq!(symbol.declarations.len(), 1);
    assert!(!symbol.is_ambient);
    assert_eq!(symbol.diagnostics.len(), 1);
}

#[test]
fn enums_are_not_mergeable() {
    let (scope, diagnostics) = bind_source("enum E { A }\nenum E { B }");
    assert_eq!(codes(&diagnostics), [2300]);
    let e = scope.symbols.get("E", SymbolKind::Enum).unwrap();
    assert_eq!(member_names(e), ["A"]);
}

#[test]
fn same_name_different_kind_is_not_a_conflict() {
    let scope = bind_clean("interface Box { value: number }\nclass Box {}\ntype Alias = Box;\nconst Alias = 1;");
    assert_eq!(scope.symbols.len(), 4);
}

#[test]
fn merge_namespaces_and_desugared_dotted_names() {
    let scope = bind_clean(
        "\
namespace N {
    export const a = 1;
}
namespace N {
    export function f() {}
}
declare namespace GreetingLib.Options {
    function makeGreeting(s: string): string;
    let numberOfGreetings: number;
}
",
    );
    let n = scope.symbols.get("N", SymbolKind::Namespace).unwrap();
    assert_eq!(member_names(n), ["a", "f"]);
    assert!(n.has_implementation);

    let make = scope
        .resolve(&["GreetingLib", "Options", "makeGreeting"])
        .unwrap();
    assert_eq!(make.kind, SymbolKind::Function);
    assert!(make.is_ambient);
    assert!(!make.has_implementation);
    let options = scope.resolve(&["GreetingLib", "Options"]).unwrap();
    assert!(options.is_exported());
}

#[test]
fn ambient_modules_and_global_are_held_separately() {
    let scope = bind_clean(
        "\
export {};
declare module \"SomeModule\" {
  export function fn(): string;
  interface Request {
    user?: { id: string; name: string };
  }
}
declare module \"shorthand\";
declare global {
  interface Window {
    myCustomProperty: string;
  }
}
",
    );
    assert!(scope.symbols.is_empty());
    let some_module = scope.ambient_module("SomeModule").unwrap();
    assert_eq!(some_module.name, SymbolName::Module("SomeModule".to_string()));
    assert_eq!(member_names(some_module), ["fn", "Request"]);
    assert!(some_module.members.iter().all(|m| m.is_ambient));
    assert!(scope.ambient_module("shorthand").unwrap().members.is_empty());

    let window = scope.global.get("Window", SymbolKind::Interface).unwrap();
    assert_eq!(member_names(window), ["myCustomProperty"]);
    assert_eq!(scope.exports.len(), 1);
}

#[test]
fn abstract_methods_need_no_body() {
    let scope = bind_clean(
        "abstract class AbstractClassMethods {\n    abstract abstractMethod(): void;\n    concreteMethod() {\n        return \"concrete\";\n    }\n}",
    );
    let class = scope
        .symbols
        .get("AbstractClassMethods", SymbolKind::Class)
        .unwrap();
    let method = class.members.get("abstractMethod", SymbolKind::Method).unwrap();
    assert!(method.modifiers.contains(Modifiers::ABSTRACT));
    assert!(!method.has_implementation);
}

#[test]
fn function_valued_variables_carry_a_signature() {
    let scope = bind_clean("const typedArrowFun = (a: string): void => { aaaaa };\nconst plain = 1;");
    let arrow = scope.symbols.get("typedArrowFun", SymbolKind::Variable).unwrap();
    assert_eq!(arrow.signatures.len(), 1);
    assert!(arrow.has_implementation);
    assert!(arrow.modifiers.contains(Modifiers::CONST));
    let plain = scope.symbols.get("plain", SymbolKind::Variable).unwrap();
    assert!(plain.signatures.is_empty());
    assert_eq!(plain.initializer.as_deref(), Some("1"));
}
