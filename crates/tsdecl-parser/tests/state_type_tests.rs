//! Tests for type expression parsing.
use tsdecl_parser::{Statement, TypeExpr, parse_file};

/// Parse `type Alias = <source>;` and return the canonical text of the type.
fn parse_alias_type(source: &str) -> String {
    let text = format!("type Alias = {source};");
    let (file, diagnostics) = parse_file(&text, "test.ts");
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics for `{source}`: {diagnostics:?}"
    );
    match &file.statements[0] {
        Statement::TypeAlias(alias) => alias.type_expr.to_string(),
        other => panic!("expected type alias, got {other:?}"),
    }
}

#[test]
fn parse_union_and_array_types() {
    assert_eq!(parse_alias_type("string | number[]"), "string | number[]");
    assert_eq!(parse_alias_type("(string | number)[]"), "(string | number)[]");
    assert_eq!(parse_alias_type("| 'a' | 'b'"), "'a' | 'b'");
    assert_eq!(parse_alias_type("-1 | 1"), "-1 | 1");
}

#[test]
fn parse_nested_type_arguments_without_merged_greater_than() {
    assert_eq!(
        parse_alias_type("Array<Map<string, Set<number>>>"),
        "Array<Map<string, Set<number>>>"
    );
}

#[test]
fn parse_function_and_constructor_types() {
    assert_eq!(
        parse_alias_type("(a: string, b?: number) => void"),
        "(a: string, b?: number) => void"
    );
    assert_eq!(
        parse_alias_type("new (x: number) => Foo"),
        "new (x: number) => Foo"
    );
    assert_eq!(
        parse_alias_type("abstract new () => object"),
        "abstract new () => object"
    );
    assert_eq!(
        parse_alias_type("<T>(...items: T[]) => T"),
        "<T>(...items: T[]) => T"
    );
}

#[test]
fn parse_conditional_and_infer_types() {
    assert_eq!(
        parse_alias_type("T extends string ? \"yes\" : \"no\""),
        "T extends string ? \"yes\" : \"no\""
    );
    assert_eq!(
        parse_alias_type("T extends Array<infer U> ? U : never"),
        "T extends Array<infer U> ? U : never"
    );
    assert_eq!(
        parse_alias_type("T extends [infer H extends string, ...infer R] ? H : never"),
        "T extends [infer H extends string, ...infer R] ? H : never"
    );
}

#[test]
fn parse_mapped_types_keep_modifiers() {
    assert_eq!(
        parse_alias_type("{ readonly [K in keyof T]?: T[K] }"),
        "{ readonly [K in keyof T]?: T[K] }"
    );
    assert_eq!(
        parse_alias_type("{ -readonly [K in keyof T]-?: T[K] }"),
        "{ -readonly [K in keyof T]-?: T[K] }"
    );
    assert_eq!(
        parse_alias_type("{ [K in Keys as `get${K}`]: () => T[K] }"),
        "{ [K in Keys as `get${K}`]: () => T[K] }"
    );
}

#[test]
fn parse_template_literal_type() {
    assert_eq!(
        parse_alias_type("`on${Capitalize<K>}Changed`"),
        "`on${Capitalize<K>}Changed`"
    );
}

#[test]
fn parse_tuple_types_with_names_optional_and_rest() {
    assert_eq!(
        parse_alias_type("[name: string, age?: number, ...rest: boolean[]]"),
        "[name: string, age?: number, ...rest: boolean[]]"
    );
    assert_eq!(parse_alias_type("[string, number?]"), "[string, number?]");
}

#[test]
fn parse_type_operators_queries_and_imports() {
    assert_eq!(parse_alias_type("keyof typeof config"), "keyof typeof config");
    assert_eq!(parse_alias_type("readonly string[]"), "readonly string[]");
    assert_eq!(
        parse_alias_type("import(\"./mod\").Foo<string>"),
        "import(\"./mod\").Foo<string>"
    );
    assert_eq!(parse_alias_type("Outer.Inner[\"key\"]"), "Outer.Inner[\"key\"]");
}

#[test]
fn parse_type_literal_members() {
    assert_eq!(parse_alias_type("{}"), "{}");
    assert_eq!(
        parse_alias_type("{ a: string; b?: number, method(): void }"),
        "{ a: string; b?: number; method(): void }"
    );
    assert_eq!(
        parse_alias_type("{ (x: number): string; new (): Foo; [key: string]: any }"),
        "{ (x: number): string; new (): Foo; [key: string]: any }"
    );
}

#[test]
fn parse_type_predicates_in_return_position() {
    let source = "\
function isString(x: unknown): x is string;
function assertDefined(x: unknown): asserts x;
function check(this: Base): this is Derived;
";
    let (file, diagnostics) = parse_file(source, "test.d.ts");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let returns: Vec<_> = file
        .statements
        .iter()
        .map(|stmt| match stmt {
            Statement::Function(func) => func.signature.return_type.as_ref().unwrap().to_string(),
            _ => panic!("expected function"),
        })
        .collect();
    assert_eq!(returns, ["x is string", "asserts x", "this is Derived"]);
}

#[test]
fn parse_type_structure_is_available() {
    let (file, _) = parse_file("type Pair = [string, number];", "test.ts");
    let Statement::TypeAlias(alias) = &file.statements[0] else {
        panic!("expected type alias");
    };
    let TypeExpr::Tuple(elements) = &alias.type_expr else {
        panic!("expected tuple");
    };
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].type_expr, TypeExpr::Keyword("string".to_string()));
}

#[test]
fn parse_missing_type_reports_and_recovers() {
    let (file, diagnostics) = parse_file("type Bad = ;\ntype Good = string;", "test.ts");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 1110);
    assert_eq!(file.statements.len(), 1);
    assert_eq!(file.statements[0].name(), Some("Good"));
}
