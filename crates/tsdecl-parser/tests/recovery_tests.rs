//! Tests for error recovery: every malformed input still yields the
//! declarations around the error, plus diagnostics.
use tsdecl_common::DiagnosticKind;
use tsdecl_parser::{Statement, parse_file};

fn statement_names(statements: &[Statement]) -> Vec<String> {
    statements
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::Variable(var) => Some(var.declarations[0].name.clone()),
            other => other.name().map(str::to_string),
        })
        .collect()
}

#[test]
fn recover_from_malformed_member_keeps_siblings() {
    let source = "\
class A {
    first: string;
    second: = 5;
    third: number;
}
const after = 1;
";
    let (file, diagnostics) = parse_file(source, "test.ts");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 1110);
    assert_eq!(diagnostics[0].line, 2);
    assert_eq!(statement_names(&file.statements), ["A", "after"]);

    let Statement::Class(class) = &file.statements[0] else {
        panic!("expected class");
    };
    let members: Vec<_> = class.members.iter().map(|m| m.name.text()).collect();
    assert_eq!(members, ["first", "third"]);
}

#[test]
fn recover_from_malformed_declaration_header() {
    let source = "\
function ok1(): void {}
function (: void {}
function ok2(): void {}
";
    let (file, diagnostics) = parse_file(source, "test.ts");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 1003);
    assert_eq!(statement_names(&file.statements), ["ok1", "ok2"]);
}

#[test]
fn recover_from_malformed_interface_member() {
    let source = "\
interface Shape {
    width: number;
    height number;
    depth: number;
}
";
    let (file, diagnostics) = parse_file(source, "test.ts");
    assert!(!diagnostics.is_empty());
    let Statement::Interface(shape) = &file.statements[0] else {
        panic!("expected interface");
    };
    let members: Vec<_> = shape.members.iter().map(|m| m.name.text()).collect();
    assert_eq!(members.first(), Some(&"width"));
    assert_eq!(members.last(), Some(&"depth"));
}

#[test]
fn recover_from_unterminated_string() {
    let (file, diagnostics) = parse_file("const a = \"oops\nconst b = 1;", "test.ts");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 1002);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Lex);
    assert_eq!(statement_names(&file.statements), ["a", "b"]);
}

#[test]
fn recover_from_stray_closing_brace() {
    let (file, diagnostics) = parse_file("}\nconst x = 1;", "test.ts");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 1128);
    assert_eq!(statement_names(&file.statements), ["x"]);
}

#[test]
fn recover_from_unclosed_class_body() {
    let (_file, diagnostics) = parse_file("class A {\n    x: number;\n", "test.ts");
    assert!(diagnostics.iter().any(|d| d.code == 1005));
}

#[test]
fn recover_from_unterminated_block_comment() {
    let (file, diagnostics) = parse_file("const a = 1;\n/* never closed", "test.ts");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 1010);
    assert_eq!(statement_names(&file.statements), ["a"]);
}

#[test]
fn diagnostics_are_in_source_order() {
    let source = "\
type A = ;
const ok = 1;
}
type B = ;
";
    let (_file, diagnostics) = parse_file(source, "test.ts");
    let lines: Vec<_> = diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, [0, 2, 3]);
}

#[test]
fn deeply_nested_types_report_instead_of_overflowing() {
    // Generous stack: the guard has to trip before the default test stack
    // would run out in debug builds.
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let depth = 2000;
            let source = format!(
                "type Deep = {}string{};\nconst after = 1;",
                "(".repeat(depth),
                ")".repeat(depth)
            );
            parse_file(&source, "test.ts")
        })
        .unwrap();
    let (file, diagnostics) = handle.join().unwrap();
    assert!(diagnostics.iter().any(|d| d.code == 2321));
    assert_eq!(statement_names(&file.statements), ["after"]);
}

#[test]
fn deeply_nested_namespaces_report_instead_of_overflowing() {
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let depth = 1000;
            let source = format!(
                "{}{}\nconst after = 1;",
                "namespace N {\n".repeat(depth),
                "}\n".repeat(depth)
            );
            parse_file(&source, "test.ts")
        })
        .unwrap();
    let (_file, diagnostics) = handle.join().unwrap();
    assert!(diagnostics.iter().any(|d| d.code == 2321));
}

#[test]
fn declaration_after_block_statement_on_same_line_is_kept() {
    let source = "if (x) {} class C {}\nwhile (y) { y--; } const z = 1;";
    let (file, diagnostics) = parse_file(source, "test.ts");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(statement_names(&file.statements), ["C", "z"]);
    assert!(matches!(file.statements[0], Statement::Class(_)));
}
