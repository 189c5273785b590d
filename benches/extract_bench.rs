//! Extraction phase timing.
//!
//! Measures parsing, the per-file fold and whole-project extraction on
//! generated files with a realistic mix of declarations.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;
use tsdecl::{BinderOptions, BinderState, extract_project, parse_file};

/// A file with `decl_count` top-level declarations.
fn generate_ts_file(decl_count: usize) -> String {
    let mut src = String::with_capacity(decl_count * 400);
    src.push_str("// Generated declarations for the extraction benchmark\n\n");

    for i in 0..decl_count {
        match i % 5 {
            0 => src.push_str(&format!(
                r#"function process{i}(input: string): string;
function process{i}(input: string, count: number): string;
function process{i}(input: string, count = 1): string {{
    let out = "";
    for (let j = 0; j < count; j++) {{
        out += `${{input}}-${{j}}`;
    }}
    return out;
}}

"#
            )),
            1 => src.push_str(&format!(
                r#"interface Config{i} {{
    readonly id: number;
    name: string;
    tags: string[];
    metadata?: Record<string, unknown>;
    process(input: string): string;
}}

interface Config{i} {{
    validate(): boolean;
}}

"#
            )),
            2 => src.push_str(&format!(
                r#"class Service{i} {{
    private data = new Map<string, number>();

    constructor(private readonly id: number, public name: string) {{}}

    @memoize
    get size(): number {{
        return this.data.size;
    }}

    set size(value: number) {{}}

    getData(key: string): number | undefined {{
        return this.data.get(key);
    }}
}}

"#
            )),
            3 => src.push_str(&format!(
                r#"type Result{i}<T, E = Error> = {{ ok: true; value: T }} | {{ ok: false; error: E }};
type Partial{i}<T> = {{ [K in keyof T]?: T[K] }};
type Unwrap{i}<T> = T extends Promise<infer U> ? U : T;

"#
            )),
            4 => src.push_str(&format!(
                r#"enum Status{i} {{
    Active = "active",
    Inactive = 1 << 2,
    Pending,
}}

namespace Area{i} {{
    export const DEFAULT = {{ status: Status{i}.Active, retries: 3 }};
}}

"#
            )),
            _ => unreachable!(),
        }
    }
    src
}

fn bench_phases(c: &mut Criterion) {
    tsdecl::tracing_config::init_tracing();
    let mut group = c.benchmark_group("extract_phases");
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(30);

    for decl_count in [50, 200, 800] {
        let source = generate_ts_file(decl_count);
        let label = format!("{decl_count}decls_{}lines", source.lines().count());

        group.bench_with_input(BenchmarkId::new("1_parse", &label), &source, |b, src| {
            b.iter(|| black_box(parse_file(src, "bench.ts")));
        });

        group.bench_with_input(BenchmarkId::new("2_parse_bind", &label), &source, |b, src| {
            b.iter(|| {
                let (file, _) = parse_file(src, "bench.ts");
                black_box(BinderState::bind_file(file, BinderOptions::default()))
            });
        });
    }
    group.finish();
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_project");
    group.sample_size(20);

    for file_count in [1, 8, 32] {
        let sources: Vec<(String, String)> = (0..file_count)
            .map(|i| (format!("file{i}.ts"), generate_ts_file(100)))
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(file_count),
            &sources,
            |b, sources| b.iter(|| black_box(extract_project(sources))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_phases, bench_project);
criterion_main!(benches);
