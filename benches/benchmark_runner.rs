/// Benchmark runner for the husk script host.
///
/// Measures the interpreted checksum path against a native crc32fast
/// baseline over the same input, for a rough feel of the hosting
/// overhead.

extern crate husk;

use husk::parser;
use husk::runner::class::registry::ClassRegistry;
use husk::runner::context::EvalContext;
use husk::runner::eval::execute_statement;
use std::time::{Duration, Instant};

fn new_context() -> EvalContext {
    let mut ctx = EvalContext::new();
    ctx.install_classes(ClassRegistry::with_core());
    ctx
}

/// Run a benchmark and return the execution time.
fn run_benchmark(name: &str, source: &str, iterations: u32) -> Duration {
    let program = parser::parse_to_ast(source)
        .unwrap_or_else(|e| panic!("failed to parse benchmark {}: {}", name, e));

    let start = Instant::now();

    for _ in 0..iterations {
        let mut ctx = new_context();
        for statement in &program.body {
            execute_statement(statement, &mut ctx)
                .unwrap_or_else(|e| panic!("benchmark {} failed: {}", name, e));
        }
    }

    start.elapsed()
}

/// Native baseline: fold the same bytes with crc32fast directly.
fn run_native_baseline(data: &[u8], iterations: u32) -> Duration {
    let start = Instant::now();
    let mut sink = 0u32;
    for _ in 0..iterations {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(data);
        sink = sink.wrapping_add(hasher.finalize());
    }
    // Keep the loop from being optimized away.
    if sink == 0xDEAD_BEEF {
        println!("unlikely");
    }
    start.elapsed()
}

fn build_update_script(chunks: usize) -> String {
    let mut source = String::from("const crc = new Crc();\n");
    for i in 0..chunks {
        source.push_str(&format!(
            "crc.update(new Uint8Array([{}, {}, {}, {}]));\n",
            i % 256,
            (i + 1) % 256,
            (i + 2) % 256,
            (i + 3) % 256
        ));
    }
    source.push_str("crc.checksum;\n");
    source
}

fn main() {
    const ITERATIONS: u32 = 1000;

    println!("husk benchmarks ({} iterations each)", ITERATIONS);
    println!();

    let single = run_benchmark(
        "single_update",
        "const crc = new Crc(); crc.update(new Uint8Array([1, 2, 3, 4, 5])); crc.checksum;",
        ITERATIONS,
    );
    println!("single_update:        {:>8.3}ms", single.as_secs_f64() * 1000.0);

    let chunked = run_benchmark("chunked_updates", &build_update_script(64), ITERATIONS);
    println!("chunked_updates(64):  {:>8.3}ms", chunked.as_secs_f64() * 1000.0);

    let construction = run_benchmark(
        "buffer_construction",
        "new Uint8Array(4096);",
        ITERATIONS,
    );
    println!(
        "buffer_construction:  {:>8.3}ms",
        construction.as_secs_f64() * 1000.0
    );

    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let native = run_native_baseline(&data, ITERATIONS);
    println!("native_crc32(4096B):  {:>8.3}ms", native.as_secs_f64() * 1000.0);
}
