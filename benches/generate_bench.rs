//! Benchmarks for program generation and batch assembly

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use karel::dataset::{assemble_batch, CodeSource, GenParams, GrammarSource, KarelOracle};
use karel::dsl::{self, GrammarVariant};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Benchmark random program generation at several depth bounds
fn bench_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_code");

    for &depth in &[1, 3, 5, 7] {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        group.bench_function(format!("depth_{}", depth), |b| {
            b.iter(|| {
                let program = dsl::random_code(&mut rng, depth);
                black_box(program)
            })
        });
    }

    group.finish();
}

/// Benchmark tokenization of generated programs
fn bench_tokenize(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let programs: Vec<_> = (0..64).map(|_| dsl::random_code(&mut rng, 5)).collect();

    let mut group = c.benchmark_group("tokenize");
    group.throughput(Throughput::Elements(programs.len() as u64));
    for variant in [GrammarVariant::Curly, GrammarVariant::Synthesis] {
        group.bench_function(format!("{}", variant), |b| {
            b.iter(|| {
                for program in &programs {
                    black_box(dsl::lex_to_indices(program, variant));
                }
            })
        });
    }
    group.finish();
}

/// Benchmark end-to-end batch assembly against the real oracle
fn bench_assemble_batch(c: &mut Criterion) {
    let params = GenParams {
        num_examples: 4,
        no_change_fraction: 0.2,
        width: 8,
        height: 8,
        ..GenParams::default()
    };
    let mut codes = GrammarSource::new(42);
    let mut oracle = KarelOracle::new(43);

    // Warm up
    let _ = assemble_batch(&mut codes, &mut oracle, &params);

    c.bench_function("assemble_batch_4_examples", |b| {
        b.iter(|| {
            let batch = assemble_batch(&mut codes, &mut oracle, &params);
            black_box(batch)
        })
    });
}

/// Benchmark raw pair throughput with a trivial program
fn bench_code_only(c: &mut Criterion) {
    let mut codes = GrammarSource::new(1);
    c.bench_function("code_only_program", |b| {
        b.iter(|| {
            let program = codes.random_code(5);
            black_box(program)
        })
    });
}

criterion_group!(
    benches,
    bench_random_code,
    bench_tokenize,
    bench_assemble_batch,
    bench_code_only
);
criterion_main!(benches);
