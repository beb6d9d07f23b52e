//! Criterion benchmarks for the Fibonacci engines.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use fibdrv_bignum::MultiplierKind;
use fibdrv_core::{Calculator, CalculatorFactory, DefaultFactory, Options};

fn bench_engines(c: &mut Criterion) {
    let ks: Vec<u64> = vec![100, 1_093, 10_000];

    for kind in MultiplierKind::ALL {
        let factory = DefaultFactory::with_options(Options {
            multiplier: kind,
            ..Options::default()
        });
        let calc: Arc<dyn Calculator> = factory.get("fast").unwrap();

        let mut group = c.benchmark_group(calc.name().to_string());
        for &k in &ks {
            group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
                b.iter(|| calc.compute(k).unwrap());
            });
        }
        group.finish();
    }

    let adding = DefaultFactory::new().get("adding").unwrap();
    let mut group = c.benchmark_group("Adding");
    for &k in &ks[..2] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| adding.compute(k).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
