//! Criterion benchmarks for the three multiplication strategies.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use fibdrv_bignum::{Convolution, Karatsuba, Limb, LimbBuffer, Multiplier, Schoolbook};

fn operand(len: usize, seed: u32) -> LimbBuffer {
    let limbs: Vec<Limb> = (0..len)
        .map(|i| (i as u32).wrapping_mul(0x9E37_79B9) ^ seed)
        .collect();
    LimbBuffer::from_limbs(&limbs).unwrap()
}

fn bench_multipliers(c: &mut Criterion) {
    let strategies: Vec<Box<dyn Multiplier>> = vec![
        Box::new(Schoolbook),
        Box::new(Karatsuba::default()),
        Box::new(Convolution),
    ];
    let sizes = [4usize, 16, 64, 256];

    for m in &strategies {
        let mut group = c.benchmark_group(m.name());
        for &len in &sizes {
            let a = operand(len, 0xA5A5_A5A5);
            let b = operand(len, 0x5A5A_5A5A);
            let mut dest = LimbBuffer::zeroed(2 * len).unwrap();
            group.bench_with_input(BenchmarkId::from_parameter(len), &len, |bench, _| {
                bench.iter(|| m.multiply(&mut dest, &a, &b).unwrap());
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_multipliers);
criterion_main!(benches);
