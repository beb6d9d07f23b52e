//! Golden file integration tests.
//!
//! Verifies every engine, and reads through the device facade, against known
//! values from tests/testdata/fibonacci_golden.json.

use std::path::Path;
use std::sync::Arc;

use num_bigint::BigUint;
use serde::Deserialize;

use fibdrv_bignum::MultiplierKind;
use fibdrv_core::{Calculator, CalculatorFactory, DefaultFactory, Options};
use fibdrv_device::{DeviceConfig, FibDevice, Whence, MAX_POSITION};

#[derive(Deserialize)]
struct GoldenData {
    values: Vec<GoldenEntry>,
}

#[derive(Deserialize)]
struct GoldenEntry {
    n: u64,
    fib: Option<String>,
    fib_prefix: Option<String>,
    fib_digits: Option<usize>,
}

fn load_golden() -> GoldenData {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/testdata/fibonacci_golden.json");
    let data = std::fs::read_to_string(path).expect("Failed to read golden file");
    serde_json::from_str(&data).expect("Failed to parse golden file")
}

fn make_calculator(algo: &str, multiplier: MultiplierKind) -> Arc<dyn Calculator> {
    DefaultFactory::with_options(Options {
        multiplier,
        ..Options::default()
    })
    .get(algo)
    .expect("calculator")
}

fn check_exact(calc: &dyn Calculator, golden: &GoldenData) {
    for entry in &golden.values {
        if let Some(ref expected) = entry.fib {
            let value = calc.calculate(entry.n).unwrap();
            assert_eq!(
                value.to_biguint(),
                expected.parse::<BigUint>().unwrap(),
                "{} F({}) mismatch",
                calc.name(),
                entry.n
            );
            assert_eq!(&calc.compute(entry.n).unwrap(), expected);
        }
    }
}

#[test]
fn golden_fast_doubling_every_multiplier() {
    let golden = load_golden();
    for kind in MultiplierKind::ALL {
        check_exact(make_calculator("fast", kind).as_ref(), &golden);
    }
}

#[test]
fn golden_adding_exact() {
    let golden = load_golden();
    check_exact(make_calculator("adding", MultiplierKind::default()).as_ref(), &golden);
}

#[test]
fn golden_prefix_and_digits() {
    let golden = load_golden();
    for kind in [MultiplierKind::Karatsuba, MultiplierKind::Convolution] {
        let calc = make_calculator("fast", kind);
        for entry in &golden.values {
            if entry.fib_prefix.is_none() && entry.fib_digits.is_none() {
                continue;
            }
            let text = calc.compute(entry.n).unwrap();
            if let Some(ref prefix) = entry.fib_prefix {
                assert!(
                    text.starts_with(prefix),
                    "F({}) prefix mismatch: expected {}, got {}...",
                    entry.n,
                    prefix,
                    &text[..prefix.len().min(text.len())]
                );
            }
            if let Some(digits) = entry.fib_digits {
                assert_eq!(text.len(), digits, "F({}) digit count mismatch", entry.n);
            }
        }
    }
}

#[test]
fn golden_device_reads() {
    let golden = load_golden();
    let device = FibDevice::new(
        make_calculator("fast", MultiplierKind::default()),
        DeviceConfig::default(),
    );
    let mut handle = device.open().unwrap();
    let mut buf = [0u8; 500];
    for entry in &golden.values {
        let Some(ref expected) = entry.fib else {
            continue;
        };
        if entry.n > MAX_POSITION {
            continue;
        }
        let position = handle.seek(Whence::Set, i64::try_from(entry.n).unwrap());
        assert_eq!(position, entry.n);
        let n = handle.read(&mut buf).unwrap();
        assert_eq!(std::str::from_utf8(&buf[..n]).unwrap(), expected, "read at {}", entry.n);
    }
}
