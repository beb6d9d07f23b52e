//! Cross-check of every engine against `num-bigint`.
//!
//! Indices are checked in parallel with rayon; every calculator is shared
//! across worker threads, so this doubles as a re-entrancy check.

use std::sync::Arc;

use fibdrv_bignum::MultiplierKind;
use fibdrv_core::{Calculator, CalculatorFactory, DefaultFactory, FibError, Options};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rayon::prelude::*;
use tracing::{info, info_span, warn};

/// One disagreement with the reference value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub index: u64,
    pub calculator: String,
}

/// Outcome of a verification run.
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Calculator names, in check order.
    pub calculators: Vec<String>,
    /// Number of indices checked per calculator.
    pub checked: u64,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Reference F(k) by fast doubling on `BigUint`.
#[must_use]
pub fn reference_fibonacci(k: u64) -> BigUint {
    let (mut a, mut b) = (BigUint::zero(), BigUint::one());
    for bit in (0..u64::BITS - k.leading_zeros()).rev() {
        let c = &a * ((&b << 1u32) - &a);
        let d = &a * &a + &b * &b;
        if (k >> bit) & 1 == 1 {
            a = d;
            b = &a + &c;
        } else {
            a = c;
            b = d;
        }
    }
    a
}

/// Every multiplier with fast doubling, plus the adding engine.
pub fn all_calculators(base: &Options) -> Result<Vec<Arc<dyn Calculator>>, FibError> {
    let mut calculators = Vec::new();
    for kind in MultiplierKind::ALL {
        let factory = DefaultFactory::with_options(Options {
            multiplier: kind,
            ..base.clone()
        });
        calculators.push(factory.get("fast")?);
    }
    calculators.push(DefaultFactory::with_options(base.clone()).get("adding")?);
    Ok(calculators)
}

fn check(calculators: &[Arc<dyn Calculator>], k: u64) -> Result<Vec<Mismatch>, FibError> {
    let expected = reference_fibonacci(k).to_string();
    let mut mismatches = Vec::new();
    for calc in calculators {
        if calc.compute(k)? != expected {
            warn!(index = k, calculator = calc.name(), "mismatch");
            mismatches.push(Mismatch {
                index: k,
                calculator: calc.name().to_string(),
            });
        }
    }
    Ok(mismatches)
}

/// Check F(0..=max) with every calculator.
///
/// `max` above `options.max_index` is rejected before any work starts.
pub fn run(options: &Options, max: u64) -> Result<VerifyReport, FibError> {
    let _span = info_span!("verify", max).entered();
    let out_of_range = || FibError::OutOfRange {
        index: i128::from(max),
        max: options.max_index,
    };
    if max > options.max_index {
        return Err(out_of_range());
    }
    let checked = max.checked_add(1).ok_or_else(out_of_range)?;
    let calculators = all_calculators(options)?;
    let mut mismatches: Vec<Mismatch> = (0..=max)
        .into_par_iter()
        .map(|k| check(&calculators, k))
        .collect::<Result<Vec<_>, FibError>>()?
        .into_iter()
        .flatten()
        .collect();
    mismatches.sort_by_key(|m| m.index);
    info!(checked, mismatches = mismatches.len(), "verify finished");
    Ok(VerifyReport {
        calculators: calculators.iter().map(|c| c.name().to_string()).collect(),
        checked,
        mismatches,
    })
}
