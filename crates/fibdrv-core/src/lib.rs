//! # fibdrv-core
//!
//! Exact Fibonacci numbers over fixed-length limb buffers.
//! Implements Fast Doubling (with a pluggable multiplier) and an iterative
//! adding engine, behind a range-checking calculator decorator.

pub mod adding;
pub mod calculator;
pub mod constants;
pub mod fastdoubling;
pub mod options;
pub mod registry;

// Re-exports
pub use adding::Adding;
pub use calculator::{check_index, Calculator, CoreCalculator, FibCalculator, FibError};
pub use constants::{exit_codes, DEFAULT_KARATSUBA_CUTOFF, DEFAULT_MAX_INDEX};
pub use fastdoubling::FastDoubling;
pub use options::Options;
pub use registry::{CalculatorFactory, DefaultFactory};

use std::sync::Arc;

use fibdrv_bignum::Karatsuba;

/// Compute F(k) as a decimal string with the default configuration.
///
/// This is a convenience function for simple use cases. For a different
/// multiplier or index limit, build a calculator through [`DefaultFactory`].
///
/// # Example
/// ```
/// assert_eq!(fibdrv_core::fibonacci(10).unwrap(), "55");
/// assert_eq!(fibdrv_core::fibonacci(0).unwrap(), "0");
/// ```
pub fn fibonacci(k: u64) -> Result<String, FibError> {
    let core = Arc::new(FastDoubling::new(Karatsuba::default()));
    FibCalculator::new(core, DEFAULT_MAX_INDEX).compute(k)
}
