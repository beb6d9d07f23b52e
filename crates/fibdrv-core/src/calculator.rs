//! Calculator traits and the `FibCalculator` decorator.
//!
//! `Calculator` is the public trait consumed by the device facade and the CLI.
//! `CoreCalculator` is the internal trait implemented by algorithms.
//! `FibCalculator` is a decorator that adds the range check and the k <= 1
//! fast path.

use std::sync::Arc;

use fibdrv_bignum::{to_decimal, BignumError, LimbBuffer};

/// Error type for Fibonacci calculations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FibError {
    /// A result or scratch buffer could not be obtained.
    #[error("allocation of {bytes} bytes failed")]
    AllocationFailure { bytes: usize },

    /// The index is negative or above the configured maximum.
    #[error("index {index} is out of range (0..={max})")]
    OutOfRange { index: i128, max: u64 },

    /// An arithmetic invariant did not hold.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(&'static str),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<BignumError> for FibError {
    fn from(err: BignumError) -> Self {
        match err {
            BignumError::AllocationFailure { bytes } => Self::AllocationFailure { bytes },
            BignumError::InvariantViolation(what) => Self::InternalInvariantViolation(what),
        }
    }
}

/// Validate a signed index against `max` before anything is allocated.
pub fn check_index(index: i64, max: u64) -> Result<u64, FibError> {
    match u64::try_from(index) {
        Ok(k) if k <= max => Ok(k),
        _ => Err(FibError::OutOfRange {
            index: i128::from(index),
            max,
        }),
    }
}

/// Public trait for Fibonacci calculators.
pub trait Calculator: Send + Sync {
    /// Calculate F(k) as a limb buffer.
    fn calculate(&self, k: u64) -> Result<LimbBuffer, FibError>;

    /// Calculate F(k) as a decimal string.
    fn compute(&self, k: u64) -> Result<String, FibError> {
        let value = self.calculate(k)?;
        Ok(to_decimal(&value)?)
    }

    /// Get the name of this calculator.
    fn name(&self) -> &str;
}

/// Internal trait for algorithm implementations.
/// Wrapped by `FibCalculator`, which only forwards k >= 2.
pub trait CoreCalculator: Send + Sync {
    /// Perform the core calculation.
    fn calculate_core(&self, k: u64) -> Result<LimbBuffer, FibError>;

    /// Get the name of this algorithm.
    fn name(&self) -> &str;
}

/// Decorator that wraps a `CoreCalculator` with the range check and the
/// small-index fast path.
pub struct FibCalculator {
    inner: Arc<dyn CoreCalculator>,
    max_index: u64,
}

impl FibCalculator {
    /// Create a new `FibCalculator` accepting indices up to `max_index`.
    #[must_use]
    pub fn new(inner: Arc<dyn CoreCalculator>, max_index: u64) -> Self {
        Self { inner, max_index }
    }

    #[must_use]
    pub fn max_index(&self) -> u64 {
        self.max_index
    }
}

impl Calculator for FibCalculator {
    fn calculate(&self, k: u64) -> Result<LimbBuffer, FibError> {
        if k > self.max_index {
            return Err(FibError::OutOfRange {
                index: i128::from(k),
                max: self.max_index,
            });
        }

        // F(0) = 0 and F(1) = 1 need no doubling
        if k <= 1 {
            return Ok(LimbBuffer::from_u64(k)?);
        }

        self.inner.calculate_core(k)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
