//! Iterative Fibonacci by repeated addition.
//!
//! O(k) additions and no multiplication at all, which makes it an
//! independent cross-check for the fast doubling engine.

use std::mem;

use fibdrv_bignum::{add, estimate_limb_count, LimbBuffer, LIMB_BITS};

use crate::calculator::{CoreCalculator, FibError};

/// Iterative adding calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adding;

impl Adding {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute F(k) for any k, including 0 and 1.
    pub fn fibonacci(&self, k: u64) -> Result<LimbBuffer, FibError> {
        let len = estimate_limb_count(k.saturating_add(1), LIMB_BITS);
        let mut a = LimbBuffer::zeroed(len)?;
        let mut b = LimbBuffer::zeroed(len)?;
        let mut next = LimbBuffer::zeroed(len)?;
        b.set_limb(1);
        for _ in 0..k {
            add(&mut next, &a, &b)?;
            // (a, b, next) <- (b, next, a)
            mem::swap(&mut a, &mut b);
            mem::swap(&mut b, &mut next);
        }
        Ok(a)
    }
}

impl CoreCalculator for Adding {
    fn calculate_core(&self, k: u64) -> Result<LimbBuffer, FibError> {
        self.fibonacci(k)
    }

    fn name(&self) -> &str {
        "Adding"
    }
}
