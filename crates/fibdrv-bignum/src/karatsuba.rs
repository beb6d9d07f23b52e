//! Karatsuba multiplication.
//!
//! With `x = x1·B^h + x0` and `y = y1·B^h + y0`:
//!
//! ```text
//! z0 = x0·y0
//! z2 = x1·y1
//! z1 = (x0 + x1)(y0 + y1) - z0 - z2
//! x·y = z2·B^2h + z1·B^h + z0
//! ```
//!
//! so three half-size products replace four.

use crate::arith::{add_assign_at, mul_limb_into, sub_assign};
use crate::error::BignumError;
use crate::limb::{zeroed_limbs, Limb};
use crate::multiplier::Multiplier;
use crate::scan::trimmed;
use crate::schoolbook::Schoolbook;

/// Default operand size (in limbs) at or below which the schoolbook base
/// case takes over.
pub const DEFAULT_KARATSUBA_CUTOFF: usize = 2;

/// Karatsuba multiplier with a schoolbook base case.
#[derive(Debug, Clone, Copy)]
pub struct Karatsuba {
    cutoff: usize,
    base: Schoolbook,
}

impl Karatsuba {
    /// Create a multiplier that recurses while operands exceed `cutoff` limbs.
    #[must_use]
    pub fn new(cutoff: usize) -> Self {
        Self {
            cutoff: cutoff.max(1),
            base: Schoolbook,
        }
    }

    #[must_use]
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    fn multiply_rec(&self, out: &mut [Limb], a: &[Limb], b: &[Limb]) -> Result<(), BignumError> {
        let a = trimmed(a);
        let b = trimmed(b);
        if a.is_empty() || b.is_empty() {
            return Ok(());
        }
        if a.len() == 1 {
            mul_limb_into(&mut out[..=b.len()], b, a[0]);
            return Ok(());
        }
        if b.len() == 1 {
            mul_limb_into(&mut out[..=a.len()], a, b[0]);
            return Ok(());
        }

        let n = a.len().max(b.len());
        if n <= self.cutoff {
            return self.base.multiply_into(&mut out[..a.len() + b.len()], a, b);
        }

        let half = n / 2;
        let (a0, a1) = a.split_at(half.min(a.len()));
        let (b0, b1) = b.split_at(half.min(b.len()));

        // z0 lands in out[..2h], z2 in out[2h..]; the regions are disjoint.
        let low_end = (2 * half).min(out.len());
        self.multiply_rec(&mut out[..low_end], a0, b0)?;
        if !a1.is_empty() && !b1.is_empty() {
            self.multiply_rec(&mut out[2 * half..], a1, b1)?;
        }

        let sum_a = half_sum(a0, a1)?;
        let sum_b = half_sum(b0, b1)?;
        let sa = trimmed(&sum_a);
        let sb = trimmed(&sum_b);
        let mut z1 = zeroed_limbs(sa.len() + sb.len())?;
        if sa.len().max(sb.len()) >= n {
            self.base.multiply_into(&mut z1, sa, sb)?;
        } else {
            self.multiply_rec(&mut z1, sa, sb)?;
        }

        let (z0, z2) = out.split_at(low_end);
        let borrowed = sub_assign(&mut z1, z0) | sub_assign(&mut z1, z2);
        debug_assert!(!borrowed, "karatsuba cross term went negative");
        if borrowed {
            return Err(BignumError::InvariantViolation(
                "karatsuba cross term went negative",
            ));
        }
        let overflow = add_assign_at(out, &z1, half);
        debug_assert!(!overflow, "karatsuba product overflowed its buffer");
        if overflow {
            return Err(BignumError::InvariantViolation(
                "karatsuba product overflowed its buffer",
            ));
        }
        Ok(())
    }
}

impl Default for Karatsuba {
    fn default() -> Self {
        Self::new(DEFAULT_KARATSUBA_CUTOFF)
    }
}

/// `lo + hi` with one guard limb for the carry.
fn half_sum(lo: &[Limb], hi: &[Limb]) -> Result<Vec<Limb>, BignumError> {
    let mut sum = zeroed_limbs(lo.len().max(hi.len()) + 1)?;
    sum[..lo.len()].copy_from_slice(lo);
    let overflow = add_assign_at(&mut sum, hi, 0);
    debug_assert!(!overflow);
    Ok(sum)
}

impl Multiplier for Karatsuba {
    fn multiply_into(
        &self,
        product: &mut [Limb],
        a: &[Limb],
        b: &[Limb],
    ) -> Result<(), BignumError> {
        self.multiply_rec(product, a, b)
    }

    fn name(&self) -> &'static str {
        "Karatsuba"
    }
}
