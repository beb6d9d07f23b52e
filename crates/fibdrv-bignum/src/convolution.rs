//! Column-wise (convolution) multiplication.

use crate::error::BignumError;
use crate::limb::{DoubleLimb, Limb, LIMB_BITS};
use crate::multiplier::Multiplier;

/// Convolution multiplier.
///
/// Output limb `k` is the sum of `a[i] * b[k - i]` over every valid `i`, plus
/// the carry from limb `k - 1`. The column sum is kept in a double-width
/// accumulator; wraps of that accumulator are counted separately and folded
/// into the carry for the next column.
#[derive(Debug, Clone, Copy, Default)]
pub struct Convolution;

impl Multiplier for Convolution {
    #[allow(clippy::cast_possible_truncation)]
    fn multiply_into(
        &self,
        product: &mut [Limb],
        a: &[Limb],
        b: &[Limb],
    ) -> Result<(), BignumError> {
        if a.is_empty() || b.is_empty() {
            return Ok(());
        }
        let columns = a.len() + b.len() - 1;
        let mut carry: DoubleLimb = 0;
        for k in 0..columns {
            let lo = k.saturating_sub(b.len() - 1);
            let hi = k.min(a.len() - 1);
            let mut column = carry;
            let mut wraps: DoubleLimb = 0;
            for i in lo..=hi {
                let term = DoubleLimb::from(a[i]) * DoubleLimb::from(b[k - i]);
                let (sum, wrapped) = column.overflowing_add(term);
                column = sum;
                wraps += DoubleLimb::from(wrapped);
            }
            product[k] = column as Limb;
            carry = (wraps << LIMB_BITS) | (column >> LIMB_BITS);
        }
        product[columns] = carry as Limb;
        if carry >> LIMB_BITS != 0 {
            debug_assert!(false, "convolution carried out of the product");
            return Err(BignumError::InvariantViolation(
                "convolution carried out of the product",
            ));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Convolution"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn column_sums_wrap_the_accumulator() {
        // every column past the first few sums several (2^32-1)^2 terms
        let a = vec![Limb::MAX; 16];
        let b = vec![Limb::MAX; 16];
        let mut product = vec![0; 32];
        Convolution.multiply_into(&mut product, &a, &b).unwrap();
        assert_eq!(
            BigUint::from_slice(&product),
            BigUint::from_slice(&a) * BigUint::from_slice(&b)
        );
    }

    #[test]
    fn small_values() {
        let mut product = vec![0; 3];
        Convolution.multiply_into(&mut product, &[3, 1], &[4]).unwrap();
        assert_eq!(product, vec![12, 4, 0]);
    }
}
