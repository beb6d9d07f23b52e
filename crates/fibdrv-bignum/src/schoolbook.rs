//! Bit-scanning shift-and-add multiplication.

use crate::arith::{add_assign_at, shift_left_into};
use crate::error::BignumError;
use crate::limb::{zeroed_limbs, Limb, LIMB_BITS};
use crate::multiplier::Multiplier;
use crate::scan::{bit_length, test_bit};

/// Schoolbook multiplier.
///
/// Walks the bits of `b` from the most significant down. Every set bit adds
/// a copy of `a`, shifted to that bit's position, into the product. Also the
/// base case of [`Karatsuba`](crate::Karatsuba).
#[derive(Debug, Clone, Copy, Default)]
pub struct Schoolbook;

impl Multiplier for Schoolbook {
    #[allow(clippy::cast_possible_truncation)]
    fn multiply_into(
        &self,
        product: &mut [Limb],
        a: &[Limb],
        b: &[Limb],
    ) -> Result<(), BignumError> {
        let mut shifted = zeroed_limbs(a.len() + 1)?;
        let width = u64::from(LIMB_BITS);
        for bit in (0..bit_length(b)).rev() {
            if !test_bit(b, bit) {
                continue;
            }
            shift_left_into(&mut shifted, a, bit % width);
            let overflow = add_assign_at(product, &shifted, (bit / width) as usize);
            debug_assert!(!overflow, "schoolbook product overflowed its buffer");
            if overflow {
                return Err(BignumError::InvariantViolation(
                    "schoolbook product overflowed its buffer",
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Schoolbook"
    }
}
