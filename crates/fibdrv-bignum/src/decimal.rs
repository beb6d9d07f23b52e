//! Binary to decimal conversion without division.
//!
//! The converter keeps one decimal digit per byte, least significant first,
//! and feeds the binary value in from its top bit: every step doubles the
//! digit buffer and adds the incoming bit. After the top `m` bits have been
//! consumed the buffer holds exactly the value of those `m` bits.

use std::mem;

use crate::error::BignumError;
use crate::limb::{Limb, LimbBuffer};
use crate::scan::{bit_length, test_bit};

/// log10(2) rounded up at 6 decimal places (exact value 0.301029995...).
const LOG10_2_NUM: u64 = 301_030;
const LOG10_2_DEN: u64 = 1_000_000;

/// Upper bound on the number of decimal digits of a `bits`-bit value.
#[must_use]
pub fn estimate_decimal_digits(bits: u64) -> usize {
    let digits = u128::from(bits) * u128::from(LOG10_2_NUM) / u128::from(LOG10_2_DEN) + 1;
    usize::try_from(digits).unwrap_or(usize::MAX)
}

/// Decimal representation of a limb buffer.
pub fn to_decimal(value: &LimbBuffer) -> Result<String, BignumError> {
    limbs_to_decimal(value.as_slice())
}

/// Decimal representation of a little-endian limb slice.
///
/// Returns `"0"` for an all-zero (or empty) slice; otherwise the digits carry
/// no leading zeros.
pub fn limbs_to_decimal(limbs: &[Limb]) -> Result<String, BignumError> {
    let bits = bit_length(limbs);
    if bits == 0 {
        return Ok("0".to_string());
    }

    let capacity = estimate_decimal_digits(bits);
    let mut digits: Vec<u8> = Vec::new();
    digits
        .try_reserve_exact(capacity)
        .map_err(|_| BignumError::AllocationFailure { bytes: capacity })?;
    digits.resize(capacity, 0);

    // Only digits[..active] can be non-zero.
    let mut active = 0;
    for bit in (0..bits).rev() {
        let mut carry = u8::from(test_bit(limbs, bit));
        for digit in &mut digits[..active] {
            let doubled = *digit * 2 + carry;
            if doubled >= 10 {
                *digit = doubled - 10;
                carry = 1;
            } else {
                *digit = doubled;
                carry = 0;
            }
        }
        if carry != 0 {
            if active == digits.len() {
                debug_assert!(false, "decimal digit estimate too small");
                return Err(BignumError::InvariantViolation(
                    "decimal digit estimate too small",
                ));
            }
            digits[active] = carry;
            active += 1;
        }
    }

    let mut text = mem::take(&mut digits);
    text.truncate(active);
    text.reverse();
    for digit in &mut text {
        *digit += b'0';
    }
    String::from_utf8(text)
        .map_err(|_| BignumError::InvariantViolation("decimal digit out of range"))
}
