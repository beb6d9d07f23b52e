//! Limb-wise arithmetic.
//!
//! The slice primitives at the top are shared by the multipliers; the
//! buffer-level [`add`], [`subtract`] and [`left_shift`] are what the
//! Fibonacci engines call. Carry or borrow out of the top limb means a
//! buffer was sized too small or a caller broke the `a >= b` contract, so it
//! is never dropped silently: debug builds panic, release builds return
//! [`BignumError::InvariantViolation`].

use crate::error::BignumError;
use crate::limb::{DoubleLimb, Limb, LimbBuffer, LIMB_BITS};
use crate::scan::{bit_length, trimmed};

/// Add with carry: a + b + carry -> (sum, `new_carry`)
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn add_with_carry(a: Limb, b: Limb, carry: Limb) -> (Limb, Limb) {
    let sum = DoubleLimb::from(a) + DoubleLimb::from(b) + DoubleLimb::from(carry);
    (sum as Limb, (sum >> LIMB_BITS) as Limb)
}

/// Subtract with borrow: a - b - borrow -> (diff, `new_borrow`)
#[inline]
#[must_use]
pub fn sub_with_borrow(a: Limb, b: Limb, borrow: Limb) -> (Limb, Limb) {
    let (d1, b1) = a.overflowing_sub(b);
    let (d2, b2) = d1.overflowing_sub(borrow);
    (d2, Limb::from(b1 || b2))
}

/// Multiply: a * b -> (low, high)
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn mul_wide(a: Limb, b: Limb) -> (Limb, Limb) {
    let prod = DoubleLimb::from(a) * DoubleLimb::from(b);
    (prod as Limb, (prod >> LIMB_BITS) as Limb)
}

/// `dest = a + b` over equal-length slices, returning the carry out.
pub fn add_slices(dest: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    let mut carry = 0;
    for ((d, &x), &y) in dest.iter_mut().zip(a).zip(b) {
        let (sum, c) = add_with_carry(x, y, carry);
        *d = sum;
        carry = c;
    }
    carry
}

/// `dest = a - b` over equal-length slices, returning the borrow out.
pub fn sub_slices(dest: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    let mut borrow = 0;
    for ((d, &x), &y) in dest.iter_mut().zip(a).zip(b) {
        let (diff, br) = sub_with_borrow(x, y, borrow);
        *d = diff;
        borrow = br;
    }
    borrow
}

/// `dest[offset..] += src`. Returns `true` if the sum overflowed `dest`.
pub fn add_assign_at(dest: &mut [Limb], src: &[Limb], offset: usize) -> bool {
    let src = trimmed(src);
    if src.is_empty() {
        return false;
    }
    if offset + src.len() > dest.len() {
        return true;
    }
    let (head, tail) = dest[offset..].split_at_mut(src.len());
    let mut carry = 0;
    for (d, &s) in head.iter_mut().zip(src) {
        let (sum, c) = add_with_carry(*d, s, carry);
        *d = sum;
        carry = c;
    }
    for d in tail {
        if carry == 0 {
            break;
        }
        let (sum, c) = add_with_carry(*d, 0, carry);
        *d = sum;
        carry = c;
    }
    carry != 0
}

/// `dest -= src`. Returns `true` if `src > dest` (the result wrapped).
pub fn sub_assign(dest: &mut [Limb], src: &[Limb]) -> bool {
    let src = trimmed(src);
    if src.len() > dest.len() {
        return true;
    }
    let (head, tail) = dest.split_at_mut(src.len());
    let mut borrow = 0;
    for (d, &s) in head.iter_mut().zip(src) {
        let (diff, br) = sub_with_borrow(*d, s, borrow);
        *d = diff;
        borrow = br;
    }
    for d in tail {
        if borrow == 0 {
            break;
        }
        let (diff, br) = sub_with_borrow(*d, 0, borrow);
        *d = diff;
        borrow = br;
    }
    borrow != 0
}

/// `dest = src * 2^bits`, truncated to `dest.len()` limbs.
///
/// Each destination limb takes the source limb `bits / 32` positions below
/// it, shifted by `bits % 32`, plus the high bits spilling over from the
/// next-lower source limb.
#[allow(clippy::cast_possible_truncation)]
pub fn shift_left_into(dest: &mut [Limb], src: &[Limb], bits: u64) {
    dest.fill(0);
    let limb_shift = usize::try_from(bits / u64::from(LIMB_BITS)).unwrap_or(usize::MAX);
    let bit_shift = (bits % u64::from(LIMB_BITS)) as u32;
    if limb_shift >= dest.len() {
        return;
    }
    let end = dest.len().min(limb_shift.saturating_add(src.len()).saturating_add(1));
    for (j, d) in dest[limb_shift..end].iter_mut().enumerate() {
        let current = src.get(j).copied().unwrap_or(0);
        let mut limb = current << bit_shift;
        if bit_shift != 0 && j > 0 {
            limb |= src[j - 1] >> (LIMB_BITS - bit_shift);
        }
        *d = limb;
    }
}

/// `dest = src * y` for a single limb `y`. `dest` must hold `src.len() + 1` limbs.
pub fn mul_limb_into(dest: &mut [Limb], src: &[Limb], y: Limb) {
    let mut carry = 0;
    for (d, &x) in dest.iter_mut().zip(src) {
        let (lo, hi) = mul_wide(x, y);
        let (sum, c) = add_with_carry(lo, carry, 0);
        *d = sum;
        carry = hi + c;
    }
    if let Some(top) = dest.get_mut(src.len()) {
        *top = carry;
    } else {
        debug_assert_eq!(carry, 0, "single-limb product overflowed its destination");
    }
}

fn check_lengths(dest: &LimbBuffer, a: &LimbBuffer, b: &LimbBuffer) {
    assert_eq!(a.limb_count(), b.limb_count(), "operand lengths differ");
    assert_eq!(dest.limb_count(), a.limb_count(), "destination length differs");
}

/// `dest = a + b`. All three buffers must share the same length.
pub fn add(dest: &mut LimbBuffer, a: &LimbBuffer, b: &LimbBuffer) -> Result<(), BignumError> {
    check_lengths(dest, a, b);
    let carry = add_slices(dest.as_mut_slice(), a.as_slice(), b.as_slice());
    debug_assert_eq!(carry, 0, "addition carried out of the top limb");
    if carry != 0 {
        return Err(BignumError::InvariantViolation(
            "addition carried out of the top limb",
        ));
    }
    Ok(())
}

/// `dest = a - b`. Requires `a >= b`; all three buffers share the same length.
pub fn subtract(
    dest: &mut LimbBuffer,
    a: &LimbBuffer,
    b: &LimbBuffer,
) -> Result<(), BignumError> {
    check_lengths(dest, a, b);
    let borrow = sub_slices(dest.as_mut_slice(), a.as_slice(), b.as_slice());
    debug_assert_eq!(borrow, 0, "subtraction borrowed past the top limb");
    if borrow != 0 {
        return Err(BignumError::InvariantViolation(
            "subtraction borrowed past the top limb",
        ));
    }
    Ok(())
}

/// `dest = a << bits`. `dest` may be wider than `a`; it must be wide enough
/// to keep every significant bit.
pub fn left_shift(dest: &mut LimbBuffer, a: &LimbBuffer, bits: u64) -> Result<(), BignumError> {
    let needed = bit_length(a.as_slice()).saturating_add(bits);
    let available = dest.limb_count() as u64 * u64::from(LIMB_BITS);
    if !a.is_zero() && needed > available {
        debug_assert!(false, "left shift dropped significant bits");
        return Err(BignumError::InvariantViolation(
            "left shift dropped significant bits",
        ));
    }
    shift_left_into(dest.as_mut_slice(), a.as_slice(), bits);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(limbs: &[Limb]) -> LimbBuffer {
        LimbBuffer::from_limbs(limbs).unwrap()
    }

    #[test]
    fn add_carry() {
        assert_eq!(add_with_carry(Limb::MAX, 1, 0), (0, 1));
        assert_eq!(add_with_carry(Limb::MAX, Limb::MAX, 1), (Limb::MAX, 1));
        assert_eq!(add_with_carry(100, 200, 0), (300, 0));
    }

    #[test]
    fn sub_borrow() {
        assert_eq!(sub_with_borrow(0, 1, 0), (Limb::MAX, 1));
        assert_eq!(sub_with_borrow(0, 0, 1), (Limb::MAX, 1));
        assert_eq!(sub_with_borrow(500, 200, 0), (300, 0));
        assert_eq!(sub_with_borrow(100, 100, 1), (Limb::MAX, 1));
    }

    #[test]
    fn multiply_wide() {
        assert_eq!(mul_wide(Limb::MAX, 2), (Limb::MAX - 1, 1));
        assert_eq!(mul_wide(Limb::MAX, Limb::MAX), (1, Limb::MAX - 1));
        assert_eq!(mul_wide(1 << 16, 1 << 16), (0, 1));
    }

    #[test]
    fn add_propagates_carry() {
        let a = buf(&[Limb::MAX, Limb::MAX, 0]);
        let b = buf(&[1, 0, 0]);
        let mut dest = LimbBuffer::zeroed(3).unwrap();
        add(&mut dest, &a, &b).unwrap();
        assert_eq!(dest.as_slice(), &[0, 0, 1]);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "carried out"))]
    fn add_reports_top_carry() {
        let a = buf(&[Limb::MAX]);
        let b = buf(&[1]);
        let mut dest = LimbBuffer::zeroed(1).unwrap();
        assert!(add(&mut dest, &a, &b).is_err());
    }

    #[test]
    #[should_panic(expected = "lengths differ")]
    fn add_rejects_mismatched_lengths() {
        let a = buf(&[1, 0]);
        let b = buf(&[1]);
        let mut dest = LimbBuffer::zeroed(2).unwrap();
        let _ = add(&mut dest, &a, &b);
    }

    #[test]
    fn subtract_propagates_borrow() {
        let a = buf(&[0, 0, 1]);
        let b = buf(&[1, 0, 0]);
        let mut dest = LimbBuffer::zeroed(3).unwrap();
        subtract(&mut dest, &a, &b).unwrap();
        assert_eq!(dest.as_slice(), &[Limb::MAX, Limb::MAX, 0]);
    }

    #[test]
    fn subtract_equal_is_zero() {
        let a = buf(&[7, 9]);
        let mut dest = LimbBuffer::zeroed(2).unwrap();
        subtract(&mut dest, &a, &a.clone()).unwrap();
        assert!(dest.is_zero());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "borrowed past"))]
    fn subtract_reports_negative_result() {
        let a = buf(&[1, 0]);
        let b = buf(&[2, 0]);
        let mut dest = LimbBuffer::zeroed(2).unwrap();
        assert!(subtract(&mut dest, &a, &b).is_err());
    }

    #[test]
    fn left_shift_limb_and_bit_parts() {
        let a = buf(&[0x8000_0001, 0, 0]);
        let mut dest = LimbBuffer::zeroed(3).unwrap();
        left_shift(&mut dest, &a, 1).unwrap();
        assert_eq!(dest.as_slice(), &[2, 1, 0]);
        left_shift(&mut dest, &a, 33).unwrap();
        assert_eq!(dest.as_slice(), &[0, 2, 1]);
        left_shift(&mut dest, &a, 0).unwrap();
        assert_eq!(dest.as_slice(), a.as_slice());
    }

    #[test]
    fn left_shift_into_wider_destination() {
        let a = buf(&[Limb::MAX]);
        let mut dest = LimbBuffer::zeroed(3).unwrap();
        left_shift(&mut dest, &a, 40).unwrap();
        assert_eq!(dest.as_slice(), &[0, 0xFFFF_FF00, 0xFF]);
    }

    #[test]
    fn left_shift_zero_by_anything() {
        let a = LimbBuffer::zeroed(2).unwrap();
        let mut dest = LimbBuffer::zeroed(2).unwrap();
        left_shift(&mut dest, &a, 1_000).unwrap();
        assert!(dest.is_zero());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "dropped significant bits"))]
    fn left_shift_reports_lost_bits() {
        let a = buf(&[0x8000_0000]);
        let mut dest = LimbBuffer::zeroed(1).unwrap();
        assert!(left_shift(&mut dest, &a, 1).is_err());
    }

    #[test]
    fn add_assign_at_offset() {
        let mut dest = [Limb::MAX, Limb::MAX, 0, 0];
        assert!(!add_assign_at(&mut dest, &[1, 0, 0], 1));
        assert_eq!(dest, [Limb::MAX, 0, 1, 0]);
    }

    #[test]
    fn add_assign_at_overflow() {
        let mut dest = [Limb::MAX, Limb::MAX];
        assert!(add_assign_at(&mut dest, &[1], 0));
        let mut short = [0, 0];
        assert!(add_assign_at(&mut short, &[1, 1], 1));
        assert!(!add_assign_at(&mut short, &[0, 0, 0], 5));
    }

    #[test]
    fn sub_assign_borrow_chain() {
        let mut dest = [0, 0, 1];
        assert!(!sub_assign(&mut dest, &[1]));
        assert_eq!(dest, [Limb::MAX, Limb::MAX, 0]);
        assert!(sub_assign(&mut dest, &[0, 0, 1]));
    }

    #[test]
    fn mul_limb_with_carry() {
        let mut dest = [0; 3];
        mul_limb_into(&mut dest, &[Limb::MAX, Limb::MAX], 2);
        assert_eq!(dest, [Limb::MAX - 1, Limb::MAX, 1]);
    }
}
