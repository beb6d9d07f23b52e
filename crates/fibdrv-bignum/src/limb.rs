//! Fixed-length big-integer storage and size estimation.
//!
//! A [`LimbBuffer`] is a little-endian array of 32-bit limbs whose length is
//! chosen once, at allocation, and never changes afterwards. Callers size it
//! with [`estimate_limb_count`], which bounds the bit length of F(k) from
//! above so arithmetic on Fibonacci values never runs off the top limb.

use std::fmt;
use std::mem;

use num_bigint::BigUint;

use crate::error::BignumError;
use crate::scan::{bit_length, significant_len, test_bit};

/// One radix-2^32 digit of a big number.
pub type Limb = u32;

/// Accumulator wide enough for the product of two limbs.
pub type DoubleLimb = u64;

/// Width of a [`Limb`] in bits.
pub const LIMB_BITS: u32 = Limb::BITS;

/// log2(phi) rounded up at 12 decimal places (exact value 0.694241913630617...).
const LOG2_PHI_NUM: u128 = 694_241_913_631;
const LOG2_PHI_DEN: u128 = 1_000_000_000_000;

/// Minimum number of `limb_bits`-wide limbs able to hold F(k).
///
/// F(k) grows by a factor of phi per index, i.e. about `k * log10(phi)`
/// decimal digits or `k * log2(phi)` bits. The bit count is bounded above
/// in integer arithmetic, divided by the limb width, and one guard limb is
/// added. The result never under-estimates and wastes at most one limb.
#[must_use]
pub fn estimate_limb_count(k: u64, limb_bits: u32) -> usize {
    assert!(limb_bits > 0, "limb width must be non-zero");
    if k == 0 {
        return 1;
    }
    let bits = (u128::from(k) * LOG2_PHI_NUM).div_ceil(LOG2_PHI_DEN);
    let limbs = bits / u128::from(limb_bits) + 1;
    usize::try_from(limbs).unwrap_or(usize::MAX)
}

/// Fallibly allocate `len` zero limbs of scratch space.
pub(crate) fn zeroed_limbs(len: usize) -> Result<Vec<Limb>, BignumError> {
    let mut limbs = Vec::new();
    limbs
        .try_reserve_exact(len)
        .map_err(|_| BignumError::AllocationFailure {
            bytes: len.saturating_mul(mem::size_of::<Limb>()),
        })?;
    limbs.resize(len, 0);
    Ok(limbs)
}

/// Little-endian limb array of fixed length.
///
/// Unused high limbs are always zero. Two buffers compare equal only when
/// they have the same length and the same limbs.
#[derive(Clone, PartialEq, Eq)]
pub struct LimbBuffer {
    limbs: Vec<Limb>,
}

impl LimbBuffer {
    /// Allocate a zero-filled buffer of `len` limbs.
    ///
    /// Fails with [`BignumError::AllocationFailure`] instead of aborting when
    /// the allocator refuses the request.
    pub fn zeroed(len: usize) -> Result<Self, BignumError> {
        if len == 0 {
            return Err(BignumError::InvariantViolation(
                "limb buffer must hold at least one limb",
            ));
        }
        Ok(Self {
            limbs: zeroed_limbs(len)?,
        })
    }

    /// Allocate a buffer large enough for F(k) and every intermediate value
    /// bounded by it.
    pub fn for_index(k: u64) -> Result<Self, BignumError> {
        Self::zeroed(estimate_limb_count(k, LIMB_BITS))
    }

    /// Build the smallest buffer holding `value`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_u64(value: u64) -> Result<Self, BignumError> {
        let low = value as Limb;
        let high = (value >> LIMB_BITS) as Limb;
        let mut buf = Self::zeroed(if high == 0 { 1 } else { 2 })?;
        buf.limbs[0] = low;
        if high != 0 {
            buf.limbs[1] = high;
        }
        Ok(buf)
    }

    /// Copy limbs into a new buffer of exactly `limbs.len()` limbs (at least one).
    pub fn from_limbs(limbs: &[Limb]) -> Result<Self, BignumError> {
        let mut buf = Self::zeroed(limbs.len().max(1))?;
        buf.limbs[..limbs.len()].copy_from_slice(limbs);
        Ok(buf)
    }

    /// Convert a reference integer into a buffer of `len` limbs.
    pub fn from_biguint(value: &BigUint, len: usize) -> Result<Self, BignumError> {
        let digits = value.to_u32_digits();
        if digits.len() > len {
            return Err(BignumError::InvariantViolation(
                "value does not fit in the requested limb count",
            ));
        }
        let mut buf = Self::zeroed(len)?;
        buf.limbs[..digits.len()].copy_from_slice(&digits);
        Ok(buf)
    }

    /// Fixed length in limbs.
    #[inline]
    #[must_use]
    pub fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Limb] {
        &self.limbs
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Limb] {
        &mut self.limbs
    }

    /// Number of limbs carrying significant bits (0 for zero).
    #[inline]
    #[must_use]
    pub fn used_limbs(&self) -> usize {
        significant_len(&self.limbs)
    }

    /// Number of significant bits (0 for zero).
    #[must_use]
    pub fn bit_len(&self) -> u64 {
        bit_length(&self.limbs)
    }

    /// Test bit `index` (0 = least significant).
    #[must_use]
    pub fn bit(&self, index: u64) -> bool {
        test_bit(&self.limbs, index)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.used_limbs() == 0
    }

    /// Reset every limb to zero, keeping the length.
    pub fn clear(&mut self) {
        self.limbs.fill(0);
    }

    /// Set the buffer to a single-limb value.
    pub fn set_limb(&mut self, value: Limb) {
        self.clear();
        self.limbs[0] = value;
    }

    /// Copy `src` into `self`, zero-filling or narrowing to `self`'s length.
    ///
    /// Narrowing is only allowed over zero limbs; dropping a significant limb
    /// is reported as an invariant violation.
    pub fn assign(&mut self, src: &Self) -> Result<(), BignumError> {
        let used = src.used_limbs();
        if used > self.limbs.len() {
            debug_assert!(false, "assign would truncate a significant limb");
            return Err(BignumError::InvariantViolation(
                "assignment would truncate a significant limb",
            ));
        }
        self.clear();
        self.limbs[..used].copy_from_slice(&src.limbs[..used]);
        Ok(())
    }

    /// Convert to the reference big-integer type.
    #[must_use]
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_slice(&self.limbs)
    }
}

impl From<&LimbBuffer> for BigUint {
    fn from(value: &LimbBuffer) -> Self {
        value.to_biguint()
    }
}

impl fmt::Debug for LimbBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LimbBuffer")
            .field("len", &self.limbs.len())
            .field("limbs", &format_args!("{:08x?}", self.limbs))
            .finish()
    }
}

impl fmt::Display for LimbBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = crate::decimal::to_decimal(self).map_err(|_| fmt::Error)?;
        f.pad_integral(true, "", &digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_has_fixed_length() {
        let buf = LimbBuffer::zeroed(4).unwrap();
        assert_eq!(buf.limb_count(), 4);
        assert!(buf.is_zero());
        assert_eq!(buf.used_limbs(), 0);
    }

    #[test]
    fn zero_length_rejected() {
        assert!(matches!(
            LimbBuffer::zeroed(0),
            Err(BignumError::InvariantViolation(_))
        ));
    }

    #[test]
    fn huge_allocation_reports_failure() {
        let err = LimbBuffer::zeroed(usize::MAX / 2).unwrap_err();
        assert!(matches!(err, BignumError::AllocationFailure { .. }));
    }

    #[test]
    fn from_u64_splits_limbs() {
        let buf = LimbBuffer::from_u64(0x1_0000_0002).unwrap();
        assert_eq!(buf.as_slice(), &[2, 1]);
        let small = LimbBuffer::from_u64(7).unwrap();
        assert_eq!(small.as_slice(), &[7]);
        let zero = LimbBuffer::from_u64(0).unwrap();
        assert_eq!(zero.limb_count(), 1);
        assert!(zero.is_zero());
    }

    #[test]
    fn bit_queries() {
        let buf = LimbBuffer::from_limbs(&[0, 0b10]).unwrap();
        assert_eq!(buf.bit_len(), 34);
        assert!(buf.bit(33));
        assert!(!buf.bit(32));
    }

    #[test]
    fn assign_widens_and_narrows() {
        let src = LimbBuffer::from_limbs(&[9, 8, 0, 0]).unwrap();
        let mut wide = LimbBuffer::zeroed(6).unwrap();
        wide.as_mut_slice()[5] = 1;
        wide.assign(&src).unwrap();
        assert_eq!(wide.as_slice(), &[9, 8, 0, 0, 0, 0]);

        let mut narrow = LimbBuffer::zeroed(2).unwrap();
        narrow.assign(&src).unwrap();
        assert_eq!(narrow.as_slice(), &[9, 8]);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "truncate"))]
    fn assign_refuses_to_drop_significant_limbs() {
        let src = LimbBuffer::from_limbs(&[1, 2, 3]).unwrap();
        let mut narrow = LimbBuffer::zeroed(2).unwrap();
        assert!(narrow.assign(&src).is_err());
    }

    #[test]
    fn biguint_conversions() {
        let value = BigUint::parse_bytes(b"12200160415121876738", 10).unwrap();
        let buf = LimbBuffer::from_biguint(&value, 3).unwrap();
        assert_eq!(buf.limb_count(), 3);
        assert_eq!(buf.to_biguint(), value);
        assert_eq!(BigUint::from(&buf), value);
        assert!(LimbBuffer::from_biguint(&value, 1).is_err());
    }

    #[test]
    fn display_uses_decimal() {
        let buf = LimbBuffer::from_u64(12_200_160_415_121_876_738).unwrap();
        assert_eq!(buf.to_string(), "12200160415121876738");
        assert_eq!(format!("{:>5}", LimbBuffer::from_u64(55).unwrap()), "   55");
    }

    #[test]
    fn estimate_small_indices() {
        assert_eq!(estimate_limb_count(0, 32), 1);
        assert_eq!(estimate_limb_count(1, 32), 1);
        assert_eq!(estimate_limb_count(2, 32), 1);
        // F(47) = 2971215073 is the first value past 32 bits
        assert!(estimate_limb_count(47, 32) >= 2);
        // F(93) takes 64 bits
        assert!(estimate_limb_count(93, 64) >= 1);
        assert!(estimate_limb_count(93, 32) >= 2);
    }

    #[test]
    fn estimate_grows_with_index() {
        let mut prev = 0;
        for k in 0..2000 {
            let limbs = estimate_limb_count(k, LIMB_BITS);
            assert!(limbs >= prev);
            prev = limbs;
        }
    }

    #[test]
    fn for_index_uses_estimate() {
        let buf = LimbBuffer::for_index(1093).unwrap();
        assert_eq!(buf.limb_count(), estimate_limb_count(1093, LIMB_BITS));
    }
}
