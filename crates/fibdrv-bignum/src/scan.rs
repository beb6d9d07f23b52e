//! Scan utilities over raw limb slices.

use crate::limb::{Limb, LIMB_BITS};

/// Number of limbs up to and including the most significant non-zero limb.
#[inline]
#[must_use]
pub fn significant_len(limbs: &[Limb]) -> usize {
    limbs.iter().rposition(|&limb| limb != 0).map_or(0, |i| i + 1)
}

/// Strip zero limbs from the top of a slice.
#[inline]
#[must_use]
pub fn trimmed(limbs: &[Limb]) -> &[Limb] {
    &limbs[..significant_len(limbs)]
}

/// Count the number of significant bits.
#[must_use]
pub fn bit_length(limbs: &[Limb]) -> u64 {
    let used = significant_len(limbs);
    if used == 0 {
        return 0;
    }
    let top = limbs[used - 1];
    (used as u64 - 1) * u64::from(LIMB_BITS) + u64::from(LIMB_BITS - top.leading_zeros())
}

/// Test bit `index` (0 = least significant). Bits past the end read as zero.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn test_bit(limbs: &[Limb], index: u64) -> bool {
    let limb = index / u64::from(LIMB_BITS);
    let bit = (index % u64::from(LIMB_BITS)) as u32;
    usize::try_from(limb)
        .ok()
        .and_then(|i| limbs.get(i))
        .is_some_and(|&l| (l >> bit) & 1 == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn significant_len_values() {
        assert_eq!(significant_len(&[]), 0);
        assert_eq!(significant_len(&[0, 0, 0]), 0);
        assert_eq!(significant_len(&[1, 0, 0]), 1);
        assert_eq!(significant_len(&[0, 0, 7]), 3);
    }

    #[test]
    fn trimmed_drops_high_zeros() {
        assert_eq!(trimmed(&[5, 6, 0, 0]), &[5, 6]);
        assert!(trimmed(&[0, 0]).is_empty());
    }

    #[test]
    fn bit_length_values() {
        assert_eq!(bit_length(&[0]), 0);
        assert_eq!(bit_length(&[1]), 1);
        assert_eq!(bit_length(&[255]), 8);
        assert_eq!(bit_length(&[0, 1]), 33);
        assert_eq!(bit_length(&[u32::MAX, u32::MAX, 0]), 64);
    }

    #[test]
    fn test_bit_values() {
        let limbs = [0b101, 0x8000_0000];
        assert!(test_bit(&limbs, 0));
        assert!(!test_bit(&limbs, 1));
        assert!(test_bit(&limbs, 2));
        assert!(test_bit(&limbs, 63));
        assert!(!test_bit(&limbs, 64));
        assert!(!test_bit(&limbs, u64::MAX));
    }
}
