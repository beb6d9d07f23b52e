//! Calculation options and configuration.

use fibdrv_bignum::MultiplierKind;

use crate::constants::{DEFAULT_KARATSUBA_CUTOFF, DEFAULT_MAX_INDEX};

/// Options for building Fibonacci calculators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Multiplication strategy used by fast doubling.
    pub multiplier: MultiplierKind,
    /// Operand size (in limbs) at or below which Karatsuba falls back to schoolbook.
    pub karatsuba_cutoff: usize,
    /// Largest accepted index (0 = default).
    pub max_index: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            multiplier: MultiplierKind::default(),
            karatsuba_cutoff: DEFAULT_KARATSUBA_CUTOFF,
            max_index: DEFAULT_MAX_INDEX,
        }
    }
}

impl Options {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.karatsuba_cutoff == 0 {
            self.karatsuba_cutoff = DEFAULT_KARATSUBA_CUTOFF;
        }
        if self.max_index == 0 {
            self.max_index = DEFAULT_MAX_INDEX;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = Options::default();
        assert_eq!(opts.multiplier, MultiplierKind::Karatsuba);
        assert_eq!(opts.karatsuba_cutoff, DEFAULT_KARATSUBA_CUTOFF);
        assert_eq!(opts.max_index, DEFAULT_MAX_INDEX);
    }

    #[test]
    fn normalize_zero_values() {
        let opts = Options {
            karatsuba_cutoff: 0,
            max_index: 0,
            ..Default::default()
        };
        let normalized = opts.normalize();
        assert_eq!(normalized.karatsuba_cutoff, DEFAULT_KARATSUBA_CUTOFF);
        assert_eq!(normalized.max_index, DEFAULT_MAX_INDEX);
    }

    #[test]
    fn normalize_keeps_explicit_values() {
        let opts = Options {
            multiplier: MultiplierKind::Convolution,
            karatsuba_cutoff: 8,
            max_index: 1093,
        };
        assert_eq!(opts.clone().normalize(), opts);
    }
}
