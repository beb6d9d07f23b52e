//! Multiplication strategy trait and strategy selection.
//!
//! `Multiplier` is the narrow interface shared by the schoolbook, Karatsuba
//! and convolution strategies. Every strategy must produce bit-identical
//! products; they differ only in cost.

use std::fmt;
use std::str::FromStr;

use crate::error::BignumError;
use crate::limb::{Limb, LimbBuffer};
use crate::scan::trimmed;

/// Narrow interface for multiplication over limb buffers.
pub trait Multiplier: Send + Sync {
    /// Multiply two trimmed, non-empty limb slices.
    ///
    /// `product` is zero-filled and exactly `a.len() + b.len()` limbs long.
    fn multiply_into(&self, product: &mut [Limb], a: &[Limb], b: &[Limb])
        -> Result<(), BignumError>;

    /// Get the name of this multiplication strategy.
    fn name(&self) -> &'static str;

    /// `dest = a * b`.
    ///
    /// The product is written in place when `dest` can hold every limb of it;
    /// otherwise it is staged in scratch space and narrowed into `dest`, which
    /// fails if a significant limb would be lost.
    fn multiply(
        &self,
        dest: &mut LimbBuffer,
        a: &LimbBuffer,
        b: &LimbBuffer,
    ) -> Result<(), BignumError> {
        let a = trimmed(a.as_slice());
        let b = trimmed(b.as_slice());
        dest.clear();
        if a.is_empty() || b.is_empty() {
            return Ok(());
        }
        let needed = a.len() + b.len();
        if needed <= dest.limb_count() {
            return self.multiply_into(&mut dest.as_mut_slice()[..needed], a, b);
        }
        let mut scratch = LimbBuffer::zeroed(needed)?;
        self.multiply_into(scratch.as_mut_slice(), a, b)?;
        dest.assign(&scratch)
    }

    /// `dest = a * a`.
    fn square(&self, dest: &mut LimbBuffer, a: &LimbBuffer) -> Result<(), BignumError> {
        self.multiply(dest, a, a)
    }
}

/// Strategy selector, resolved once when a calculator is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MultiplierKind {
    Schoolbook,
    #[default]
    Karatsuba,
    Convolution,
}

impl MultiplierKind {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 3] = [Self::Schoolbook, Self::Karatsuba, Self::Convolution];

    /// Lower-case name accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Schoolbook => "schoolbook",
            Self::Karatsuba => "karatsuba",
            Self::Convolution => "convolution",
        }
    }
}

impl fmt::Display for MultiplierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a multiplier name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown multiplier '{0}' (expected schoolbook, karatsuba or convolution)")]
pub struct ParseMultiplierError(pub String);

impl FromStr for MultiplierKind {
    type Err = ParseMultiplierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "schoolbook" => Ok(Self::Schoolbook),
            "karatsuba" => Ok(Self::Karatsuba),
            "convolution" | "conv" => Ok(Self::Convolution),
            _ => Err(ParseMultiplierError(s.to_string())),
        }
    }
}
