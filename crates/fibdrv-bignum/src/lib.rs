//! # fibdrv-bignum
//!
//! Arbitrary-precision unsigned integers sized for Fibonacci numbers:
//! fixed-length limb buffers, carry/borrow arithmetic, three interchangeable
//! multiplication strategies and a division-free decimal formatter.

pub mod arith;
pub mod convolution;
pub mod decimal;
pub mod error;
pub mod karatsuba;
pub mod limb;
pub mod multiplier;
pub mod scan;
pub mod schoolbook;

// Re-exports
pub use arith::{add, left_shift, subtract};
pub use convolution::Convolution;
pub use decimal::{estimate_decimal_digits, limbs_to_decimal, to_decimal};
pub use error::BignumError;
pub use karatsuba::{Karatsuba, DEFAULT_KARATSUBA_CUTOFF};
pub use limb::{estimate_limb_count, DoubleLimb, Limb, LimbBuffer, LIMB_BITS};
pub use multiplier::{Multiplier, MultiplierKind, ParseMultiplierError};
pub use schoolbook::Schoolbook;
