//! Constants for engine configuration and process exit codes.

pub use fibdrv_bignum::DEFAULT_KARATSUBA_CUTOFF;

/// Default upper bound on the Fibonacci index a calculator accepts.
pub const DEFAULT_MAX_INDEX: u64 = 100_000;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Results from different strategies did not match.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Requested index outside the accepted range.
    pub const ERROR_OUT_OF_RANGE: i32 = 5;
    /// A buffer could not be allocated.
    pub const ERROR_ALLOCATION: i32 = 6;
    /// An arithmetic invariant was violated.
    pub const ERROR_INTERNAL: i32 = 70;
    /// The device is already open elsewhere (EBUSY).
    pub const ERROR_BUSY: i32 = 16;
}
