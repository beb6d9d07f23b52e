//! Error type for limb-level arithmetic.

/// Errors raised by buffer allocation and arithmetic invariant checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BignumError {
    /// A result or scratch buffer could not be obtained.
    #[error("allocation of {bytes} bytes failed")]
    AllocationFailure {
        /// Size of the rejected request.
        bytes: usize,
    },

    /// An arithmetic precondition did not hold (carry out of the top limb,
    /// borrow out of a subtraction, or a value that no longer fits).
    #[error("internal invariant violated: {0}")]
    InvariantViolation(&'static str),
}
