//! Error handling and exit codes.

use fibdrv_core::{exit_codes, FibError};
use fibdrv_device::DeviceError;

/// Application-level failures that are not calculation errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The cross-check found engines disagreeing with the reference.
    #[error("{count} mismatch(es) against the reference values")]
    Mismatch { count: usize },

    /// No subcommand was given.
    #[error("no command given (try --help)")]
    NoCommand,
}

/// Exit code for a calculation error.
pub fn handle_error(err: &FibError) -> i32 {
    match err {
        FibError::AllocationFailure { .. } => exit_codes::ERROR_ALLOCATION,
        FibError::OutOfRange { .. } => exit_codes::ERROR_OUT_OF_RANGE,
        FibError::InternalInvariantViolation(_) => exit_codes::ERROR_INTERNAL,
        FibError::Config(_) => exit_codes::ERROR_CONFIG,
    }
}

/// Exit code for any error reaching `main`.
///
/// Walks the context chain and maps the first recognized error.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(fib) = cause.downcast_ref::<FibError>() {
            return handle_error(fib);
        }
        if let Some(device) = cause.downcast_ref::<DeviceError>() {
            return match device {
                DeviceError::Busy => exit_codes::ERROR_BUSY,
                DeviceError::Fib(fib) => handle_error(fib),
            };
        }
        if let Some(app) = cause.downcast_ref::<AppError>() {
            return match app {
                AppError::Mismatch { .. } => exit_codes::ERROR_MISMATCH,
                AppError::NoCommand => exit_codes::ERROR_CONFIG,
            };
        }
    }
    exit_codes::ERROR_GENERIC
}
