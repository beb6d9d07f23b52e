//! # fibdrv-device
//!
//! A character-device style facade over a Fibonacci calculator. The file
//! position selects the index, `read` returns the decimal digits of F(pos),
//! `write` is ignored and `seek` clamps into `[0, max_position]`. At most one
//! handle can be open at a time.

pub mod device;

// Re-exports
pub use device::{
    DeviceConfig, DeviceError, FibDevice, FibHandle, Whence, DEVICE_NAME, MAX_POSITION,
};
