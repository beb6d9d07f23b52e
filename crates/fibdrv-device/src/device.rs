//! Device, handle and seek semantics.

use std::sync::Arc;
use std::time::{Duration, Instant};

use fibdrv_core::{check_index, Calculator, FibError};
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Name the device registers under.
pub const DEVICE_NAME: &str = "fibonacci";

/// Largest position a seek can reach. F(1093) has 229 decimal digits.
pub const MAX_POSITION: u64 = 1093;

/// Error type for device operations.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Another handle holds the device.
    #[error("{} is in use", DEVICE_NAME)]
    Busy,

    /// The calculation behind a read failed.
    #[error(transparent)]
    Fib(#[from] FibError),
}

/// Reference point of a seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Absolute position.
    Set,
    /// Relative to the current position.
    Cur,
    /// Counted down from `max_position`.
    End,
}

/// Device configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Upper clamp for seeks and reads.
    pub max_position: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            max_position: MAX_POSITION,
        }
    }
}

/// The device: a calculator plus an exclusive-open lock.
pub struct FibDevice {
    calculator: Arc<dyn Calculator>,
    config: DeviceConfig,
    in_use: Mutex<()>,
}

impl FibDevice {
    #[must_use]
    pub fn new(calculator: Arc<dyn Calculator>, config: DeviceConfig) -> Self {
        Self {
            calculator,
            config,
            in_use: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    #[must_use]
    pub fn calculator(&self) -> &dyn Calculator {
        self.calculator.as_ref()
    }

    /// Open the device at position 0.
    ///
    /// Fails with [`DeviceError::Busy`] while another handle is alive. The
    /// returned handle releases the device when dropped.
    pub fn open(&self) -> Result<FibHandle<'_>, DeviceError> {
        let Some(guard) = self.in_use.try_lock() else {
            warn!(device = DEVICE_NAME, "fibdrv is in use");
            return Err(DeviceError::Busy);
        };
        debug!(device = DEVICE_NAME, calculator = self.calculator.name(), "opened");
        Ok(FibHandle {
            device: self,
            _guard: guard,
            position: 0,
            last_elapsed: Duration::ZERO,
        })
    }
}

/// An open device handle.
pub struct FibHandle<'a> {
    device: &'a FibDevice,
    _guard: MutexGuard<'a, ()>,
    position: u64,
    last_elapsed: Duration,
}

impl FibHandle<'_> {
    /// Current position, i.e. the index the next read computes.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Highest position a seek can reach.
    #[must_use]
    pub fn max_position(&self) -> u64 {
        self.device.config.max_position
    }

    /// Time spent inside the most recent successful read.
    #[must_use]
    pub fn last_elapsed(&self) -> Duration {
        self.last_elapsed
    }

    /// Copy the leading digits of F(position) into `buf`.
    ///
    /// Returns the number of bytes copied: the digit count, truncated to
    /// `buf.len()`. No terminator is written and the position is unchanged.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        let start = Instant::now();
        let index = i64::try_from(self.position).unwrap_or(i64::MAX);
        let k = check_index(index, self.device.config.max_position)?;
        let digits = self.device.calculator.compute(k)?;
        let n = digits.len().min(buf.len());
        buf[..n].copy_from_slice(&digits.as_bytes()[..n]);
        self.last_elapsed = start.elapsed();
        debug!(
            position = k,
            digits = digits.len(),
            copied = n,
            elapsed_ns = self.last_elapsed.as_nanos(),
            "read"
        );
        Ok(n)
    }

    /// Writes are ignored; always reports one byte consumed.
    pub fn write(&mut self, _buf: &[u8]) -> usize {
        1
    }

    /// Move the position and return the new value.
    ///
    /// The target is clamped into `[0, max_position]`; out-of-range targets
    /// are never an error.
    pub fn seek(&mut self, whence: Whence, offset: i64) -> u64 {
        let max = i128::from(self.device.config.max_position);
        let target = match whence {
            Whence::Set => i128::from(offset),
            Whence::Cur => i128::from(self.position) + i128::from(offset),
            Whence::End => max - i128::from(offset),
        };
        self.position = u64::try_from(target.clamp(0, max)).unwrap_or(0);
        debug!(?whence, offset, position = self.position, "seek");
        self.position
    }
}
