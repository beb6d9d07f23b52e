//! Application configuration from CLI flags and environment.

use clap::{Parser, Subcommand};
use fibdrv_bignum::MultiplierKind;
use fibdrv_core::Options;
use fibdrv_device::{DeviceConfig, MAX_POSITION};

/// fibdrv: exact Fibonacci numbers through an offset-indexed device.
#[derive(Parser, Debug)]
#[command(name = "fibdrv", version, about, arg_required_else_help = true)]
pub struct AppConfig {
    /// Calculator behind the device: fast (fast doubling) or adding.
    #[arg(long, default_value = "fast", value_parser = ["fast", "fastdoubling", "adding"], global = true)]
    pub algo: String,

    /// Multiplication strategy: schoolbook, karatsuba or convolution.
    #[arg(long, default_value = "karatsuba", env = "FIBDRV_MULTIPLIER", global = true)]
    pub multiplier: MultiplierKind,

    /// Karatsuba cutoff in limbs (0 = default).
    #[arg(long, default_value = "0", global = true)]
    pub karatsuba_cutoff: usize,

    /// Largest position a seek can reach.
    #[arg(long, default_value_t = MAX_POSITION, env = "FIBDRV_MAX_POSITION", global = true)]
    pub max_position: u64,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compute a single Fibonacci number.
    Compute {
        /// Fibonacci index.
        #[arg(short = 'k', long)]
        index: u64,

        /// Show size and timing details.
        #[arg(short, long)]
        details: bool,
    },

    /// Write to the device, then read offsets 0..=N forward and backward.
    Client {
        /// Highest offset to read.
        #[arg(long, default_value_t = 100)]
        offset: u64,
    },

    /// Time repeated reads of every offset and report trimmed means.
    Perf {
        /// Highest offset to measure.
        #[arg(long, default_value_t = 1000)]
        offset: u64,

        /// Reads per offset.
        #[arg(long, default_value_t = 100)]
        runs: usize,

        /// Emit one JSON object per offset.
        #[arg(long)]
        json: bool,
    },

    /// Cross-check every engine against num-bigint for F(0..=MAX).
    Verify {
        /// Highest index to check.
        #[arg(long, default_value_t = MAX_POSITION)]
        max: u64,
    },
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Calculator options (normalized).
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            multiplier: self.multiplier,
            karatsuba_cutoff: self.karatsuba_cutoff,
            max_index: 0,
        }
        .normalize()
    }

    /// Device facade configuration.
    #[must_use]
    pub fn device_config(&self) -> DeviceConfig {
        DeviceConfig {
            max_position: self.max_position,
        }
    }
}
