//! Read-latency harness.
//!
//! Every run seeks to each offset in turn and times one read twice over: the
//! time the device reports for its own work (kernel time) and the wall-clock
//! round trip seen by the caller (user time). Per offset the samples are
//! sorted and the middle 80% averaged.

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use fibdrv_device::{FibHandle, Whence};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::client::BUFFER_SIZE;

/// Trimmed-mean timings for one offset, in nanoseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerfSample {
    pub offset: u64,
    pub kernel_ns: u64,
    pub user_ns: u64,
    pub diff_ns: i64,
}

/// Mean of the samples left after dropping the lowest and highest 10%.
///
/// Sorts `samples` in place. Returns 0 for an empty slice.
#[must_use]
pub fn trimmed_mean(samples: &mut [u64]) -> u64 {
    samples.sort_unstable();
    let cut = samples.len() / 10;
    let kept = &samples[cut..samples.len() - cut];
    if kept.is_empty() {
        return 0;
    }
    let sum: u128 = kept.iter().map(|&s| u128::from(s)).sum();
    u64::try_from(sum / kept.len() as u128).unwrap_or(u64::MAX)
}

fn nanos(d: std::time::Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// Measure offsets `0..=offset`, `runs` reads each.
///
/// `offset` is clamped to the handle's `max_position`.
pub fn measure(
    handle: &mut FibHandle<'_>,
    offset: u64,
    runs: usize,
    progress: &ProgressBar,
) -> Result<Vec<PerfSample>> {
    let _span = info_span!("perf", offset, runs).entered();
    let max = handle.max_position();
    if offset > max {
        warn!(offset, max, "offset clamped to the device limit");
    }
    let offset = offset.min(max);
    let offsets = usize::try_from(offset)
        .ok()
        .and_then(|n| n.checked_add(1))
        .context("offset too large")?;
    let mut kernel = vec![Vec::with_capacity(runs); offsets];
    let mut user = vec![Vec::with_capacity(runs); offsets];
    let mut buf = [0u8; BUFFER_SIZE];

    for _ in 0..runs {
        for (j, position) in (0..=offset).enumerate() {
            handle.seek(Whence::Set, i64::try_from(position).unwrap_or(i64::MAX));
            let start = Instant::now();
            handle.read(&mut buf)?;
            user[j].push(nanos(start.elapsed()));
            kernel[j].push(nanos(handle.last_elapsed()));
            progress.inc(1);
        }
    }
    progress.finish_and_clear();

    let samples: Vec<PerfSample> = (0..=offset)
        .zip(kernel.iter_mut().zip(user.iter_mut()))
        .map(|(position, (k, u))| {
            let kernel_ns = trimmed_mean(k);
            let user_ns = trimmed_mean(u);
            PerfSample {
                offset: position,
                kernel_ns,
                user_ns,
                diff_ns: i64::try_from(i128::from(user_ns) - i128::from(kernel_ns))
                    .unwrap_or(i64::MAX),
            }
        })
        .collect();
    info!(offsets = samples.len(), runs, "perf finished");
    Ok(samples)
}

/// Progress bar sized for `(offset + 1) * runs` reads; hidden when `quiet`.
#[must_use]
pub fn progress_bar(offset: u64, runs: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let total = offset.saturating_add(1).saturating_mul(runs as u64);
    let bar = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} reads ({eta})") {
        bar.set_style(style);
    }
    bar
}

/// Print samples as `offset kernel user diff` lines, or JSON lines.
pub fn write_samples(samples: &[PerfSample], json: bool, out: &mut dyn Write) -> Result<()> {
    for sample in samples {
        if json {
            writeln!(out, "{}", serde_json::to_string(sample)?)?;
        } else {
            writeln!(
                out,
                "{} {} {} {}",
                sample.offset, sample.kernel_ns, sample.user_ns, sample.diff_ns
            )?;
        }
    }
    Ok(())
}
