//! CLI output formatting.

use std::time::Duration;

use fibdrv_bignum::LimbBuffer;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Size and timing summary for a computed value.
#[must_use]
pub fn format_details(
    index: u64,
    value: &LimbBuffer,
    digits: usize,
    calculator: &str,
    elapsed: Duration,
) -> String {
    format!(
        "F({}): {} digits, {} bits\n  limbs: {} allocated, {} used\n  calculator: {}\n  time: {}",
        format_number(index),
        format_number(digits as u64),
        format_number(value.bit_len()),
        value.limb_count(),
        value.used_limbs(),
        calculator,
        format_duration(elapsed),
    )
}
