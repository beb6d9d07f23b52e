//! The device client: a burst of ignored writes, then every offset read
//! forward and backward.

use std::io::Write;

use anyhow::{Context, Result};
use fibdrv_device::{FibHandle, Whence, DEVICE_NAME};
use tracing::info_span;

/// Size of the buffer each read fills.
pub const BUFFER_SIZE: usize = 500;

const WRITE_PAYLOAD: &[u8] = b"testing writing";

/// Run the client against an open handle, printing to `out`.
pub fn run(handle: &mut FibHandle<'_>, offset: u64, out: &mut dyn Write) -> Result<()> {
    let _span = info_span!("client", offset).entered();
    let mut buf = [0u8; BUFFER_SIZE];

    for _ in 0..=offset {
        let sz = handle.write(WRITE_PAYLOAD);
        writeln!(out, "Writing to /dev/{DEVICE_NAME}, returned the sequence {sz}")?;
    }
    for i in 0..=offset {
        read_at(handle, i, &mut buf, out)?;
    }
    for i in (0..=offset).rev() {
        read_at(handle, i, &mut buf, out)?;
    }
    Ok(())
}

fn read_at(handle: &mut FibHandle<'_>, i: u64, buf: &mut [u8], out: &mut dyn Write) -> Result<()> {
    handle.seek(Whence::Set, i64::try_from(i).unwrap_or(i64::MAX));
    let n = handle
        .read(buf)
        .with_context(|| format!("read at offset {i} failed"))?;
    let digits = std::str::from_utf8(&buf[..n]).context("device returned non-ASCII digits")?;
    writeln!(
        out,
        "Reading from /dev/{DEVICE_NAME} at offset {i}, returned the sequence {digits}."
    )?;
    Ok(())
}
