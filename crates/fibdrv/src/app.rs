//! Application entry point and dispatch.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use fibdrv_bignum::to_decimal;
use fibdrv_core::{Calculator, CalculatorFactory, DefaultFactory};
use fibdrv_device::FibDevice;
use tracing::debug;

use crate::config::{AppConfig, Command};
use crate::errors::AppError;
use crate::output::format_details;
use crate::{client, perf, verify};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        let bin = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, bin, &mut io::stdout());
        return Ok(());
    }

    let command = config.command.clone().ok_or(AppError::NoCommand)?;
    debug!(options = ?config.options(), algo = %config.algo, "configuration");

    match command {
        Command::Compute { index, details } => run_compute(config, index, details),
        Command::Client { offset } => run_client(config, offset),
        Command::Perf { offset, runs, json } => run_perf(config, offset, runs, json),
        Command::Verify { max } => run_verify(config, max),
    }
}

fn calculator(config: &AppConfig) -> Result<Arc<dyn Calculator>> {
    let factory = DefaultFactory::with_options(config.options());
    Ok(factory.get(&config.algo)?)
}

fn run_compute(config: &AppConfig, index: u64, details: bool) -> Result<()> {
    let calculator = calculator(config)?;
    let start = Instant::now();
    let value = calculator.calculate(index)?;
    let digits = to_decimal(&value)?;
    let elapsed = start.elapsed();

    let mut out = io::stdout().lock();
    writeln!(out, "{digits}")?;
    if details {
        writeln!(
            out,
            "{}",
            format_details(index, &value, digits.len(), calculator.name(), elapsed)
        )?;
    }
    Ok(())
}

fn run_client(config: &AppConfig, offset: u64) -> Result<()> {
    let device = FibDevice::new(calculator(config)?, config.device_config());
    let mut handle = device.open().context("failed to open character device")?;
    let mut out = io::stdout().lock();
    client::run(&mut handle, offset, &mut out)?;
    out.flush()?;
    Ok(())
}

fn run_perf(config: &AppConfig, offset: u64, runs: usize, json: bool) -> Result<()> {
    let device = FibDevice::new(calculator(config)?, config.device_config());
    let mut handle = device.open().context("failed to open character device")?;
    let progress = perf::progress_bar(offset.min(handle.max_position()), runs, json);
    let samples = perf::measure(&mut handle, offset, runs, &progress)?;
    let mut out = io::stdout().lock();
    perf::write_samples(&samples, json, &mut out)?;
    out.flush()?;
    Ok(())
}

fn run_verify(config: &AppConfig, max: u64) -> Result<()> {
    let report = verify::run(&config.options(), max)?;
    println!(
        "Checked F(0..={max}) with {} calculators: {}",
        report.calculators.len(),
        report.calculators.join(", ")
    );
    for m in &report.mismatches {
        println!("  mismatch: F({}) from {}", m.index, m.calculator);
    }
    if !report.is_ok() {
        return Err(AppError::Mismatch {
            count: report.mismatches.len(),
        }
        .into());
    }
    println!("All results match.");
    Ok(())
}
