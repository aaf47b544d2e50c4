//! Tally batch runner.
//!
//! Usage:
//!   tally-batch vat [--finalize] <input.json>  - Aggregate a VAT report for a period
//!   tally-batch totals <input.json>            - Compute order totals and save payloads
//!
//! Results are written to stdout as JSON; logs go to stderr.

mod commands;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_shared::AppConfig;
use tally_shared::config::LoggingConfig;

use crate::commands::{Cli, Command, run_totals, run_vat};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    info!(command = ?cli.command, "Starting batch run");

    match cli.command {
        Command::Vat { input, finalize } => {
            let input = read_input(&input)?;
            let report = run_vat(&input, finalize || config.batch.finalize)?;
            write_output(&report, config.batch.pretty)
        }
        Command::Totals { input } => {
            let input = read_input(&input)?;
            let payloads = run_totals(&input)?;
            write_output(&payloads, config.batch.pretty)
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let json = logging
        .json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let plain = (!logging.json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();
}

fn read_input(path: &std::path::Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
