//! Command-line entry point
//!
//! Reads operation batches (one JSON array per line) from a file or stdin
//! and prints one JSON line per batch: the tax sequence on success, an
//! error object on failure. Batches are isolated, so a failed line never
//! stops the lines after it.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use gains::money::Money;
use gains::operation::RawOperation;
use gains::tax::{process_batch, TaxRegime};

#[derive(Parser)]
#[command(name = "gains")]
#[command(
    version,
    about = "Brazilian capital gains tax calculator for stock market operations"
)]
struct Cli {
    /// Input file with one JSON operation batch per line (defaults to stdin)
    file: Option<PathBuf>,
}

/// One entry of a successful batch's output line.
#[derive(Serialize)]
struct TaxLine {
    tax: Money,
}

/// Error object emitted in place of a failed batch's output.
#[derive(Serialize)]
struct ErrorLine {
    error: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            run(BufReader::new(file), io::stdout().lock())
        }
        None => run(io::stdin().lock(), io::stdout().lock()),
    }
}

/// Process every input line until the stream or a blank terminator line
/// ends, writing one output line per batch.
fn run(reader: impl BufRead, mut out: impl Write) -> Result<()> {
    let regime = TaxRegime::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input line")?;
        if line.trim().is_empty() {
            break;
        }

        let rendered = render_batch(&line, index + 1, &regime)?;
        writeln!(out, "{}", rendered).context("failed to write output line")?;
    }

    Ok(())
}

fn render_batch(line: &str, line_number: usize, regime: &TaxRegime) -> Result<String> {
    let records: Vec<RawOperation> = match serde_json::from_str(line) {
        Ok(records) => records,
        Err(err) => {
            warn!(line = line_number, %err, "malformed operation batch");
            return Ok(serde_json::to_string(&ErrorLine {
                error: "malformed operation batch".to_string(),
            })?);
        }
    };

    let rendered = match process_batch(&records, regime) {
        Ok(taxes) => {
            let entries: Vec<TaxLine> = taxes.into_iter().map(|tax| TaxLine { tax }).collect();
            serde_json::to_string(&entries)?
        }
        Err(err) => {
            debug!(line = line_number, %err, "batch aborted");
            serde_json::to_string(&ErrorLine {
                error: err.to_string(),
            })?
        }
    };

    Ok(rendered)
}
