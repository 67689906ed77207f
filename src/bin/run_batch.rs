//! Evaluate a JSON file of calculation requests
//!
//! Input is an array of `{"type": ..., "parameters": {...}}` objects.
//! Output is an array of outcomes in the same order, plus a summary.
//!
//! Usage: cargo run --bin run_batch -- --input requests.json [--output results.json]

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use finance_engine::runner::{BatchConfig, BatchOutcome, BatchRunner, BatchSummary};
use finance_engine::CalculationRequest;

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Evaluate many calculation requests at once")]
struct Args {
    /// JSON array of calculation requests
    #[arg(long)]
    input: PathBuf,

    /// Where to write results (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Evaluate on a single thread
    #[arg(long)]
    sequential: bool,

    /// Leave out loan schedules and pension year rows
    #[arg(long)]
    summary_only: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchResponse {
    summary: BatchSummary,
    outcomes: Vec<BatchOutcome>,
    execution_time_ms: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let file = File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let requests: Vec<CalculationRequest> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", args.input.display()))?;
    info!("loaded {} requests in {:?}", requests.len(), start.elapsed());

    let runner = BatchRunner::with_config(BatchConfig {
        parallel: !args.sequential,
        include_schedules: !args.summary_only,
    });
    let outcomes = runner.run(&requests);
    let summary = BatchSummary::from_outcomes(&outcomes);
    info!(
        "{} succeeded, {} failed in {:?}",
        summary.succeeded,
        summary.failed,
        start.elapsed()
    );

    let response = BatchResponse {
        summary,
        outcomes,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &response)?;
            writer.flush()?;
            eprintln!(
                "{} of {} requests succeeded; results written to {}",
                response.summary.succeeded,
                response.summary.total,
                path.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}
