//! AegisML Replay
//!
//! Streams a JSONL file of signal records through one experiment session
//! and prints dashboard snapshots as JSON lines.
//!
//! # Usage
//!
//! ```bash
//! # Final snapshot only
//! aegis-replay signals.jsonl
//!
//! # Snapshot every 5 epochs, known failure at epoch 40, gradient ablated
//! aegis-replay signals.jsonl --every 5 --failure-epoch 40 --ablate gradient
//!
//! # Read stdin, append to a file, print the LaTeX appendix
//! cat signals.jsonl | aegis-replay - --output out/snapshots.jsonl --latex
//! ```

use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use aegis_core::constants::{APP_NAME, APP_VERSION};
use aegis_core::logic::metrics::generate_latex_appendix;
use aegis_core::logic::model::{Ablation, ModelMode};
use aegis_core::logic::replay::SnapshotWriter;
use aegis_core::logic::signals::{read_signals, read_signals_from_path};
use aegis_core::{DashboardSnapshot, EngineConfig, EngineResult, ExperimentSession};

#[derive(Parser, Debug)]
#[command(name = "aegis-replay", version, about = "Replay training signals through the failure anticipation engine")]
struct Cli {
    /// JSONL file of signal records ("-" reads stdin)
    input: String,

    /// Epoch at which the run actually failed (enables FAH)
    #[arg(long)]
    failure_epoch: Option<u32>,

    /// Signal families to ablate: gradient, activation, entropy, latent
    #[arg(long, value_delimiter = ',')]
    ablate: Vec<Ablation>,

    /// Labels are available for this run
    #[arg(long)]
    ground_truth: bool,

    /// Emit a snapshot every N records instead of only at the end
    #[arg(long)]
    every: Option<usize>,

    /// Append snapshots to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the LaTeX metrics appendix after the last snapshot
    #[arg(long)]
    latex: bool,

    /// Experiment id reported in snapshots
    #[arg(long, default_value = "replay")]
    experiment: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> EngineResult<()> {
    log::info!("Starting {} replay v{}", APP_NAME, APP_VERSION);

    let mut config = EngineConfig::from_env();
    if !cli.ablate.is_empty() {
        config.ablations = cli.ablate.iter().copied().collect();
    }
    if cli.ground_truth {
        config.mode = ModelMode::GroundTruth;
    }
    config.validate()?;

    let records = if cli.input == "-" {
        read_signals(BufReader::new(io::stdin().lock()))?
    } else {
        read_signals_from_path(&PathBuf::from(&cli.input))?
    };
    log::info!("Replaying {} records as '{}'", records.len(), cli.experiment);

    let mut session = ExperimentSession::new(cli.experiment.clone(), &config);
    let every = cli.every.filter(|n| *n > 0);
    let mut snapshots: Vec<DashboardSnapshot> = Vec::new();

    for (i, record) in records.into_iter().enumerate() {
        session.push(record);
        if every.is_some_and(|n| (i + 1) % n == 0) {
            snapshots.extend(session.snapshot(cli.failure_epoch));
        }
    }

    // Always end on the latest record
    if let Some(last) = session.snapshot(cli.failure_epoch) {
        if snapshots.last().map(|s| s.epoch) != Some(last.epoch) {
            snapshots.push(last);
        }
    }

    match &cli.output {
        Some(path) => {
            let mut writer = SnapshotWriter::append_to(path)?;
            for snap in &snapshots {
                writer.append(snap)?;
            }
            writer.flush()?;
            log::info!("Wrote {} snapshots to {}", writer.written(), path.display());
        }
        None => {
            let mut writer = SnapshotWriter::stdout();
            for snap in &snapshots {
                writer.append(snap)?;
            }
            writer.flush()?;
        }
    }

    if cli.latex {
        match snapshots.last() {
            Some(snap) => print!("{}", generate_latex_appendix(&snap.metrics, &snap.mode)),
            None => log::warn!("No records replayed, skipping LaTeX appendix"),
        }
    }

    Ok(())
}
