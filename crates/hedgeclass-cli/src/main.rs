use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use hedgeclass_core::{DEFAULT_THRESHOLD, LabelNames};
use hedgeclass_engine::{Engine, Mode};
use tracing_subscriber::{EnvFilter, fmt};

mod display;
mod ipc;
mod jsonl;

/// Resolve disclosure label vectors into primary labels.
#[derive(Parser)]
#[command(name = "hedgeclass", version, about)]
struct Cli {
    /// JSON document mapping label ids to names (built-in table if absent).
    #[arg(long, env = "HEDGECLASS_NAMES", global = true)]
    names: Option<PathBuf>,

    /// Activation threshold for probabilistic resolution.
    #[arg(long, env = "HEDGECLASS_THRESHOLD", default_value_t = DEFAULT_THRESHOLD, global = true)]
    threshold: f32,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Ground-truth labelling: one label id per input.
    Strict,
    /// Model-output labelling: ranked label names per input.
    Probabilistic,
}

impl ModeArg {
    fn to_mode(self, threshold: f32) -> Mode {
        match self {
            Self::Strict => Mode::Strict,
            Self::Probabilistic => Mode::Probabilistic { threshold },
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Resolve JSON lines of score maps (stdin when INPUT is absent or `-`).
    Resolve {
        #[arg(long, value_enum, default_value_t = ModeArg::Probabilistic)]
        mode: ModeArg,
        input: Option<PathBuf>,
    },
    /// Label every row of an Arrow IPC file and write the result.
    LabelIpc {
        #[arg(long, value_enum, default_value_t = ModeArg::Strict)]
        mode: ModeArg,
        input: PathBuf,
        output: PathBuf,
    },
    /// Print the label id table.
    Labels {
        /// Emit the keyed JSON document instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Compare ground-truth labels against ranked predictions.
    Compare { input: Option<PathBuf> },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    tracing::debug!("hedgeclass v{}", env!("CARGO_PKG_VERSION"));

    let names = match &cli.names {
        Some(path) => LabelNames::load(path)
            .with_context(|| format!("loading label names from {}", path.display()))?,
        None => LabelNames::default(),
    };
    let engine = Engine::new()
        .with_threshold(cli.threshold)
        .with_names(names);

    match cli.command {
        Command::Resolve { mode, input } => {
            let reader = jsonl::open_input(input.as_deref())?;
            let stdout = std::io::stdout();
            let mut writer = std::io::BufWriter::new(stdout.lock());
            let stats = jsonl::run_resolve(&engine, mode.to_mode(cli.threshold), reader, &mut writer)?;
            tracing::info!(lines = stats.lines, elapsed_secs = stats.elapsed_secs, "resolved");
        }
        Command::LabelIpc {
            mode,
            input,
            output,
        } => {
            let stats = ipc::run_label_ipc(&engine, mode.to_mode(cli.threshold), &input, &output)?;
            eprintln!(
                "  Labelled {} rows in {} batches in {:.2}s -> {}",
                stats.rows,
                stats.batches,
                stats.elapsed_secs,
                output.display()
            );
        }
        Command::Labels { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(engine.names())?);
            } else {
                display::print_label_table(engine.names());
            }
        }
        Command::Compare { input } => {
            let reader = jsonl::open_input(input.as_deref())?;
            let summary = jsonl::run_compare(&engine, reader)?;
            display::print_agreement(&summary, engine.names());
        }
    }

    Ok(())
}
