//! JSON-lines pipelines: one score map in, one resolved record out.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use hedgeclass_core::{LabelId, LabelVector};
use hedgeclass_engine::{AgreementSummary, Engine, Mode, Prediction};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct ResolveStats {
    pub lines: usize,
    pub elapsed_secs: f64,
}

#[derive(Serialize)]
struct StrictRecord<'a> {
    label: LabelId,
    name: &'a str,
}

#[derive(Serialize)]
struct PredictionRecord {
    #[serde(flatten)]
    prediction: Prediction,
    /// RFC 3339 timestamp string.
    resolved_at: String,
}

#[derive(Deserialize)]
struct CompareRecord {
    #[serde(default)]
    truth: Option<LabelId>,
    scores: LabelVector,
}

/// Open `path` for line reading; `None` or `-` reads stdin.
pub fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(BufReader::new(std::io::stdin()))),
        Some(p) if p.as_os_str() == "-" => Ok(Box::new(BufReader::new(std::io::stdin()))),
        Some(p) => {
            let file = File::open(p).with_context(|| format!("opening {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Resolve each non-blank line of `reader` and write one JSON line per input.
pub fn run_resolve<R: BufRead, W: Write>(
    engine: &Engine,
    mode: Mode,
    reader: R,
    writer: &mut W,
) -> anyhow::Result<ResolveStats> {
    let start = Instant::now();
    let mut lines = 0usize;

    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", i + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let v: LabelVector = serde_json::from_str(&line)
            .with_context(|| format!("line {}: invalid label vector", i + 1))?;

        match mode {
            Mode::Strict => {
                let label = engine.label(&v);
                let record = StrictRecord {
                    label,
                    name: engine.label_name(label),
                };
                serde_json::to_writer(&mut *writer, &record)?;
            }
            Mode::Probabilistic { .. } => {
                let record = PredictionRecord {
                    prediction: engine.predict(&v),
                    resolved_at: chrono::Utc::now().to_rfc3339(),
                };
                serde_json::to_writer(&mut *writer, &record)?;
            }
        }
        writeln!(writer)?;
        lines += 1;
    }
    writer.flush()?;

    Ok(ResolveStats {
        lines,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

/// Tally agreement between each line's `truth` and the engine's prediction.
pub fn run_compare<R: BufRead>(engine: &Engine, reader: R) -> anyhow::Result<AgreementSummary> {
    let mut summary = AgreementSummary::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", i + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: CompareRecord = serde_json::from_str(&line)
            .with_context(|| format!("line {}: invalid comparison record", i + 1))?;

        let predicted = hedgeclass_engine::resolve(&record.scores, engine.mode());
        summary.record(record.truth, predicted.labels());
    }

    tracing::info!(
        total = summary.total,
        confirmed = summary.confirmed,
        conflict = summary.conflict,
        "compared predictions"
    );
    Ok(summary)
}
