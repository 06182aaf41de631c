//! Arrow IPC labelling pipeline: read a score file, resolve every row, write it back out.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use arrow::ipc::reader::FileReader;
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;
use hedgeclass_engine::{Engine, Mode, label_batch, predict_batch};

#[derive(Debug)]
pub struct LabelStats {
    pub rows: usize,
    pub batches: usize,
    pub elapsed_secs: f64,
}

/// Label `input` in `mode` and write the result to `output`.
///
/// Strict mode appends `primary_label`; probabilistic mode appends
/// `predicted_labels`. Every other column passes through.
pub fn run_label_ipc(
    engine: &Engine,
    mode: Mode,
    input: &Path,
    output: &Path,
) -> anyhow::Result<LabelStats> {
    let start = Instant::now();

    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let reader = FileReader::try_new(file, None)
        .with_context(|| format!("reading Arrow IPC file {}", input.display()))?;

    // The output schema comes from labelling an empty batch so that zero-batch
    // inputs still produce a readable file.
    let empty = RecordBatch::new_empty(reader.schema());
    let output_schema = apply(engine, mode, &empty)?.schema();

    let out = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    let mut writer = FileWriter::try_new(out, &output_schema)?;

    let mut rows = 0usize;
    let mut batches = 0usize;
    for batch in reader {
        let batch = batch.context("reading record batch")?;
        let labelled = apply(engine, mode, &batch)?;
        writer.write(&labelled)?;
        rows += labelled.num_rows();
        batches += 1;
        tracing::debug!(batch = batches, rows = labelled.num_rows(), "wrote batch");
    }
    writer.finish()?;

    let elapsed_secs = start.elapsed().as_secs_f64();
    tracing::info!(rows, batches, elapsed_secs, "labelled IPC file");
    Ok(LabelStats {
        rows,
        batches,
        elapsed_secs,
    })
}

fn apply(engine: &Engine, mode: Mode, batch: &RecordBatch) -> anyhow::Result<RecordBatch> {
    match mode {
        Mode::Strict => label_batch(engine, batch),
        Mode::Probabilistic { .. } => predict_batch(engine, batch),
    }
}
