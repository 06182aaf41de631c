//! Arrow batch labelling.
//!
//! Reads label vectors out of RecordBatches whose columns follow the 16-field
//! contract, resolves every row, and returns the batch with the resolved
//! column appended. Columns are matched by name; missing contract columns and
//! nulls read as `0.0` and unrelated columns pass through unchanged.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array, ListBuilder, StringBuilder};
use arrow::datatypes::{Field as ArrowField, Schema};
use arrow::record_batch::RecordBatch;
use hedgeclass_core::{FIELD_COUNT, Field, LabelVector, labels};
use tracing::{debug, info};

use crate::engine::{Engine, resolve};

/// Extract one [`LabelVector`] per row.
///
/// `Float32` and `Float64` columns are accepted; any other type on a
/// contract column is an error.
pub fn vectors_from_batch(batch: &RecordBatch) -> anyhow::Result<Vec<LabelVector>> {
    let mut rows = vec![[0.0f32; FIELD_COUNT]; batch.num_rows()];
    let mut found = 0usize;

    for (i, field) in Field::ALL.iter().enumerate() {
        let Some(col) = batch.column_by_name(field.name()) else {
            continue;
        };
        found += 1;
        let scores = column_scores(col.as_ref(), field.name())?;
        for (row, score) in rows.iter_mut().zip(scores) {
            row[i] = score;
        }
    }

    debug!(
        rows = batch.num_rows(),
        columns = found,
        "extracted label vectors"
    );
    Ok(rows.into_iter().map(LabelVector::from).collect())
}

/// Append `primary_label` (Int32) with the strict ground-truth label per row.
pub fn label_batch(engine: &Engine, batch: &RecordBatch) -> anyhow::Result<RecordBatch> {
    let vectors = vectors_from_batch(batch)?;
    let ids: Vec<i32> = vectors
        .iter()
        .map(|v| i32::from(engine.label(v).value()))
        .collect();

    info!(rows = ids.len(), "labelled batch (strict)");
    append_column(
        batch,
        labels::primary_label_field(),
        Arc::new(Int32Array::from(ids)),
    )
}

/// Append `predicted_labels` (List<Utf8>) with ranked label names per row.
pub fn predict_batch(engine: &Engine, batch: &RecordBatch) -> anyhow::Result<RecordBatch> {
    let vectors = vectors_from_batch(batch)?;
    let mut builder = ListBuilder::new(StringBuilder::new());

    for v in &vectors {
        for name in resolve(v, engine.mode()).names(engine.names()) {
            builder.values().append_value(name);
        }
        builder.append(true);
    }

    info!(
        rows = vectors.len(),
        threshold = engine.threshold(),
        "labelled batch (probabilistic)"
    );
    append_column(
        batch,
        labels::predicted_labels_field(),
        Arc::new(builder.finish()),
    )
}

/// Append `column`, replacing an existing column of the same name.
fn append_column(
    batch: &RecordBatch,
    field: ArrowField,
    column: ArrayRef,
) -> anyhow::Result<RecordBatch> {
    let source_schema = batch.schema();
    let mut fields: Vec<ArrowField> = source_schema
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();

    match source_schema.index_of(field.name()) {
        Ok(idx) => {
            fields[idx] = field;
            columns[idx] = column;
        }
        Err(_) => {
            fields.push(field);
            columns.push(column);
        }
    }

    let schema = Schema::new_with_metadata(fields, source_schema.metadata().clone());
    Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
}

/// Read a score column as f32, nulls as zero.
fn column_scores(col: &dyn Array, name: &str) -> anyhow::Result<Vec<f32>> {
    if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok((0..arr.len())
            .map(|i| if arr.is_null(i) { 0.0 } else { arr.value(i) })
            .collect())
    } else if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok((0..arr.len())
            .map(|i| if arr.is_null(i) { 0.0 } else { arr.value(i) as f32 })
            .collect())
    } else {
        anyhow::bail!(
            "column '{name}' must be Float32 or Float64, got {:?}",
            col.data_type()
        )
    }
}
