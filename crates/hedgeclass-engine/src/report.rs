use hedgeclass_core::LabelVector;
use serde::Serialize;

/// Inference response for one paragraph.
///
/// `labels` and `label_ids` are ranked highest priority first. `scores` is the
/// raw 16-field confidence map, kept for audit and comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub labels: Vec<String>,
    pub label_ids: Vec<u8>,
    pub scores: LabelVector,
}

impl Prediction {
    /// Top-ranked label name.
    pub fn top(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}
