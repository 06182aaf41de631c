//! Agreement between ground-truth labels and ranked predictions.

use std::collections::HashMap;

use hedgeclass_core::LabelId;
use serde::Serialize;

/// Agreement status between a prediction and the ground-truth label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgreementStatus {
    /// No ground truth — the prediction is the only classification.
    Predicted,
    /// Ground truth exists and the top prediction agrees.
    Confirmed,
    /// Ground truth exists and the top prediction disagrees — needs review.
    Conflict,
}

impl AgreementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Predicted => "predicted",
            Self::Confirmed => "confirmed",
            Self::Conflict => "conflict",
        }
    }
}

/// Compare the top prediction against the ground truth.
pub fn compare(truth: Option<LabelId>, predicted: &[LabelId]) -> AgreementStatus {
    match truth {
        None => AgreementStatus::Predicted,
        Some(t) if predicted.first() == Some(&t) => AgreementStatus::Confirmed,
        Some(_) => AgreementStatus::Conflict,
    }
}

/// True if `truth` appears among the first `k` predictions.
pub fn is_within_top_k(truth: LabelId, predicted: &[LabelId], k: usize) -> bool {
    predicted.iter().take(k).any(|id| *id == truth)
}

/// Tally of agreement over a batch of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgreementSummary {
    pub total: usize,
    pub predicted: usize,
    pub confirmed: usize,
    pub conflict: usize,
    /// Labelled paragraphs whose truth is within the top 3 predictions.
    pub top3_hits: usize,
    /// (truth, top prediction) → count, conflicts only.
    #[serde(skip)]
    pub confusions: HashMap<(LabelId, LabelId), usize>,
}

impl AgreementSummary {
    /// Record one paragraph and return its status.
    pub fn record(&mut self, truth: Option<LabelId>, predicted: &[LabelId]) -> AgreementStatus {
        let status = compare(truth, predicted);
        self.total += 1;
        match status {
            AgreementStatus::Predicted => self.predicted += 1,
            AgreementStatus::Confirmed => self.confirmed += 1,
            AgreementStatus::Conflict => {
                self.conflict += 1;
                if let (Some(t), Some(p)) = (truth, predicted.first()) {
                    *self.confusions.entry((t, *p)).or_insert(0) += 1;
                }
            }
        }
        if let Some(t) = truth
            && is_within_top_k(t, predicted, 3)
        {
            self.top3_hits += 1;
        }
        status
    }

    /// Paragraphs carrying a ground-truth label.
    pub fn labelled(&self) -> usize {
        self.confirmed + self.conflict
    }

    /// Top-1 agreement over labelled paragraphs, `None` if there are none.
    pub fn accuracy(&self) -> Option<f64> {
        let n = self.labelled();
        (n > 0).then(|| self.confirmed as f64 / n as f64)
    }

    /// Top-3 agreement over labelled paragraphs.
    pub fn top3_accuracy(&self) -> Option<f64> {
        let n = self.labelled();
        (n > 0).then(|| self.top3_hits as f64 / n as f64)
    }

    /// Conflicts sorted by frequency, most common first.
    pub fn top_confusions(&self) -> Vec<((LabelId, LabelId), usize)> {
        let mut out: Vec<_> = self.confusions.iter().map(|(k, v)| (*k, *v)).collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        out
    }
}
