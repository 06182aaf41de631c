//! One resolution interface over both modes.

use hedgeclass_core::{DEFAULT_THRESHOLD, LabelId, LabelNames, LabelVector};

use crate::ranked::resolve_ranked;
use crate::report::Prediction;
use crate::strict::resolve_strict;

/// Which resolver to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Ground truth over boolean-like flags: exactly one label.
    Strict,
    /// Model confidences gated at `threshold`: ranked labels.
    Probabilistic { threshold: f32 },
}

impl Mode {
    /// Probabilistic mode at [`DEFAULT_THRESHOLD`].
    pub const fn probabilistic() -> Self {
        Self::Probabilistic {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Output of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Single(LabelId),
    /// Highest priority first; never empty, no repeats.
    Ranked(Vec<LabelId>),
}

impl Resolution {
    /// The winning label.
    pub fn primary(&self) -> LabelId {
        match self {
            Self::Single(id) => *id,
            Self::Ranked(ids) => ids.first().copied().unwrap_or(LabelId::IRRELEVANT),
        }
    }

    pub fn labels(&self) -> &[LabelId] {
        match self {
            Self::Single(id) => std::slice::from_ref(id),
            Self::Ranked(ids) => ids,
        }
    }

    /// `(id, name)` pairs, keeping the first id for each distinct name.
    pub fn named(&self, table: &LabelNames) -> Vec<(LabelId, String)> {
        let mut out: Vec<(LabelId, String)> = Vec::with_capacity(self.labels().len());
        for id in self.labels() {
            let name = table.name(*id);
            if !out.iter().any(|(_, n)| n == name) {
                out.push((*id, name.to_string()));
            }
        }
        out
    }

    /// Translate to names, keeping the first occurrence of each name.
    pub fn names(&self, table: &LabelNames) -> Vec<String> {
        self.named(table).into_iter().map(|(_, name)| name).collect()
    }
}

/// Resolve `v` under `mode`.
pub fn resolve(v: &LabelVector, mode: Mode) -> Resolution {
    match mode {
        Mode::Strict => Resolution::Single(resolve_strict(v)),
        Mode::Probabilistic { threshold } => Resolution::Ranked(resolve_ranked(v, threshold)),
    }
}

/// Resolver configured with a name table and activation threshold.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone)]
pub struct Engine {
    names: LabelNames,
    threshold: f32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Built-in names, default threshold.
    pub fn new() -> Self {
        Self {
            names: LabelNames::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_names(mut self, names: LabelNames) -> Self {
        self.names = names;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn names(&self) -> &LabelNames {
        &self.names
    }

    /// Probabilistic mode at this engine's threshold.
    pub fn mode(&self) -> Mode {
        Mode::Probabilistic {
            threshold: self.threshold,
        }
    }

    /// Ground-truth label for a training paragraph.
    pub fn label(&self, v: &LabelVector) -> LabelId {
        resolve_strict(v)
    }

    /// Name of a label id, `"Unknown"` when the table has a gap.
    pub fn label_name(&self, id: LabelId) -> &str {
        self.names.name(id)
    }

    /// Ranked prediction with names and the raw score map.
    ///
    /// `labels[i]` is the name of `label_ids[i]`; ids whose name repeats an
    /// earlier one are dropped from both.
    pub fn predict(&self, v: &LabelVector) -> Prediction {
        let (label_ids, labels): (Vec<u8>, Vec<String>) = resolve(v, self.mode())
            .named(&self.names)
            .into_iter()
            .map(|(id, name)| (id.value(), name))
            .unzip();
        Prediction {
            labels,
            label_ids,
            scores: *v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedgeclass_core::Field;

    #[test]
    fn strict_mode_returns_single() {
        let v = LabelVector::zero().with(Field::Irr, 1.0);
        assert_eq!(
            resolve(&v, Mode::Strict),
            Resolution::Single(LabelId::IRRELEVANT)
        );
    }

    #[test]
    fn all_zero_in_any_mode_is_irrelevant() {
        let zero = LabelVector::zero();
        for mode in [Mode::Strict, Mode::probabilistic()] {
            let r = resolve(&zero, mode);
            assert_eq!(r.labels(), &[LabelId::IRRELEVANT]);
            assert_eq!(r.primary(), LabelId::IRRELEVANT);
        }
    }

    #[test]
    fn probabilistic_default_threshold() {
        assert_eq!(
            Mode::probabilistic(),
            Mode::Probabilistic { threshold: 0.35 }
        );
    }

    #[test]
    fn names_dedup_repeated_unknowns() {
        let table = LabelNames::from_json(r#"{"24": "Irrelevant"}"#).unwrap();
        let r = Resolution::Ranked(vec![
            LabelId::IR_CURRENT,
            LabelId::FX_CURRENT,
            LabelId::IRRELEVANT,
        ]);
        assert_eq!(r.names(&table), vec!["Unknown", "Irrelevant"]);
    }

    #[test]
    fn predict_keeps_ids_aligned_with_names_over_gappy_table() {
        let names = LabelNames::from_json(r#"{"24": "Irrelevant"}"#).unwrap();
        let engine = Engine::new().with_names(names);
        let v = LabelVector::from_pairs([("ir_use", 0.9), ("fx_use", 0.5), ("irr", 0.9)]);
        assert_eq!(
            resolve(&v, engine.mode()).labels(),
            &[LabelId::IR_CURRENT, LabelId::FX_CURRENT, LabelId::IRRELEVANT]
        );

        let p = engine.predict(&v);
        assert_eq!(p.labels, vec!["Unknown", "Irrelevant"]);
        assert_eq!(
            p.label_ids,
            vec![LabelId::IR_CURRENT.value(), LabelId::IRRELEVANT.value()]
        );
    }

    #[test]
    fn engine_threshold_gates_activation() {
        let v = LabelVector::zero().with(Field::Ir, 0.5);
        let lax = Engine::new();
        assert_eq!(lax.predict(&v).label_ids, vec![LabelId::IR_CONTEXT.value()]);
        let strict = Engine::new().with_threshold(0.6);
        assert_eq!(
            strict.predict(&v).label_ids,
            vec![LabelId::IRRELEVANT.value()]
        );
    }

    #[test]
    fn predict_carries_names_and_scores() {
        let v = LabelVector::from_pairs([("ir", 0.9), ("ir_use", 0.8), ("curr", 0.6)]);
        let p = Engine::new().predict(&v);
        assert_eq!(p.labels, vec!["Interest Rate Hedge - Current Use"]);
        assert_eq!(p.scores, v);
    }

    #[test]
    fn custom_names_flow_through() {
        let names = LabelNames::from_json(r#"{"15": "W-now"}"#).unwrap();
        let engine = Engine::new().with_names(names);
        let v = LabelVector::zero().with(Field::Warr, 1.0);
        let id = engine.label(&v);
        assert_eq!(engine.label_name(id), "W-now");
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
