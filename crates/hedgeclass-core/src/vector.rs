//! Per-paragraph label vectors.
//!
//! A [`LabelVector`] holds one score per field of the fixed 16-field contract
//! shared with the upstream generator and the model head. Absent fields read
//! as `0.0`; scores are stored as given, never clamped. When decoding a JSON
//! map, keys outside the contract and non-numeric values are skipped, so a
//! `null` score reads as `0.0`.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::LabelError;
use crate::category::Family;

/// Number of fields in the label vector contract.
pub const FIELD_COUNT: usize = 16;

/// One field of the label vector contract, in contract order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Ir,
    Fx,
    Cp,
    Eq,
    Gen,
    IrUse,
    FxUse,
    CpUse,
    EqUse,
    GenUse,
    Curr,
    Hist,
    Spec,
    Warr,
    Emb,
    Irr,
}

impl Field {
    /// All fields in contract order (the model head's output order).
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Ir,
        Field::Fx,
        Field::Cp,
        Field::Eq,
        Field::Gen,
        Field::IrUse,
        Field::FxUse,
        Field::CpUse,
        Field::EqUse,
        Field::GenUse,
        Field::Curr,
        Field::Hist,
        Field::Spec,
        Field::Warr,
        Field::Emb,
        Field::Irr,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ir => "ir",
            Self::Fx => "fx",
            Self::Cp => "cp",
            Self::Eq => "eq",
            Self::Gen => "gen",
            Self::IrUse => "ir_use",
            Self::FxUse => "fx_use",
            Self::CpUse => "cp_use",
            Self::EqUse => "eq_use",
            Self::GenUse => "gen_use",
            Self::Curr => "curr",
            Self::Hist => "hist",
            Self::Spec => "spec",
            Self::Warr => "warr",
            Self::Emb => "emb",
            Self::Irr => "irr",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Immutable per-category scores for one paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "HashMap<String, serde_json::Value>")]
pub struct LabelVector {
    scores: [f32; FIELD_COUNT],
}

impl LabelVector {
    /// All-zero vector.
    pub const fn zero() -> Self {
        Self {
            scores: [0.0; FIELD_COUNT],
        }
    }

    /// Build from `(name, score)` pairs. Unknown names are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        let mut scores = [0.0; FIELD_COUNT];
        for (name, score) in pairs {
            if let Some(field) = Field::from_name(name) {
                scores[field.index()] = score;
            }
        }
        Self { scores }
    }

    /// Build from model output already in contract order.
    pub fn from_scores(scores: &[f32]) -> Result<Self, LabelError> {
        let scores: [f32; FIELD_COUNT] =
            scores.try_into().map_err(|_| LabelError::ScoreCount {
                expected: FIELD_COUNT,
                got: scores.len(),
            })?;
        Ok(Self { scores })
    }

    /// Build from raw model logits in contract order, applying the sigmoid.
    pub fn from_logits(logits: &[f32]) -> Result<Self, LabelError> {
        let mut v = Self::from_scores(logits)?;
        for s in &mut v.scores {
            *s = sigmoid(*s);
        }
        Ok(v)
    }

    /// Return a copy with `field` set to `score`.
    #[must_use]
    pub const fn with(mut self, field: Field, score: f32) -> Self {
        self.scores[field.index()] = score;
        self
    }

    pub const fn get(&self, field: Field) -> f32 {
        self.scores[field.index()]
    }

    /// Context/mention score for a family.
    pub const fn context(&self, family: Family) -> f32 {
        self.get(family.context_field())
    }

    /// Usage score for a family.
    pub const fn usage(&self, family: Family) -> f32 {
        self.get(family.usage_field())
    }

    /// Scores in contract order.
    pub const fn scores(&self) -> &[f32; FIELD_COUNT] {
        &self.scores
    }

    /// `(field, score)` pairs in contract order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, f32)> + '_ {
        Field::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}

impl From<[f32; FIELD_COUNT]> for LabelVector {
    fn from(scores: [f32; FIELD_COUNT]) -> Self {
        Self { scores }
    }
}

impl From<HashMap<String, serde_json::Value>> for LabelVector {
    fn from(map: HashMap<String, serde_json::Value>) -> Self {
        Self::from_pairs(
            map.iter()
                .filter_map(|(k, v)| v.as_f64().map(|score| (k.as_str(), score as f32))),
        )
    }
}

/// Serialises as the full score map in contract order.
impl Serialize for LabelVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (field, score) in self.iter() {
            map.serialize_entry(field.name(), &score)?;
        }
        map.end()
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
