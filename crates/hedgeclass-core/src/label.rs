//! Primary label identifiers.
//!
//! 25 mutually exclusive labels with stable integer ids. Ids 0–18 and 24 are
//! the primary labels written to training data; 19–23 are the context-only
//! labels that mark a family as discussed but not used.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::LabelError;

/// Stable integer id of a primary label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct LabelId(u8);

/// (code, built-in name) indexed by id.
const TABLE: [(&str, &str); LabelId::COUNT] = [
    ("GEN_CURRENT", "General Derivatives - Current Use"),
    ("GEN_HISTORIC", "General Derivatives - Historic Use"),
    ("GEN_SPECULATIVE", "General Derivatives - Speculative"),
    ("IR_CURRENT", "Interest Rate Hedge - Current Use"),
    ("IR_HISTORIC", "Interest Rate Hedge - Historic Use"),
    ("IR_SPECULATIVE", "Interest Rate Hedge - Speculative"),
    ("FX_CURRENT", "Foreign Exchange Hedge - Current Use"),
    ("FX_HISTORIC", "Foreign Exchange Hedge - Historic Use"),
    ("FX_SPECULATIVE", "Foreign Exchange Hedge - Speculative"),
    ("CP_CURRENT", "Commodity Price Hedge - Current Use"),
    ("CP_HISTORIC", "Commodity Price Hedge - Historic Use"),
    ("CP_SPECULATIVE", "Commodity Price Hedge - Speculative"),
    ("EQ_CURRENT", "Equity Hedge - Current Use"),
    ("EQ_HISTORIC", "Equity Hedge - Historic Use"),
    ("EQ_SPECULATIVE", "Equity Hedge - Speculative"),
    ("WARRANT_CURRENT", "Warrant - Current"),
    ("WARRANT_HISTORIC", "Warrant - Historic/Speculative"),
    ("EMBEDDED_CURRENT", "Embedded Derivative - Current"),
    ("EMBEDDED_HISTORIC", "Embedded Derivative - Historic/Speculative"),
    ("GEN_CONTEXT", "General Derivatives - Context Only"),
    ("IR_CONTEXT", "Interest Rate - Context Only"),
    ("FX_CONTEXT", "Foreign Exchange - Context Only"),
    ("CP_CONTEXT", "Commodity Price - Context Only"),
    ("EQ_CONTEXT", "Equity - Context Only"),
    ("IRRELEVANT", "Irrelevant"),
];

impl LabelId {
    /// Total number of label ids.
    pub const COUNT: usize = 25;

    pub const GEN_CURRENT: Self = Self(0);
    pub const GEN_HISTORIC: Self = Self(1);
    pub const GEN_SPECULATIVE: Self = Self(2);
    pub const IR_CURRENT: Self = Self(3);
    pub const IR_HISTORIC: Self = Self(4);
    pub const IR_SPECULATIVE: Self = Self(5);
    pub const FX_CURRENT: Self = Self(6);
    pub const FX_HISTORIC: Self = Self(7);
    pub const FX_SPECULATIVE: Self = Self(8);
    pub const CP_CURRENT: Self = Self(9);
    pub const CP_HISTORIC: Self = Self(10);
    pub const CP_SPECULATIVE: Self = Self(11);
    pub const EQ_CURRENT: Self = Self(12);
    pub const EQ_HISTORIC: Self = Self(13);
    pub const EQ_SPECULATIVE: Self = Self(14);
    pub const WARRANT_CURRENT: Self = Self(15);
    pub const WARRANT_HISTORIC: Self = Self(16);
    pub const EMBEDDED_CURRENT: Self = Self(17);
    pub const EMBEDDED_HISTORIC: Self = Self(18);
    pub const GEN_CONTEXT: Self = Self(19);
    pub const IR_CONTEXT: Self = Self(20);
    pub const FX_CONTEXT: Self = Self(21);
    pub const CP_CONTEXT: Self = Self(22);
    pub const EQ_CONTEXT: Self = Self(23);
    pub const IRRELEVANT: Self = Self(24);

    /// Look up an id, returning `None` outside `0..COUNT`.
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < Self::COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    /// All ids in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Uppercase identifier, e.g. `IR_CURRENT`.
    pub const fn code(self) -> &'static str {
        TABLE[self.0 as usize].0
    }

    /// Name from the built-in table.
    pub const fn builtin_name(self) -> &'static str {
        TABLE[self.0 as usize].1
    }

    /// True for the "mentioned, no confirmed use" labels.
    pub const fn is_context_only(self) -> bool {
        matches!(self.0, 19..=23)
    }
}

impl From<LabelId> for u8 {
    fn from(id: LabelId) -> Self {
        id.0
    }
}

impl TryFrom<u8> for LabelId {
    type Error = LabelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(LabelError::UnknownLabelId(i64::from(value)))
    }
}

impl TryFrom<i64> for LabelId {
    type Error = LabelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(LabelError::UnknownLabelId(value))
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_ids() {
        assert_eq!(LabelId::GEN_CURRENT.value(), 0);
        assert_eq!(LabelId::IRRELEVANT.value(), 24);
        assert_eq!(LabelId::all().count(), 25);
    }

    #[test]
    fn codes_are_unique() {
        let codes: std::collections::HashSet<_> = LabelId::all().map(LabelId::code).collect();
        assert_eq!(codes.len(), LabelId::COUNT);
        assert_eq!(LabelId::WARRANT_HISTORIC.code(), "WARRANT_HISTORIC");
    }

    #[test]
    fn context_only_range() {
        let context: Vec<_> = LabelId::all().filter(|id| id.is_context_only()).collect();
        assert_eq!(context.len(), 5);
        assert_eq!(context[0], LabelId::GEN_CONTEXT);
        assert_eq!(context[4], LabelId::EQ_CONTEXT);
    }

    #[test]
    fn out_of_range_ids_rejected() {
        assert!(LabelId::new(25).is_none());
        assert!(LabelId::try_from(-1i64).is_err());
        assert!(LabelId::try_from(300i64).is_err());
        assert_eq!(LabelId::try_from(15i64).unwrap(), LabelId::WARRANT_CURRENT);
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&LabelId::IR_CURRENT).unwrap();
        assert_eq!(json, "3");
        let back: LabelId = serde_json::from_str("24").unwrap();
        assert_eq!(back, LabelId::IRRELEVANT);
        assert!(serde_json::from_str::<LabelId>("99").is_err());
    }
}
