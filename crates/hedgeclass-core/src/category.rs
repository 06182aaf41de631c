//! Static category and priority table.
//!
//! Five hedge families share one priority chain (IR > FX > CP > EQ > GEN);
//! warrants and embedded derivatives sit outside it as special instrument
//! types. Every resolver reads its ordering from here.

use crate::label::LabelId;
use crate::vector::Field;

/// Default activation threshold for probabilistic resolution.
pub const DEFAULT_THRESHOLD: f32 = 0.35;

/// A specific family must reach `GENERIC_RESOLUTION_FACTOR * threshold`
/// before a generic candidate is reassigned to it.
pub const GENERIC_RESOLUTION_FACTOR: f32 = 0.7;

/// Hedge families in resolution priority order.
pub const HEDGE_PRIORITY: [Family; 5] = [
    Family::InterestRate,
    Family::ForeignExchange,
    Family::Commodity,
    Family::Equity,
    Family::General,
];

/// Families a generic (GEN) candidate may be resolved to, in priority order.
pub const SPECIFIC_FAMILIES: [Family; 4] = [
    Family::InterestRate,
    Family::ForeignExchange,
    Family::Commodity,
    Family::Equity,
];

/// Special instrument types, checked before any hedge family.
pub const INSTRUMENTS: [Instrument; 2] = [Instrument::Warrant, Instrument::Embedded];

/// Time dimensions in the order the strict resolver consults them.
pub const TIME_CONTEXTS: [TimeContext; 3] = [
    TimeContext::Current,
    TimeContext::Historic,
    TimeContext::Speculative,
];

/// Derivative / hedge family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// IR: interest-rate risk.
    InterestRate,
    /// FX: foreign-exchange risk.
    ForeignExchange,
    /// CP: commodity-price risk.
    Commodity,
    /// EQ: equity risk.
    Equity,
    /// GEN: derivatives mentioned without a specific risk family.
    General,
}

impl Family {
    /// Short code used in label identifiers (`IR`, `FX`, `CP`, `EQ`, `GEN`).
    pub const fn code(self) -> &'static str {
        match self {
            Self::InterestRate => "IR",
            Self::ForeignExchange => "FX",
            Self::Commodity => "CP",
            Self::Equity => "EQ",
            Self::General => "GEN",
        }
    }

    /// Context/mention field for this family.
    pub const fn context_field(self) -> Field {
        match self {
            Self::InterestRate => Field::Ir,
            Self::ForeignExchange => Field::Fx,
            Self::Commodity => Field::Cp,
            Self::Equity => Field::Eq,
            Self::General => Field::Gen,
        }
    }

    /// Usage field for this family.
    pub const fn usage_field(self) -> Field {
        match self {
            Self::InterestRate => Field::IrUse,
            Self::ForeignExchange => Field::FxUse,
            Self::Commodity => Field::CpUse,
            Self::Equity => Field::EqUse,
            Self::General => Field::GenUse,
        }
    }

    /// Outcome labels owned by this family.
    pub const fn outcomes(self) -> FamilyOutcomes {
        match self {
            Self::General => FamilyOutcomes {
                current: LabelId::GEN_CURRENT,
                historic: LabelId::GEN_HISTORIC,
                speculative: LabelId::GEN_SPECULATIVE,
                context: LabelId::GEN_CONTEXT,
            },
            Self::InterestRate => FamilyOutcomes {
                current: LabelId::IR_CURRENT,
                historic: LabelId::IR_HISTORIC,
                speculative: LabelId::IR_SPECULATIVE,
                context: LabelId::IR_CONTEXT,
            },
            Self::ForeignExchange => FamilyOutcomes {
                current: LabelId::FX_CURRENT,
                historic: LabelId::FX_HISTORIC,
                speculative: LabelId::FX_SPECULATIVE,
                context: LabelId::FX_CONTEXT,
            },
            Self::Commodity => FamilyOutcomes {
                current: LabelId::CP_CURRENT,
                historic: LabelId::CP_HISTORIC,
                speculative: LabelId::CP_SPECULATIVE,
                context: LabelId::CP_CONTEXT,
            },
            Self::Equity => FamilyOutcomes {
                current: LabelId::EQ_CURRENT,
                historic: LabelId::EQ_HISTORIC,
                speculative: LabelId::EQ_SPECULATIVE,
                context: LabelId::EQ_CONTEXT,
            },
        }
    }

    /// Rank penalty applied to this family's hedge candidates.
    ///
    /// Equity is deprioritised against the other families; everything else
    /// ranks at the base value.
    pub const fn rank_penalty(self) -> f32 {
        match self {
            Self::Equity => rank::EQUITY_PENALTY,
            _ => 0.0,
        }
    }
}

/// Label ids for one hedge family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyOutcomes {
    pub current: LabelId,
    pub historic: LabelId,
    pub speculative: LabelId,
    /// Mentioned in context, no confirmed use.
    pub context: LabelId,
}

impl FamilyOutcomes {
    /// Outcome for a usage/mention paired with a time dimension.
    pub const fn for_time(&self, time: TimeContext) -> LabelId {
        match time {
            TimeContext::Current => self.current,
            TimeContext::Historic => self.historic,
            TimeContext::Speculative => self.speculative,
        }
    }
}

/// Time context of a disclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeContext {
    Current,
    Historic,
    Speculative,
}

impl TimeContext {
    pub const fn field(self) -> Field {
        match self {
            Self::Current => Field::Curr,
            Self::Historic => Field::Hist,
            Self::Speculative => Field::Spec,
        }
    }
}

/// Standalone instrument types with a current/non-current split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Warrant,
    Embedded,
}

impl Instrument {
    pub const fn field(self) -> Field {
        match self {
            Self::Warrant => Field::Warr,
            Self::Embedded => Field::Emb,
        }
    }

    pub const fn current(self) -> LabelId {
        match self {
            Self::Warrant => LabelId::WARRANT_CURRENT,
            Self::Embedded => LabelId::EMBEDDED_CURRENT,
        }
    }

    /// Historic-or-speculative outcome.
    pub const fn non_current(self) -> LabelId {
        match self {
            Self::Warrant => LabelId::WARRANT_HISTORIC,
            Self::Embedded => LabelId::EMBEDDED_HISTORIC,
        }
    }
}

/// Priority ranks for probabilistic candidates. Lower wins.
pub mod rank {
    pub const USAGE_CURRENT: f32 = 1.0;
    pub const USAGE_UNTIMED: f32 = 1.5;
    pub const USAGE_HISTORIC: f32 = 2.0;
    pub const USAGE_SPECULATIVE: f32 = 3.0;
    pub const INSTRUMENT_CURRENT: f32 = 4.0;
    pub const MENTION_TIMED: f32 = 5.0;
    pub const MENTION_SPECULATIVE: f32 = 6.0;
    pub const INSTRUMENT_NON_CURRENT: f32 = 7.0;
    pub const CONTEXT_ONLY: f32 = 8.0;
    pub const IRRELEVANT: f32 = 9.0;

    /// Added to any hedge-family rank when the family is equity.
    pub const EQUITY_PENALTY: f32 = 0.1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_is_ir_fx_cp_eq_gen() {
        let codes: Vec<_> = HEDGE_PRIORITY.iter().map(|f| f.code()).collect();
        assert_eq!(codes, ["IR", "FX", "CP", "EQ", "GEN"]);
    }

    #[test]
    fn specific_families_exclude_general() {
        assert!(!SPECIFIC_FAMILIES.contains(&Family::General));
        assert_eq!(&HEDGE_PRIORITY[..4], &SPECIFIC_FAMILIES[..]);
    }

    #[test]
    fn family_outcomes_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for family in HEDGE_PRIORITY {
            let o = family.outcomes();
            for id in [o.current, o.historic, o.speculative, o.context] {
                assert!(seen.insert(id), "{id:?} reused by {family:?}");
            }
        }
        for inst in INSTRUMENTS {
            assert!(seen.insert(inst.current()));
            assert!(seen.insert(inst.non_current()));
        }
        assert!(seen.insert(LabelId::IRRELEVANT));
        assert_eq!(seen.len(), LabelId::COUNT);
    }

    #[test]
    fn only_equity_is_penalised() {
        for family in HEDGE_PRIORITY {
            let expected = if family == Family::Equity { 0.1 } else { 0.0 };
            assert_eq!(family.rank_penalty(), expected);
        }
    }

    #[test]
    fn ranks_are_strictly_ordered() {
        let ranks = [
            rank::USAGE_CURRENT,
            rank::USAGE_UNTIMED,
            rank::USAGE_HISTORIC,
            rank::USAGE_SPECULATIVE,
            rank::INSTRUMENT_CURRENT,
            rank::MENTION_TIMED,
            rank::MENTION_SPECULATIVE,
            rank::INSTRUMENT_NON_CURRENT,
            rank::CONTEXT_ONLY,
            rank::IRRELEVANT,
        ];
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn fields_match_family() {
        assert_eq!(Family::Commodity.context_field(), Field::Cp);
        assert_eq!(Family::Commodity.usage_field(), Field::CpUse);
        assert_eq!(TimeContext::Speculative.field(), Field::Spec);
        assert_eq!(Instrument::Embedded.field(), Field::Emb);
    }
}
