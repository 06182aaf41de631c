//! Ground-truth resolution over boolean-like label vectors.
//!
//! Used when generating training data: the true configuration is known, so
//! exactly one label comes back. A field counts as set when its score is
//! above zero, which also admits fractional keyword-scoring output.

use hedgeclass_core::category::{HEDGE_PRIORITY, INSTRUMENTS, TIME_CONTEXTS, TimeContext};
use hedgeclass_core::{Field, LabelId, LabelVector};

/// Resolve a boolean-like vector to exactly one primary label.
///
/// Guards run in order and the first match wins:
///
/// 1. Warrant, then embedded. Only `hist` picks the non-current outcome;
///    `curr` is never consulted.
/// 2. The first family in priority order with its usage flag set.
/// 3. The first family mentioned alongside `spec`.
/// 4. The first family mentioned at all (context-only label).
/// 5. `IRRELEVANT`.
pub fn resolve_strict(v: &LabelVector) -> LabelId {
    let set = |field: Field| v.get(field) > 0.0;

    for inst in INSTRUMENTS {
        if set(inst.field()) {
            return if set(Field::Hist) {
                inst.non_current()
            } else {
                inst.current()
            };
        }
    }

    for family in HEDGE_PRIORITY {
        if set(family.usage_field()) {
            let time = TIME_CONTEXTS
                .into_iter()
                .find(|t| set(t.field()))
                .unwrap_or(TimeContext::Current);
            return family.outcomes().for_time(time);
        }
    }

    if set(Field::Spec)
        && let Some(family) = HEDGE_PRIORITY.into_iter().find(|f| set(f.context_field()))
    {
        return family.outcomes().speculative;
    }

    HEDGE_PRIORITY
        .into_iter()
        .find(|f| set(f.context_field()))
        .map(|f| f.outcomes().context)
        .unwrap_or(LabelId::IRRELEVANT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedgeclass_core::FIELD_COUNT;

    fn flags(fields: &[Field]) -> LabelVector {
        fields
            .iter()
            .fold(LabelVector::zero(), |v, f| v.with(*f, 1.0))
    }

    /// Every boolean vector over the 16 fields.
    fn all_boolean_vectors() -> impl Iterator<Item = LabelVector> {
        (0u32..1 << FIELD_COUNT).map(|bits| {
            Field::ALL
                .iter()
                .enumerate()
                .fold(LabelVector::zero(), |v, (i, f)| {
                    v.with(*f, if bits & (1 << i) != 0 { 1.0 } else { 0.0 })
                })
        })
    }

    #[test]
    fn generic_usage_current_is_id_zero() {
        let label = resolve_strict(&flags(&[Field::Gen, Field::GenUse, Field::Curr]));
        assert_eq!(label, LabelId::GEN_CURRENT);
        assert_eq!(label.value(), 0);
    }

    #[test]
    fn warrant_with_hist_is_historic() {
        let label = resolve_strict(&flags(&[Field::Warr, Field::Hist]));
        assert_eq!(label, LabelId::WARRANT_HISTORIC);
    }

    #[test]
    fn irrelevant_flag_is_id_24() {
        let label = resolve_strict(&flags(&[Field::Irr]));
        assert_eq!(label, LabelId::IRRELEVANT);
        assert_eq!(label.value(), 24);
    }

    #[test]
    fn empty_vector_is_irrelevant() {
        assert_eq!(resolve_strict(&LabelVector::zero()), LabelId::IRRELEVANT);
    }

    // Documented quirk: the instrument branch reads only `hist`.
    #[test]
    fn warrant_without_time_flags_is_current() {
        assert_eq!(
            resolve_strict(&flags(&[Field::Warr])),
            LabelId::WARRANT_CURRENT
        );
    }

    // Documented quirk: `curr` does not override `hist` for instruments.
    #[test]
    fn warrant_with_curr_and_hist_is_historic() {
        assert_eq!(
            resolve_strict(&flags(&[Field::Warr, Field::Curr, Field::Hist])),
            LabelId::WARRANT_HISTORIC
        );
    }

    #[test]
    fn warrant_dominates_embedded() {
        assert_eq!(
            resolve_strict(&flags(&[Field::Warr, Field::Emb])),
            LabelId::WARRANT_CURRENT
        );
        assert_eq!(
            resolve_strict(&flags(&[Field::Emb, Field::Hist, Field::IrUse])),
            LabelId::EMBEDDED_HISTORIC
        );
    }

    #[test]
    fn usage_beats_mention() {
        let label = resolve_strict(&flags(&[Field::IrUse, Field::Curr, Field::Fx]));
        assert_eq!(label, LabelId::IR_CURRENT);
    }

    #[test]
    fn usage_follows_priority_order() {
        let label = resolve_strict(&flags(&[Field::EqUse, Field::FxUse, Field::Hist]));
        assert_eq!(label, LabelId::FX_HISTORIC);
        let label = resolve_strict(&flags(&[Field::GenUse, Field::CpUse]));
        assert_eq!(label, LabelId::CP_CURRENT);
    }

    #[test]
    fn usage_time_checks_curr_then_hist_then_spec() {
        assert_eq!(
            resolve_strict(&flags(&[Field::IrUse, Field::Hist, Field::Spec])),
            LabelId::IR_HISTORIC
        );
        assert_eq!(
            resolve_strict(&flags(&[Field::IrUse, Field::Spec])),
            LabelId::IR_SPECULATIVE
        );
        assert_eq!(
            resolve_strict(&flags(&[Field::IrUse, Field::Curr, Field::Spec])),
            LabelId::IR_CURRENT
        );
    }

    #[test]
    fn usage_without_time_defaults_to_current() {
        assert_eq!(
            resolve_strict(&flags(&[Field::EqUse])),
            LabelId::EQ_CURRENT
        );
    }

    #[test]
    fn speculative_mention_without_usage() {
        assert_eq!(
            resolve_strict(&flags(&[Field::Eq, Field::Cp, Field::Spec])),
            LabelId::CP_SPECULATIVE
        );
    }

    #[test]
    fn mention_without_spec_is_context_only() {
        assert_eq!(
            resolve_strict(&flags(&[Field::Fx, Field::Curr])),
            LabelId::FX_CONTEXT
        );
        assert_eq!(
            resolve_strict(&flags(&[Field::Gen, Field::Hist, Field::Irr])),
            LabelId::GEN_CONTEXT
        );
    }

    #[test]
    fn spec_alone_is_irrelevant() {
        assert_eq!(
            resolve_strict(&flags(&[Field::Spec, Field::Curr])),
            LabelId::IRRELEVANT
        );
    }

    #[test]
    fn fractional_scores_are_truthy() {
        let v = LabelVector::zero()
            .with(Field::CpUse, 0.12)
            .with(Field::Hist, 0.05);
        assert_eq!(resolve_strict(&v), LabelId::CP_HISTORIC);
    }

    #[test]
    fn generic_is_never_reassigned_in_strict_mode() {
        let v = flags(&[Field::GenUse, Field::Ir, Field::Curr]);
        assert_eq!(resolve_strict(&v), LabelId::GEN_CURRENT);
    }

    #[test]
    fn exhaustive_boolean_properties() {
        for v in all_boolean_vectors() {
            let label = resolve_strict(&v);
            assert_eq!(label, resolve_strict(&v), "non-deterministic for {v:?}");
            assert!(LabelId::new(label.value()).is_some());

            if v.get(Field::Warr) > 0.0 {
                assert!(
                    label == LabelId::WARRANT_CURRENT || label == LabelId::WARRANT_HISTORIC,
                    "warrant not dominant for {v:?}: {label}"
                );
            }

            if v.get(Field::Warr) == 0.0
                && v.get(Field::Emb) == 0.0
                && v.get(Field::IrUse) > 0.0
                && v.get(Field::Curr) > 0.0
            {
                assert_eq!(label, LabelId::IR_CURRENT, "for {v:?}");
            }
        }
    }
}
