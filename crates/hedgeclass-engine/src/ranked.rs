//! Inference-time resolution over continuous model confidences.
//!
//! Every signal that clears the threshold proposes a candidate label with a
//! priority rank and a tie-break score. Candidates are sorted by rank
//! (ascending) then tie-break (descending), and the first occurrence of each
//! label id is kept. Several time dimensions may fire at once, so the result
//! is a ranked list rather than a single forced choice.

use std::cmp::Ordering;

use hedgeclass_core::category::{
    HEDGE_PRIORITY, INSTRUMENTS, SPECIFIC_FAMILIES, TIME_CONTEXTS, TimeContext, rank,
};
use hedgeclass_core::{Family, Field, GENERIC_RESOLUTION_FACTOR, LabelId, LabelVector};

/// A proposed label with its ordering keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub label: LabelId,
    /// Lower wins.
    pub rank: f32,
    /// Higher wins within a rank.
    pub tie_break: f32,
}

impl Candidate {
    /// Sort order: rank ascending, then tie-break descending.
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        self.rank
            .total_cmp(&other.rank)
            .then_with(|| other.tie_break.total_cmp(&self.tie_break))
    }
}

/// A hedge family that cleared the threshold on context or usage.
#[derive(Debug, Clone, Copy)]
struct ActiveFamily {
    family: Family,
    context: f32,
    usage: f32,
    has_usage: bool,
}

/// Resolve a confidence vector to a ranked, deduplicated label list.
///
/// Never empty: with no candidates the result is `[IRRELEVANT]`.
pub fn resolve_ranked(v: &LabelVector, threshold: f32) -> Vec<LabelId> {
    let candidates = candidates(v, threshold);
    finalize(candidates)
}

/// Generate unsorted candidates for `v`.
pub fn candidates(v: &LabelVector, threshold: f32) -> Vec<Candidate> {
    let active = |score: f32| score >= threshold;

    let families: Vec<ActiveFamily> = HEDGE_PRIORITY
        .into_iter()
        .filter_map(|family| {
            let context = v.context(family);
            let usage = v.usage(family);
            (active(context) || active(usage)).then_some(ActiveFamily {
                family,
                context,
                usage,
                has_usage: active(usage),
            })
        })
        .collect();

    let times: Vec<(TimeContext, f32)> = TIME_CONTEXTS
        .into_iter()
        .map(|t| (t, v.get(t.field())))
        .filter(|(_, score)| active(*score))
        .collect();

    let mut out = Vec::new();

    for af in &families {
        let family = if af.family == Family::General {
            resolve_generic(threshold, |f| v.context(f) + v.usage(f))
        } else {
            af.family
        };
        let outcomes = family.outcomes();
        let penalty = family.rank_penalty();

        if af.has_usage && !times.is_empty() {
            for &(time, score) in &times {
                let base = match time {
                    TimeContext::Current => rank::USAGE_CURRENT,
                    TimeContext::Historic => rank::USAGE_HISTORIC,
                    TimeContext::Speculative => rank::USAGE_SPECULATIVE,
                };
                out.push(Candidate {
                    label: outcomes.for_time(time),
                    rank: base + penalty,
                    tie_break: af.usage * score,
                });
            }
        } else if af.has_usage {
            out.push(Candidate {
                label: outcomes.current,
                rank: rank::USAGE_UNTIMED + penalty,
                tie_break: af.usage,
            });
        } else if !times.is_empty() && active(af.context) {
            for &(time, score) in &times {
                let base = match time {
                    TimeContext::Speculative => rank::MENTION_SPECULATIVE,
                    _ => rank::MENTION_TIMED,
                };
                out.push(Candidate {
                    label: outcomes.for_time(time),
                    rank: base + penalty,
                    tie_break: af.context * score,
                });
            }
        }
    }

    let curr = times
        .iter()
        .find(|(t, _)| *t == TimeContext::Current)
        .map(|(_, score)| *score);
    for inst in INSTRUMENTS {
        let score = v.get(inst.field());
        if !active(score) {
            continue;
        }
        out.push(match curr {
            Some(curr) => Candidate {
                label: inst.current(),
                rank: rank::INSTRUMENT_CURRENT,
                tie_break: score * curr,
            },
            None => Candidate {
                label: inst.non_current(),
                rank: rank::INSTRUMENT_NON_CURRENT,
                tie_break: score,
            },
        });
    }

    if !families.iter().any(|af| af.has_usage) {
        for af in families.iter().filter(|af| active(af.context)) {
            let family = if af.family == Family::General {
                resolve_generic(threshold, |f| v.context(f))
            } else {
                af.family
            };
            out.push(Candidate {
                label: family.outcomes().context,
                rank: rank::CONTEXT_ONLY + family.rank_penalty(),
                tie_break: af.context,
            });
        }
    }

    let irr = v.get(Field::Irr);
    if active(irr) {
        out.push(Candidate {
            label: LabelId::IRRELEVANT,
            rank: rank::IRRELEVANT,
            tie_break: irr,
        });
    }

    out
}

/// Reassign a generic candidate to the strongest specific family.
///
/// Picks the highest `score(family)` among IR, FX, CP and EQ that reaches
/// `GENERIC_RESOLUTION_FACTOR * threshold`; earlier families win ties. Falls
/// back to [`Family::General`] when none qualifies.
pub fn resolve_generic(threshold: f32, score: impl Fn(Family) -> f32) -> Family {
    let floor = GENERIC_RESOLUTION_FACTOR * threshold;
    let mut best: Option<(Family, f32)> = None;
    for family in SPECIFIC_FAMILIES {
        let s = score(family);
        if s < floor {
            continue;
        }
        if best.is_none_or(|(_, b)| s > b) {
            best = Some((family, s));
        }
    }
    best.map(|(f, _)| f).unwrap_or(Family::General)
}

/// Stable-sort candidates and keep the first occurrence of each label.
pub fn finalize(mut candidates: Vec<Candidate>) -> Vec<LabelId> {
    candidates.sort_by(Candidate::priority_cmp);

    let mut labels: Vec<LabelId> = Vec::with_capacity(candidates.len());
    for c in candidates {
        if !labels.contains(&c.label) {
            labels.push(c.label);
        }
    }

    if labels.is_empty() {
        labels.push(LabelId::IRRELEVANT);
    }
    labels
}
