//! Terminal rendering for the label table and agreement summaries.

use hedgeclass_core::{LabelId, LabelNames};
use hedgeclass_engine::AgreementSummary;

const MAX_CONFUSIONS: usize = 10;
/// Widest label code (`EMBEDDED_HISTORIC`).
const CODE_WIDTH: usize = 17;

// ── Label table ──

pub fn print_label_table(names: &LabelNames) {
    println!("{:>3}  {:<w$} {}", "id", "code", "name", w = CODE_WIDTH);
    for id in LabelId::all() {
        let marker = if id.is_context_only() { "  (context)" } else { "" };
        println!(
            "{:>3}  {:<w$} {}{}",
            id.value(),
            id.code(),
            names.name(id),
            marker,
            w = CODE_WIDTH
        );
    }
}

// ── Agreement summary ──

pub fn print_agreement(summary: &AgreementSummary, names: &LabelNames) {
    println!("Agreement");
    println!("  {:<26} {}", "records", summary.total);
    println!("  {:<26} {}", "unlabelled (predicted)", summary.predicted);
    println!("  {:<26} {}", "confirmed", summary.confirmed);
    println!("  {:<26} {}", "conflict", summary.conflict);
    println!("  {:<26} {}", "top-1 accuracy", percent(summary.accuracy()));
    println!("  {:<26} {}", "top-3 accuracy", percent(summary.top3_accuracy()));

    let confusions = summary.top_confusions();
    if confusions.is_empty() {
        return;
    }

    println!();
    println!("Top confusions (truth -> predicted)");
    for ((truth, predicted), count) in confusions.into_iter().take(MAX_CONFUSIONS) {
        println!(
            "  {:>5}  {} -> {}",
            count,
            names.name(truth),
            names.name(predicted)
        );
    }
}

fn percent(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{:.1}%", r * 100.0),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_column_fits_every_code() {
        let widest = LabelId::all().map(|id| id.code().len()).max().unwrap();
        assert_eq!(widest, CODE_WIDTH);
    }

    #[test]
    fn percent_formats_ratio() {
        assert_eq!(percent(Some(0.5)), "50.0%");
        assert_eq!(percent(Some(1.0 / 3.0)), "33.3%");
        assert_eq!(percent(None), "-");
    }
}
