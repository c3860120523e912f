//! Plain-text report for the terminal front end.

use crate::config::defaults::TEXT_PROGRESS_BAR_WIDTH;

use super::{ResultView, DISCLAIMER};

/// `[#########...............................]` scaled to the bar width.
pub fn progress_bar(percent: f64, width: usize) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((super::progress_percent(percent) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// Render the full report: headline, bar, advice lists and notes.
pub fn render_report(view: &ResultView) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", view.headline.to_uppercase()));
    out.push_str(&format!(
        "{} {}\n",
        progress_bar(view.progress_percent, TEXT_PROGRESS_BAR_WIDTH),
        view.probability_text()
    ));
    out.push_str(&format!("{}\n", view.summary_sentence()));

    for section in &view.sections {
        out.push_str(&format!("\n{}\n", section.category.title()));
        if section.items.is_empty() {
            out.push_str("  (none)\n");
        }
        for item in &section.items {
            out.push_str(&format!("  - {}\n", item.detail));
        }
    }

    if !view.general_note.is_empty() {
        out.push_str(&format!("\nNote: {}\n", view.general_note));
    }
    out.push_str(&format!("\n{DISCLAIMER}\n"));
    out
}

/// Inline validation failures, one per line.
pub fn render_field_errors(errors: &crate::form::ValidationErrors) -> String {
    errors
        .errors()
        .iter()
        .map(|e| format!("  {}: {}\n", e.field.key(), e.message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HealthAdvice, PredictionClass, PredictionResult};

    #[test]
    fn test_progress_bar_fill() {
        assert_eq!(progress_bar(0.0, 10), "[..........]");
        assert_eq!(progress_bar(15.0, 20), "[###.................]");
        assert_eq!(progress_bar(100.0, 4), "[####]");
        assert_eq!(progress_bar(250.0, 4), "[####]");
    }

    #[test]
    fn test_report_lists_every_recommendation() {
        let view = ResultView::from_result(&PredictionResult {
            prediction: PredictionClass::Present,
            probability: 55.25,
            risk_level: "moderate".to_string(),
            health_advice: HealthAdvice {
                exercise_recommendations: vec!["Aim for 150 minutes weekly".to_string()],
                diet_recommendations: vec!["Reduce sodium intake".to_string()],
                lifestyle_recommendations: vec![],
                general_note: "Consult your doctor.".to_string(),
            },
        });
        let report = render_report(&view);

        assert!(report.starts_with("MODERATE RISK\n"));
        assert!(report.contains("55.2%") || report.contains("55.3%"));
        assert!(report.contains("  - Aim for 150 minutes weekly\n"));
        assert!(report.contains("Lifestyle\n  (none)\n"));
        assert!(report.contains("Note: Consult your doctor."));
    }

    #[test]
    fn test_field_errors_one_per_line() {
        let mut draft = crate::types::FormDraft::default();
        draft.set(crate::types::FormField::Age, "121");
        let errors = crate::form::validate(&draft).unwrap_err();
        assert_eq!(render_field_errors(&errors), "  age: Age must be at most 120\n");
    }
}
