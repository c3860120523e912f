//! HTML rendering of the result card and the error banner.
//!
//! Output is a fragment meant to be embedded in the form page. Every piece
//! of service-provided text is escaped.

use super::{ResultView, DISCLAIMER};

pub fn html_escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

/// Error banner shown above the result area.
pub fn render_banner(message: &str) -> String {
    format!(
        "<div class=\"banner banner-error\" role=\"alert\">{}</div>\n",
        html_escape(message)
    )
}

/// Result card: tier headline, progress bar, advice tabs and disclaimer.
pub fn render_result_card(view: &ResultView) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<section class=\"result-card {}\" aria-live=\"polite\">\n",
        view.tier.css_class()
    ));
    html.push_str(&format!("  <h3 class=\"tier-headline\">{}</h3>\n", view.headline));
    html.push_str(&format!(
        "  <div class=\"progress\" role=\"progressbar\" aria-valuemin=\"0\" aria-valuemax=\"100\" aria-valuenow=\"{:.1}\">\n    <div class=\"progress-fill\" style=\"width: {:.1}%\"></div>\n  </div>\n",
        view.progress_percent, view.progress_percent
    ));
    html.push_str(&format!(
        "  <p class=\"risk-summary\">{}</p>\n",
        html_escape(&view.summary_sentence())
    ));

    html.push_str("  <h4>Personalized Recommendations</h4>\n");
    for section in &view.sections {
        html.push_str(&format!(
            "  <div class=\"advice advice-{}\">\n    <h5>{}</h5>\n",
            section.category.title().to_lowercase(),
            section.category.title()
        ));
        if section.items.is_empty() {
            html.push_str("    <p class=\"advice-empty\">No recommendations in this category.</p>\n");
        }
        for item in &section.items {
            html.push_str(&format!(
                "    <details class=\"advice-item\">\n      <summary>{}</summary>\n      <p>{}</p>\n    </details>\n",
                html_escape(&item.summary),
                html_escape(&item.detail)
            ));
        }
        html.push_str("  </div>\n");
    }

    if !view.general_note.is_empty() {
        html.push_str(&format!(
            "  <p class=\"general-note\">{}</p>\n",
            html_escape(&view.general_note)
        ));
    }
    html.push_str(&format!("  <p class=\"disclaimer\">{}</p>\n", DISCLAIMER));
    html.push_str("</section>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HealthAdvice, PredictionClass, PredictionResult};

    fn view(probability: f64, exercise: &[&str]) -> ResultView {
        ResultView::from_result(&PredictionResult {
            prediction: PredictionClass::Present,
            probability,
            risk_level: "high".to_string(),
            health_advice: HealthAdvice {
                exercise_recommendations: exercise.iter().map(|s| (*s).to_string()).collect(),
                diet_recommendations: vec![],
                lifestyle_recommendations: vec![],
                general_note: "Talk to your doctor.".to_string(),
            },
        })
    }

    #[test]
    fn test_card_carries_tier_and_progress() {
        let html = render_result_card(&view(15.0, &[]));
        assert!(html.contains("result-card tier-low"));
        assert!(html.contains("Low Risk"));
        assert!(html.contains("width: 15.0%"));
        assert!(html.contains("your estimated risk of heart disease is 15.0%."));
        assert!(html.contains(DISCLAIMER));
    }

    #[test]
    fn test_each_recommendation_is_collapsible() {
        let html = render_result_card(&view(
            72.0,
            &["Start with low-intensity activities like walking 10-15 minutes daily"],
        ));
        assert!(html.contains("tier-high"));
        assert!(html.contains(
            "<summary>Start with low-intensity activities like walking 10-15 minutes daily.</summary>"
        ));
        assert_eq!(html.matches("<details").count(), 1);
        assert_eq!(html.matches("advice-empty").count(), 2);
    }

    #[test]
    fn test_service_text_is_escaped() {
        let html = render_result_card(&view(50.0, &["<script>alert(1)</script>"]));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(render_banner("a < b").contains("a &lt; b"));
    }
}
