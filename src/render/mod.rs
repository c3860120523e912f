//! Result Renderer
//!
//! Maps a [`PredictionResult`] into a [`ResultView`] (tier, headline,
//! progress and advice sections) and renders that view as HTML for the web
//! form or as plain text for the terminal. No computation beyond the tier
//! lookup happens here.

pub mod html;
pub mod text;

use serde::Serialize;

use crate::types::{PredictionClass, PredictionResult, RiskTier};

/// Shown under every result.
pub const DISCLAIMER: &str = "This is not a medical diagnosis. Please consult with a healthcare \
professional for proper evaluation and advice. Regular check-ups and a healthy lifestyle are \
important for heart health.";

/// The three advice tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceCategory {
    Exercise,
    Diet,
    Lifestyle,
}

impl AdviceCategory {
    pub fn title(self) -> &'static str {
        match self {
            AdviceCategory::Exercise => "Exercise",
            AdviceCategory::Diet => "Diet",
            AdviceCategory::Lifestyle => "Lifestyle",
        }
    }
}

/// One collapsible recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceItem {
    /// First sentence, shown collapsed
    pub summary: String,
    /// Full recommendation, shown expanded
    pub detail: String,
}

impl AdviceItem {
    pub fn new(recommendation: &str) -> Self {
        Self {
            summary: first_sentence(recommendation),
            detail: recommendation.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceSection {
    pub category: AdviceCategory,
    pub items: Vec<AdviceItem>,
}

/// Presentation model for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub tier: RiskTier,
    pub headline: &'static str,
    pub prediction: PredictionClass,
    /// Probability as returned, 0-100
    pub probability: f64,
    /// Progress indicator fill, clamped to 0-100
    pub progress_percent: f64,
    pub sections: Vec<AdviceSection>,
    pub general_note: String,
}

impl ResultView {
    pub fn from_result(result: &PredictionResult) -> Self {
        let tier = result.tier();
        let advice = &result.health_advice;
        let section = |category, items: &[String]| AdviceSection {
            category,
            items: items.iter().map(|r| AdviceItem::new(r)).collect(),
        };

        Self {
            tier,
            headline: tier.headline(),
            prediction: result.prediction,
            probability: result.probability,
            progress_percent: progress_percent(result.probability),
            sections: vec![
                section(AdviceCategory::Exercise, &advice.exercise_recommendations),
                section(AdviceCategory::Diet, &advice.diet_recommendations),
                section(AdviceCategory::Lifestyle, &advice.lifestyle_recommendations),
            ],
            general_note: advice.general_note.clone(),
        }
    }

    /// Probability with one decimal, e.g. `"15.0%"`.
    pub fn probability_text(&self) -> String {
        format!("{:.1}%", self.probability)
    }

    /// "Based on the provided information..." sentence under the bar.
    pub fn summary_sentence(&self) -> String {
        format!(
            "Based on the provided information, your estimated risk of heart disease is {}.",
            self.probability_text()
        )
    }
}

/// Clamp a probability into a drawable bar width; NaN draws as empty.
pub fn progress_percent(probability: f64) -> f64 {
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 100.0)
    }
}

/// Text up to the first sentence-ending period, with the period kept.
///
/// A period only ends a sentence when followed by whitespace or the end of
/// the text, so decimals such as "1.5 g" stay intact.
pub fn first_sentence(text: &str) -> String {
    let text = text.trim();
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '.' {
            let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
            if at_boundary {
                return text[..=i].to_string();
            }
        }
    }
    format!("{text}.")
}
