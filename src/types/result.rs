//! Prediction outcome types: PredictionClass, HealthAdvice, PredictionResult, RiskTier

use serde::{Deserialize, Serialize};

use crate::config::defaults::{HIGH_RISK_THRESHOLD_PERCENT, MODERATE_RISK_THRESHOLD_PERCENT};

/// Binary class returned by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PredictionClass {
    /// 0: no heart disease predicted
    Absent,
    /// 1: heart disease predicted
    Present,
}

impl From<PredictionClass> for u8 {
    fn from(class: PredictionClass) -> u8 {
        match class {
            PredictionClass::Absent => 0,
            PredictionClass::Present => 1,
        }
    }
}

impl TryFrom<u8> for PredictionClass {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PredictionClass::Absent),
            1 => Ok(PredictionClass::Present),
            other => Err(format!("prediction must be 0 or 1, got {other}")),
        }
    }
}

/// Categorized recommendations returned alongside a prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthAdvice {
    pub exercise_recommendations: Vec<String>,
    pub diet_recommendations: Vec<String>,
    pub lifestyle_recommendations: Vec<String>,
    pub general_note: String,
}

/// Successful response body from the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: PredictionClass,
    /// Risk percentage, 0-100
    pub probability: f64,
    /// Label computed by the service. Display uses [`RiskTier::classify`] instead.
    pub risk_level: String,
    pub health_advice: HealthAdvice,
}

impl PredictionResult {
    /// Tier derived from the probability, ignoring `risk_level`.
    pub fn tier(&self) -> RiskTier {
        RiskTier::classify(self.probability)
    }
}

/// Display tier for a risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// `> 70` is high, `> 40` is moderate, anything else (including NaN) is low.
    pub fn classify(probability: f64) -> Self {
        if probability > HIGH_RISK_THRESHOLD_PERCENT {
            RiskTier::High
        } else if probability > MODERATE_RISK_THRESHOLD_PERCENT {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    /// Headline shown on the result card.
    pub fn headline(self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Moderate => "Moderate Risk",
            RiskTier::High => "High Risk",
        }
    }

    /// CSS modifier used by the HTML renderer.
    pub fn css_class(self) -> &'static str {
        match self {
            RiskTier::Low => "tier-low",
            RiskTier::Moderate => "tier-moderate",
            RiskTier::High => "tier-high",
        }
    }

    /// Whether a service label such as "Low" or "high" names this tier.
    pub fn matches_label(self, label: &str) -> bool {
        label.trim().eq_ignore_ascii_case(&self.to_string())
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Low => write!(f, "low"),
            RiskTier::Moderate => write!(f, "moderate"),
            RiskTier::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::classify(71.0), RiskTier::High);
        assert_eq!(RiskTier::classify(70.0), RiskTier::Moderate);
        assert_eq!(RiskTier::classify(70.01), RiskTier::High);
        assert_eq!(RiskTier::classify(41.0), RiskTier::Moderate);
        assert_eq!(RiskTier::classify(40.0), RiskTier::Low);
        assert_eq!(RiskTier::classify(0.0), RiskTier::Low);
    }

    #[test]
    fn test_nan_probability_is_low() {
        assert_eq!(RiskTier::classify(f64::NAN), RiskTier::Low);
    }

    #[test]
    fn test_result_decodes_service_body() {
        let body = r#"{
            "prediction": 1,
            "probability": 82.41,
            "risk_level": "high",
            "health_advice": {
                "exercise_recommendations": ["Walk daily."],
                "diet_recommendations": [],
                "lifestyle_recommendations": ["Sleep well."],
                "general_note": "Consult your doctor."
            }
        }"#;
        let result: PredictionResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.prediction, PredictionClass::Present);
        assert_eq!(result.tier(), RiskTier::High);
        assert!(result.tier().matches_label(&result.risk_level));
        assert_eq!(result.health_advice.exercise_recommendations, vec!["Walk daily."]);
    }

    #[test]
    fn test_prediction_class_rejects_other_values() {
        let body = r#"{"prediction": 2, "probability": 10.0, "risk_level": "low",
            "health_advice": {"exercise_recommendations": [], "diet_recommendations": [],
            "lifestyle_recommendations": [], "general_note": ""}}"#;
        assert!(serde_json::from_str::<PredictionResult>(body).is_err());
    }

    #[test]
    fn test_label_match_is_case_insensitive() {
        assert!(RiskTier::Low.matches_label("Low"));
        assert!(!RiskTier::Moderate.matches_label("high"));
    }
}
