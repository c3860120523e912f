//! Wire request sent to the prediction service

use serde::{Deserialize, Serialize};

use super::categorical::CategoricalCode;
use super::form::FormInput;

/// Body of `POST /predict`: the validated form with every categorical code
/// converted to its integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub age: f64,
    pub sex: u8,
    #[serde(rename = "chestPainType")]
    pub chest_pain_type: u8,
    #[serde(rename = "restingBP")]
    pub resting_bp: f64,
    pub cholesterol: f64,
    #[serde(rename = "fastingBS")]
    pub fasting_bs: u8,
    #[serde(rename = "restingECG")]
    pub resting_ecg: u8,
    #[serde(rename = "maxHR")]
    pub max_hr: f64,
    #[serde(rename = "exerciseAngina")]
    pub exercise_angina: u8,
    #[serde(rename = "stDepression")]
    pub st_depression: f64,
    #[serde(rename = "stSlope")]
    pub st_slope: u8,
    #[serde(rename = "majorVessels")]
    pub major_vessels: u8,
    pub thalassemia: u8,
}

impl From<&FormInput> for PredictionRequest {
    fn from(input: &FormInput) -> Self {
        Self {
            age: input.age,
            sex: input.sex.code(),
            chest_pain_type: input.chest_pain_type.code(),
            resting_bp: input.resting_bp,
            cholesterol: input.cholesterol,
            fasting_bs: input.fasting_bs.code(),
            resting_ecg: input.resting_ecg.code(),
            max_hr: input.max_hr,
            exercise_angina: input.exercise_angina.code(),
            st_depression: input.st_depression,
            st_slope: input.st_slope.code(),
            major_vessels: input.major_vessels.code(),
            thalassemia: input.thalassemia.code(),
        }
    }
}
