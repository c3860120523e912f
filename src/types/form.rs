//! Form types: FormField, FormDraft (as entered), FormInput (validated)

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::categorical::{
    ChestPainType, ExerciseAngina, FastingBloodSugar, MajorVessels, RestingEcg, Sex, StSlope,
    Thalassemia,
};

// ============================================================================
// Field Catalogue
// ============================================================================

/// Identifies one input on the screening form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Age,
    Sex,
    ChestPainType,
    RestingBp,
    Cholesterol,
    FastingBs,
    RestingEcg,
    MaxHr,
    ExerciseAngina,
    StDepression,
    StSlope,
    MajorVessels,
    Thalassemia,
}

impl FormField {
    /// Every field, in form order.
    pub const ALL: [FormField; 13] = [
        FormField::Age,
        FormField::Sex,
        FormField::ChestPainType,
        FormField::RestingBp,
        FormField::Cholesterol,
        FormField::FastingBs,
        FormField::RestingEcg,
        FormField::MaxHr,
        FormField::ExerciseAngina,
        FormField::StDepression,
        FormField::StSlope,
        FormField::MajorVessels,
        FormField::Thalassemia,
    ];

    /// Form input name and JSON key, shared with the prediction service.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Age => "age",
            FormField::Sex => "sex",
            FormField::ChestPainType => "chestPainType",
            FormField::RestingBp => "restingBP",
            FormField::Cholesterol => "cholesterol",
            FormField::FastingBs => "fastingBS",
            FormField::RestingEcg => "restingECG",
            FormField::MaxHr => "maxHR",
            FormField::ExerciseAngina => "exerciseAngina",
            FormField::StDepression => "stDepression",
            FormField::StSlope => "stSlope",
            FormField::MajorVessels => "majorVessels",
            FormField::Thalassemia => "thalassemia",
        }
    }

    /// Label shown above the input.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Age => "Age",
            FormField::Sex => "Sex",
            FormField::ChestPainType => "Chest Pain Type",
            FormField::RestingBp => "Resting Blood Pressure (mm Hg)",
            FormField::Cholesterol => "Cholesterol Level (mg/dL)",
            FormField::FastingBs => "Fasting Blood Sugar",
            FormField::RestingEcg => "Resting ECG Results",
            FormField::MaxHr => "Maximum Heart Rate (bpm)",
            FormField::ExerciseAngina => "Exercise Induced Angina",
            FormField::StDepression => "ST Depression (oldpeak)",
            FormField::StSlope => "ST Slope",
            FormField::MajorVessels => "Number of Major Vessels",
            FormField::Thalassemia => "Thalassemia",
        }
    }

    /// Subject used at the start of validation messages.
    pub fn short_name(self) -> &'static str {
        match self {
            FormField::Age => "Age",
            FormField::Sex => "Sex",
            FormField::ChestPainType => "Chest pain type",
            FormField::RestingBp => "BP",
            FormField::Cholesterol => "Cholesterol",
            FormField::FastingBs => "Fasting blood sugar",
            FormField::RestingEcg => "Resting ECG",
            FormField::MaxHr => "Max HR",
            FormField::ExerciseAngina => "Exercise angina",
            FormField::StDepression => "ST depression",
            FormField::StSlope => "ST slope",
            FormField::MajorVessels => "Major vessels",
            FormField::Thalassemia => "Thalassemia",
        }
    }

    /// Tooltip text explaining the field.
    pub fn help(self) -> &'static str {
        match self {
            FormField::Age => "Your current age in years",
            FormField::Sex => "Biological sex",
            FormField::ChestPainType => {
                "0: Typical Angina, 1: Atypical Angina, 2: Non-anginal Pain, 3: Asymptomatic"
            }
            FormField::RestingBp => {
                "Your resting blood pressure in mm Hg. Below 90 is considered hypotension, above 140 is considered hypertension."
            }
            FormField::Cholesterol => {
                "Your serum cholesterol in mg/dL. Below 200 is desirable; above 240 is considered high."
            }
            FormField::FastingBs => "Fasting blood sugar > 120 mg/dl",
            FormField::RestingEcg => {
                "0: Normal, 1: ST-T wave abnormality, 2: Left ventricular hypertrophy"
            }
            FormField::MaxHr => {
                "Maximum heart rate achieved during exercise. Max HR is roughly 220 minus age; athletes at rest can be below 60 bpm."
            }
            FormField::ExerciseAngina => "Chest pain induced by exercise",
            FormField::StDepression => {
                "ST depression induced by exercise relative to rest. Clinical values rarely exceed 5-6."
            }
            FormField::StSlope => "0: Upsloping, 1: Flat, 2: Downsloping",
            FormField::MajorVessels => "Number of major vessels (0-3) colored by fluoroscopy",
            FormField::Thalassemia => "3: Normal, 6: Fixed Defect, 7: Reversible Defect",
        }
    }

    /// Look a field up by its form/JSON key.
    pub fn from_key(key: &str) -> Option<FormField> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for FormField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

// ============================================================================
// Draft (as entered)
// ============================================================================

/// The form exactly as the user filled it in: one string per field.
///
/// Browser forms deliver every value as text; JSON callers may send numbers,
/// which are accepted and kept as their decimal text. A field missing from a
/// submission deserializes as empty and fails validation as required.
/// `FormDraft::default()` holds the pre-filled values for a fresh form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub age: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sex: String,
    #[serde(rename = "chestPainType", default, deserialize_with = "lenient_text")]
    pub chest_pain_type: String,
    #[serde(rename = "restingBP", default, deserialize_with = "lenient_text")]
    pub resting_bp: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cholesterol: String,
    #[serde(rename = "fastingBS", default, deserialize_with = "lenient_text")]
    pub fasting_bs: String,
    #[serde(rename = "restingECG", default, deserialize_with = "lenient_text")]
    pub resting_ecg: String,
    #[serde(rename = "maxHR", default, deserialize_with = "lenient_text")]
    pub max_hr: String,
    #[serde(rename = "exerciseAngina", default, deserialize_with = "lenient_text")]
    pub exercise_angina: String,
    #[serde(rename = "stDepression", default, deserialize_with = "lenient_text")]
    pub st_depression: String,
    #[serde(rename = "stSlope", default, deserialize_with = "lenient_text")]
    pub st_slope: String,
    #[serde(rename = "majorVessels", default, deserialize_with = "lenient_text")]
    pub major_vessels: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub thalassemia: String,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            age: "45".to_string(),
            sex: "1".to_string(),
            chest_pain_type: "0".to_string(),
            resting_bp: "120".to_string(),
            cholesterol: "200".to_string(),
            fasting_bs: "0".to_string(),
            resting_ecg: "0".to_string(),
            max_hr: "150".to_string(),
            exercise_angina: "0".to_string(),
            st_depression: "0".to_string(),
            st_slope: "0".to_string(),
            major_vessels: "0".to_string(),
            thalassemia: "3".to_string(),
        }
    }
}

impl FormDraft {
    /// Current text of a field.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Age => &self.age,
            FormField::Sex => &self.sex,
            FormField::ChestPainType => &self.chest_pain_type,
            FormField::RestingBp => &self.resting_bp,
            FormField::Cholesterol => &self.cholesterol,
            FormField::FastingBs => &self.fasting_bs,
            FormField::RestingEcg => &self.resting_ecg,
            FormField::MaxHr => &self.max_hr,
            FormField::ExerciseAngina => &self.exercise_angina,
            FormField::StDepression => &self.st_depression,
            FormField::StSlope => &self.st_slope,
            FormField::MajorVessels => &self.major_vessels,
            FormField::Thalassemia => &self.thalassemia,
        }
    }

    /// Replace the text of a field (a user edit).
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Age => &mut self.age,
            FormField::Sex => &mut self.sex,
            FormField::ChestPainType => &mut self.chest_pain_type,
            FormField::RestingBp => &mut self.resting_bp,
            FormField::Cholesterol => &mut self.cholesterol,
            FormField::FastingBs => &mut self.fasting_bs,
            FormField::RestingEcg => &mut self.resting_ecg,
            FormField::MaxHr => &mut self.max_hr,
            FormField::ExerciseAngina => &mut self.exercise_angina,
            FormField::StDepression => &mut self.st_depression,
            FormField::StSlope => &mut self.st_slope,
            FormField::MajorVessels => &mut self.major_vessels,
            FormField::Thalassemia => &mut self.thalassemia,
        };
        *slot = value.into();
    }

    /// Overwrite the fields present in a JSON object and leave the rest as
    /// they are. Numbers keep their decimal text; `null` clears a field.
    ///
    /// Returns the keys that name no form field.
    pub fn apply_json(&mut self, fields: &serde_json::Map<String, serde_json::Value>) -> Vec<String> {
        use serde_json::Value;

        let mut unknown = Vec::new();
        for (key, value) in fields {
            let Some(field) = FormField::from_key(key) else {
                unknown.push(key.clone());
                continue;
            };
            let text = match value {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            self.set(field, text);
        }
        unknown
    }
}

/// Accept a JSON string, integer or float and keep it as text; `null` is empty.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Null,
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Lenient::deserialize(deserializer)? {
        Lenient::Null => String::new(),
        Lenient::Text(s) => s,
        Lenient::Int(n) => n.to_string(),
        Lenient::Float(x) => x.to_string(),
    })
}

// ============================================================================
// Validated Input
// ============================================================================

/// A fully validated form: every number in range, every code known.
///
/// Only `validation::validate` builds one from a draft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormInput {
    /// Years, 18-120
    pub age: f64,
    pub sex: Sex,
    pub chest_pain_type: ChestPainType,
    /// mm Hg, 60-200
    pub resting_bp: f64,
    /// mg/dL, 100-600
    pub cholesterol: f64,
    pub fasting_bs: FastingBloodSugar,
    pub resting_ecg: RestingEcg,
    /// bpm, 60-220
    pub max_hr: f64,
    pub exercise_angina: ExerciseAngina,
    /// Oldpeak, 0-6.0
    pub st_depression: f64,
    pub st_slope: StSlope,
    pub major_vessels: MajorVessels,
    pub thalassemia: Thalassemia,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_roundtrip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_key(field.key()), Some(field));
        }
        assert_eq!(FormField::from_key("restingBp"), None);
    }

    #[test]
    fn test_draft_accepts_numbers_and_strings() {
        let draft: FormDraft = serde_json::from_str(
            r#"{"age": 61, "sex": "0", "stDepression": 2.3, "thalassemia": 7}"#,
        )
        .unwrap();
        assert_eq!(draft.age, "61");
        assert_eq!(draft.sex, "0");
        assert_eq!(draft.st_depression, "2.3");
        assert_eq!(draft.thalassemia, "7");
    }

    #[test]
    fn test_missing_fields_deserialize_empty() {
        let draft: FormDraft = serde_json::from_str(r#"{"age": 61}"#).unwrap();
        assert_eq!(draft.age, "61");
        assert_eq!(draft.cholesterol, "");
        assert_eq!(draft.thalassemia, "");
        assert_eq!(FormDraft::default().cholesterol, "200");
    }

    #[test]
    fn test_apply_json_overlays_defaults() {
        let fields = serde_json::json!({"age": 58, "stDepression": 1.4, "thal": 7, "sex": null});
        let mut draft = FormDraft::default();
        let unknown = draft.apply_json(fields.as_object().unwrap());

        assert_eq!(unknown, vec!["thal".to_string()]);
        assert_eq!(draft.age, "58");
        assert_eq!(draft.st_depression, "1.4");
        assert_eq!(draft.sex, "");
        assert_eq!(draft.cholesterol, "200");
        assert_eq!(draft.thalassemia, "3");
    }

    #[test]
    fn test_set_then_value() {
        let mut draft = FormDraft::default();
        draft.set(FormField::MaxHr, "171");
        assert_eq!(draft.value(FormField::MaxHr), "171");
        assert_eq!(draft.max_hr, "171");
    }

    #[test]
    fn test_form_field_serializes_as_key() {
        let json = serde_json::to_string(&FormField::RestingEcg).unwrap();
        assert_eq!(json, "\"restingECG\"");
    }
}
