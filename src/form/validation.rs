//! Form validation: range checks for numeric fields and code checks for
//! categorical fields.
//!
//! Every field is checked and every failure is reported, so the form can show
//! all inline messages at once. A draft that passes becomes a [`FormInput`].

use serde::Serialize;

use crate::types::{
    CategoricalCode, ChestPainType, ExerciseAngina, FastingBloodSugar, FormDraft, FormField,
    FormInput, MajorVessels, RestingEcg, Sex, StSlope, Thalassemia,
};

// ============================================================================
// Rules
// ============================================================================

/// Inclusive bounds for a numeric field.
#[derive(Debug, Clone, Copy)]
pub struct NumericRule {
    pub field: FormField,
    pub min: f64,
    pub max: f64,
    /// Unit appended to bound messages ("mm Hg", "bpm", ...)
    pub unit: &'static str,
    /// Print bounds with one decimal ("6.0")
    pub decimal_bounds: bool,
}

impl NumericRule {
    fn bound_text(&self, bound: f64) -> String {
        let number = if self.decimal_bounds {
            format!("{bound:.1}")
        } else {
            format!("{bound:.0}")
        };
        if self.unit.is_empty() {
            number
        } else {
            format!("{number} {}", self.unit)
        }
    }

    /// Message when the value is below `min`.
    pub fn too_low_message(&self) -> String {
        // A zero lower bound prints as "0"
        let bound = if self.min == 0.0 {
            "0".to_string()
        } else {
            self.bound_text(self.min)
        };
        format!("{} must be at least {}", self.field.short_name(), bound)
    }

    /// Message when the value is above `max`.
    pub fn too_high_message(&self) -> String {
        format!(
            "{} must be at most {}",
            self.field.short_name(),
            self.bound_text(self.max)
        )
    }
}

pub const AGE_RULE: NumericRule = NumericRule {
    field: FormField::Age,
    min: 18.0,
    max: 120.0,
    unit: "",
    decimal_bounds: false,
};

pub const RESTING_BP_RULE: NumericRule = NumericRule {
    field: FormField::RestingBp,
    min: 60.0,
    max: 200.0,
    unit: "mm Hg",
    decimal_bounds: false,
};

pub const CHOLESTEROL_RULE: NumericRule = NumericRule {
    field: FormField::Cholesterol,
    min: 100.0,
    max: 600.0,
    unit: "mg/dL",
    decimal_bounds: false,
};

pub const MAX_HR_RULE: NumericRule = NumericRule {
    field: FormField::MaxHr,
    min: 60.0,
    max: 220.0,
    unit: "bpm",
    decimal_bounds: false,
};

pub const ST_DEPRESSION_RULE: NumericRule = NumericRule {
    field: FormField::StDepression,
    min: 0.0,
    max: 6.0,
    unit: "",
    decimal_bounds: true,
};

// ============================================================================
// Errors
// ============================================================================

/// One inline message attached to a form field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// All field failures from one validation pass, in form order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} form field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Inline message for one field, if it failed.
    pub fn for_field(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

// ============================================================================
// Validation (entry point)
// ============================================================================

/// Collects per-field results while building a `FormInput`.
struct Checker<'a> {
    draft: &'a FormDraft,
    errors: Vec<FieldError>,
}

impl Checker<'_> {
    fn fail(&mut self, field: FormField, message: String) {
        self.errors.push(FieldError { field, message });
    }

    fn number(&mut self, rule: &NumericRule) -> Option<f64> {
        let field = rule.field;
        let raw = self.draft.value(field).trim();
        if raw.is_empty() {
            self.fail(field, format!("{} is required", field.short_name()));
            return None;
        }
        let value = match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                self.fail(field, format!("{} must be a number", field.short_name()));
                return None;
            }
        };
        if value < rule.min {
            self.fail(field, rule.too_low_message());
            return None;
        }
        if value > rule.max {
            self.fail(field, rule.too_high_message());
            return None;
        }
        Some(value)
    }

    fn code<C: CategoricalCode>(&mut self, field: FormField) -> Option<C> {
        let raw = self.draft.value(field);
        if raw.trim().is_empty() {
            self.fail(field, format!("{} is required", field.short_name()));
            return None;
        }
        let parsed = C::from_code(raw);
        if parsed.is_none() {
            self.fail(
                field,
                format!(
                    "{} must be one of {}",
                    field.short_name(),
                    C::accepted_codes()
                ),
            );
        }
        parsed
    }
}

/// Validate a draft, returning the typed input or every field failure.
pub fn validate(draft: &FormDraft) -> Result<FormInput, ValidationErrors> {
    let mut c = Checker {
        draft,
        errors: Vec::new(),
    };

    // Evaluated in form order so errors come out in form order.
    let age = c.number(&AGE_RULE);
    let sex = c.code::<Sex>(FormField::Sex);
    let chest_pain_type = c.code::<ChestPainType>(FormField::ChestPainType);
    let resting_bp = c.number(&RESTING_BP_RULE);
    let cholesterol = c.number(&CHOLESTEROL_RULE);
    let fasting_bs = c.code::<FastingBloodSugar>(FormField::FastingBs);
    let resting_ecg = c.code::<RestingEcg>(FormField::RestingEcg);
    let max_hr = c.number(&MAX_HR_RULE);
    let exercise_angina = c.code::<ExerciseAngina>(FormField::ExerciseAngina);
    let st_depression = c.number(&ST_DEPRESSION_RULE);
    let st_slope = c.code::<StSlope>(FormField::StSlope);
    let major_vessels = c.code::<MajorVessels>(FormField::MajorVessels);
    let thalassemia = c.code::<Thalassemia>(FormField::Thalassemia);

    match (
        age,
        sex,
        chest_pain_type,
        resting_bp,
        cholesterol,
        fasting_bs,
        resting_ecg,
        max_hr,
        exercise_angina,
        st_depression,
        st_slope,
        major_vessels,
        thalassemia,
    ) {
        (
            Some(age),
            Some(sex),
            Some(chest_pain_type),
            Some(resting_bp),
            Some(cholesterol),
            Some(fasting_bs),
            Some(resting_ecg),
            Some(max_hr),
            Some(exercise_angina),
            Some(st_depression),
            Some(st_slope),
            Some(major_vessels),
            Some(thalassemia),
        ) if c.errors.is_empty() => Ok(FormInput {
            age,
            sex,
            chest_pain_type,
            resting_bp,
            cholesterol,
            fasting_bs,
            resting_ecg,
            max_hr,
            exercise_angina,
            st_depression,
            st_slope,
            major_vessels,
            thalassemia,
        }),
        _ => Err(ValidationErrors { errors: c.errors }),
    }
}
