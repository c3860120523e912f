//! Shared data structures for the screening form and prediction round trip
//!
//! - `categorical`: clinical category codes (string in the form, integer on the wire)
//! - `form`: FormField catalogue, FormDraft (as entered), FormInput (validated)
//! - `request`: PredictionRequest sent to the prediction service
//! - `result`: PredictionResult, HealthAdvice and the derived RiskTier

pub mod categorical;
pub mod form;
pub mod request;
pub mod result;

pub use categorical::{
    CategoricalCode, ChestPainType, ExerciseAngina, FastingBloodSugar, MajorVessels, RestingEcg,
    Sex, StSlope, Thalassemia,
};
pub use form::{FormDraft, FormField, FormInput};
pub use request::PredictionRequest;
pub use result::{HealthAdvice, PredictionClass, PredictionResult, RiskTier};
