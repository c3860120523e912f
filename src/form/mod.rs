//! Form Controller
//!
//! Turns an as-entered [`FormDraft`](crate::types::FormDraft) into a validated
//! input, builds the prediction request and runs one submission at a time.

pub mod controller;
pub mod validation;

pub use controller::{FormController, SubmissionState, SubmitError};
pub use validation::{validate, FieldError, NumericRule, ValidationErrors};
