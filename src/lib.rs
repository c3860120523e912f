//! HridayVani: heart-disease risk screening front end
//!
//! Collects the clinical parameters of a screening form, validates them,
//! submits them to an external prediction service and renders the returned
//! risk score with categorized lifestyle advice.
//!
//! ## Layout
//!
//! - **types**: form fields, categorical codes, wire request and response
//! - **form**: validation and the submission state machine
//! - **client**: HTTP client for the prediction endpoint
//! - **render**: risk tier view model, HTML card and terminal report
//! - **web**: axum server for the form page and JSON API
//! - **config**: TOML configuration with validation

pub mod client;
pub mod config;
pub mod form;
pub mod render;
pub mod types;
pub mod web;

pub use client::{HttpPredictionClient, PredictionError, PredictionService};
pub use config::{AppConfig, ConfigError};
pub use form::{validate, FormController, SubmissionState, SubmitError, ValidationErrors};
pub use render::ResultView;
pub use types::{FormDraft, FormField, FormInput, PredictionRequest, PredictionResult, RiskTier};
