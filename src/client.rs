//! Prediction Client: HTTP client for the external prediction service
//!
//! Sends one `POST` per submission and turns the response into either a
//! [`PredictionResult`] or a [`PredictionError`]. Nothing is retried.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::PredictionConfig;
use crate::types::{PredictionRequest, PredictionResult};

/// Banner text for transport failures (refused connection, timeout, DNS).
pub const CONNECTION_FAILURE_MESSAGE: &str =
    "An error occurred connecting to the prediction server. Make sure the backend is running.";

/// Prediction client errors
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server returned status {0}")]
    Status(StatusCode),
    #[error("Prediction service error: {0}")]
    Service(String),
    #[error("Malformed prediction response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PredictionError {
    /// Single-line message for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::Transport(_) => CONNECTION_FAILURE_MESSAGE.to_string(),
            PredictionError::Status(status) => format!(
                "The prediction server responded with an error (HTTP {}). Please try again.",
                status.as_u16()
            ),
            PredictionError::Service(message) => message.clone(),
            PredictionError::Decode(_) => {
                "The prediction server returned a response that could not be read.".to_string()
            }
        }
    }
}

/// Anything that can turn a request into a prediction.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: &PredictionRequest)
        -> Result<PredictionResult, PredictionError>;

    /// Where predictions come from, for logging.
    fn endpoint(&self) -> &str;
}

/// reqwest-backed client for the prediction endpoint.
#[derive(Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpPredictionClient {
    /// Build a client for the configured endpoint and timeout.
    pub fn from_config(config: &PredictionConfig) -> Result<Self, PredictionError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictionError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;
        debug!(status = %status, bytes = body.len(), "Prediction response received");

        interpret_response(status, &body)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Classify a raw response.
///
/// An `error` field in a JSON body wins over the status code; otherwise a
/// non-success status is a failure; otherwise the body must decode.
pub fn interpret_response(
    status: StatusCode,
    body: &[u8],
) -> Result<PredictionResult, PredictionError> {
    let value: Option<serde_json::Value> = serde_json::from_slice(body).ok();
    if let Some(message) = value.as_ref().and_then(service_error) {
        return Err(PredictionError::Service(message));
    }

    if !status.is_success() {
        return Err(PredictionError::Status(status));
    }

    Ok(serde_json::from_slice(body)?)
}

/// Extract a truthy `error` field; null, `false` and empty strings do not count.
fn service_error(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PredictionClass, RiskTier};

    const LOW_RISK_BODY: &str = r#"{
        "prediction": 0,
        "probability": 15.0,
        "risk_level": "Low",
        "health_advice": {
            "exercise_recommendations": ["Maintain 150-300 minutes of moderate aerobic activity weekly"],
            "diet_recommendations": ["Practice portion control"],
            "lifestyle_recommendations": ["Maintain regular health check-ups"],
            "general_note": "Always consult with healthcare professionals."
        }
    }"#;

    #[test]
    fn test_success_body_decodes() {
        let result = interpret_response(StatusCode::OK, LOW_RISK_BODY.as_bytes()).unwrap();
        assert_eq!(result.prediction, PredictionClass::Absent);
        assert_eq!(result.probability, 15.0);
        assert_eq!(result.tier(), RiskTier::Low);
    }

    #[test]
    fn test_error_field_fails_even_with_200() {
        let body = br#"{"error": "could not convert string to float: 'abc'"}"#;
        match interpret_response(StatusCode::OK, body) {
            Err(PredictionError::Service(message)) => {
                assert_eq!(message, "could not convert string to float: 'abc'");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_field_wins_over_status() {
        let body = br#"{"error": "model not loaded"}"#;
        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
        assert_eq!(err.user_message(), "model not loaded");
    }

    #[test]
    fn test_non_string_error_field_is_stringified() {
        let body = br#"{"error": {"code": 7}}"#;
        let err = interpret_response(StatusCode::OK, body).unwrap_err();
        assert_eq!(err.user_message(), r#"{"code":7}"#);
    }

    #[test]
    fn test_null_error_field_is_ignored() {
        let mut value: serde_json::Value = serde_json::from_str(LOW_RISK_BODY).unwrap();
        value["error"] = serde_json::Value::Null;
        let body = serde_json::to_vec(&value).unwrap();
        assert!(interpret_response(StatusCode::OK, &body).is_ok());
    }

    #[test]
    fn test_bad_status_without_error_field() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, PredictionError::Status(StatusCode::BAD_GATEWAY)));
        assert!(err.user_message().contains("HTTP 502"));
    }

    #[test]
    fn test_incomplete_body_is_decode_error() {
        let err = interpret_response(StatusCode::OK, br#"{"prediction": 1}"#).unwrap_err();
        assert!(matches!(err, PredictionError::Decode(_)));
    }
}
