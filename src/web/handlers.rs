//! Request handlers for the screening page and the JSON API
//!
//! Every request is its own form session: a fresh [`FormController`] over the
//! shared prediction client.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::Serialize;

use super::envelope::{ApiErrorResponse, ApiResponse};
use super::pages::{render_form_page, FormPage};
use crate::client::PredictionService;
use crate::form::{FormController, SubmitError};
use crate::render::ResultView;
use crate::types::{FormDraft, PredictionResult};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct WebState {
    pub service: Arc<dyn PredictionService>,
}

impl WebState {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self { service }
    }

    fn controller(&self) -> FormController {
        FormController::new(Arc::clone(&self.service))
    }
}

/// GET / - Empty form with the pre-filled defaults
pub async fn get_form() -> Html<String> {
    Html(render_form_page(&FormPage::default()))
}

/// POST / - Validate, predict and re-render the page
///
/// - 200 with the result card on success
/// - 422 with inline field messages when validation fails
/// - 502 with the error banner when the prediction fails
pub async fn submit_form(
    State(state): State<WebState>,
    Form(draft): Form<FormDraft>,
) -> (StatusCode, Html<String>) {
    let controller = state.controller();
    let outcome = controller.submit(&draft).await;

    let (status, html) = match &outcome {
        Ok(result) => (
            StatusCode::OK,
            render_form_page(&FormPage {
                draft,
                result: Some(ResultView::from_result(result)),
                ..FormPage::default()
            }),
        ),
        Err(SubmitError::Invalid(errors)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            render_form_page(&FormPage {
                draft,
                errors: Some(errors),
                ..FormPage::default()
            }),
        ),
        Err(e) => (
            submit_error_status(e),
            render_form_page(&FormPage {
                draft,
                banner: e.banner(),
                ..FormPage::default()
            }),
        ),
    };
    (status, Html(html))
}

fn submit_error_status(error: &SubmitError) -> StatusCode {
    match error {
        SubmitError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitError::Prediction(_) => StatusCode::BAD_GATEWAY,
        SubmitError::InFlight => StatusCode::CONFLICT,
    }
}

/// Data returned by `POST /api/v1/predict`
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Service response as received
    pub result: PredictionResult,
    /// Derived presentation (tier, headline, progress, advice items)
    pub view: ResultView,
}

/// POST /api/v1/predict - JSON form in, enveloped prediction out
pub async fn api_predict(
    State(state): State<WebState>,
    payload: Result<Json<FormDraft>, JsonRejection>,
) -> Response {
    let Json(draft) = match payload {
        Ok(p) => p,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };

    match state.controller().submit(&draft).await {
        Ok(result) => ApiResponse::ok(PredictResponse {
            view: ResultView::from_result(&result),
            result,
        }),
        Err(SubmitError::Invalid(errors)) => {
            ApiErrorResponse::validation(errors.to_string(), errors.errors().to_vec())
        }
        Err(e @ SubmitError::Prediction(_)) => {
            ApiErrorResponse::bad_gateway(e.banner().unwrap_or_else(|| e.to_string()))
        }
        Err(e @ SubmitError::InFlight) => ApiErrorResponse::conflict(e.to_string()),
    }
}

/// GET /health - Liveness check
pub async fn health(State(state): State<WebState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "prediction_endpoint": state.service.endpoint(),
    }))
}
