//! Form Controller: one form session's submit cycle
//!
//! ```text
//! Idle ──submit──▶ Submitting ──▶ Succeeded(result)
//!                             └─▶ Failed(message)
//! ```
//!
//! A new submit starts from any settled state and overwrites the previous
//! outcome. A submit while `Submitting` is rejected without sending anything.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use super::validation::{validate, ValidationErrors};
use crate::client::{PredictionError, PredictionService};
use crate::types::{FormDraft, PredictionRequest, PredictionResult};

/// Where the form session currently stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(PredictionResult),
    /// Banner message of the last failed submission
    Failed(String),
}

/// Why a submit produced no result.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    #[error("A submission is already in progress")]
    InFlight,
}

impl SubmitError {
    /// Banner text; `None` for validation failures, which are shown inline.
    pub fn banner(&self) -> Option<String> {
        match self {
            SubmitError::Invalid(_) => None,
            SubmitError::Prediction(e) => Some(e.user_message()),
            SubmitError::InFlight => Some(self.to_string()),
        }
    }
}

/// Drives validation, request construction and the prediction call for one
/// form session.
pub struct FormController {
    service: Arc<dyn PredictionService>,
    state: Mutex<SubmissionState>,
}

impl FormController {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            service,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(|e| {
            warn!("Submission state mutex poisoned, recovering");
            e.into_inner()
        })
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SubmissionState {
        self.lock_state().clone()
    }

    /// True while a request is outstanding (the submit button is disabled).
    pub fn is_busy(&self) -> bool {
        matches!(*self.lock_state(), SubmissionState::Submitting)
    }

    /// Validate the draft and, if it passes, request one prediction.
    ///
    /// Validation failures leave the state untouched and send nothing.
    pub async fn submit(&self, draft: &FormDraft) -> Result<PredictionResult, SubmitError> {
        let input = validate(draft).map_err(|errors| {
            debug!(failed_fields = errors.len(), "Form validation failed");
            SubmitError::Invalid(errors)
        })?;

        let mut pending = {
            let mut state = self.lock_state();
            if matches!(*state, SubmissionState::Submitting) {
                return Err(SubmitError::InFlight);
            }
            let previous = std::mem::replace(&mut *state, SubmissionState::Submitting);
            PendingSubmit {
                controller: self,
                previous: Some(previous),
            }
        };

        let request = PredictionRequest::from(&input);
        debug!(endpoint = %self.service.endpoint(), "Submitting prediction request");
        let outcome = self.service.predict(&request).await;
        pending.settle();

        let mut state = self.lock_state();
        match outcome {
            Ok(result) => {
                let tier = result.tier();
                if !tier.matches_label(&result.risk_level) {
                    debug!(
                        service_label = %result.risk_level,
                        derived = %tier,
                        "Service risk label differs from derived tier"
                    );
                }
                info!(tier = %tier, probability = result.probability, "Prediction received");
                *state = SubmissionState::Succeeded(result.clone());
                Ok(result)
            }
            Err(e) => {
                warn!(endpoint = %self.service.endpoint(), error = %e, "Prediction failed");
                *state = SubmissionState::Failed(e.user_message());
                Err(SubmitError::Prediction(e))
            }
        }
    }
}

/// Holds the `Submitting` state for one in-flight submit.
///
/// If the submit future is dropped before the service answers, the state
/// rolls back to what it was before the submit started.
struct PendingSubmit<'a> {
    controller: &'a FormController,
    previous: Option<SubmissionState>,
}

impl PendingSubmit<'_> {
    fn settle(&mut self) {
        self.previous = None;
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            debug!("Submit cancelled before the service answered, restoring state");
            *self.controller.lock_state() = previous;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FormField, HealthAdvice, PredictionClass};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn result(probability: f64) -> PredictionResult {
        PredictionResult {
            prediction: PredictionClass::Absent,
            probability,
            risk_level: "low".to_string(),
            health_advice: HealthAdvice::default(),
        }
    }

    /// Replays scripted outcomes and records every request it sees.
    struct Scripted {
        outcomes: Mutex<Vec<Result<PredictionResult, PredictionError>>>,
        requests: Mutex<Vec<PredictionRequest>>,
    }

    impl Scripted {
        fn new(mut outcomes: Vec<Result<PredictionResult, PredictionError>>) -> Arc<Self> {
            outcomes.reverse();
            Arc::new(Self {
                outcomes: Mutex::new(outcomes),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PredictionService for Scripted {
        async fn predict(
            &self,
            request: &PredictionRequest,
        ) -> Result<PredictionResult, PredictionError> {
            self.requests.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(PredictionError::Service("script exhausted".into())))
        }

        fn endpoint(&self) -> &str {
            "scripted"
        }
    }

    /// Blocks inside `predict` until released.
    struct Gate {
        entered: Notify,
        release: Notify,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PredictionService for Gate {
        async fn predict(
            &self,
            _request: &PredictionRequest,
        ) -> Result<PredictionResult, PredictionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok(result(55.0))
        }

        fn endpoint(&self) -> &str {
            "gate"
        }
    }

    #[tokio::test]
    async fn test_successful_submit_sends_integer_codes() {
        let service = Scripted::new(vec![Ok(result(15.0))]);
        let controller = FormController::new(service.clone());

        let outcome = controller.submit(&FormDraft::default()).await.unwrap();
        assert_eq!(outcome.probability, 15.0);
        assert_eq!(controller.state(), SubmissionState::Succeeded(result(15.0)));

        let sent = service.requests.lock().unwrap()[0].clone();
        assert_eq!(sent.sex, 1);
        assert_eq!(sent.thalassemia, 3);
        assert_eq!(sent.age, 45.0);
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let service = Scripted::new(vec![Ok(result(15.0))]);
        let controller = FormController::new(service.clone());

        for age in ["17", "121"] {
            let mut draft = FormDraft::default();
            draft.set(FormField::Age, age);
            match controller.submit(&draft).await {
                Err(SubmitError::Invalid(errors)) => {
                    assert!(errors.for_field(FormField::Age).is_some());
                }
                other => panic!("expected validation failure, got {other:?}"),
            }
        }

        assert_eq!(service.calls(), 0);
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_failure_then_success_overwrites_state() {
        let service = Scripted::new(vec![
            Err(PredictionError::Service("model offline".into())),
            Ok(result(82.0)),
        ]);
        let controller = FormController::new(service.clone());

        let err = controller.submit(&FormDraft::default()).await.unwrap_err();
        assert_eq!(err.banner().as_deref(), Some("model offline"));
        assert_eq!(
            controller.state(),
            SubmissionState::Failed("model offline".to_string())
        );

        controller.submit(&FormDraft::default()).await.unwrap();
        assert_eq!(controller.state(), SubmissionState::Succeeded(result(82.0)));
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn test_status_failure_is_not_retried() {
        let service = Scripted::new(vec![Err(PredictionError::Status(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
        ))]);
        let controller = FormController::new(service.clone());

        assert!(controller.submit(&FormDraft::default()).await.is_err());
        assert_eq!(service.calls(), 1);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_rejected() {
        let gate = Arc::new(Gate {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        });
        let controller = Arc::new(FormController::new(gate.clone()));

        let first = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit(&FormDraft::default()).await })
        };
        gate.entered.notified().await;
        assert!(controller.is_busy());

        let second = controller.submit(&FormDraft::default()).await;
        assert!(matches!(second, Err(SubmitError::InFlight)));

        gate.release.notify_one();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first.probability, 55.0);
        assert_eq!(gate.calls.load(Ordering::SeqCst), 1);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_cancelled_submit_restores_previous_state() {
        let gate = Arc::new(Gate {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        });
        let controller = Arc::new(FormController::new(gate.clone()));

        let pending = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit(&FormDraft::default()).await })
        };
        gate.entered.notified().await;
        assert!(controller.is_busy());

        pending.abort();
        assert!(pending.await.unwrap_err().is_cancelled());

        assert!(!controller.is_busy());
        assert_eq!(controller.state(), SubmissionState::Idle);

        let retry = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit(&FormDraft::default()).await })
        };
        gate.entered.notified().await;
        gate.release.notify_one();
        let retry = retry.await.unwrap().unwrap();
        assert_eq!(retry.probability, 55.0);
        assert_eq!(gate.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_dropped_submit_keeps_earlier_outcome() {
        let gate = Arc::new(Gate {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        });
        let controller = FormController::new(gate.clone());
        *controller.lock_state() = SubmissionState::Failed("model offline".to_string());

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            controller.submit(&FormDraft::default()),
        )
        .await;

        assert!(timed_out.is_err());
        assert_eq!(
            controller.state(),
            SubmissionState::Failed("model offline".to_string())
        );
    }
}
