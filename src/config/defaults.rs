//! System-wide default constants.
//!
//! Centralises the fixed numbers the form, client and renderer agree on.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Prediction Service
// ============================================================================

/// Address of the external prediction endpoint when nothing is configured.
pub const DEFAULT_PREDICTION_ENDPOINT: &str = "http://localhost:5000/predict";

/// HTTP client timeout for a single prediction request (seconds).
pub const PREDICTION_HTTP_TIMEOUT_SECS: u64 = 30;

/// Upper bound accepted for `prediction.timeout_secs` (seconds).
pub const MAX_PREDICTION_TIMEOUT_SECS: u64 = 300;

// ============================================================================
// Web Server
// ============================================================================

/// Bind address for `hridayvani serve`.
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3000";

/// Largest form or JSON body the server will read (bytes).
pub const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;

// ============================================================================
// Risk Tiers
// ============================================================================

/// Probability (percent) strictly above which a result is high risk.
pub const HIGH_RISK_THRESHOLD_PERCENT: f64 = 70.0;

/// Probability (percent) strictly above which a result is at least moderate risk.
pub const MODERATE_RISK_THRESHOLD_PERCENT: f64 = 40.0;

// ============================================================================
// Terminal Report
// ============================================================================

/// Width of the `#`/`.` progress bar in the text report (characters).
pub const TEXT_PROGRESS_BAR_WIDTH: usize = 40;
