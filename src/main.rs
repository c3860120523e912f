//! HridayVani - heart-disease risk screening
//!
//! Serves the screening form over HTTP, or runs a single prediction from the
//! terminal.
//!
//! # Usage
//!
//! ```bash
//! # Serve the form on the configured address (default 127.0.0.1:3000)
//! cargo run --release -- serve
//!
//! # One-off prediction with the pre-filled defaults and a few overrides
//! ./hridayvani predict --age 58 --cholesterol 260 --thalassemia 7
//!
//! # Fields from a JSON file, machine-readable output
//! ./hridayvani predict --input patient.json --json
//! ```
//!
//! # Environment Variables
//!
//! - `HRIDAYVANI_CONFIG`: Path to a `hridayvani.toml` configuration file
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use hridayvani::client::HttpPredictionClient;
use hridayvani::config::AppConfig;
use hridayvani::form::{FormController, SubmitError};
use hridayvani::render::text::{render_field_errors, render_report};
use hridayvani::render::ResultView;
use hridayvani::types::{FormDraft, FormField};
use hridayvani::web::handlers::PredictResponse;
use hridayvani::web::{create_app, WebState};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "hridayvani")]
#[command(about = "Heart-disease risk screening form backed by a prediction service")]
#[command(version)]
struct CliArgs {
    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Serve the screening form and JSON API
    Serve {
        /// Override the listen address (default: "127.0.0.1:3000")
        #[arg(short, long, value_name = "HOST:PORT")]
        addr: Option<String>,
        /// Override the prediction endpoint URL
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
    },

    /// Submit one screening from the terminal and print the report
    Predict {
        /// JSON file with form fields; missing fields keep their defaults
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        #[command(flatten)]
        fields: FieldArgs,
        /// Print the result as JSON instead of the text report
        #[arg(long)]
        json: bool,
        /// Override the prediction endpoint URL
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Per-field overrides, applied on top of `--input` and the defaults.
///
/// Values are taken as text so that bad input reaches form validation and
/// gets the same messages as the web form.
#[derive(clap::Args, Debug, Default)]
struct FieldArgs {
    /// Age in years (18-120)
    #[arg(long)]
    age: Option<String>,
    /// Sex: 1 = male, 0 = female
    #[arg(long)]
    sex: Option<String>,
    /// Chest pain type code (0-3)
    #[arg(long)]
    chest_pain_type: Option<String>,
    /// Resting blood pressure in mm Hg (60-200)
    #[arg(long)]
    resting_bp: Option<String>,
    /// Serum cholesterol in mg/dL (100-600)
    #[arg(long)]
    cholesterol: Option<String>,
    /// Fasting blood sugar > 120 mg/dL: 1 = yes, 0 = no
    #[arg(long)]
    fasting_bs: Option<String>,
    /// Resting ECG code (0-2)
    #[arg(long)]
    resting_ecg: Option<String>,
    /// Maximum heart rate in bpm (60-220)
    #[arg(long)]
    max_hr: Option<String>,
    /// Exercise-induced angina: 1 = yes, 0 = no
    #[arg(long)]
    exercise_angina: Option<String>,
    /// ST depression induced by exercise (0-6.0)
    #[arg(long, allow_hyphen_values = true)]
    st_depression: Option<String>,
    /// ST segment slope code (0-2)
    #[arg(long)]
    st_slope: Option<String>,
    /// Major vessels colored by fluoroscopy (0-3)
    #[arg(long)]
    major_vessels: Option<String>,
    /// Thalassemia code (3, 6 or 7)
    #[arg(long)]
    thalassemia: Option<String>,
}

impl FieldArgs {
    fn apply(self, draft: &mut FormDraft) {
        let overrides = [
            (FormField::Age, self.age),
            (FormField::Sex, self.sex),
            (FormField::ChestPainType, self.chest_pain_type),
            (FormField::RestingBp, self.resting_bp),
            (FormField::Cholesterol, self.cholesterol),
            (FormField::FastingBs, self.fasting_bs),
            (FormField::RestingEcg, self.resting_ecg),
            (FormField::MaxHr, self.max_hr),
            (FormField::ExerciseAngina, self.exercise_angina),
            (FormField::StDepression, self.st_depression),
            (FormField::StSlope, self.st_slope),
            (FormField::MajorVessels, self.major_vessels),
            (FormField::Thalassemia, self.thalassemia),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                draft.set(field, value);
            }
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Load the config file, apply CLI overrides and re-validate the result.
fn resolve_config(endpoint: Option<String>, addr: Option<String>) -> Result<AppConfig> {
    let config = AppConfig::load().with_overrides(endpoint, addr);
    config
        .validate()
        .context("Invalid configuration after applying command-line overrides")?;
    Ok(config)
}

// ============================================================================
// Serve
// ============================================================================

async fn run_serve(config: AppConfig, cancel_token: CancellationToken) -> Result<()> {
    let client = HttpPredictionClient::from_config(&config.prediction)
        .context("Failed to build the prediction HTTP client")?;
    let app = create_app(WebState::new(Arc::new(client)));

    let listener = tokio::net::TcpListener::bind(&config.server.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.addr))?;

    info!(
        addr = %config.server.addr,
        endpoint = %config.prediction.endpoint,
        "HTTP server listening"
    );
    info!("Screening form available at: http://{}", config.server.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await
        .context("HTTP server error")?;

    info!("[HttpServer] Graceful shutdown complete");
    Ok(())
}

// ============================================================================
// Predict
// ============================================================================

/// Pre-filled defaults, overlaid with the fields found in `--input`.
fn load_draft(input: Option<&PathBuf>) -> Result<FormDraft> {
    let mut draft = FormDraft::default();
    let Some(path) = input else {
        return Ok(draft);
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse form fields from {}", path.display()))?;
    let fields = value
        .as_object()
        .with_context(|| format!("{} must contain a JSON object", path.display()))?;

    for key in draft.apply_json(fields) {
        warn!(path = %path.display(), key = %key, "Ignoring unknown form field");
    }
    Ok(draft)
}

async fn run_predict(config: AppConfig, draft: FormDraft, json: bool) -> Result<ExitCode> {
    let client = HttpPredictionClient::from_config(&config.prediction)
        .context("Failed to build the prediction HTTP client")?;
    let controller = FormController::new(Arc::new(client));

    match controller.submit(&draft).await {
        Ok(result) => {
            let view = ResultView::from_result(&result);
            if json {
                let out = serde_json::to_string_pretty(&PredictResponse { result, view })
                    .context("Failed to serialize prediction result")?;
                println!("{out}");
            } else {
                print!("{}", render_report(&view));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(SubmitError::Invalid(errors)) => {
            eprintln!("The form has errors:");
            eprint!("{}", render_field_errors(&errors));
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            eprintln!("{}", e.banner().unwrap_or_else(|| e.to_string()));
            Ok(ExitCode::FAILURE)
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match args.command {
        SubCommand::Serve { addr, endpoint } => {
            let config = resolve_config(endpoint, addr)?;

            // Graceful shutdown via Ctrl+C
            let cancel_token = CancellationToken::new();
            let shutdown_token = cancel_token.clone();
            tokio::spawn(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!(error = %e, "Failed to listen for Ctrl+C");
                    return;
                }
                info!("Received Ctrl+C, initiating shutdown...");
                shutdown_token.cancel();
            });

            run_serve(config, cancel_token).await?;
            Ok(ExitCode::SUCCESS)
        }
        SubCommand::Predict {
            input,
            fields,
            json,
            endpoint,
        } => {
            let config = resolve_config(endpoint, None)?;
            let mut draft = load_draft(input.as_ref())?;
            fields.apply(&mut draft);
            run_predict(config, draft, json).await
        }
        SubCommand::Config => {
            let config = resolve_config(None, None)?;
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
