//! HTTP routes for the zkBounty evaluation API.
//!
//! Request validation, header handling, and response shaping live here;
//! the core never sees transport concerns. Routes mirror the evaluation
//! API surface:
//!
//! - `POST /api/bounty/evaluate` — evaluate a submission
//! - `GET  /api/bounty/evaluate` — evaluation history
//! - `POST /api/bounty/verify`   — structural proof check
//! - `POST /api/bounty/audit`    — audit report for an evaluation
//! - `GET  /health`

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use zkbounty_core::{BountyEvaluator, EvaluationResult, ReviewRequest};

const EVALUATOR_ADDRESS_HEADER: &str = "x-evaluator-address";
const DEFAULT_EVALUATOR_ADDRESS: &str = "default-evaluator";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    evaluator: Arc<BountyEvaluator>,
}

impl AppState {
    pub fn new(evaluator: Arc<BountyEvaluator>) -> Self {
        Self { evaluator }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/bounty/evaluate",
            post(evaluate_handler).get(history_handler),
        )
        .route("/api/bounty/verify", post(verify_handler))
        .route("/api/bounty/audit", post(audit_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Evaluate request body. Fields default so presence can be checked here
/// (the core treats request validation as the transport's job).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateBody {
    #[serde(default)]
    bounty_id: String,
    #[serde(default)]
    submission_content: String,
    #[serde(default)]
    deliverables: Vec<String>,
    #[serde(default)]
    metrics: Option<HashMap<String, f64>>,
}

/// Body wrapper for verify/audit: `{ "evaluation": { ... } }`.
#[derive(Debug, Deserialize)]
struct EvaluationBody {
    #[serde(default)]
    evaluation: Option<EvaluationResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewResponse {
    success: bool,
    bounty_id: String,
    evaluation: EvaluationResult,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryResponse {
    success: bool,
    evaluation_count: usize,
    evaluations: HashMap<String, EvaluationResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    success: bool,
    bounty_id: String,
    is_valid: bool,
    message: String,
    zk_proof: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditResponse {
    success: bool,
    bounty_id: String,
    audit_report: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            success: false,
            message: message.into(),
        }),
    )
        .into_response()
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": zkbounty_core::VERSION }))
}

async fn evaluate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<EvaluateBody>,
) -> Response {
    if body.bounty_id.is_empty() || body.submission_content.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields: bountyId, submissionContent",
        );
    }

    let evaluator_address = headers
        .get(EVALUATOR_ADDRESS_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_EVALUATOR_ADDRESS);

    let request = ReviewRequest {
        bounty_id: body.bounty_id,
        submission_content: body.submission_content,
        deliverables: body.deliverables,
        metrics: body.metrics,
    };

    match state.evaluator.evaluate(&request, evaluator_address).await {
        Ok(evaluation) => {
            let message = if evaluation.approved {
                "Bounty approved! All criteria met."
            } else {
                "Bounty rejected. Some criteria did not meet thresholds."
            };
            (
                StatusCode::OK,
                Json(ReviewResponse {
                    success: true,
                    bounty_id: evaluation.bounty_id.clone(),
                    evaluation,
                    message: message.to_string(),
                }),
            )
                .into_response()
        }
        Err(err) => {
            error!(error = %err, "evaluation failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Evaluation failed: {}", err),
            )
        }
    }
}

async fn history_handler(State(state): State<AppState>) -> Response {
    match state.evaluator.history().await {
        Ok(evaluations) => (
            StatusCode::OK,
            Json(HistoryResponse {
                success: true,
                evaluation_count: evaluations.len(),
                evaluations,
            }),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "history retrieval failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve evaluation history",
            )
        }
    }
}

async fn verify_handler(
    State(state): State<AppState>,
    Json(body): Json<EvaluationBody>,
) -> Response {
    let Some(evaluation) = body.evaluation else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid evaluation object");
    };

    let is_valid = state.evaluator.verify(&evaluation);
    let message = if is_valid {
        "Proof verification successful"
    } else {
        "Proof verification failed"
    };
    (
        StatusCode::OK,
        Json(VerifyResponse {
            success: true,
            bounty_id: evaluation.bounty_id,
            is_valid,
            message: message.to_string(),
            zk_proof: evaluation.zk_proof,
        }),
    )
        .into_response()
}

async fn audit_handler(
    State(state): State<AppState>,
    Json(body): Json<EvaluationBody>,
) -> Response {
    let Some(evaluation) = body.evaluation else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid evaluation object");
    };

    let audit_report = state.evaluator.audit_report(&evaluation);
    (
        StatusCode::OK,
        Json(AuditResponse {
            success: true,
            bounty_id: evaluation.bounty_id,
            audit_report,
        }),
    )
        .into_response()
}
