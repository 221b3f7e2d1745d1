use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::Utc;
use lpp_scoring::ScoringError;

use super::model::{EvaluateRequest, EvaluateResponse, ModulePolicy};
use crate::{
    ApiState,
    error::ApiError,
    metrics::{record_evaluation, record_scoring_failure},
    validation::{parse_module, validate_payload},
};

/// Create the scoring routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/scoring/modules", get(list_modules))
        .route("/scoring/modules/{module}", get(get_module))
        .route("/scoring/{module}/evaluate", post(evaluate))
}

/// List every module with its active policy
async fn list_modules(State(state): State<ApiState>) -> Json<Vec<ModulePolicy>> {
    Json(
        state
            .policies
            .iter()
            .map(|(module, policy)| ModulePolicy::new(module, policy))
            .collect(),
    )
}

/// Get the active policy of one module
async fn get_module(
    State(state): State<ApiState>,
    Path(module): Path<String>,
) -> Result<Json<ModulePolicy>, ApiError> {
    let module = parse_module(&module)?;
    let policy = state
        .policies
        .get(module)
        .ok_or_else(|| ScoringError::UnknownModule(module.to_string()))?;

    Ok(Json(ModulePolicy::new(module, policy)))
}

/// Score a transcript against its reference text
async fn evaluate(
    State(state): State<ApiState>,
    Path(module): Path<String>,
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let module = parse_module(&module)?;
    validate_payload(&payload)?;

    let evaluation = state
        .engine
        .evaluate_module(
            &state.policies,
            module,
            payload.reference_text.as_deref(),
            payload.candidate_transcript.as_deref(),
        )
        .inspect_err(|_| record_scoring_failure(module.as_str()))?;

    let scaled_total = state.policies.get(module).and_then(|policy| {
        policy
            .public_scale
            .map(|scale| evaluation.scores.rescaled(policy.max_total(), scale))
    });

    record_evaluation(module.as_str(), evaluation.scores.total);
    tracing::info!(
        module = %module,
        words = evaluation.alignment.len(),
        total = evaluation.scores.total,
        scaled_total = ?scaled_total,
        "attempt scored"
    );

    Ok(Json(EvaluateResponse {
        module,
        rounded: evaluation.scores.rounded(),
        scores: evaluation.scores,
        alignment: evaluation.alignment,
        scaled_total,
        evaluated_at: Utc::now(),
    }))
}
