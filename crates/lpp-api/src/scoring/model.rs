use chrono::{DateTime, Utc};
use lpp_scoring::{AlignmentEntry, ModuleKind, ScoreBreakdown, ScoringPolicy};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Attempt submitted for scoring.
///
/// Both texts may be omitted: a missing reference or an empty transcript
/// ("no response") scores 0 rather than failing.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct EvaluateRequest {
    #[validate(length(max = 10000, message = "reference_text must be at most 10000 characters"))]
    pub reference_text: Option<String>,
    #[validate(length(
        max = 10000,
        message = "candidate_transcript must be at most 10000 characters"
    ))]
    pub candidate_transcript: Option<String>,
}

/// Scored attempt, ready to be stored by the attempt layer and echoed to the
/// client for word highlighting.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub module: ModuleKind,
    pub alignment: Vec<AlignmentEntry>,
    /// Unrounded sub-scores as computed by the engine
    pub scores: ScoreBreakdown,
    /// Sub-scores rounded to one decimal for display
    pub rounded: ScoreBreakdown,
    /// Total on the module's public scale, when it has one
    pub scaled_total: Option<f64>,
    pub evaluated_at: DateTime<Utc>,
}

/// A module together with its active scoring policy.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModulePolicy {
    pub module: ModuleKind,
    pub max_total: f64,
    pub policy: ScoringPolicy,
}

impl ModulePolicy {
    pub fn new(module: ModuleKind, policy: &ScoringPolicy) -> Self {
        Self {
            module,
            max_total: policy.max_total(),
            policy: policy.clone(),
        }
    }
}
