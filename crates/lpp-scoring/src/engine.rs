//! Scoring entry point tying normalization, alignment and trait scoring
//! together.

use serde::{Deserialize, Serialize};

use crate::alignment::{AlignmentEntry, WordStatus};
use crate::error::ScoringError;
use crate::normalize::{normalize, tokenize};
use crate::policy::{ModuleKind, PolicyTable, ScoringPolicy};
use crate::scorer::{ScoreBreakdown, TraitInputs, score_traits};
use crate::similarity::{DiceSimilarity, Similarity};

/// Outcome of scoring one attempt.
///
/// Serializes flat as `{ alignment, content, pronunciation, fluency, total }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub alignment: Vec<AlignmentEntry>,
    #[serde(flatten)]
    pub scores: ScoreBreakdown,
}

/// Stateless scorer: normalize, tokenize, align, then score each trait.
///
/// Holds nothing but the similarity primitive, so one engine can serve any
/// number of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine<S = DiceSimilarity> {
    similarity: S,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Similarity> ScoringEngine<S> {
    /// Engine using a custom similarity primitive.
    pub const fn with_similarity(similarity: S) -> Self {
        Self { similarity }
    }

    /// Score `candidate` against `reference` under `policy`.
    ///
    /// Missing texts count as empty. The call only fails when the similarity
    /// primitive misbehaves; no partial scores are returned in that case.
    pub fn evaluate<'a, 'b>(
        &self,
        reference: impl Into<Option<&'a str>>,
        candidate: impl Into<Option<&'b str>>,
        policy: &ScoringPolicy,
    ) -> Result<Evaluation, ScoringError> {
        let normalized_reference = normalize(reference);
        let normalized_candidate = normalize(candidate);
        let reference_words = tokenize(&normalized_reference);
        let candidate_words = tokenize(&normalized_candidate);

        let alignment = policy
            .strategy
            .align(&reference_words, &candidate_words, &self.similarity)?;

        let scores = score_traits(
            &TraitInputs {
                reference_words: &reference_words,
                candidate_words: &candidate_words,
                alignment: &alignment,
                normalized_reference: &normalized_reference,
                normalized_candidate: &normalized_candidate,
            },
            policy,
            &self.similarity,
        )?;

        tracing::debug!(
            strategy = ?policy.strategy,
            reference_words = reference_words.len(),
            candidate_words = candidate_words.len(),
            matched = alignment.matched,
            missing = alignment.count(WordStatus::Missing),
            extra = alignment.count(WordStatus::Extra),
            content = scores.content,
            pronunciation = scores.pronunciation,
            fluency = scores.fluency,
            total = scores.total,
            "transcript evaluated"
        );

        Ok(Evaluation {
            alignment: alignment.entries,
            scores,
        })
    }

    /// Look up the policy for `module` in `table` and evaluate with it.
    pub fn evaluate_module<'a, 'b>(
        &self,
        table: &PolicyTable,
        module: ModuleKind,
        reference: impl Into<Option<&'a str>>,
        candidate: impl Into<Option<&'b str>>,
    ) -> Result<Evaluation, ScoringError> {
        let policy = table
            .get(module)
            .ok_or_else(|| ScoringError::UnknownModule(module.to_string()))?;
        self.evaluate(reference, candidate, policy)
    }
}
