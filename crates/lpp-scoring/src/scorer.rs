//! Content, pronunciation and fluency sub-scores.
//!
//! Pronunciation and fluency are textual proxies: the first is the holistic
//! similarity of the two normalized texts, the second the ratio of their word
//! counts. Neither looks at audio.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::alignment::Alignment;
use crate::error::ScoringError;
use crate::policy::{ContentRule, ScoringPolicy, band_score};
use crate::similarity::{Similarity, checked_score};

/// Sub-scores of one attempt and their combined total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub content: f64,
    pub pronunciation: f64,
    pub fluency: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    /// Every field rounded to one decimal place, for presentation.
    pub fn rounded(&self) -> Self {
        Self {
            content: round_to_tenth(self.content),
            pronunciation: round_to_tenth(self.pronunciation),
            fluency: round_to_tenth(self.fluency),
            total: round_to_tenth(self.total),
        }
    }

    /// The total expressed on a public scale, e.g. out of 90.
    ///
    /// A policy whose `max_total` is zero always reports 0.
    pub fn rescaled(&self, max_total: f64, scale: f64) -> f64 {
        if max_total <= 0.0 {
            return 0.0;
        }
        round_to_tenth(self.total / max_total * scale)
    }
}

/// Round half away from zero to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Inputs the trait scorer reads, all derived from one scoring call.
#[derive(Debug, Clone, Copy)]
pub struct TraitInputs<'a> {
    pub reference_words: &'a [&'a str],
    pub candidate_words: &'a [&'a str],
    pub alignment: &'a Alignment,
    pub normalized_reference: &'a str,
    pub normalized_candidate: &'a str,
}

/// Compute the three sub-scores under `policy` and combine them.
pub fn score_traits<S>(
    inputs: &TraitInputs<'_>,
    policy: &ScoringPolicy,
    similarity: &S,
) -> Result<ScoreBreakdown, ScoringError>
where
    S: Similarity + ?Sized,
{
    let content = content_score(inputs, policy);
    let pronunciation = pronunciation_score(
        inputs.normalized_reference,
        inputs.normalized_candidate,
        policy.max_pronunciation,
        similarity,
    )?;
    let fluency = fluency_score(
        inputs.reference_words.len(),
        inputs.candidate_words.len(),
        policy.max_fluency,
    );
    let total = policy.combination.combine(content, pronunciation, fluency);

    Ok(ScoreBreakdown {
        content,
        pronunciation,
        fluency,
        total,
    })
}

/// Content score under the policy's content rule, clamped to `max_content`.
pub fn content_score(inputs: &TraitInputs<'_>, policy: &ScoringPolicy) -> f64 {
    let raw = match &policy.content {
        ContentRule::MatchRatio { bands } => band_score(
            bands,
            percentage(inputs.alignment.matched, inputs.reference_words.len()),
        ),
        ContentRule::KeywordCoverage { bands } => band_score(
            bands,
            keyword_coverage(inputs.reference_words, inputs.candidate_words),
        ),
        ContentRule::MatchCount => inputs.alignment.matched as f64,
    };

    raw.clamp(0.0, policy.max_content)
}

/// Holistic similarity of the two normalized texts, scaled to the maximum.
///
/// An empty side means no response (or no reference) and scores 0.
pub fn pronunciation_score<S>(
    normalized_reference: &str,
    normalized_candidate: &str,
    max_pronunciation: f64,
    similarity: &S,
) -> Result<f64, ScoringError>
where
    S: Similarity + ?Sized,
{
    if normalized_reference.is_empty() || normalized_candidate.is_empty() {
        return Ok(0.0);
    }

    let ratio = checked_score(similarity, normalized_reference, normalized_candidate)?;
    Ok(ratio * max_pronunciation)
}

/// Ratio of the shorter to the longer word count, scaled to the maximum.
pub fn fluency_score(reference_len: usize, candidate_len: usize, max_fluency: f64) -> f64 {
    let shorter = reference_len.min(candidate_len);
    let longer = reference_len.max(candidate_len).max(1);
    shorter as f64 / longer as f64 * max_fluency
}

/// `part / whole` as a percentage, with an empty whole counting as 1.
pub fn percentage(part: usize, whole: usize) -> f64 {
    part as f64 / whole.max(1) as f64 * 100.0
}

/// Percentage of distinct reference words present anywhere in the candidate.
pub fn keyword_coverage(reference_words: &[&str], candidate_words: &[&str]) -> f64 {
    let keywords: HashSet<&str> = reference_words.iter().copied().collect();
    let spoken: HashSet<&str> = candidate_words.iter().copied().collect();
    let covered = keywords.intersection(&spoken).count();
    percentage(covered, keywords.len())
}
