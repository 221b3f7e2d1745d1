//! Word alignment between a reference text and a candidate transcript.
//!
//! Alignment is deliberately simple: either a positional walk with a fuzzy
//! fallback, or (for dictation) greedy unordered matching. There is no
//! edit-distance search.

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::similarity::{Similarity, checked_score};

/// Similarity above which a positional mismatch still counts as correct.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// How a reference (or surplus candidate) word was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordStatus {
    Correct,
    Incorrect,
    Missing,
    Extra,
}

/// One word of the alignment, as rendered for word highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentEntry {
    pub word: String,
    pub status: WordStatus,
}

impl AlignmentEntry {
    fn new(word: &str, status: WordStatus) -> Self {
        Self {
            word: word.to_string(),
            status,
        }
    }
}

/// Which aligner a module uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStrategy {
    /// Index-by-index comparison; surplus candidate words are ignored.
    #[default]
    Positional,
    /// Same as [`AlignmentStrategy::Positional`], then one `extra` entry per
    /// surplus candidate word.
    PositionalWithExtras,
    /// Each candidate word consumes the first unused equal reference word.
    /// Unmatched candidate words trail as `extra` entries.
    Greedy,
}

/// Result of aligning two word sequences.
///
/// Holds one entry per reference word, in reference order, followed by any
/// trailing `extra` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub entries: Vec<AlignmentEntry>,
    /// Number of reference words counted as correct.
    pub matched: usize,
}

impl Alignment {
    fn from_entries(entries: Vec<AlignmentEntry>) -> Self {
        let matched = entries
            .iter()
            .filter(|entry| entry.status == WordStatus::Correct)
            .count();
        Self { entries, matched }
    }

    /// Count the entries with the given status.
    pub fn count(&self, status: WordStatus) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status == status)
            .count()
    }
}

impl AlignmentStrategy {
    /// Align `candidate` against `reference` with this strategy.
    ///
    /// Only fails when `similarity` returns a value outside `[0, 1]`.
    pub fn align<S>(
        self,
        reference: &[&str],
        candidate: &[&str],
        similarity: &S,
    ) -> Result<Alignment, ScoringError>
    where
        S: Similarity + ?Sized,
    {
        match self {
            Self::Positional => align_positional(reference, candidate, similarity),
            Self::PositionalWithExtras => {
                let mut alignment = align_positional(reference, candidate, similarity)?;
                alignment.entries.extend(
                    candidate
                        .iter()
                        .skip(reference.len())
                        .map(|word| AlignmentEntry::new(word, WordStatus::Extra)),
                );
                Ok(alignment)
            }
            Self::Greedy => Ok(align_greedy(reference, candidate)),
        }
    }
}

/// Walk the reference by index and compare with the candidate word at the same
/// position.
///
/// An exact match keeps the reference word; a fuzzy match above
/// [`FUZZY_MATCH_THRESHOLD`] and a mismatch both report the candidate word.
/// Positions past the end of the candidate are missing.
pub fn align_positional<S>(
    reference: &[&str],
    candidate: &[&str],
    similarity: &S,
) -> Result<Alignment, ScoringError>
where
    S: Similarity + ?Sized,
{
    let entries = reference
        .iter()
        .enumerate()
        .map(|(i, &expected)| -> Result<AlignmentEntry, ScoringError> {
            let entry = match candidate.get(i) {
                None => AlignmentEntry::new(expected, WordStatus::Missing),
                Some(&spoken) if spoken == expected => {
                    AlignmentEntry::new(expected, WordStatus::Correct)
                }
                Some(&spoken) => {
                    let status =
                        if checked_score(similarity, expected, spoken)? > FUZZY_MATCH_THRESHOLD {
                            WordStatus::Correct
                        } else {
                            WordStatus::Incorrect
                        };
                    AlignmentEntry::new(spoken, status)
                }
            };
            Ok(entry)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Alignment::from_entries(entries))
}

/// Greedy unordered matching with exact equality only.
pub fn align_greedy(reference: &[&str], candidate: &[&str]) -> Alignment {
    let mut consumed = vec![false; reference.len()];
    let mut extras = Vec::new();

    for &spoken in candidate {
        let slot = reference
            .iter()
            .zip(consumed.iter())
            .position(|(&expected, &used)| !used && expected == spoken);
        match slot {
            Some(index) => consumed[index] = true,
            None => extras.push(AlignmentEntry::new(spoken, WordStatus::Extra)),
        }
    }

    let entries = reference
        .iter()
        .zip(consumed)
        .map(|(&expected, used)| {
            let status = if used {
                WordStatus::Correct
            } else {
                WordStatus::Missing
            };
            AlignmentEntry::new(expected, status)
        })
        .chain(extras)
        .collect();

    Alignment::from_entries(entries)
}
