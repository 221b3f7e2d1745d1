//! Pairwise string similarity used for fuzzy word matches and the holistic
//! pronunciation proxy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// A string similarity measure in `[0, 1]`.
///
/// Implementations must be symmetric, return `1.0` for identical inputs,
/// `1.0` for two empty strings and `0.0` when exactly one side is empty.
///
/// Any `Fn(&str, &str) -> f64` is a `Similarity`, which keeps test stubs short:
///
/// ```
/// use lpp_scoring::similarity::Similarity;
///
/// let always_half = |_: &str, _: &str| 0.5;
/// assert_eq!(always_half.score("a", "b"), 0.5);
/// ```
pub trait Similarity {
    /// Score how similar `a` and `b` are.
    fn score(&self, a: &str, b: &str) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64,
{
    fn score(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Sørensen–Dice coefficient over character bigrams, whitespace ignored.
///
/// Bigrams are counted over `char`s, so accented letters weigh the same as
/// ASCII ones. Strings shorter than two characters only match when they are
/// equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSimilarity;

impl Similarity for DiceSimilarity {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().filter(|c| !c.is_whitespace()).collect();
        let b: Vec<char> = b.chars().filter(|c| !c.is_whitespace()).collect();

        if a == b {
            return 1.0;
        }
        if a.len() < 2 || b.len() < 2 {
            return 0.0;
        }

        let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
        for pair in a.windows(2) {
            *bigrams.entry((pair[0], pair[1])).or_default() += 1;
        }

        // Multiset intersection: each bigram of `a` is shared at most once
        let shared = b
            .windows(2)
            .filter(|pair| match bigrams.get_mut(&(pair[0], pair[1])) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    true
                }
                _ => false,
            })
            .count();

        (2 * shared) as f64 / (a.len() + b.len() - 2) as f64
    }
}

/// Score with `similarity` and reject values outside `[0, 1]`.
pub(crate) fn checked_score<S>(similarity: &S, a: &str, b: &str) -> Result<f64, ScoringError>
where
    S: Similarity + ?Sized,
{
    let value = similarity.score(a, b);
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ScoringError::Similarity {
            left: a.to_string(),
            right: b.to_string(),
            value,
        })
    }
}
