//! Text normalization shared by every practice module.
//!
//! Reference texts and candidate transcripts go through the same pipeline
//! before alignment, so the comparison is insensitive to casing, a fixed set
//! of ASCII punctuation and surrounding whitespace. Nothing else is touched:
//! accents, apostrophes, quotes and non-ASCII letters survive as-is.

/// Characters removed by [`normalize`]. No other character is stripped.
pub const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Normalize a text for word comparison.
///
/// Applies, in order:
/// 1. Lowercase
/// 2. Removal of [`STRIPPED_PUNCTUATION`]
/// 3. Trim of leading/trailing whitespace (internal whitespace is kept for [`tokenize`])
///
/// A missing text normalizes to the empty string.
///
/// # Examples
/// ```
/// use lpp_scoring::normalize::normalize;
///
/// assert_eq!(normalize("  The Cat, sat!  "), "the cat sat");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };

    text.to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split a normalized text into word tokens.
///
/// Splits on runs of whitespace and never yields empty tokens, so an empty or
/// all-whitespace text has no words.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Basic behavior ---

    #[test]
    fn test_identity() {
        assert_eq!(normalize("hello"), "hello");
    }

    #[test]
    fn test_lowercase() {
        assert_eq!(normalize("Hello WORLD"), "hello world");
    }

    #[test]
    fn test_missing_text_is_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_trim_keeps_internal_whitespace() {
        assert_eq!(normalize("  the   cat  "), "the   cat");
    }

    // --- Punctuation ---

    #[test]
    fn test_every_listed_character_is_removed() {
        let all: String = STRIPPED_PUNCTUATION.iter().collect();
        assert_eq!(normalize(format!("a{all}b").as_str()), "ab");
    }

    #[test]
    fn test_sentence_punctuation() {
        assert_eq!(
            normalize("Well-known facts: (mostly) true; right?"),
            "wellknown facts mostly true right?"
        );
    }

    #[test]
    fn test_unlisted_characters_survive() {
        // Question marks, apostrophes, quotes and accents are not in the set
        assert_eq!(normalize("it's"), "it's");
        assert_eq!(normalize("\"quoted\""), "\"quoted\"");
        assert_eq!(normalize("Café"), "café");
        assert_eq!(normalize("¿Qué?"), "¿qué?");
    }

    #[test]
    fn test_punctuation_only_edges_are_trimmed() {
        assert_eq!(normalize(" . hello , "), "hello");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "  The Cat -- sat on the MAT!!  ",
            "(a) {b} [c] <d>",
            " . , / # ",
            "Ünïcödé wörds ~ stay",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(once.as_str()), once, "not idempotent for {sample:?}");
        }
    }

    // --- Tokenizer ---

    #[test]
    fn test_tokenize_words() {
        assert_eq!(tokenize("the cat sat"), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_tokenize_collapses_runs_of_whitespace() {
        assert_eq!(tokenize("the   cat\t\nsat"), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t ").is_empty());
    }
}
