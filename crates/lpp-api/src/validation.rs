use lpp_scoring::ModuleKind;
use validator::Validate;

use crate::error::ApiError;

/// Resolve a module identifier taken from the URL.
///
/// # Examples
/// ```
/// use lpp_api::validation::parse_module;
/// use lpp_scoring::ModuleKind;
///
/// assert_eq!(parse_module("read-aloud").unwrap(), ModuleKind::ReadAloud);
/// assert!(parse_module("essay").is_err());
/// ```
pub fn parse_module(raw: &str) -> Result<ModuleKind, ApiError> {
    raw.parse::<ModuleKind>()
        .map_err(|_| ApiError::NotFound(format!("Unknown practice module: '{raw}'")))
}

/// Run the `validator` rules of a request payload.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|errors| ApiError::Validation(errors.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::model::EvaluateRequest;

    #[test]
    fn test_parse_module() {
        assert_eq!(parse_module("repeat-sentence").unwrap(), ModuleKind::RepeatSentence);
        assert_eq!(
            parse_module("write-from-dictation").unwrap(),
            ModuleKind::WriteFromDictation
        );

        assert!(matches!(parse_module(""), Err(ApiError::NotFound(_))));
        assert!(matches!(parse_module("Read-Aloud"), Err(ApiError::NotFound(_))));
        assert!(matches!(parse_module("read_aloud"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_validate_payload() {
        let empty = EvaluateRequest::default();
        assert!(validate_payload(&empty).is_ok());

        let within_limit = EvaluateRequest {
            reference_text: Some("word ".repeat(2000)),
            candidate_transcript: Some(String::new()),
        };
        assert!(validate_payload(&within_limit).is_ok());

        let too_long = EvaluateRequest {
            reference_text: None,
            candidate_transcript: Some("a".repeat(10001)),
        };
        assert!(matches!(
            validate_payload(&too_long),
            Err(ApiError::Validation(_))
        ));
    }
}
