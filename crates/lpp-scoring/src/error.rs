use thiserror::Error;

/// Failure of a single scoring call.
///
/// Empty or missing texts are never errors. Only a misbehaving similarity
/// primitive or a lookup for a module the table does not know about fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("similarity of {left:?} and {right:?} returned {value}, expected a value in [0, 1]")]
    Similarity {
        left: String,
        right: String,
        value: f64,
    },
    #[error("no scoring policy configured for module '{0}'")]
    UnknownModule(String),
}

/// Failure while loading or validating a policy table.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse policy table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid policy for module '{module}': {reason}")]
    Invalid { module: String, reason: String },
    #[error("unknown module '{0}' in policy table")]
    UnknownModule(String),
}
