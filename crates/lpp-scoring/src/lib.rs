//! Transcript scoring library for the language practice platform
//!
//! This crate aligns a candidate transcript against a question's reference text
//! and turns the alignment into content, pronunciation and fluency scores. Each
//! practice module (read-aloud, repeat-sentence, write-from-dictation, ...) is
//! described by a [`ScoringPolicy`]; the algorithm itself is shared.
//!
//! ```
//! use lpp_scoring::{ModuleKind, PolicyTable, ScoringEngine};
//!
//! let engine = ScoringEngine::new();
//! let policies = PolicyTable::builtin();
//! let evaluation = engine
//!     .evaluate_module(
//!         &policies,
//!         ModuleKind::ReadAloud,
//!         "The cat sat on the mat.",
//!         "the cat sat on the mat",
//!     )
//!     .unwrap();
//!
//! assert_eq!(evaluation.scores.total, 15.0);
//! ```

pub mod alignment;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod policy;
pub mod scorer;
pub mod similarity;

pub use alignment::{Alignment, AlignmentEntry, AlignmentStrategy, WordStatus};
pub use engine::{Evaluation, ScoringEngine};
pub use error::{PolicyError, ScoringError};
pub use policy::{
    BandThreshold, CombinationRule, ContentBand, ContentRule, ModuleKind, PolicyTable,
    ScoringPolicy,
};
pub use scorer::ScoreBreakdown;
pub use similarity::{DiceSimilarity, Similarity};
