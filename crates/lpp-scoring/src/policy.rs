//! Per-module scoring policies.
//!
//! Every practice module runs the same aligner and trait scorer; what differs
//! is the data in its [`ScoringPolicy`]: which aligner to use, how content is
//! measured and banded, the ceiling of each trait and how the traits are
//! combined. Policies are plain serde data so a deployment can override the
//! built-in presets from a JSON file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alignment::AlignmentStrategy;
use crate::error::PolicyError;

/// Practice modules that submit transcripts for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    ReadAloud,
    RepeatSentence,
    RetellLecture,
    DescribeImage,
    RespondToSituation,
    SummarizeGroupDiscussion,
    WriteFromDictation,
    SummarizeSpokenText,
}

impl ModuleKind {
    pub const ALL: [Self; 8] = [
        Self::ReadAloud,
        Self::RepeatSentence,
        Self::RetellLecture,
        Self::DescribeImage,
        Self::RespondToSituation,
        Self::SummarizeGroupDiscussion,
        Self::WriteFromDictation,
        Self::SummarizeSpokenText,
    ];

    /// Kebab-case identifier used in URLs and policy files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadAloud => "read-aloud",
            Self::RepeatSentence => "repeat-sentence",
            Self::RetellLecture => "retell-lecture",
            Self::DescribeImage => "describe-image",
            Self::RespondToSituation => "respond-to-situation",
            Self::SummarizeGroupDiscussion => "summarize-group-discussion",
            Self::WriteFromDictation => "write-from-dictation",
            Self::SummarizeSpokenText => "summarize-spoken-text",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|module| module.as_str() == s)
            .ok_or_else(|| PolicyError::UnknownModule(s.to_string()))
    }
}

/// Lower bound of a content band, as a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandThreshold {
    /// Satisfied when the percentage is `>=` the bound.
    AtLeast(f64),
    /// Satisfied when the percentage is strictly `>` the bound.
    Above(f64),
}

impl BandThreshold {
    pub fn is_satisfied_by(self, percent: f64) -> bool {
        match self {
            Self::AtLeast(bound) => percent >= bound,
            Self::Above(bound) => percent > bound,
        }
    }

    const fn bound(self) -> f64 {
        match self {
            Self::AtLeast(bound) | Self::Above(bound) => bound,
        }
    }
}

/// A `(threshold, score)` row of a band table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentBand {
    pub when: BandThreshold,
    pub score: f64,
}

impl ContentBand {
    pub const fn at_least(percent: f64, score: f64) -> Self {
        Self {
            when: BandThreshold::AtLeast(percent),
            score,
        }
    }

    pub const fn above(percent: f64, score: f64) -> Self {
        Self {
            when: BandThreshold::Above(percent),
            score,
        }
    }
}

/// Look up `percent` in `bands`, top-down. The first satisfied band wins and no
/// satisfied band scores 0.
pub fn band_score(bands: &[ContentBand], percent: f64) -> f64 {
    bands
        .iter()
        .find(|band| band.when.is_satisfied_by(percent))
        .map_or(0.0, |band| band.score)
}

/// How the content trait is measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentRule {
    /// Percentage of reference words aligned as correct, banded.
    MatchRatio { bands: Vec<ContentBand> },
    /// Percentage of distinct reference words found anywhere in the candidate,
    /// banded.
    KeywordCoverage { bands: Vec<ContentBand> },
    /// Raw number of reference words aligned as correct.
    MatchCount,
}

impl ContentRule {
    fn bands(&self) -> &[ContentBand] {
        match self {
            Self::MatchRatio { bands } | Self::KeywordCoverage { bands } => bands,
            Self::MatchCount => &[],
        }
    }
}

/// How the three trait scores make up the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationRule {
    #[default]
    Sum,
    Average,
}

impl CombinationRule {
    pub fn combine(self, content: f64, pronunciation: f64, fluency: f64) -> f64 {
        let sum = content + pronunciation + fluency;
        match self {
            Self::Sum => sum,
            Self::Average => sum / 3.0,
        }
    }
}

/// Scoring configuration of one practice module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    #[serde(default)]
    pub strategy: AlignmentStrategy,
    pub content: ContentRule,
    pub max_content: f64,
    pub max_pronunciation: f64,
    pub max_fluency: f64,
    #[serde(default)]
    pub combination: CombinationRule,
    /// Public scale the total is reported on (e.g. 90), if the module has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_scale: Option<f64>,
}

impl ScoringPolicy {
    /// Highest total this policy can produce.
    pub fn max_total(&self) -> f64 {
        self.combination
            .combine(self.max_content, self.max_pronunciation, self.max_fluency)
    }

    /// Check maxima and band rows for values the scorer cannot honor.
    pub fn validate(&self, module: &str) -> Result<(), PolicyError> {
        let invalid = |reason: String| PolicyError::Invalid {
            module: module.to_string(),
            reason,
        };

        for (name, value) in [
            ("max_content", self.max_content),
            ("max_pronunciation", self.max_pronunciation),
            ("max_fluency", self.max_fluency),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if let Some(scale) = self.public_scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(invalid(format!(
                    "public_scale must be positive, got {scale}"
                )));
            }
        }

        for band in self.content.bands() {
            let bound = band.when.bound();
            if !(0.0..=100.0).contains(&bound) {
                return Err(invalid(format!(
                    "band threshold {bound} is outside 0..=100"
                )));
            }
            if !band.score.is_finite() || band.score < 0.0 || band.score > self.max_content {
                return Err(invalid(format!(
                    "band score {} is outside 0..={}",
                    band.score, self.max_content
                )));
            }
        }

        Ok(())
    }
}

/// Band table shared by read-aloud and the other sentence-level speaking
/// modules: full match 5, 70% 4, 40% 3, anything 1.
fn five_point_bands() -> Vec<ContentBand> {
    vec![
        ContentBand::at_least(100.0, 5.0),
        ContentBand::at_least(70.0, 4.0),
        ContentBand::at_least(40.0, 3.0),
        ContentBand::above(0.0, 1.0),
    ]
}

/// Built-in policy for `module`.
pub fn preset(module: ModuleKind) -> ScoringPolicy {
    match module {
        ModuleKind::ReadAloud => ScoringPolicy {
            strategy: AlignmentStrategy::Positional,
            content: ContentRule::MatchRatio {
                bands: five_point_bands(),
            },
            max_content: 5.0,
            max_pronunciation: 5.0,
            max_fluency: 5.0,
            combination: CombinationRule::Sum,
            public_scale: Some(90.0),
        },
        ModuleKind::RepeatSentence => ScoringPolicy {
            strategy: AlignmentStrategy::Positional,
            content: ContentRule::MatchRatio {
                bands: vec![
                    ContentBand::at_least(100.0, 3.0),
                    ContentBand::at_least(50.0, 2.0),
                    ContentBand::above(0.0, 1.0),
                ],
            },
            max_content: 3.0,
            max_pronunciation: 5.0,
            max_fluency: 5.0,
            combination: CombinationRule::Sum,
            public_scale: Some(90.0),
        },
        ModuleKind::RetellLecture | ModuleKind::DescribeImage => ScoringPolicy {
            strategy: AlignmentStrategy::Positional,
            content: ContentRule::KeywordCoverage {
                bands: vec![
                    ContentBand::at_least(80.0, 6.0),
                    ContentBand::at_least(60.0, 5.0),
                    ContentBand::at_least(45.0, 4.0),
                    ContentBand::at_least(30.0, 3.0),
                    ContentBand::at_least(15.0, 2.0),
                    ContentBand::above(0.0, 1.0),
                ],
            },
            max_content: 6.0,
            max_pronunciation: 5.0,
            max_fluency: 5.0,
            combination: CombinationRule::Sum,
            public_scale: Some(90.0),
        },
        ModuleKind::RespondToSituation => ScoringPolicy {
            strategy: AlignmentStrategy::Positional,
            content: ContentRule::KeywordCoverage {
                bands: vec![
                    ContentBand::at_least(75.0, 4.0),
                    ContentBand::at_least(50.0, 3.0),
                    ContentBand::at_least(25.0, 2.0),
                    ContentBand::above(0.0, 1.0),
                ],
            },
            max_content: 4.0,
            max_pronunciation: 5.0,
            max_fluency: 5.0,
            combination: CombinationRule::Sum,
            public_scale: Some(10.0),
        },
        ModuleKind::SummarizeGroupDiscussion => ScoringPolicy {
            strategy: AlignmentStrategy::Positional,
            content: ContentRule::KeywordCoverage {
                bands: vec![
                    ContentBand::at_least(70.0, 6.0),
                    ContentBand::at_least(55.0, 5.0),
                    ContentBand::at_least(40.0, 4.0),
                    ContentBand::at_least(25.0, 3.0),
                    ContentBand::at_least(10.0, 2.0),
                    ContentBand::above(0.0, 1.0),
                ],
            },
            max_content: 6.0,
            max_pronunciation: 6.0,
            max_fluency: 6.0,
            combination: CombinationRule::Sum,
            public_scale: Some(90.0),
        },
        ModuleKind::WriteFromDictation => ScoringPolicy {
            strategy: AlignmentStrategy::Greedy,
            content: ContentRule::MatchCount,
            max_content: 30.0,
            max_pronunciation: 0.0,
            max_fluency: 0.0,
            combination: CombinationRule::Sum,
            public_scale: None,
        },
        ModuleKind::SummarizeSpokenText => ScoringPolicy {
            strategy: AlignmentStrategy::Positional,
            content: ContentRule::KeywordCoverage {
                bands: vec![
                    ContentBand::at_least(50.0, 2.0),
                    ContentBand::above(0.0, 1.0),
                ],
            },
            max_content: 2.0,
            max_pronunciation: 2.0,
            max_fluency: 2.0,
            combination: CombinationRule::Sum,
            public_scale: Some(10.0),
        },
    }
}

/// Policies for every practice module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyTable {
    policies: BTreeMap<ModuleKind, ScoringPolicy>,
}

impl PolicyTable {
    /// Table holding [`preset`] for every module.
    pub fn builtin() -> Self {
        Self {
            policies: ModuleKind::ALL
                .into_iter()
                .map(|module| (module, preset(module)))
                .collect(),
        }
    }

    /// Built-in table with the modules listed in `json` replaced.
    ///
    /// `json` is an object keyed by module identifier; modules it leaves out
    /// keep their preset.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let overrides: BTreeMap<String, ScoringPolicy> = serde_json::from_str(json)?;
        let mut table = Self::builtin();

        for (name, policy) in overrides {
            let module = name.parse::<ModuleKind>()?;
            if let Err(err) = policy.validate(module.as_str()) {
                tracing::warn!(module = %module, error = %err, "scoring policy rejected");
                return Err(err);
            }
            tracing::debug!(module = %module, "overriding built-in scoring policy");
            table.policies.insert(module, policy);
        }

        Ok(table)
    }

    /// Read a JSON policy file, see [`PolicyTable::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn get(&self, module: ModuleKind) -> Option<&ScoringPolicy> {
        self.policies.get(&module)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModuleKind, &ScoringPolicy)> {
        self.policies.iter().map(|(module, policy)| (*module, policy))
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::builtin()
    }
}
