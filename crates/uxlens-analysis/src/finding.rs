//! Classification results produced by the pattern detectors.
//!
//! Every detector turns a dataset into a list of [`Finding`]s. A finding names
//! the [`Pattern`] it concerns, the [`Subject`] it is about, a
//! [`FindingStatus`], the [`Metrics`] that support it and a short message.
//! Findings are plain data and serialize with serde for JSON reports.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Usability pattern checked by a detector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Immediate visual feedback after an interaction.
    #[display("Immediate Visual Feedback")]
    Feedback,
    /// Suggestions for input fields dominated by a few values.
    #[display("Autocomplete")]
    Autocomplete,
    /// Presets for configuration most users set the same way.
    #[display("Customisation")]
    Customization,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [
        Pattern::Feedback,
        Pattern::Autocomplete,
        Pattern::Customization,
    ];
}

/// Outcome of a single check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingStatus {
    /// The pattern is present.
    Implemented,
    /// The pattern is absent where it is needed.
    Missing,
    /// The data suggests the pattern would help.
    Candidate,
}

/// What a finding is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Subject {
    /// The dataset as a whole.
    Dataset,
    /// The gap between an event and its predecessor in the same interaction.
    Interaction {
        user_id: String,
        interaction_id: String,
        /// Timestamp of the later event of the pair.
        timestamp: NaiveDateTime,
        /// Extra columns of the later event's row.
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        extra: BTreeMap<String, String>,
    },
    /// A single input field.
    Field { field_id: String },
    /// A setting on a screen, aggregated over users.
    Setting {
        users: String,
        screen_id: String,
        config_key: String,
    },
}

/// Measurements backing a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Metrics {
    None,
    Latency {
        delta_secs: f64,
    },
    Distribution {
        samples: usize,
        distinct: usize,
        most_common: String,
        coverage: f64,
        entropy_bits: f64,
        normalized_entropy: f64,
    },
    Preset {
        value: String,
        coverage: f64,
        users: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub pattern: Pattern,
    pub subject: Subject,
    pub status: FindingStatus,
    pub metrics: Metrics,
    pub message: String,
}

impl Finding {
    /// Dataset-wide finding confirming that a pattern is implemented.
    #[must_use]
    pub fn implemented(pattern: Pattern) -> Self {
        Self {
            pattern,
            subject: Subject::Dataset,
            status: FindingStatus::Implemented,
            metrics: Metrics::None,
            message: "Pattern is implemented".to_owned(),
        }
    }

    /// Whether this finding reports a problem or an opportunity.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        !self.status.is_implemented()
    }
}
