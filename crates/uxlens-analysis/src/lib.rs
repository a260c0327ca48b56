//! Usability pattern detection over recorded UI event logs
//!
//! This crate turns typed event records into [`finding::Finding`]s that state
//! whether a usability pattern is implemented, missing, or worth adding.
//!
//! # Overview
//!
//! Three detectors are provided. Each one is a pure function of its dataset:
//!
//! | Detector | Records | Measures |
//! |----------|---------|----------|
//! | [`feedback`] | [`event::InteractionEvent`] | gaps between consecutive events per (user, interaction) |
//! | [`autocomplete`] | [`event::FieldInputEvent`] | coverage and normalized entropy per field |
//! | [`customization`] | [`event::ConfigEvent`] | per-user preferred values, then agreement across users |
//!
//! All thresholds are fixed constants of their module.
//!
//! Grouping is done with `BTreeMap`s keyed by the grouping columns, so every
//! record lands in exactly one group and groups are visited in ascending key
//! order. Running a detector twice on the same records yields the same
//! findings in the same order.
//!
//! # Examples
//!
//! ## Running a detector directly
//!
//! ```
//! use uxlens_analysis::{autocomplete, event::FieldInputEvent, finding::FindingStatus};
//!
//! let events = ["Milan", "Milan", "Milan", "Rome"].map(|city| FieldInputEvent {
//!     field_id: "city".into(),
//!     input_value: city.into(),
//! });
//!
//! let findings = autocomplete::detect(&events);
//! assert_eq!(findings[0].status, FindingStatus::Candidate);
//! ```
//!
//! ## Running a detector through the [`Detector`] trait
//!
//! ```
//! use uxlens_analysis::{Detector, FeedbackDetector, Summary, finding::FindingStatus};
//!
//! let detection = FeedbackDetector::detect(&[]);
//! assert_eq!(detection.findings[0].status, FindingStatus::Implemented);
//! assert!(matches!(detection.summary, Summary::Latency(None)));
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use uxlens_stats::descriptive::DescriptiveStats;

use crate::{
    autocomplete::FieldStats,
    customization::{PresetCandidate, UserPreferences},
    event::{ConfigEvent, FieldInputEvent, InteractionEvent},
    feedback::FeedbackAnalysis,
    finding::{Finding, Pattern},
};

pub mod autocomplete;
pub mod customization;
pub mod event;
pub mod feedback;
pub mod finding;

/// Intermediate statistics a detector computed on the way to its findings.
#[derive(Debug, Clone)]
pub enum Summary {
    /// Distribution of consecutive-event gaps, `None` if there were none.
    Latency(Option<DescriptiveStats>),
    /// Value distribution of every field.
    Fields(Vec<FieldStats>),
    /// User agreement on every setting.
    Settings(Vec<PresetCandidate>),
}

/// Result of running one detector over one dataset.
#[derive(Debug, Clone)]
pub struct Detection {
    pub summary: Summary,
    pub findings: Vec<Finding>,
}

/// A pattern detector over a specific kind of record.
pub trait Detector {
    /// Record type the detector consumes.
    type Record: DeserializeOwned;

    /// Pattern the detector checks.
    const PATTERN: Pattern;

    /// Columns a dataset must provide for this detector.
    const REQUIRED_COLUMNS: &'static [&'static str];

    fn detect(records: &[Self::Record]) -> Detection;

    /// Attaches the columns outside [`Self::REQUIRED_COLUMNS`] to a loaded record.
    ///
    /// Records that have no use for them drop them.
    fn attach_extra_columns(_record: &mut Self::Record, _columns: BTreeMap<String, String>) {}
}

#[derive(Debug, Clone, Copy)]
pub struct FeedbackDetector;

impl Detector for FeedbackDetector {
    type Record = InteractionEvent;
    const PATTERN: Pattern = Pattern::Feedback;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["user_id", "interaction_id", "timestamp"];

    fn detect(records: &[Self::Record]) -> Detection {
        let analysis = FeedbackAnalysis::from_events(records);
        Detection {
            findings: analysis.findings(),
            summary: Summary::Latency(analysis.summary),
        }
    }

    fn attach_extra_columns(record: &mut Self::Record, columns: BTreeMap<String, String>) {
        record.extra = columns;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AutocompleteDetector;

impl Detector for AutocompleteDetector {
    type Record = FieldInputEvent;
    const PATTERN: Pattern = Pattern::Autocomplete;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["field_id", "input_value"];

    fn detect(records: &[Self::Record]) -> Detection {
        let fields = FieldStats::collect_by_field(records);
        Detection {
            findings: fields.iter().flat_map(FieldStats::findings).collect(),
            summary: Summary::Fields(fields),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CustomizationDetector;

impl Detector for CustomizationDetector {
    type Record = ConfigEvent;
    const PATTERN: Pattern = Pattern::Customization;
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["user_id", "screen_id", "config_key", "config_value"];

    fn detect(records: &[Self::Record]) -> Detection {
        let candidates = PresetCandidate::from_preferences(&UserPreferences::collect(records));
        Detection {
            findings: customization::classify(&candidates),
            summary: Summary::Settings(candidates),
        }
    }
}
