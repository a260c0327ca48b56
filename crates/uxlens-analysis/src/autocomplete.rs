//! Autocomplete detection from the distribution of field values.
//!
//! For every input field the detector builds a frequency table of the values
//! users entered and derives two measures:
//!
//! - **coverage**: share of entries taken by the single most common value
//! - **normalized entropy**: Shannon entropy divided by `log2(distinct values)`
//!
//! A dominant value (`coverage >= 0.7`) makes the field a candidate for
//! autocomplete or a default. Low variety (`H_norm < 0.3`) means users keep
//! typing the same few values by hand, so the pattern is missing. A field with neither
//! property is considered to implement the pattern. The checks are independent
//! and every check that applies yields its own finding.

use std::collections::BTreeMap;

use serde::Serialize;
use uxlens_stats::{entropy::Entropy, frequency::FrequencyTable};

use crate::{
    event::FieldInputEvent,
    finding::{Finding, FindingStatus, Metrics, Pattern, Subject},
};

/// Fields whose most common value reaches this share are autocomplete candidates.
pub const COVERAGE_THRESHOLD: f64 = 0.7;

/// Fields with normalized entropy below this show too little variety.
pub const LOW_VARIETY_THRESHOLD: f64 = 0.3;

/// Value distribution of one input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStats {
    pub field_id: String,
    /// Number of entries for the field.
    pub samples: usize,
    /// Number of distinct values.
    pub distinct: usize,
    /// Most common value (lexically smallest on ties).
    pub most_common: String,
    /// Share of entries holding the most common value.
    pub coverage: f64,
    /// Shannon entropy in bits.
    pub entropy_bits: f64,
    /// Entropy scaled to `[0, 1]`; zero when only one value is present.
    pub normalized_entropy: f64,
}

impl FieldStats {
    /// Computes statistics for the values entered into one field.
    ///
    /// Returns `None` if `values` is empty.
    #[must_use]
    pub fn from_values<'a, I>(field_id: &str, values: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let table = FrequencyTable::new(values);
        let (most_common, _) = table.most_common()?;
        let coverage = table.coverage()?;
        let entropy = Entropy::from_table(&table);
        Some(Self {
            field_id: field_id.to_owned(),
            samples: table.total(),
            distinct: table.distinct(),
            most_common: (*most_common).to_owned(),
            coverage,
            entropy_bits: entropy.bits,
            normalized_entropy: entropy.normalized,
        })
    }

    /// Statistics for every field of a dataset, ordered by field id.
    #[must_use]
    pub fn collect_by_field(events: &[FieldInputEvent]) -> Vec<Self> {
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for event in events {
            groups
                .entry(event.field_id.as_str())
                .or_default()
                .push(event.input_value.as_str());
        }
        tracing::debug!(
            events = events.len(),
            fields = groups.len(),
            "grouped field input events"
        );

        groups
            .into_iter()
            .filter_map(|(field_id, values)| Self::from_values(field_id, values))
            .collect()
    }

    #[must_use]
    pub fn is_dominated(&self) -> bool {
        self.coverage >= COVERAGE_THRESHOLD
    }

    #[must_use]
    pub fn has_low_variety(&self) -> bool {
        self.normalized_entropy < LOW_VARIETY_THRESHOLD
    }

    /// Applies the three independent checks to this field.
    #[must_use]
    pub fn findings(&self) -> Vec<Finding> {
        let mut findings = vec![];
        if self.is_dominated() {
            findings.push(self.finding(
                FindingStatus::Candidate,
                "Candidate for AUTOCOMPLETE (coverage ≥70%)",
            ));
        }
        if self.has_low_variety() {
            findings.push(self.finding(
                FindingStatus::Missing,
                "Low variety (H_norm <0.3) → Missing pattern",
            ));
        }
        if !self.is_dominated() && !self.has_low_variety() {
            findings.push(self.finding(FindingStatus::Implemented, "Pattern is implemented"));
        }
        findings
    }

    fn finding(&self, status: FindingStatus, message: &str) -> Finding {
        Finding {
            pattern: Pattern::Autocomplete,
            subject: Subject::Field {
                field_id: self.field_id.clone(),
            },
            status,
            metrics: Metrics::Distribution {
                samples: self.samples,
                distinct: self.distinct,
                most_common: self.most_common.clone(),
                coverage: self.coverage,
                entropy_bits: self.entropy_bits,
                normalized_entropy: self.normalized_entropy,
            },
            message: message.to_owned(),
        }
    }
}

/// Runs the autocomplete detector over a dataset.
#[must_use]
pub fn detect(events: &[FieldInputEvent]) -> Vec<Finding> {
    FieldStats::collect_by_field(events)
        .iter()
        .flat_map(FieldStats::findings)
        .collect()
}
