//! Immediate visual feedback detection from event timing.
//!
//! When an interface gives no visible reaction to an action, users tend to
//! repeat it. This shows up in event logs as events following each other very
//! closely within the same interaction. The detector measures the gap between
//! consecutive events of each (user, interaction) pair and flags gaps below two
//! fixed thresholds:
//!
//! - below [`IMPATIENCE_THRESHOLD_SECS`]: the user is impatient (strong violation)
//! - below [`FEEDBACK_THRESHOLD_SECS`]: no visual feedback was perceived
//!
//! The thresholds overlap, so a gap below 0.5s is reported under both.
//!
//! # Example
//!
//! ```
//! use uxlens_analysis::{event::InteractionEvent, feedback::FeedbackAnalysis};
//! # use uxlens_analysis::event::parse_timestamp;
//!
//! let events = ["10:00:00.0", "10:00:00.3", "10:00:02.3"].map(|t| {
//!     let timestamp = parse_timestamp(&format!("2025-01-01 {t}")).unwrap();
//!     InteractionEvent::new("u1", "save", timestamp)
//! });
//!
//! let analysis = FeedbackAnalysis::from_events(&events);
//! assert_eq!(analysis.deltas.len(), 2);
//! assert_eq!(analysis.findings().len(), 2); // impatience + missing feedback for 0.3s
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;
use uxlens_stats::descriptive::DescriptiveStats;

use crate::{
    event::InteractionEvent,
    finding::{Finding, FindingStatus, Metrics, Pattern, Subject},
};

/// Gaps shorter than this indicate user impatience.
pub const IMPATIENCE_THRESHOLD_SECS: f64 = 0.5;

/// Gaps shorter than this indicate missing visual feedback.
pub const FEEDBACK_THRESHOLD_SECS: f64 = 1.0;

/// Elapsed time between an event and its predecessor in the same interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyDelta {
    pub user_id: String,
    pub interaction_id: String,
    /// Timestamp of the later event.
    pub timestamp: NaiveDateTime,
    pub secs: f64,
    /// Extra columns of the later event.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyViolation {
    MissingFeedback,
    Impatience,
}

impl LatencyViolation {
    const ALL: [Self; 2] = [Self::MissingFeedback, Self::Impatience];

    #[must_use]
    pub fn threshold_secs(self) -> f64 {
        match self {
            Self::MissingFeedback => FEEDBACK_THRESHOLD_SECS,
            Self::Impatience => IMPATIENCE_THRESHOLD_SECS,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingFeedback => "Missing pattern: no visual feedback detected (<1s)",
            Self::Impatience => "Missing pattern: impatience detected (<500 ms)",
        }
    }

    #[must_use]
    pub fn is_violated_by(self, secs: f64) -> bool {
        secs < self.threshold_secs()
    }
}

/// Timing analysis of a dataset of interaction events.
#[derive(Debug, Clone)]
pub struct FeedbackAnalysis {
    /// Number of distinct (user, interaction) groups.
    pub groups: usize,
    /// Consecutive-event gaps, ordered by group key and then by time.
    pub deltas: Vec<LatencyDelta>,
    /// Summary of all gaps, `None` when no group has two events.
    pub summary: Option<DescriptiveStats>,
}

impl FeedbackAnalysis {
    /// Groups events by (user, interaction), orders each group by time and
    /// measures the gaps between consecutive events.
    ///
    /// Events with equal timestamps keep their input order.
    #[must_use]
    pub fn from_events(events: &[InteractionEvent]) -> Self {
        let mut groups: BTreeMap<(&str, &str), Vec<&InteractionEvent>> = BTreeMap::new();
        for event in events {
            groups
                .entry((event.user_id.as_str(), event.interaction_id.as_str()))
                .or_default()
                .push(event);
        }
        tracing::debug!(
            events = events.len(),
            groups = groups.len(),
            "grouped interaction events"
        );

        let mut deltas = vec![];
        for group in groups.values_mut() {
            group.sort_by_key(|event| event.timestamp);
            deltas.extend(group.windows(2).map(|pair| LatencyDelta {
                user_id: pair[1].user_id.clone(),
                interaction_id: pair[1].interaction_id.clone(),
                timestamp: pair[1].timestamp,
                secs: elapsed_secs(pair[0].timestamp, pair[1].timestamp),
                extra: pair[1].extra.clone(),
            }));
        }

        let summary = DescriptiveStats::new(deltas.iter().map(|d| d.secs));
        Self {
            groups: groups.len(),
            deltas,
            summary,
        }
    }

    /// Deltas below the threshold of `violation`.
    pub fn violations(&self, violation: LatencyViolation) -> impl Iterator<Item = &LatencyDelta> {
        self.deltas
            .iter()
            .filter(move |delta| violation.is_violated_by(delta.secs))
    }

    /// Classifies every delta against both thresholds.
    ///
    /// Missing-feedback findings come first, followed by impatience findings.
    /// If no delta violates either threshold, a single dataset-wide
    /// implemented finding is returned instead.
    #[must_use]
    pub fn findings(&self) -> Vec<Finding> {
        let findings = LatencyViolation::ALL
            .into_iter()
            .flat_map(|violation| {
                self.violations(violation)
                    .map(move |delta| violation_finding(violation, delta))
            })
            .collect::<Vec<_>>();

        if findings.is_empty() {
            vec![Finding::implemented(Pattern::Feedback)]
        } else {
            findings
        }
    }
}

/// Runs the feedback detector over a dataset.
#[must_use]
pub fn detect(events: &[InteractionEvent]) -> Vec<Finding> {
    FeedbackAnalysis::from_events(events).findings()
}

fn violation_finding(violation: LatencyViolation, delta: &LatencyDelta) -> Finding {
    Finding {
        pattern: Pattern::Feedback,
        subject: Subject::Interaction {
            user_id: delta.user_id.clone(),
            interaction_id: delta.interaction_id.clone(),
            timestamp: delta.timestamp,
            extra: delta.extra.clone(),
        },
        status: FindingStatus::Missing,
        metrics: Metrics::Latency {
            delta_secs: delta.secs,
        },
        message: violation.message().to_owned(),
    }
}

#[expect(clippy::cast_precision_loss)]
fn elapsed_secs(earlier: NaiveDateTime, later: NaiveDateTime) -> f64 {
    let delta = later - earlier;
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}
