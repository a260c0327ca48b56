//! Report sinks for detector results
//!
//! A [`Reporter`] receives one [`DatasetReport`] per analyzed dataset, or a
//! load failure in its place, and renders them to an [`Output`](crate::output::Output).

use std::path::PathBuf;

use serde::Serialize;
use uxlens_analysis::{
    Summary,
    finding::{Finding, Pattern},
};

use crate::{dataset::LoadError, plan::DatasetEntry};

pub use self::{json::JsonReporter, text::TextReporter};

mod json;
mod text;

/// Findings of one detector on one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub name: String,
    pub path: PathBuf,
    pub pattern: Pattern,
    /// Number of records loaded from the dataset
    pub records: usize,
    #[serde(skip)]
    pub summary: Summary,
    pub findings: Vec<Finding>,
}

pub trait Reporter {
    fn report(&mut self, report: &DatasetReport) -> anyhow::Result<()>;

    fn report_failure(&mut self, entry: &DatasetEntry, error: &LoadError) -> anyhow::Result<()>;

    /// Called once after the last dataset.
    fn finish(&mut self) -> anyhow::Result<()>;
}
