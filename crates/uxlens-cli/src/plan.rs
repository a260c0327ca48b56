//! Dataset plans: which files to analyze with which detector.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use uxlens_analysis::finding::Pattern;

/// One dataset to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// Label shown in reports and logs
    pub name: String,
    pub path: PathBuf,
    pub pattern: Pattern,
}

/// Ordered list of datasets analyzed in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPlan {
    pub datasets: Vec<DatasetEntry>,
}

impl DatasetPlan {
    /// Positive and negative example fixture for each pattern, relative to the working directory.
    #[must_use]
    pub fn builtin() -> Self {
        Self::fixtures_in(Path::new("res"))
    }

    /// The built-in fixtures resolved against `dir`.
    #[must_use]
    pub fn fixtures_in(dir: &Path) -> Self {
        // (pattern, dataset name, file stem); negatives add `NO` to the stem
        const FIXTURES: [(Pattern, &str, &str); 3] = [
            (Pattern::Feedback, "feedback", "pattern1"),
            (Pattern::Autocomplete, "autocomplete", "pattern2"),
            (Pattern::Customization, "customization", "pattern3"),
        ];
        let datasets = FIXTURES
            .into_iter()
            .flat_map(|(pattern, name, stem)| {
                let positive = DatasetEntry {
                    name: name.to_owned(),
                    path: dir.join(format!("{stem}.csv")),
                    pattern,
                };
                let negative = DatasetEntry {
                    name: format!("{name}-negative"),
                    path: dir.join(format!("{stem}NO.csv")),
                    pattern,
                };
                [positive, negative]
            })
            .collect();
        Self { datasets }
    }

    /// Runs the given patterns (all of them if empty) on a single file.
    #[must_use]
    pub fn for_file(path: &Path, patterns: &[Pattern]) -> Self {
        let patterns = if patterns.is_empty() {
            Pattern::ALL.to_vec()
        } else {
            patterns.to_vec()
        };
        let datasets = patterns
            .into_iter()
            .map(|pattern| DatasetEntry {
                name: path.display().to_string(),
                path: path.to_owned(),
                pattern,
            })
            .collect();
        Self { datasets }
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset plan: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse dataset plan: {}", path.display()))
    }

    /// Keeps only entries for the given patterns; an empty list keeps everything.
    #[must_use]
    pub fn retain_patterns(mut self, patterns: &[Pattern]) -> Self {
        if !patterns.is_empty() {
            self.datasets
                .retain(|entry| patterns.contains(&entry.pattern));
        }
        self
    }
}
