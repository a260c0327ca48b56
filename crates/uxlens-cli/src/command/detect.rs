//! Runs detectors over the datasets of a plan

use anyhow::bail;
use uxlens_analysis::{
    AutocompleteDetector, CustomizationDetector, Detector, FeedbackDetector, finding::Pattern,
};

use crate::{
    dataset::{self, LoadError},
    plan::{DatasetEntry, DatasetPlan},
    report::{DatasetReport, Reporter},
};

/// Analyzes every dataset in order, reporting each one as it completes.
///
/// A dataset that fails to load is reported as a failure and the remaining
/// datasets still run; the failures are returned as one error at the end.
pub(crate) fn run_plan(plan: &DatasetPlan, reporter: &mut dyn Reporter) -> anyhow::Result<()> {
    let mut failed = vec![];
    for entry in &plan.datasets {
        tracing::info!(
            name = %entry.name,
            path = %entry.path.display(),
            pattern = %entry.pattern,
            "analyzing dataset"
        );
        match analyze(entry) {
            Ok(report) => reporter.report(&report)?,
            Err(error) => {
                tracing::error!(name = %entry.name, %error, "failed to load dataset");
                reporter.report_failure(entry, &error)?;
                failed.push(entry.name.as_str());
            }
        }
    }
    reporter.finish()?;

    if !failed.is_empty() {
        bail!(
            "{} of {} datasets failed to load: {}",
            failed.len(),
            plan.datasets.len(),
            failed.join(", ")
        );
    }
    Ok(())
}

pub(crate) fn analyze(entry: &DatasetEntry) -> Result<DatasetReport, LoadError> {
    match entry.pattern {
        Pattern::Feedback => analyze_with::<FeedbackDetector>(entry),
        Pattern::Autocomplete => analyze_with::<AutocompleteDetector>(entry),
        Pattern::Customization => analyze_with::<CustomizationDetector>(entry),
    }
}

fn analyze_with<D>(entry: &DatasetEntry) -> Result<DatasetReport, LoadError>
where
    D: Detector,
{
    let records = dataset::load_records::<D>(&entry.path)?;
    tracing::debug!(name = %entry.name, records = records.len(), "dataset loaded");

    let detection = D::detect(&records);
    let actionable = detection
        .findings
        .iter()
        .filter(|finding| finding.is_actionable())
        .count();
    tracing::info!(
        name = %entry.name,
        findings = detection.findings.len(),
        actionable,
        "dataset analyzed"
    );

    Ok(DatasetReport {
        name: entry.name.clone(),
        path: entry.path.clone(),
        pattern: D::PATTERN,
        records: records.len(),
        summary: detection.summary,
        findings: detection.findings,
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use uxlens_analysis::finding::{FindingStatus, Subject};

    use super::*;

    fn fixtures() -> DatasetPlan {
        DatasetPlan::fixtures_in(&Path::new(env!("CARGO_MANIFEST_DIR")).join("../../res"))
    }

    fn statuses(report: &DatasetReport) -> Vec<FindingStatus> {
        report.findings.iter().map(|f| f.status).collect()
    }

    #[derive(Default)]
    struct Recorder {
        reports: Vec<DatasetReport>,
        failures: Vec<String>,
        finished: bool,
    }

    impl Reporter for Recorder {
        fn report(&mut self, report: &DatasetReport) -> anyhow::Result<()> {
            self.reports.push(report.clone());
            Ok(())
        }

        fn report_failure(
            &mut self,
            entry: &DatasetEntry,
            _error: &LoadError,
        ) -> anyhow::Result<()> {
            self.failures.push(entry.name.clone());
            Ok(())
        }

        fn finish(&mut self) -> anyhow::Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn test_feedback_fixtures() {
        let plan = fixtures();
        let positive = analyze(&plan.datasets[0]).unwrap();
        let missing = positive
            .findings
            .iter()
            .filter(|f| f.message.contains("no visual feedback"))
            .count();
        let impatience = positive
            .findings
            .iter()
            .filter(|f| f.message.contains("impatience"))
            .count();
        assert_eq!((missing, impatience), (5, 3));
        assert!(
            positive
                .findings
                .iter()
                .all(|f| matches!(f.subject, Subject::Interaction { .. }))
        );

        let negative = analyze(&plan.datasets[1]).unwrap();
        assert_eq!(statuses(&negative), [FindingStatus::Implemented]);
    }

    #[test]
    fn test_autocomplete_fixtures() {
        let plan = fixtures();
        let positive = analyze(&plan.datasets[2]).unwrap();
        assert_eq!(positive.records, 30);
        assert_eq!(
            statuses(&positive),
            [
                FindingStatus::Candidate,
                FindingStatus::Candidate,
                FindingStatus::Missing,
                FindingStatus::Implemented,
            ]
        );

        let negative = analyze(&plan.datasets[3]).unwrap();
        assert!(negative.findings.iter().all(|f| f.status.is_implemented()));
        assert_eq!(negative.findings.len(), 3);
    }

    #[test]
    fn test_customization_fixtures() {
        let plan = fixtures();
        let positive = analyze(&plan.datasets[4]).unwrap();
        let presets = positive
            .findings
            .iter()
            .map(|f| match &f.subject {
                Subject::Setting {
                    screen_id,
                    config_key,
                    ..
                } => format!("{screen_id}/{config_key}"),
                other => panic!("unexpected subject {other:?}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(presets, ["dashboard/layout", "settings/theme"]);

        let negative = analyze(&plan.datasets[5]).unwrap();
        assert_eq!(statuses(&negative), [FindingStatus::Implemented]);
    }

    #[test]
    fn test_run_plan_continues_after_failure() {
        let mut plan = fixtures();
        plan.datasets.insert(
            1,
            DatasetEntry {
                name: "absent".into(),
                path: PathBuf::from("does/not/exist.csv"),
                pattern: Pattern::Feedback,
            },
        );

        let mut recorder = Recorder::default();
        let err = run_plan(&plan, &mut recorder).unwrap_err();
        assert_eq!(err.to_string(), "1 of 7 datasets failed to load: absent");
        assert_eq!(recorder.failures, ["absent"]);
        assert_eq!(recorder.reports.len(), 6);
        assert!(recorder.finished);
    }

    #[test]
    fn test_run_plan_succeeds_on_fixtures() {
        let mut recorder = Recorder::default();
        run_plan(&fixtures(), &mut recorder).unwrap();
        let names = recorder
            .reports
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "feedback",
                "feedback-negative",
                "autocomplete",
                "autocomplete-negative",
                "customization",
                "customization-negative",
            ]
        );
    }
}
