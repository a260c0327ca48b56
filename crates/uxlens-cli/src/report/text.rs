//! Human-readable console report

use std::{
    fmt,
    io::{self, Write},
};

use anyhow::Context;
use uxlens_analysis::{
    Summary,
    autocomplete::FieldStats,
    finding::{Finding, FindingStatus, Metrics, Subject},
};
use uxlens_stats::descriptive::DescriptiveStats;

use super::{DatasetReport, Reporter};
use crate::{dataset::LoadError, plan::DatasetEntry};

#[derive(Debug)]
pub struct TextReporter<W> {
    writer: W,
}

impl<W> TextReporter<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Reporter for TextReporter<W>
where
    W: Write,
{
    fn report(&mut self, report: &DatasetReport) -> anyhow::Result<()> {
        write_report(&mut self.writer, report)
            .with_context(|| format!("Failed to write report for {}", report.name))
    }

    fn report_failure(&mut self, entry: &DatasetEntry, error: &LoadError) -> anyhow::Result<()> {
        writeln!(self.writer, "Reviewed file: {}", entry.path.display())
            .and_then(|()| writeln!(self.writer, "❗ Failed to load dataset: {error}\n"))
            .with_context(|| format!("Failed to write report for {}", entry.name))
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.writer.flush().context("Failed to flush report")
    }
}

fn write_report<W>(w: &mut W, report: &DatasetReport) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        w,
        "Reviewed file: {} ({}, {} records)",
        report.path.display(),
        report.pattern,
        report.records
    )?;

    match &report.summary {
        Summary::Fields(fields) => {
            for field in fields {
                write_field_stats(w, field)?;
                let field_findings = report.findings.iter().filter(|finding| {
                    matches!(&finding.subject, Subject::Field { field_id } if *field_id == field.field_id)
                });
                for finding in field_findings {
                    writeln!(w, "{}", FindingLine(finding))?;
                }
            }
        }
        Summary::Latency(latency) => {
            for finding in &report.findings {
                writeln!(w, "{}", FindingLine(finding))?;
            }
            if let Some(stats) = latency {
                write_latency_stats(w, stats)?;
            }
        }
        Summary::Settings(_) => {
            for finding in &report.findings {
                writeln!(w, "{}", FindingLine(finding))?;
            }
        }
    }

    writeln!(w)
}

fn write_field_stats<W>(w: &mut W, field: &FieldStats) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "Analysed Field(s): {}", field.field_id)?;
    writeln!(w, "- Distinct values: {}", field.distinct)?;
    writeln!(
        w,
        "- Max coverage: {:.1}% ({})",
        field.coverage * 100.0,
        field.most_common
    )?;
    writeln!(w, "- Normalized Entropy: {:.3}", field.normalized_entropy)
}

fn write_latency_stats<W>(w: &mut W, stats: &DescriptiveStats) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        w,
        "Latency between consecutive events: n={}, min={:.3}s, median={:.3}s, mean={:.3}s, max={:.3}s",
        stats.count, stats.min, stats.median, stats.mean, stats.max
    )
}

fn glyph(status: FindingStatus) -> &'static str {
    match status {
        FindingStatus::Implemented => "✔",
        FindingStatus::Missing | FindingStatus::Candidate => "❗",
    }
}

/// One finding rendered as a single line.
struct FindingLine<'a>(&'a Finding);

impl fmt::Display for FindingLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let finding = self.0;
        write!(f, "{} {}", glyph(finding.status), finding.message)?;

        match (&finding.subject, &finding.metrics) {
            (
                Subject::Interaction {
                    user_id,
                    interaction_id,
                    timestamp,
                    extra,
                },
                Metrics::Latency { delta_secs },
            ) => {
                write!(
                    f,
                    ": user={user_id}, interaction={interaction_id}, timestamp={timestamp}, delta={delta_secs:.3}s"
                )?;
                for (column, value) in extra {
                    write!(f, ", {column}={value}")?;
                }
                Ok(())
            }
            (
                Subject::Setting {
                    users,
                    screen_id,
                    config_key,
                },
                Metrics::Preset {
                    value, coverage, ..
                },
            ) => write!(
                f,
                ": user={users}, screen={screen_id}, key={config_key}, val={value}, coverage={coverage:.2}"
            ),
            // Field metrics are printed in the field block above the findings.
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use uxlens_analysis::{
        AutocompleteDetector, CustomizationDetector, Detector, FeedbackDetector,
        event::{ConfigEvent, FieldInputEvent, InteractionEvent, parse_timestamp},
        finding::Pattern,
    };

    use super::*;

    fn render(report: &DatasetReport) -> String {
        let mut reporter = TextReporter::new(vec![]);
        reporter.report(report).unwrap();
        reporter.finish().unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    fn dataset_report<D: Detector>(records: &[D::Record]) -> DatasetReport {
        let detection = D::detect(records);
        DatasetReport {
            name: "test".to_owned(),
            path: PathBuf::from("test.csv"),
            pattern: D::PATTERN,
            records: records.len(),
            summary: detection.summary,
            findings: detection.findings,
        }
    }

    fn city_inputs(values: &[&str]) -> Vec<FieldInputEvent> {
        values
            .iter()
            .map(|value| FieldInputEvent {
                field_id: "city".into(),
                input_value: (*value).into(),
            })
            .collect()
    }

    fn theme_choices(values: &[&str]) -> Vec<ConfigEvent> {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| ConfigEvent {
                user_id: format!("u{i}"),
                screen_id: "settings".into(),
                config_key: "theme".into(),
                config_value: (*value).into(),
            })
            .collect()
    }

    #[test]
    fn test_feedback_lines() {
        let events = ["09:00:00.000", "09:00:00.300", "09:00:03.300"].map(|t| {
            let timestamp = parse_timestamp(&format!("2025-09-16 {t}")).unwrap();
            let mut event = InteractionEvent::new("u1", "i1", timestamp);
            event.extra.insert("element_id".into(), "btn_save".into());
            event.extra.insert("event_type".into(), "click".into());
            event
        });
        let text = render(&dataset_report::<FeedbackDetector>(&events));
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(
            lines[0],
            "Reviewed file: test.csv (Immediate Visual Feedback, 3 records)"
        );
        assert_eq!(
            lines[1],
            "❗ Missing pattern: no visual feedback detected (<1s): user=u1, interaction=i1, timestamp=2025-09-16 09:00:00.300, delta=0.300s, element_id=btn_save, event_type=click"
        );
        assert!(lines[2].starts_with("❗ Missing pattern: impatience detected (<500 ms)"));
        assert_eq!(
            lines[3],
            "Latency between consecutive events: n=2, min=0.300s, median=1.650s, mean=1.650s, max=3.000s"
        );
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[4], "");
    }

    #[test]
    fn test_field_block() {
        let mut values = vec!["Milan"; 8];
        values.extend(["Rome", "Turin"]);
        let events = city_inputs(&values);
        let text = render(&dataset_report::<AutocompleteDetector>(&events));
        let expected = "\
Reviewed file: test.csv (Autocomplete, 10 records)
Analysed Field(s): city
- Distinct values: 3
- Max coverage: 80.0% (Milan)
- Normalized Entropy: 0.582
❗ Candidate for AUTOCOMPLETE (coverage ≥70%)

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_preset_line() {
        let events = theme_choices(&["dark", "dark", "light"]);
        let text = render(&dataset_report::<CustomizationDetector>(&events));
        assert!(
            text.contains(
                "❗ Preset global candidate (≥51% users): user=ALL, screen=settings, key=theme, val=dark, coverage=0.67"
            ),
            "{text}"
        );
    }

    #[test]
    fn test_implemented_line() {
        let events = theme_choices(&["dark", "light"]);
        let text = render(&dataset_report::<CustomizationDetector>(&events));
        assert!(text.contains("\n✔ Pattern is implemented\n"), "{text}");
    }

    #[test]
    fn test_failure_block() {
        let entry = DatasetEntry {
            name: "broken".into(),
            path: PathBuf::from("broken.csv"),
            pattern: Pattern::Autocomplete,
        };
        let error = LoadError::MissingColumn {
            column: "field_id".into(),
        };
        let mut reporter = TextReporter::new(vec![]);
        reporter.report_failure(&entry, &error).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            text,
            "Reviewed file: broken.csv\n❗ Failed to load dataset: missing required column 'field_id'\n\n"
        );
    }
}
