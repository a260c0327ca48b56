//! Machine-readable report: all datasets as one JSON array

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use super::{DatasetReport, Reporter};
use crate::{dataset::LoadError, plan::DatasetEntry};

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonEntry {
    Report(DatasetReport),
    Failure {
        #[serde(flatten)]
        entry: DatasetEntry,
        error: String,
    },
}

#[derive(Debug)]
pub struct JsonReporter<W> {
    writer: W,
    entries: Vec<JsonEntry>,
}

impl<W> JsonReporter<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entries: vec![],
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Reporter for JsonReporter<W>
where
    W: Write,
{
    fn report(&mut self, report: &DatasetReport) -> anyhow::Result<()> {
        self.entries.push(JsonEntry::Report(report.clone()));
        Ok(())
    }

    fn report_failure(&mut self, entry: &DatasetEntry, error: &LoadError) -> anyhow::Result<()> {
        self.entries.push(JsonEntry::Failure {
            entry: entry.clone(),
            error: error.to_string(),
        });
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.entries)
            .context("Failed to write JSON report")?;
        writeln!(self.writer).context("Failed to write newline after JSON report")?;
        self.writer.flush().context("Failed to flush JSON report")
    }
}
