use std::path::PathBuf;

use clap::Parser;
use uxlens_analysis::finding::Pattern;

use crate::{
    output::Output,
    plan::DatasetPlan,
    report::{JsonReporter, Reporter, TextReporter},
};

mod detect;

#[derive(Debug, Clone, Copy, derive_more::FromStr)]
enum OutputFormat {
    Text,
    Json,
}

/// Detects usability patterns in recorded UI event logs
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// CSV file to analyze; without it the dataset plan is run
    csv_file: Option<PathBuf>,

    /// Patterns to check (comma-separated); all of them if omitted
    #[arg(long, value_delimiter = ',')]
    pattern: Vec<Pattern>,

    /// JSON file listing the datasets to analyze instead of the built-in fixtures
    #[arg(long, conflicts_with = "csv_file")]
    plan: Option<PathBuf>,

    /// Report format: text or json
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl CommandArgs {
    fn dataset_plan(&self) -> anyhow::Result<DatasetPlan> {
        if let Some(csv_file) = &self.csv_file {
            return Ok(DatasetPlan::for_file(csv_file, &self.pattern));
        }
        let plan = match &self.plan {
            Some(path) => DatasetPlan::from_json_file(path)?,
            None => DatasetPlan::builtin(),
        };
        Ok(plan.retain_patterns(&self.pattern))
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let plan = args.dataset_plan()?;
    let output = Output::open(args.output)?;
    tracing::debug!(
        datasets = plan.datasets.len(),
        output = %output.target(),
        "running dataset plan"
    );

    let mut reporter: Box<dyn Reporter> = match args.format {
        OutputFormat::Text => Box::new(TextReporter::new(output)),
        OutputFormat::Json => Box::new(JsonReporter::new(output)),
    };
    detect::run_plan(&plan, reporter.as_mut())
}
