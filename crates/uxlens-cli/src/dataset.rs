//! CSV loading of event datasets
//!
//! A dataset is a comma-separated file with a header row. Columns are matched
//! to record fields by name; columns the detector does not require are handed
//! to [`Detector::attach_extra_columns`]. A dataset that cannot be opened, lacks
//! a required column or contains a malformed row fails to load as a whole.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use uxlens_analysis::Detector;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to read CSV header: {source}")]
    Header { source: csv::Error },
    #[display("missing required column '{column}'")]
    MissingColumn { column: String },
    #[display("invalid record at line {line}: {reason}")]
    Record {
        line: u64,
        reason: String,
        source: csv::Error,
    },
}

impl LoadError {
    fn record(index: usize, source: csv::Error) -> Self {
        // header is line 1
        let line = source
            .position()
            .map_or(index as u64 + 2, csv::Position::line);
        let reason = match source.kind() {
            csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => format!("found {len} fields, expected {expected_len}"),
            _ => source.to_string(),
        };
        LoadError::Record {
            line,
            reason,
            source,
        }
    }
}

/// Loads the records a detector consumes from a CSV file.
pub fn load_records<D>(path: &Path) -> Result<Vec<D::Record>, LoadError>
where
    D: Detector,
{
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    read_records::<D, _>(BufReader::new(file))
}

/// Reads the records of detector `D` from CSV text, checking the header first.
pub fn read_records<D, R>(reader: R) -> Result<Vec<D::Record>, LoadError>
where
    D: Detector,
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Header { source })?
        .clone();
    if let Some(column) = D::REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(LoadError::MissingColumn {
            column: (*column).to_owned(),
        });
    }

    reader
        .records()
        .enumerate()
        .map(|(index, row)| -> Result<D::Record, LoadError> {
            let row = row.map_err(|source| LoadError::record(index, source))?;
            let mut record = row
                .deserialize::<D::Record>(Some(&headers))
                .map_err(|source| LoadError::record(index, source))?;
            let extra = headers
                .iter()
                .zip(&row)
                .filter(|(header, _)| !is_required::<D>(header))
                .map(|(header, value)| (header.to_owned(), value.to_owned()))
                .collect::<BTreeMap<_, _>>();
            D::attach_extra_columns(&mut record, extra);
            Ok(record)
        })
        .collect()
}

fn is_required<D>(column: &str) -> bool
where
    D: Detector,
{
    D::REQUIRED_COLUMNS.iter().any(|required| *required == column)
}
