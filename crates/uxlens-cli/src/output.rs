//! Destination of the rendered report

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;

/// Where a report is written.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum OutputTarget {
    #[display("stdout")]
    Stdout,
    #[display("{}", _0.display())]
    File(PathBuf),
}

/// A buffered writer for an [`OutputTarget`].
pub struct Output {
    target: OutputTarget,
    writer: Box<dyn Write>,
}

impl Output {
    /// Opens `path` for writing, or standard output if `None`.
    pub fn open(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self {
                target: OutputTarget::Stdout,
                writer: Box::new(io::stdout().lock()),
            });
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        Ok(Self {
            target: OutputTarget::File(path),
            writer: Box::new(BufWriter::new(file)),
        })
    }

    pub fn target(&self) -> &OutputTarget {
        &self.target
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_target_display() {
        assert_eq!(OutputTarget::Stdout.to_string(), "stdout");
        assert_eq!(
            OutputTarget::File(PathBuf::from("out/report.json")).to_string(),
            "out/report.json"
        );
    }

    #[test]
    fn test_file_output_is_flushed() {
        let path = std::env::temp_dir().join(format!("uxlens-output-{}.txt", std::process::id()));
        let mut output = Output::open(Some(path.clone())).unwrap();
        assert_eq!(output.target(), &OutputTarget::File(path.clone()));
        write!(output, "Reviewed file: a.csv").unwrap();
        output.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Reviewed file: a.csv");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unwritable_path() {
        let err = Output::open(Some(PathBuf::from("does/not/exist/report.txt")))
            .err()
            .unwrap();
        assert!(
            err.to_string().contains("does/not/exist/report.txt"),
            "{err}"
        );
    }
}
