//! Failure report rendering and output
//!
//! The report is a markdown table of every broken link. It is only
//! rendered and written when there is at least one failure.

use crate::checker::FailureRecord;
use crate::error::{CheckerError, Result};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination for the rendered report text
pub trait ReportSink {
    fn write_report(&mut self, report: &str) -> Result<()>;
}

/// Writes the report to a file, replacing any existing content
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileSink {
    fn write_report(&mut self, report: &str) -> Result<()> {
        let write_err = |source: std::io::Error| CheckerError::WriteReport {
            path: self.path.clone(),
            source,
        };

        let mut file = File::create(&self.path).map_err(write_err)?;
        file.write_all(report.as_bytes()).map_err(write_err)?;
        Ok(())
    }
}

/// Formats failures as the markdown report
///
/// ```text
/// # Manual Check Required
///
/// | Section | API | Error |
/// |---------|-----|-------|
/// | Animals | [Dog API](http://dog.example/y) | 404 |
/// ```
pub fn render_report(failures: &[FailureRecord]) -> String {
    let mut md = String::new();

    md.push_str("# Manual Check Required\n\n");
    md.push_str("| Section | API | Error |\n");
    md.push_str("|---------|-----|-------|\n");

    for failure in failures {
        md.push_str(&format!(
            "| {} | [{}]({}) | {} |\n",
            failure.section, failure.name, failure.link, failure.error
        ));
    }

    md
}

/// Default report file name for a given day: `<base>_YYYY-MM-DD.txt`
pub fn timestamped_report_name(base: &str, date: NaiveDate) -> String {
    format!("{}_{}.txt", base, date.format("%Y-%m-%d"))
}
