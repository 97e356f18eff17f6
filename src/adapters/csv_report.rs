//! CSV report sink.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use csv::{Terminator, WriterBuilder};
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::ReportTable;
use crate::domain::ports::ReportSink;

const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Writes `<dir>/<base>-<YYYYMMDDHHMMSS>.csv`, comma separated with CRLF line
/// endings. Files are opened for append so an existing report is never
/// truncated.
#[derive(Debug, Clone)]
pub struct CsvReportSink {
    output_dir: PathBuf,
}

impl CsvReportSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path of the report for `base_name` stamped with `at`.
    pub fn report_path(&self, base_name: &str, at: DateTime<Local>) -> PathBuf {
        self.output_dir
            .join(format!("{base_name}-{}.csv", at.format(FILE_TIMESTAMP_FORMAT)))
    }

    pub fn write_at(&self, table: &ReportTable, base_name: &str, at: DateTime<Local>) -> DomainResult<PathBuf> {
        let path = self.report_path(base_name, at);
        write_table(&path, table)?;
        info!(path = %path.display(), rows = table.len(), "report written");
        Ok(path)
    }
}

impl ReportSink for CsvReportSink {
    fn write(&self, table: &ReportTable, base_name: &str) -> DomainResult<PathBuf> {
        self.write_at(table, base_name, Local::now())
    }
}

fn write_table(path: &Path, table: &ReportTable) -> DomainResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .terminator(Terminator::CRLF)
        .from_writer(file);

    writer.write_record(table.header())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
