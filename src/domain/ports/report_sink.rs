//! Report sink port.

use std::path::PathBuf;

use crate::domain::errors::DomainResult;
use crate::domain::models::ReportTable;

/// Destination for a finished report table.
pub trait ReportSink: Send + Sync {
    /// Persist `table` under `base_name`, returning where it was written.
    fn write(&self, table: &ReportTable, base_name: &str) -> DomainResult<PathBuf>;
}
