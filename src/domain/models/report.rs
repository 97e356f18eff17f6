//! In-memory report buffer filled during reconciliation.

use serde::Serialize;

use super::record::RecordKind;

pub const ISSUE_REPORT_HEADER: [&str; 9] = [
    "SIG", "REPO", "LINK", "TYPE", "STATUS", "DAYS", "LABELS", "AUTHOR", "TITLE",
];

pub const PULL_REPORT_HEADER: [&str; 5] = ["SIG", "LINK", "DAYS", "STATUS", "AUTHOR"];

/// A header plus data rows, kept in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Empty table with the header used for `kind`.
    pub fn for_kind(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Issues => Self::new(ISSUE_REPORT_HEADER),
            RecordKind::Pulls => Self::new(PULL_REPORT_HEADER),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.header.len());
        self.rows.push(row);
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
