//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interfaces the reconciliation pipeline
//! depends on:
//! - RemoteSource: paginated issue/pull listings and the community tree
//! - RecordStore: keyed upserts of issue and pull rows
//! - ReportSink: persistence of the finished report table
//!
//! These traits keep the pipeline independent of Gitee, MySQL/SQLite and the
//! CSV writer.

pub mod record_store;
pub mod remote_source;
pub mod report_sink;

pub use record_store::RecordStore;
pub use remote_source::{FetchError, FetchResult, RemoteSource};
pub use report_sink::ReportSink;
