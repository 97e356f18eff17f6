//! Infrastructure adapters for external systems.

pub mod csv_report;
pub mod gitee;
pub mod mysql;
pub mod sqlite;
pub mod store;

pub use csv_report::CsvReportSink;
pub use gitee::GiteeClient;
pub use store::{open_record_store, ConnectionError, DatabaseError, PoolConfig};
