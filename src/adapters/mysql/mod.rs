//! MySQL adapters for the production record store.
//!
//! The `issue` and `pull` tables are owned by the deployment; nothing here
//! creates or migrates them.

pub mod connection;
pub mod record_store;

pub use connection::{connect_options, create_pool, verify_connection};
pub use record_store::MySqlRecordStore;
