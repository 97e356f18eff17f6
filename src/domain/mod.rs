//! Domain layer for the sigstats reconciliation pipeline
//!
//! This module contains the record model, the repository ownership map and the
//! ports the pipeline talks to.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
