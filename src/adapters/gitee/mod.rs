//! Gitee v5 API adapter.
//!
//! Lists open enterprise issues and pull requests page by page and reads the
//! community repository tree used for ownership resolution.

pub mod client;
pub mod models;

pub use client::GiteeClient;
