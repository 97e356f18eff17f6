//! Display helpers for CLI output formatting.

pub mod table;

pub use table::{count_cell, list_table, render_list};
