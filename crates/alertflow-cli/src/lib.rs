//! Alertflow command-line front end.
//!
//! Loads records (built-in sample, a JSON record file, or raw spreadsheet
//! rows), applies config and command-line filters, and renders one view.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
pub use commands::{load_records, render_tree, run};
pub use config::AlertflowConfig;
