//! Load test command handlers.
//!
//! This module contains handlers for the `run` and `report` commands.

pub mod args;
pub mod report;
pub mod run;

pub use args::{BackendArgs, ReportArgs, RunArgs};
pub use report::run_report;
pub use run::run_load_test;
