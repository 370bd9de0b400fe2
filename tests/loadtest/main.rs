//! Load testing integration tests.
//!
//! These tests drive the `run` and `report` command handlers end to end
//! against the in-process simulated backend:
//! 1. Resolve parameters from defaults, config files and flags
//! 2. Run the simulated users to completion
//! 3. Persist the metrics file and read it back through `report`

mod report_command;
mod run_command;
