//! Run configuration sources.

pub mod duration;
pub mod file;

pub use duration::{parse_duration_range, parse_duration_secs};
pub use file::ConfigFile;
