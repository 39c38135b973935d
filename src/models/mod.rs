//! Data models for the harness
//!
//! Test descriptors, run configuration, and run summaries.

mod config;
mod descriptor;
mod summary;

pub use config::{ConcurrencyMode, RunConfig};
pub use descriptor::{SourceLocation, TestDescriptor, TestOutcome};
pub use summary::RunSummary;
