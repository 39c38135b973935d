//! Harness error types

use thiserror::Error;

/// Errors surfaced by the harness
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Rejected before any test executes.
    #[error("worker count must be a positive integer (got {0}); try --threads <n>")]
    InvalidWorkerCount(usize),

    /// One or more workers never returned a tally, so the failed-test count
    /// would undercount. The run is aborted rather than reported incomplete.
    #[error("worker pool failure: {0} worker(s) terminated abnormally")]
    WorkerLost(usize),

    /// Bad or missing command-line flags; the rendered error carries the
    /// usage hint.
    #[error(transparent)]
    InvalidArgs(#[from] clap::Error),
}
