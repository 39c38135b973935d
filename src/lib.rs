//! micro-harness - a minimal self-registering unit-test harness
//!
//! Tests are plain functions returning a [`TestOutcome`], collected into an
//! ordered [`Registry`] before a run starts. The harness filters them by
//! exact suite/test name, executes them sequentially or across a fixed pool
//! of worker threads, and reports the failed-test count as the process exit
//! status (0 means full success).
//!
//! ## Usage
//!
//! ```no_run
//! use micro_harness::{check, micro_test, Harness, Registry, TestOutcome};
//!
//! # #[tokio::main]
//! # async fn main() -> std::process::ExitCode {
//! let mut registry = Registry::new();
//! registry.register(micro_test!(base_tests, simple_assertion, || {
//!     check!(1 + 1 == 2);
//!     TestOutcome::Pass
//! }));
//!
//! let summary = Harness::new(registry).run().await.unwrap();
//! std::process::ExitCode::from(summary.exit_code())
//! # }
//! ```
//!
//! ## Guarantees and limitations
//!
//! - The registry is frozen before execution; descriptors are immutable and
//!   may be read concurrently by any number of workers.
//! - In multithreaded mode every matching test is claimed by exactly one
//!   worker, and the failed-test count is independent of how work interleaves.
//! - Sequential mode executes (and reports) tests in registration order.
//! - There is no per-test timeout or cancellation: once a run starts it
//!   proceeds to completion, and a hung test hangs its worker.
//! - A test body that panics is outside the harness contract; there is no
//!   sandboxing around individual test execution.

pub mod cli;
pub mod error;
pub mod executor;
pub mod filter;
pub mod logging;
pub mod models;
pub mod output;
pub mod registry;

pub use error::HarnessError;
pub use executor::{Executor, Harness, WorkDistributor};
pub use filter::Filter;
pub use models::{
    ConcurrencyMode, RunConfig, RunSummary, SourceLocation, TestDescriptor, TestOutcome,
};
pub use output::{MemorySink, Reporter};
pub use registry::Registry;
