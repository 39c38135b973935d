//! Test execution engine
//!
//! Provides sequential and worker-pool execution over the registry.

mod parallel;
mod runner;

pub use parallel::WorkDistributor;
pub use runner::{Executor, Harness};
