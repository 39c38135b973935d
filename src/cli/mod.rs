//! CLI argument parsing
//!
//! Thin option-to-field mapping above the core, using clap. Unrecognized
//! flags and missing values fail immediately with a usage hint.

use clap::Parser;

use crate::models::{ConcurrencyMode, RunConfig};

/// Minimal unit-test harness
#[derive(Parser, Debug)]
#[command(name = "micro-harness")]
#[command(about = "Run registered tests and exit with the failed-test count")]
pub struct Args {
    /// List matching tests without executing them
    #[arg(long)]
    pub list: bool,

    /// Run a specific suite (exact name)
    #[arg(long, value_name = "suite-name")]
    pub suite: Option<String>,

    /// Run a specific test (exact name)
    #[arg(long, value_name = "test-name")]
    pub test: Option<String>,

    /// Run tests on multiple threads
    #[arg(long)]
    pub multithreaded: bool,

    /// Number of threads (use with --multithreaded)
    #[arg(long, value_name = "n", default_value_t = 4,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: u32,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,

    /// Additional debug prints
    #[arg(long)]
    pub debug: bool,

    /// Do not print OK results
    #[arg(long)]
    pub quiet: bool,
}

impl Args {
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            suite_filter: self.suite.clone(),
            test_filter: self.test.clone(),
            concurrency: if self.multithreaded {
                ConcurrencyMode::Parallel {
                    workers: self.threads as usize,
                }
            } else {
                ConcurrencyMode::Sequential
            },
            quiet: self.quiet,
            debug: self.debug,
            banner: !self.no_banner,
        }
    }
}
