//! micro-harness demo binary
//!
//! Registers a handful of sample tests and hands them to the harness,
//! showing the intended embedding: build a registry, run it with the
//! process arguments, exit with the failed-test count.
//!
//! ```bash
//! # Run everything
//! micro-harness
//!
//! # Run one suite across 4 threads, only reporting failures
//! micro-harness --suite base_tests --multithreaded --quiet
//!
//! # See what would run
//! micro-harness --list --test simple_assertion
//! ```

use std::process::ExitCode;

use micro_harness::{check, check_eq, check_ne, micro_test, Harness, Registry, TestOutcome};

fn sample_registry() -> Registry {
    let mut registry = Registry::new();

    registry.register(micro_test!(base_tests, simple_assertion, || {
        check!(1 == 1);
        TestOutcome::Pass
    }));

    registry.register(micro_test!(base_tests, simple_assert_eq, || {
        check_eq!(2 + 2, 4);
        TestOutcome::Pass
    }));

    registry.register(micro_test!(base_tests2, simple_assert_not_eq, || {
        check_ne!(1, 0);
        TestOutcome::Pass
    }));

    registry
}

#[tokio::main]
async fn main() -> ExitCode {
    // The subscriber must exist before the harness parses anything, so the
    // debug flag is sniffed rather than parsed here.
    let debug = std::env::args().any(|arg| arg == "--debug");
    micro_harness::logging::init(debug);

    match Harness::new(sample_registry()).run().await {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
