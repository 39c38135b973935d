//! Run orchestration
//!
//! The harness parses configuration, short-circuits for help/list, then runs
//! the registry either sequentially (registration order, one implicit
//! worker) or across a fixed worker pool, and reports the aggregated
//! failed-test count.

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, info};

use crate::cli::Args;
use crate::error::HarnessError;
use crate::filter::Filter;
use crate::models::{ConcurrencyMode, RunConfig, RunSummary, TestDescriptor, TestOutcome};
use crate::output::Reporter;
use crate::registry::Registry;

use super::parallel;

/// Runs one descriptor's body and reports its outcome
pub struct Executor {
    reporter: Arc<Reporter>,
}

impl Executor {
    pub fn new(reporter: Arc<Reporter>) -> Self {
        Self { reporter }
    }

    /// Execute a single test and emit its report line.
    ///
    /// A failing assertion is an ordinary `Fail` result, never a fault.
    /// `worker` identifies the claiming worker in parallel mode.
    pub fn execute(&self, descriptor: &TestDescriptor, worker: Option<usize>) -> TestOutcome {
        let outcome = (descriptor.run)();
        self.reporter.test_line(descriptor, outcome, worker);
        outcome
    }
}

/// The harness entry point: a frozen registry plus output sinks
pub struct Harness {
    registry: Arc<Registry>,
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

impl Harness {
    /// Harness over a finalized registry, reporting to stdout/stderr.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }

    /// Redirect report output, e.g. to capture buffers.
    pub fn with_sinks(mut self, out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        self.out = out;
        self.err = err;
        self
    }

    /// Parse the process arguments and run. Returns the run summary whose
    /// failed count is the intended exit status.
    pub async fn run(self) -> Result<RunSummary, HarnessError> {
        self.run_with_args(std::env::args()).await
    }

    /// Like [`run`](Self::run) with explicit arguments (the first one is the
    /// program name).
    ///
    /// `--help` and `--list` short-circuit with a success-shaped summary and
    /// execute nothing. Unrecognized flags and missing values fail before
    /// any test executes.
    pub async fn run_with_args<I, T>(self, args: I) -> Result<RunSummary, HarnessError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = match Args::try_parse_from(args) {
            Ok(args) => args,
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                let _ = e.print();
                return Ok(RunSummary::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config = args.to_config();
        config.validate()?;

        let Harness { registry, out, err } = self;
        let reporter = Arc::new(Reporter::with_sinks(out, err, &config));

        if args.list {
            let filter = Filter::from_config(&config);
            for descriptor in registry.tests().iter().filter(|d| filter.matches(d)) {
                reporter.list_entry(descriptor);
            }
            return Ok(RunSummary::default());
        }

        run_configured(registry, config, reporter).await
    }

    /// Run with an explicit configuration, bypassing argument parsing.
    pub async fn execute(self, config: RunConfig) -> Result<RunSummary, HarnessError> {
        config.validate()?;
        let Harness { registry, out, err } = self;
        let reporter = Arc::new(Reporter::with_sinks(out, err, &config));
        run_configured(registry, config, reporter).await
    }
}

async fn run_configured(
    registry: Arc<Registry>,
    config: RunConfig,
    reporter: Arc<Reporter>,
) -> Result<RunSummary, HarnessError> {
    if config.banner {
        reporter.banner();
    }
    debug!(descriptors = registry.len(), "registry frozen");

    let filter = Filter::from_config(&config);
    let executor = Arc::new(Executor::new(Arc::clone(&reporter)));
    let start = Instant::now();

    let summary = match config.concurrency {
        ConcurrencyMode::Sequential => {
            let mut summary = RunSummary::default();
            for descriptor in registry.tests() {
                if filter.matches(descriptor) {
                    summary.record(executor.execute(descriptor, None));
                }
            }
            summary
        }
        ConcurrencyMode::Parallel { workers } => {
            if config.banner {
                reporter.parallel_banner(workers);
            }
            parallel::run_pool(registry, filter, workers, executor).await?
        }
    };

    info!(
        "run completed in {}ms: {summary}",
        start.elapsed().as_millis()
    );
    reporter.summary(&summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;

    fn always_pass() -> TestOutcome {
        TestOutcome::Pass
    }

    fn always_fail() -> TestOutcome {
        TestOutcome::Fail
    }

    // registry = [(base, ok) -> Pass, (base, bad) -> Fail, (other, ok) -> Pass]
    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        registry.register(TestDescriptor::new("base", "ok", "demo.rs", 1, always_pass));
        registry.register(TestDescriptor::new("base", "bad", "demo.rs", 2, always_fail));
        registry.register(TestDescriptor::new("other", "ok", "demo.rs", 3, always_pass));
        registry
    }

    fn harness(registry: &Registry) -> (Harness, MemorySink, MemorySink) {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let harness = Harness::new(registry.clone())
            .with_sinks(Box::new(out.clone()), Box::new(err.clone()));
        (harness, out, err)
    }

    #[tokio::test]
    async fn sequential_run_reports_in_registration_order() {
        let registry = sample_registry();
        let (harness, out, err) = harness(&registry);

        let summary = harness
            .run_with_args(["micro-harness", "--no-banner"])
            .await
            .unwrap();

        assert_eq!(summary.executed, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            out.lines(),
            [
                "suite: base, test: ok OK",
                "suite: other, test: ok OK",
                "Tests done: 1 test failed"
            ]
        );
        assert_eq!(err.lines(), ["suite: base, test: bad FAILED"]);
    }

    #[tokio::test]
    async fn sequential_runs_are_deterministic() {
        let registry = sample_registry();

        let (first, first_out, _) = harness(&registry);
        let (second, second_out, _) = harness(&registry);

        let a = first
            .run_with_args(["micro-harness", "--no-banner"])
            .await
            .unwrap();
        let b = second
            .run_with_args(["micro-harness", "--no-banner"])
            .await
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(first_out.contents(), second_out.contents());
    }

    #[tokio::test]
    async fn test_filter_selects_across_suites() {
        let registry = sample_registry();
        let (harness, out, err) = harness(&registry);

        let summary = harness
            .run_with_args(["micro-harness", "--no-banner", "--test", "ok"])
            .await
            .unwrap();

        assert_eq!(summary.executed, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(
            out.lines(),
            [
                "suite: base, test: ok OK",
                "suite: other, test: ok OK",
                "Tests done: 0 tests failed"
            ]
        );
        assert!(err.lines().is_empty());
    }

    #[tokio::test]
    async fn suite_filter_restricts_to_one_suite() {
        let registry = sample_registry();
        let (harness, _out, err) = harness(&registry);

        let summary = harness
            .run_with_args(["micro-harness", "--no-banner", "--suite", "base"])
            .await
            .unwrap();

        assert_eq!(summary.executed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(err.lines(), ["suite: base, test: bad FAILED"]);
    }

    #[tokio::test]
    async fn parallel_failed_count_matches_sequential() {
        let registry = sample_registry();

        for threads in ["1", "2", "4", "8"] {
            let (harness, _out, err) = harness(&registry);
            let summary = harness
                .run_with_args([
                    "micro-harness",
                    "--no-banner",
                    "--multithreaded",
                    "--threads",
                    threads,
                ])
                .await
                .unwrap();

            assert_eq!(summary.executed, 3, "threads={threads}");
            assert_eq!(summary.failed, 1, "threads={threads}");
            assert_eq!(err.lines(), ["suite: base, test: bad FAILED"]);
        }
    }

    #[tokio::test]
    async fn more_workers_than_tests_is_fine() {
        let registry = sample_registry();
        let (harness, _out, _err) = harness(&registry);

        let summary = harness
            .run_with_args([
                "micro-harness",
                "--no-banner",
                "--quiet",
                "--multithreaded",
                "--threads",
                "32",
            ])
            .await
            .unwrap();

        assert_eq!(summary.executed, 3);
        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn list_prints_matches_without_executing() {
        let registry = sample_registry();
        let (harness, out, err) = harness(&registry);

        let summary = harness
            .run_with_args(["micro-harness", "--list"])
            .await
            .unwrap();

        assert_eq!(summary, RunSummary::default());
        assert_eq!(
            out.lines(),
            [
                "suite: base, test: ok",
                "suite: base, test: bad",
                "suite: other, test: ok"
            ]
        );
        assert!(err.lines().is_empty());
    }

    #[tokio::test]
    async fn list_respects_filters() {
        let registry = sample_registry();
        let (harness, out, _err) = harness(&registry);

        harness
            .run_with_args(["micro-harness", "--list", "--suite", "other"])
            .await
            .unwrap();

        assert_eq!(out.lines(), ["suite: other, test: ok"]);
    }

    #[tokio::test]
    async fn banner_prints_by_default() {
        let registry = sample_registry();
        let (harness, out, _err) = harness(&registry);

        harness
            .run_with_args(["micro-harness", "--quiet"])
            .await
            .unwrap();

        assert!(out.contents().contains("micro-harness"));
        assert!(out.contents().contains("Running tests..."));
    }

    #[tokio::test]
    async fn unknown_flag_fails_before_executing() {
        let registry = sample_registry();
        let (harness, out, _err) = harness(&registry);

        let result = harness
            .run_with_args(["micro-harness", "--bogus"])
            .await;

        assert!(matches!(result, Err(HarnessError::InvalidArgs(_))));
        assert!(out.contents().is_empty());
    }

    #[tokio::test]
    async fn zero_threads_rejected_before_executing() {
        let registry = sample_registry();
        let (harness, out, _err) = harness(&registry);

        let result = harness
            .run_with_args(["micro-harness", "--multithreaded", "--threads", "0"])
            .await;

        assert!(matches!(result, Err(HarnessError::InvalidArgs(_))));
        assert!(out.contents().is_empty());
    }

    #[tokio::test]
    async fn explicit_config_rejects_zero_workers() {
        let registry = sample_registry();
        let (harness, out, _err) = harness(&registry);

        let result = harness.execute(RunConfig::default().parallel(0)).await;

        assert!(matches!(result, Err(HarnessError::InvalidWorkerCount(0))));
        assert!(out.contents().is_empty());
    }

    #[tokio::test]
    async fn empty_registry_reports_zero_failures() {
        let registry = Registry::new();
        let (harness, out, _err) = harness(&registry);

        let summary = harness
            .run_with_args(["micro-harness", "--no-banner"])
            .await
            .unwrap();

        assert_eq!(summary, RunSummary::default());
        assert_eq!(out.lines(), ["Tests done: 0 tests failed"]);
    }

    #[tokio::test]
    async fn debug_parallel_lines_carry_worker_tokens() {
        let registry = sample_registry();
        let (harness, out, _err) = harness(&registry);

        harness
            .run_with_args([
                "micro-harness",
                "--no-banner",
                "--debug",
                "--multithreaded",
                "--threads",
                "2",
            ])
            .await
            .unwrap();

        for line in out.lines() {
            if line.contains(" OK") {
                assert!(line.starts_with("(worker "), "line: {line}");
            }
        }
    }
}
