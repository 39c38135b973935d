//! Run reporting
//!
//! One line per executed test, the banner, `--list` output, and the final
//! summary. Line formats are part of the harness contract, so they are
//! written straight to the configured streams rather than through tracing.
//! FAILED lines always go to the error stream and are never suppressed.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::models::{RunConfig, RunSummary, TestDescriptor, TestOutcome};

/// Writes run output to a pair of sinks (stdout/stderr by default)
pub struct Reporter {
    out: Mutex<Box<dyn Write + Send>>,
    err: Mutex<Box<dyn Write + Send>>,
    quiet: bool,
    debug: bool,
}

impl Reporter {
    /// Reporter bound to the process streams.
    pub fn stdio(config: &RunConfig) -> Self {
        Self::with_sinks(Box::new(io::stdout()), Box::new(io::stderr()), config)
    }

    pub fn with_sinks(
        out: Box<dyn Write + Send>,
        err: Box<dyn Write + Send>,
        config: &RunConfig,
    ) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
            quiet: config.quiet,
            debug: config.debug,
        }
    }

    fn emit(sink: &Mutex<Box<dyn Write + Send>>, line: std::fmt::Arguments<'_>) {
        let mut writer = sink.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{line}");
    }

    /// The single report line for an executed test.
    ///
    /// `worker` is the claiming worker's token in parallel mode; it is shown
    /// only when debug output is enabled.
    pub fn test_line(
        &self,
        descriptor: &TestDescriptor,
        outcome: TestOutcome,
        worker: Option<usize>,
    ) {
        let prefix = match worker {
            Some(id) if self.debug => format!("(worker {id}) "),
            _ => String::new(),
        };
        match outcome {
            TestOutcome::Pass if self.quiet => {}
            TestOutcome::Pass => Self::emit(
                &self.out,
                format_args!("{prefix}{descriptor} {}", TestOutcome::Pass),
            ),
            TestOutcome::Fail => Self::emit(
                &self.err,
                format_args!("{prefix}{descriptor} {}", TestOutcome::Fail),
            ),
        }
    }

    pub fn banner(&self) {
        Self::emit(
            &self.out,
            format_args!("\nmicro-harness\n-------------\n\nRunning tests...\n"),
        );
    }

    pub fn parallel_banner(&self, workers: usize) {
        Self::emit(
            &self.out,
            format_args!("Running multithreaded with {workers} threads.\n"),
        );
    }

    /// One line per matching descriptor for `--list`; nothing executes.
    pub fn list_entry(&self, descriptor: &TestDescriptor) {
        Self::emit(&self.out, format_args!("{descriptor}"));
    }

    /// Final summary line with the failed-test count.
    pub fn summary(&self, summary: &RunSummary) {
        if self.quiet {
            return;
        }
        let noun = if summary.failed == 1 { "test" } else { "tests" };
        Self::emit(
            &self.out,
            format_args!("\nTests done: {} {noun} failed\n", summary.failed),
        );
    }
}

/// In-memory sink for capturing reporter output
///
/// Cloning shares the underlying buffer, so a clone can be handed to the
/// harness while the original is inspected afterwards.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Non-empty lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
