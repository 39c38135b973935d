//! Run configuration
//!
//! Built once before execution and read-only while tests run. Verbosity
//! flags affect reporting only, never selection or correctness.

use crate::error::HarnessError;

/// How test execution is scheduled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConcurrencyMode {
    /// One implicit worker, registration order, deterministic output.
    Sequential,
    /// A fixed pool of `workers` threads pulling from the shared cursor.
    Parallel { workers: usize },
}

/// Configuration for a single run
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Run only tests whose suite equals this exactly.
    pub suite_filter: Option<String>,
    /// Run only tests whose name equals this exactly.
    pub test_filter: Option<String>,
    pub concurrency: ConcurrencyMode,
    /// Suppress OK lines and the final summary.
    pub quiet: bool,
    /// Include a worker token on report lines in parallel mode.
    pub debug: bool,
    /// Print the banner before running.
    pub banner: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            suite_filter: None,
            test_filter: None,
            concurrency: ConcurrencyMode::Sequential,
            quiet: false,
            debug: false,
            banner: true,
        }
    }
}

impl RunConfig {
    pub fn with_suite(mut self, suite: impl Into<String>) -> Self {
        self.suite_filter = Some(suite.into());
        self
    }

    pub fn with_test(mut self, test: impl Into<String>) -> Self {
        self.test_filter = Some(test.into());
        self
    }

    pub fn parallel(mut self, workers: usize) -> Self {
        self.concurrency = ConcurrencyMode::Parallel { workers };
        self
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Reject configurations that must not reach execution.
    ///
    /// The CLI already range-checks `--threads`; this covers programmatic
    /// construction.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if let ConcurrencyMode::Parallel { workers } = self.concurrency {
            if workers == 0 {
                return Err(HarnessError::InvalidWorkerCount(workers));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sequential_with_banner() {
        let config = RunConfig::default();
        assert_eq!(config.concurrency, ConcurrencyMode::Sequential);
        assert!(config.banner);
        assert!(!config.quiet);
        assert!(config.suite_filter.is_none());
        assert!(config.test_filter.is_none());
    }

    #[test]
    fn zero_workers_rejected() {
        let config = RunConfig::default().parallel(0);
        assert!(matches!(
            config.validate(),
            Err(HarnessError::InvalidWorkerCount(0))
        ));
    }

    #[test]
    fn positive_workers_accepted() {
        assert!(RunConfig::default().parallel(1).validate().is_ok());
        assert!(RunConfig::default().parallel(16).validate().is_ok());
    }

    #[test]
    fn sequential_always_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }
}
