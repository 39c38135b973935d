//! Test descriptor models
//!
//! A descriptor is a registered test's immutable identity, provenance, and
//! executable body. Once registered it is never mutated and may be read
//! concurrently by any number of workers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single test body
///
/// A test is atomic: it either passes or fails, with no partial-result
/// concept. A failing assertion is an ordinary `Fail`, not a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestOutcome {
    Pass,
    Fail,
}

impl TestOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestOutcome::Pass)
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestOutcome::Pass => write!(f, "OK"),
            TestOutcome::Fail => write!(f, "FAILED"),
        }
    }
}

/// Where a test was declared, for diagnostics
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A registered test case
///
/// The `(suite, name)` pair is the addressable key for `--suite`/`--test`
/// filtering. It need not be globally unique; ambiguous duplicates are
/// tolerated, not rejected.
#[derive(Clone, Copy, Debug)]
pub struct TestDescriptor {
    pub suite: &'static str,
    pub name: &'static str,
    pub location: SourceLocation,
    pub run: fn() -> TestOutcome,
}

impl TestDescriptor {
    pub fn new(
        suite: &'static str,
        name: &'static str,
        file: &'static str,
        line: u32,
        run: fn() -> TestOutcome,
    ) -> Self {
        Self {
            suite,
            name,
            location: SourceLocation { file, line },
            run,
        }
    }

    /// `suite + "_" + name`, informational
    pub fn qualified_name(&self) -> String {
        format!("{}_{}", self.suite, self.name)
    }
}

impl fmt::Display for TestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "suite: {}, test: {}", self.suite, self.name)
    }
}
