//! Run outcome aggregation
//!
//! A summary starts empty, accumulates monotonically as tests complete, and
//! is finalized when the run ends. Summation is commutative, so merging
//! per-worker tallies in any order yields the same totals.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TestOutcome;

/// Aggregate result of one run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Tests executed (matching descriptors only).
    pub executed: usize,
    /// Tests that returned `Fail`.
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: TestOutcome) {
        self.executed += 1;
        if !outcome.is_pass() {
            self.failed += 1;
        }
    }

    /// Fold another worker's local tally into this one.
    pub fn merge(&mut self, other: RunSummary) {
        self.executed += other.executed;
        self.failed += other.failed;
    }

    pub fn passed(&self) -> usize {
        self.executed - self.failed
    }

    pub fn is_all_passed(&self) -> bool {
        self.failed == 0
    }

    /// The run's exit status: the failed-test count, saturated to the
    /// representable exit-code range.
    pub fn exit_code(&self) -> u8 {
        self.failed.min(u8::MAX as usize) as u8
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} passed, {} failed",
            self.passed(),
            self.executed,
            self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_failures() {
        let mut summary = RunSummary::default();
        summary.record(TestOutcome::Pass);
        summary.record(TestOutcome::Fail);
        summary.record(TestOutcome::Pass);
        assert_eq!(summary.executed, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.passed(), 2);
        assert!(!summary.is_all_passed());
    }

    #[test]
    fn merge_is_order_independent() {
        let mut a = RunSummary {
            executed: 3,
            failed: 1,
        };
        let b = RunSummary {
            executed: 2,
            failed: 2,
        };

        let mut reversed = b;
        reversed.merge(a);
        a.merge(b);

        assert_eq!(a, reversed);
        assert_eq!(a.executed, 5);
        assert_eq!(a.failed, 3);
    }

    #[test]
    fn exit_code_saturates() {
        let summary = RunSummary {
            executed: 1000,
            failed: 1000,
        };
        assert_eq!(summary.exit_code(), 255);

        let summary = RunSummary {
            executed: 3,
            failed: 1,
        };
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn summary_serializes() {
        let summary = RunSummary {
            executed: 3,
            failed: 1,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, "{\"executed\":3,\"failed\":1}");
        let back: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
