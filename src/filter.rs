//! Test selection filter
//!
//! Exact, case-sensitive equality on suite and/or test name, combined with
//! logical AND. There are no wildcard or substring semantics; that is a
//! deliberate simplification, not a missing feature.

use crate::models::{RunConfig, TestDescriptor};

/// Suite/test name constraints for a run
#[derive(Clone, Debug, Default)]
pub struct Filter {
    suite: Option<String>,
    test: Option<String>,
}

impl Filter {
    pub fn new(suite: Option<String>, test: Option<String>) -> Self {
        Self { suite, test }
    }

    /// A filter that matches every descriptor.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            suite: config.suite_filter.clone(),
            test: config.test_filter.clone(),
        }
    }

    /// Whether the descriptor is selected for this run.
    pub fn matches(&self, descriptor: &TestDescriptor) -> bool {
        if let Some(suite) = &self.suite {
            if suite.as_str() != descriptor.suite {
                return false;
            }
        }
        if let Some(test) = &self.test {
            if test.as_str() != descriptor.name {
                return false;
            }
        }
        true
    }
}
