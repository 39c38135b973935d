//! Test registry
//!
//! An ordered, append-only collection of test descriptors, established once
//! before any run begins. Registration order is preserved and used as the
//! iteration order for discovery and sequential execution, which makes
//! sequential output deterministic. Entries are well-formed by construction,
//! so no validity marker is needed.

use crate::models::TestDescriptor;

/// Ordered set of registered tests
#[derive(Clone, Debug, Default)]
pub struct Registry {
    tests: Vec<TestDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor. Must complete before the run starts; there is no
    /// operation to remove or modify entries.
    pub fn register(&mut self, descriptor: TestDescriptor) {
        self.tests.push(descriptor);
    }

    /// All descriptors, in registration order.
    pub fn tests(&self) -> &[TestDescriptor] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl FromIterator<TestDescriptor> for Registry {
    fn from_iter<I: IntoIterator<Item = TestDescriptor>>(iter: I) -> Self {
        Self {
            tests: iter.into_iter().collect(),
        }
    }
}

/// Build a [`TestDescriptor`](crate::TestDescriptor), capturing the call
/// site as the test's source location.
///
/// The body must be a `fn() -> TestOutcome` or a non-capturing closure:
///
/// ```
/// use micro_harness::{check, micro_test, Registry, TestOutcome};
///
/// let mut registry = Registry::new();
/// registry.register(micro_test!(base_tests, simple_assertion, || {
///     check!(1 + 1 == 2);
///     TestOutcome::Pass
/// }));
/// assert_eq!(registry.tests()[0].qualified_name(), "base_tests_simple_assertion");
/// ```
#[macro_export]
macro_rules! micro_test {
    ($suite:ident, $name:ident, $run:expr) => {
        $crate::TestDescriptor::new(
            stringify!($suite),
            stringify!($name),
            file!(),
            line!(),
            $run,
        )
    };
}

/// Fail the enclosing test if the condition does not hold.
///
/// Prints the failing expression with its source location to stderr and
/// returns [`TestOutcome::Fail`](crate::TestOutcome::Fail) early.
#[macro_export]
macro_rules! check {
    ($cond:expr) => {
        if !$cond {
            eprintln!(
                "error: {}:{}: failed assertion: {}",
                file!(),
                line!(),
                stringify!($cond)
            );
            return $crate::TestOutcome::Fail;
        }
    };
}

/// Fail the enclosing test if the two values are not equal.
#[macro_export]
macro_rules! check_eq {
    ($a:expr, $b:expr) => {
        if $a != $b {
            eprintln!(
                "error: {}:{}: failed expect equal: {} and {}",
                file!(),
                line!(),
                stringify!($a),
                stringify!($b)
            );
            return $crate::TestOutcome::Fail;
        }
    };
}

/// Fail the enclosing test if the two values are equal.
#[macro_export]
macro_rules! check_ne {
    ($a:expr, $b:expr) => {
        if $a == $b {
            eprintln!(
                "error: {}:{}: failed expect not equal: {} and {}",
                file!(),
                line!(),
                stringify!($a),
                stringify!($b)
            );
            return $crate::TestOutcome::Fail;
        }
    };
}
