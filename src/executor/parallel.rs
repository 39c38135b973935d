//! Parallel test execution
//!
//! A fixed pool of worker threads pulls claims from a shared cursor. The
//! cursor is the only mutable state shared between workers; descriptors are
//! read-only and per-worker tallies stay thread-local until the final join.

use std::sync::{Arc, Mutex, PoisonError};

use futures::future::join_all;
use tracing::{debug, error};

use crate::error::HarnessError;
use crate::filter::Filter;
use crate::models::RunSummary;
use crate::registry::Registry;

use super::runner::Executor;

/// Hands out unclaimed, filter-matching descriptors one at a time
///
/// State is local to one run; a fresh distributor starts from index zero, so
/// concurrent runs in the same process never interfere.
pub struct WorkDistributor {
    registry: Arc<Registry>,
    filter: Filter,
    cursor: Mutex<usize>,
}

impl WorkDistributor {
    pub fn new(registry: Arc<Registry>, filter: Filter) -> Self {
        Self {
            registry,
            filter,
            cursor: Mutex::new(0),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Claim the next unexamined matching descriptor, or `None` once the
    /// registry is exhausted.
    ///
    /// The whole scan-and-claim step runs under the cursor lock: the cursor
    /// advances past every inspected index before the lock is released, so
    /// no index is scanned twice and each matching descriptor is returned to
    /// exactly one caller. Every call either advances the cursor or returns
    /// `None`, so the pool cannot livelock.
    pub fn next(&self) -> Option<usize> {
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        let tests = self.registry.tests();
        while *cursor < tests.len() {
            let index = *cursor;
            *cursor += 1;
            if self.filter.matches(&tests[index]) {
                return Some(index);
            }
        }
        None
    }
}

/// Run the matching tests across `workers` blocking tasks and fold the
/// per-worker tallies into one summary.
///
/// A worker that never returns its tally (a panicking test body is outside
/// the harness contract) would silently undercount, so the run aborts with
/// an explicit error instead.
pub(super) async fn run_pool(
    registry: Arc<Registry>,
    filter: Filter,
    workers: usize,
    executor: Arc<Executor>,
) -> Result<RunSummary, HarnessError> {
    let distributor = Arc::new(WorkDistributor::new(registry, filter));

    let mut handles = Vec::with_capacity(workers);
    for worker_id in 0..workers {
        let distributor = Arc::clone(&distributor);
        let executor = Arc::clone(&executor);

        handles.push(tokio::task::spawn_blocking(move || {
            let mut tally = RunSummary::default();
            while let Some(index) = distributor.next() {
                let descriptor = distributor.registry().tests()[index];
                debug!(worker_id, index, test = %descriptor.qualified_name(), "claimed");
                tally.record(executor.execute(&descriptor, Some(worker_id)));
            }
            debug!(worker_id, executed = tally.executed, "worker drained");
            tally
        }));
    }

    let mut summary = RunSummary::default();
    let mut lost = 0usize;
    for joined in join_all(handles).await {
        match joined {
            Ok(tally) => summary.merge(tally),
            Err(e) => {
                error!("worker terminated abnormally: {e}");
                lost += 1;
            }
        }
    }

    if lost > 0 {
        return Err(HarnessError::WorkerLost(lost));
    }
    Ok(summary)
}
