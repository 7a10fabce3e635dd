use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::cancellation::CancellationToken;
use crate::error::{GeneticError, Result};

use super::options::WorkerLimit;

/// Runs one unit of work per item.
///
/// `Dedicated` holds a pool sized to the worker limit, built once and reused by
/// every stage. `PerItem` builds a pool with one thread per item for each call,
/// so every unit is in flight at the same time.
pub(crate) enum WorkerPool {
    Dedicated(ThreadPool),
    PerItem,
}

fn build_pool(threads: usize) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|index| format!("evolvr-worker-{}", index))
        .build()
        .map_err(|e| GeneticError::Configuration(format!("Failed to build worker pool: {}", e)))
}

impl WorkerPool {
    pub(crate) fn new(limit: WorkerLimit) -> Result<Self> {
        match limit {
            WorkerLimit::Bounded(workers) => build_pool(workers.get()).map(WorkerPool::Dedicated),
            WorkerLimit::Unbounded => Ok(WorkerPool::PerItem),
        }
    }

    /// Applies `task` to every item and returns the first error any unit reported.
    ///
    /// All units share a child of `parent`. The first failing unit cancels it, so
    /// units that have not started yet are skipped and running ones see the
    /// cancellation at their next checkpoint. Results written by units that
    /// finished stay in place. If no unit failed but some were skipped because
    /// `parent` was cancelled, the cancellation is returned instead.
    pub(crate) fn try_for_each<T, F>(
        &self,
        parent: &CancellationToken,
        items: &mut [T],
        task: F,
    ) -> Result<()>
    where
        T: Send,
        F: Fn(&CancellationToken, usize, &mut T) -> Result<()> + Send + Sync,
    {
        if items.is_empty() {
            return Ok(());
        }

        let scope = parent.child();
        let first_error: Mutex<Option<GeneticError>> = Mutex::new(None);
        let skipped = AtomicBool::new(false);

        let run = |index: usize, item: &mut T| {
            if scope.is_cancelled() {
                skipped.store(true, Ordering::Release);
                return;
            }
            if let Err(err) = task(&scope, index, item) {
                let mut slot = first_error.lock().unwrap_or_else(PoisonError::into_inner);
                if slot.is_none() {
                    *slot = Some(err);
                }
                scope.cancel();
            }
        };

        match self {
            WorkerPool::Dedicated(pool) => pool.install(|| {
                items
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(index, item)| run(index, item))
            }),
            WorkerPool::PerItem => {
                let pool = build_pool(items.len())?;
                pool.scope(|s| {
                    let run = &run;
                    for (index, item) in items.iter_mut().enumerate() {
                        s.spawn(move |_| run(index, item));
                    }
                })
            }
        }

        let first_error = first_error
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        match first_error {
            Some(err) => Err(err),
            None if skipped.load(Ordering::Acquire) => scope.check(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::thread;
    use std::time::{Duration, Instant};

    fn bounded(workers: usize) -> WorkerPool {
        WorkerPool::new(WorkerLimit::bounded(workers).unwrap()).unwrap()
    }

    fn unbounded() -> WorkerPool {
        WorkerPool::new(WorkerLimit::Unbounded).unwrap()
    }

    /// Blocks until `scope` is cancelled, giving up after two seconds.
    fn wait_for_cancel(scope: &CancellationToken) -> Result<()> {
        let give_up = Instant::now() + Duration::from_secs(2);
        while Instant::now() < give_up {
            scope.check()?;
            thread::sleep(Duration::from_millis(1));
        }
        Ok(())
    }

    #[test]
    fn test_every_item_is_visited() {
        for pool in [bounded(1), bounded(3), unbounded()] {
            let mut items = vec![0usize; 50];
            pool.try_for_each(&CancellationToken::new(), &mut items, |_, index, item| {
                *item = index * 2;
                Ok(())
            })
            .unwrap();

            assert!(items.iter().enumerate().all(|(i, &v)| v == i * 2));
        }
    }

    #[test]
    fn test_empty_items_succeed() {
        let mut items: Vec<u8> = Vec::new();
        for pool in [bounded(2), unbounded()] {
            assert!(pool
                .try_for_each(&CancellationToken::new(), &mut items, |_, _, _| Ok(()))
                .is_ok());
        }
    }

    #[test]
    fn test_bounded_pool_caps_in_flight_units() {
        let pool = bounded(2);
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let mut items = vec![(); 16];

        pool.try_for_each(&CancellationToken::new(), &mut items, |_, _, _| {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(5));
            in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn test_unbounded_runs_every_unit_at_once() {
        const UNITS: usize = 16;
        let arrived = AtomicUsize::new(0);
        let mut met_everyone = vec![false; UNITS];
        let started = Instant::now();

        unbounded()
            .try_for_each(&CancellationToken::new(), &mut met_everyone, |_, _, met| {
                arrived.fetch_add(1, Ordering::SeqCst);
                let give_up = Instant::now() + Duration::from_secs(2);
                while arrived.load(Ordering::SeqCst) < UNITS && Instant::now() < give_up {
                    thread::sleep(Duration::from_millis(1));
                }
                *met = arrived.load(Ordering::SeqCst) == UNITS;
                Ok(())
            })
            .unwrap();

        assert!(met_everyone.iter().all(|&met| met));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_sibling_failure_releases_waiting_units() {
        for pool in [bounded(4), unbounded()] {
            let mut items = vec![0; 8];
            let started = Instant::now();

            let err = pool
                .try_for_each(&CancellationToken::new(), &mut items, |scope, index, _| {
                    if index == 0 {
                        return Err(GeneticError::invalid_chromosome("first unit failed"));
                    }
                    wait_for_cancel(scope)
                })
                .unwrap_err();

            assert!(started.elapsed() < Duration::from_secs(1));
            assert!(!err.is_cancelled());
            assert!(matches!(
                err,
                GeneticError::InvalidChromosome { ref message, .. } if message == "first unit failed"
            ));
        }
    }

    #[test]
    fn test_first_failure_is_returned_and_cancels_the_rest() {
        let pool = bounded(1);
        let started = AtomicUsize::new(0);
        let mut items = vec![0; 10];

        let err = pool
            .try_for_each(&CancellationToken::new(), &mut items, |_, index, item| {
                started.fetch_add(1, Ordering::SeqCst);
                if index == 0 {
                    return Err(GeneticError::invalid_chromosome("boom"));
                }
                *item = 1;
                Ok(())
            })
            .unwrap_err();

        assert!(err.is_invalid_chromosome());
        // A single worker runs items in order, so nothing after the failure starts.
        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert!(items.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_pre_cancelled_parent_runs_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let mut items = vec![0; 8];

        for pool in [bounded(2), unbounded()] {
            let err = pool
                .try_for_each(&token, &mut items, |_, _, item| {
                    *item += 1;
                    Ok(())
                })
                .unwrap_err();
            assert!(err.is_cancelled());
        }
        assert!(items.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_late_parent_cancel_keeps_completed_stage() {
        for pool in [bounded(1), unbounded()] {
            let token = CancellationToken::new();
            let mut items = vec![0];

            pool.try_for_each(&token, &mut items, |_, _, item| {
                *item = 7;
                token.cancel();
                Ok(())
            })
            .unwrap();

            assert!(token.is_cancelled());
            assert_eq!(items, vec![7]);
        }
    }

    #[test]
    fn test_failure_does_not_cancel_parent() {
        let token = CancellationToken::new();
        let mut items = vec![0; 4];

        let result = bounded(2).try_for_each(&token, &mut items, |_, _, _| {
            Err(GeneticError::EmptyPopulation)
        });

        assert!(result.unwrap_err().is_empty_population());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_units_observe_the_stage_scope() {
        let pool = bounded(1);
        let mut items = vec![0; 3];

        let err = pool
            .try_for_each(&CancellationToken::new(), &mut items, |scope, index, _| {
                if index == 0 {
                    scope.cancel();
                }
                scope.check()
            })
            .unwrap_err();

        assert!(err.is_cancelled());
    }
}
