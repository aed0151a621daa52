//! Thread pool interface (C9 collaborator). The pool's actual
//! implementation is out of scope: this module only defines the trait the
//! orchestrator dispatches work through, plus two small implementations
//! (`RayonPool`, the default, and `InlinePool`, used when the
//! `dev_no_rayon` feature is active or for deterministic single-thread
//! tests).

/// Runs a batch of independent closures, one per worker slot, and waits for
/// all of them to finish. Each closure is handed its worker index
/// (`0..worker_count`) so it can, e.g., index into per-thread scratch state
/// the orchestrator allocated ahead of time.
pub trait WorkerPool {
    fn worker_count(&self) -> usize;

    fn run(&self, tasks: Vec<Box<dyn FnOnce(usize) + Send + '_>>);
}

/// The default pool: spawns one `rayon::scope` task per worker slot.
pub struct RayonPool {
    workers: usize,
}

impl RayonPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

impl WorkerPool for RayonPool {
    fn worker_count(&self) -> usize {
        self.workers
    }

    fn run(&self, tasks: Vec<Box<dyn FnOnce(usize) + Send + '_>>) {
        rayon::scope(|scope| {
            for (idx, task) in tasks.into_iter().enumerate() {
                scope.spawn(move |_| task(idx));
            }
        });
    }
}

/// Runs every task inline on the calling thread, in order. Used under the
/// `dev_no_rayon` feature and by tests that need deterministic ordering.
pub struct InlinePool;

impl WorkerPool for InlinePool {
    fn worker_count(&self) -> usize {
        1
    }

    fn run(&self, tasks: Vec<Box<dyn FnOnce(usize) + Send + '_>>) {
        for (idx, task) in tasks.into_iter().enumerate() {
            task(idx);
        }
    }
}

/// Picks [`RayonPool`] unless built with `dev_no_rayon`, in which case
/// every run is forced onto [`InlinePool`] regardless of the requested
/// thread count — useful for reproducing a search deterministically.
pub fn default_pool(workers: usize) -> Box<dyn WorkerPool> {
    #[cfg(feature = "dev_no_rayon")]
    {
        let _ = workers;
        Box::new(InlinePool)
    }
    #[cfg(not(feature = "dev_no_rayon"))]
    {
        Box::new(RayonPool::new(workers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn inline_pool_runs_every_task() {
        let counter = AtomicUsize::new(0);
        let pool = InlinePool;
        let tasks: Vec<Box<dyn FnOnce(usize) + Send>> = (0..4)
            .map(|_| {
                let counter = &counter;
                Box::new(move |_idx: usize| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }) as Box<dyn FnOnce(usize) + Send>
            })
            .collect();
        pool.run(tasks);
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn rayon_pool_reports_requested_worker_count() {
        let pool = RayonPool::new(6);
        assert_eq!(pool.worker_count(), 6);
    }
}
