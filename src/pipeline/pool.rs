//! Generic bounded worker pool with poison-pill termination.
//!
//! Both pipeline stages are the same shape — pull a task, run a job, push
//! results — so one pool implementation serves both, parameterized by the
//! per-task job.

use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::catalog::CatalogError;

/// One unit on a stage's task channel: real work or the stop sentinel.
/// Exactly one `Stop` is enqueued per worker, after all `Work` items, so every
/// worker observes its own termination signal and none blocks forever.
pub enum Task<T> {
    Work(T),
    Stop,
}

/// Spawn `workers` threads running `job` over the task channel.
///
/// Each worker holds a clone of `result_tx`; the original passed in is dropped
/// here, so the result channel closes exactly when the last worker exits —
/// that close is what tells the driver draining is complete. A `job` error
/// ends that worker early; the error surfaces at [`join_pool`], never silently.
/// A spawn failure is fatal and reported before the caller seeds any task.
pub fn spawn_workers<T, R, F>(
    name: &str,
    task_rx: Receiver<Task<T>>,
    result_tx: Sender<R>,
    workers: usize,
    job: F,
) -> io::Result<Vec<JoinHandle<Result<(), CatalogError>>>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T, &Sender<R>) -> Result<(), CatalogError> + Send + Sync + 'static,
{
    let job = Arc::new(job);
    (0..workers)
        .map(|i| {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            let job = Arc::clone(&job);
            thread::Builder::new()
                .name(format!("{}-{}", name, i))
                .spawn(move || {
                    while let Ok(task) = task_rx.recv() {
                        match task {
                            Task::Work(t) => job(t, &result_tx)?,
                            Task::Stop => break,
                        }
                    }
                    Ok(())
                })
        })
        .collect()
}

/// Worker exits gathered at join: how many finished cleanly, and why the rest
/// did not.
pub struct PoolOutcome {
    pub completed: usize,
    pub failures: Vec<String>,
}

impl PoolOutcome {
    /// True when no worker survived — the only case that aborts a stage.
    pub fn all_failed(&self) -> bool {
        self.completed == 0 && !self.failures.is_empty()
    }
}

/// Join every worker and classify its exit. Call after the result channel has
/// been drained; joining first could block on a full channel.
pub fn join_pool(handles: Vec<JoinHandle<Result<(), CatalogError>>>) -> PoolOutcome {
    let mut completed = 0;
    let mut failures = Vec::new();
    for handle in handles {
        match handle.join() {
            Ok(Ok(())) => completed += 1,
            Ok(Err(e)) => failures.push(e.to_string()),
            Err(_) => failures.push("worker panicked".to_string()),
        }
    }
    PoolOutcome {
        completed,
        failures,
    }
}
