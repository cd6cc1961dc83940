//! Two-stage driver: enumeration fan-out, then metadata-scan fan-out.

use anyhow::{Context, Result, bail};
use chrono::Local;
use crossbeam_channel::Sender;
use log::{debug, warn};
use std::sync::Arc;

use crate::catalog::{CatalogClient, CatalogError};
use crate::classify::Classifier;
use crate::engine::progress::{ProgressHandle, ProgressTracker};
use crate::types::{ItemId, ScanMatch, ScanOpts};

use super::context::{create_stage_channels, seed_tasks};
use super::enumerate::enumerate_range;
use super::partition::split_date_range;
use super::pool::{join_pool, spawn_workers};
use super::scan::scan_item;

/// Run one stage: spawn the pool, seed tasks plus one stop token per worker,
/// drain results until every worker has dropped its sender, then join and
/// report worker failures.
///
/// Draining happens before the join, so a capped result channel can never
/// block worker shutdown, and there is no queue polling anywhere: the result
/// channel closing is the completion event.
fn run_stage<T, R, F, B>(
    name: &str,
    desc: &'static str,
    tasks: Vec<T>,
    opts: &ScanOpts,
    build_job: B,
) -> Result<Vec<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T, &Sender<R>) -> Result<(), CatalogError> + Send + Sync + 'static,
    B: FnOnce(ProgressHandle) -> F,
{
    let workers = opts.workers();
    let task_count = tasks.len();
    debug!("{}: {} tasks across {} workers", name, task_count, workers);

    let channels = create_stage_channels::<T, R>(task_count, workers);
    let tracker = ProgressTracker::spawn(desc, opts.progress);
    let job = build_job(tracker.handle());

    let handles = spawn_workers(name, channels.task_rx, channels.result_tx, workers, job)
        .with_context(|| format!("{}: failed to start worker pool", name))?;

    seed_tasks(&channels.task_tx, tasks, workers);
    drop(channels.task_tx);

    // Blocks until the last worker exits and the channel closes.
    let mut results = Vec::new();
    while let Ok(result) = channels.result_rx.recv() {
        results.push(result);
    }

    let outcome = join_pool(handles);
    let reported = tracker.finish()?;
    debug!(
        "{}: {} reported by workers, {} collected",
        name,
        reported,
        results.len()
    );

    for failure in &outcome.failures {
        warn!("{}: worker failed: {}", name, failure);
    }
    if outcome.all_failed() {
        bail!(
            "{}: all {} workers failed, first error: {}",
            name,
            workers,
            outcome.failures[0]
        );
    }
    Ok(results)
}

/// Stage 1: partition `[opts.earliest, today)` into `opts.partitions` chunks
/// and collect every item id the catalog reports for them. Order follows
/// worker interleaving, not creation date.
pub fn enumerate_items<C>(client: Arc<C>, opts: &ScanOpts) -> Result<Vec<ItemId>>
where
    C: CatalogClient + ?Sized + 'static,
{
    let today = Local::now().date_naive();
    let ranges = split_date_range(opts.earliest, today, opts.partitions);
    run_stage(
        "enumerate",
        "collecting item ids",
        ranges,
        opts,
        move |progress| {
            move |range, ids: &Sender<ItemId>| {
                enumerate_range(client.as_ref(), range, ids, &progress)
            }
        },
    )
}

/// Stage 2: fetch metadata for each id under the deadline and keep the
/// classifier's hits, in discovery order.
pub fn scan_items<C>(
    client: Arc<C>,
    classifier: Arc<dyn Classifier>,
    ids: Vec<ItemId>,
    opts: &ScanOpts,
) -> Result<Vec<ScanMatch>>
where
    C: CatalogClient + ?Sized + 'static,
{
    let fetch_timeout = opts.fetch_timeout;
    run_stage(
        "scan",
        "searching for matches",
        ids,
        opts,
        move |progress| {
            move |id, matches: &Sender<ScanMatch>| {
                scan_item(
                    &client,
                    classifier.as_ref(),
                    id,
                    fetch_timeout,
                    matches,
                    &progress,
                )
            }
        },
    )
}

/// The whole pipeline: enumerate, then scan the enumerated ids.
pub fn run_scan<C>(
    client: Arc<C>,
    classifier: Arc<dyn Classifier>,
    opts: &ScanOpts,
) -> Result<Vec<ScanMatch>>
where
    C: CatalogClient + ?Sized + 'static,
{
    let ids = enumerate_items(Arc::clone(&client), opts)?;
    debug!("enumeration done: {} items", ids.len());
    scan_items(client, classifier, ids, opts)
}
