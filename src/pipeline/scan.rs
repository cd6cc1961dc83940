//! Stage 2 job: fetch one item's metadata under the deadline and classify it.

use crossbeam_channel::Sender;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{CatalogClient, CatalogError};
use crate::classify::Classifier;
use crate::engine::progress::ProgressHandle;
use crate::engine::timeout::{TimeoutOutcome, run_with_timeout};
use crate::types::{ItemId, ScanMatch};

/// Fetch metadata for `id` under `fetch_timeout` and push a match when the
/// item is public and the classifier accepts its title.
///
/// Timeout and malformed metadata skip the item and keep the worker alive;
/// only transport/auth errors end the worker (surfaced at pool join).
pub fn scan_item<C>(
    client: &Arc<C>,
    classifier: &dyn Classifier,
    id: ItemId,
    fetch_timeout: Duration,
    matches: &Sender<ScanMatch>,
    progress: &ProgressHandle,
) -> Result<(), CatalogError>
where
    C: CatalogClient + ?Sized + 'static,
{
    let fetch_client = Arc::clone(client);
    let fetch_id = id.clone();
    let outcome = run_with_timeout(fetch_timeout, move || {
        fetch_public_title(&*fetch_client, &fetch_id)
    });

    let title = match outcome {
        TimeoutOutcome::TimedOut => {
            debug!("metadata fetch timed out for {}, skipping", id);
            return Ok(());
        }
        TimeoutOutcome::Completed(Ok(Some(title))) => title,
        // not publicly visible
        TimeoutOutcome::Completed(Ok(None)) => return Ok(()),
        TimeoutOutcome::Completed(Err(CatalogError::Malformed { id, reason })) => {
            debug!("malformed metadata for {}: {}; not a match", id, reason);
            return Ok(());
        }
        TimeoutOutcome::Completed(Err(e)) => return Err(e),
    };

    if classifier.classify(&title) {
        if matches.send(ScanMatch { id, title }).is_ok() {
            progress.inc(1);
        }
    }
    Ok(())
}

/// System metadata first; only public items get the descriptive fetch.
fn fetch_public_title<C>(client: &C, id: &ItemId) -> Result<Option<String>, CatalogError>
where
    C: CatalogClient + ?Sized,
{
    let sysmeta = client.system_metadata(id)?;
    if !sysmeta.public {
        return Ok(None);
    }
    let scimeta = client.descriptive_metadata(id)?;
    Ok(Some(scimeta.title))
}
