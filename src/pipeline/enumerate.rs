//! Stage 1 job: enumerate catalog item ids for one date-range chunk.

use crossbeam_channel::Sender;

use crate::catalog::{CatalogClient, CatalogError};
use crate::engine::progress::ProgressHandle;
use crate::types::{DateRange, ItemId};

/// Query one chunk and forward every discovered id.
///
/// No per-task timeout here: a range query returns a bounded page set. A
/// transport/auth error is not retried; it ends this worker and surfaces when
/// the pool is joined.
pub fn enumerate_range<C>(
    client: &C,
    range: DateRange,
    ids: &Sender<ItemId>,
    progress: &ProgressHandle,
) -> Result<(), CatalogError>
where
    C: CatalogClient + ?Sized,
{
    let items = client.items_in_range(&range)?;
    for item in items {
        if ids.send(item.id).is_err() {
            // receiver gone, nothing left to report to
            break;
        }
        progress.inc(1);
    }
    Ok(())
}
