//! Public types for the catscan API and pipeline.

use chrono::NaiveDate;
use std::fmt;
use std::time::Duration;

use crate::utils::config::{ScanConsts, default_earliest_date};

/// Opaque catalog item identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

/// Half-open creation-date window `[start, end)`. One enumeration task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One row of an enumeration query.
#[derive(Clone, Debug)]
pub struct ItemSummary {
    pub id: ItemId,
}

/// A public item whose title the classifier flagged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanMatch {
    pub id: ItemId,
    pub title: String,
}

/// Options for the two-stage scan.
#[derive(Clone, Debug)]
pub struct ScanOpts {
    /// Override worker count per pool. When None, derived from host parallelism.
    pub num_workers: Option<usize>,
    /// Date-range partitions for enumeration.
    pub partitions: usize,
    /// Deadline for one item's metadata fetch in stage 2.
    pub fetch_timeout: Duration,
    /// Start of the enumerated date range; the end is always today.
    pub earliest: NaiveDate,
    /// Show per-stage progress counters.
    pub progress: bool,
}

impl Default for ScanOpts {
    fn default() -> Self {
        Self {
            num_workers: None,
            partitions: ScanConsts::DEFAULT_PARTITIONS,
            fetch_timeout: Duration::from_secs(ScanConsts::FETCH_TIMEOUT_SECS),
            earliest: default_earliest_date(),
            progress: true,
        }
    }
}

impl ScanOpts {
    /// Effective pool size: the override, or one worker per host core.
    pub fn workers(&self) -> usize {
        self.num_workers
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(ScanConsts::FLOOR_WORKERS)
            })
            .max(1)
    }
}
