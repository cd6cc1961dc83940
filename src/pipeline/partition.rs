//! Date-range partitioning for enumeration tasks.

use chrono::{Duration, NaiveDate};

use crate::types::DateRange;

/// Ceiling on the partition count. Far above any useful resolution (one chunk
/// per ~3 days over a decade is the default 1000), and keeps `days * i` inside
/// `i64` even with overflow checks off.
pub const MAX_PARTITIONS: usize = 1_000_000;

/// Split `[start, end)` into `k` contiguous half-open chunks covering it
/// exactly. Boundary `i` is `start + days * i / k` in integer day arithmetic,
/// so chunk lengths differ by at most one day and the union has no gaps or
/// overlaps for any `k >= 1`. Trailing chunks may be empty when `k` exceeds
/// the number of days. `k` is clamped to `1..=MAX_PARTITIONS`.
pub fn split_date_range(start: NaiveDate, end: NaiveDate, k: usize) -> Vec<DateRange> {
    let k = k.clamp(1, MAX_PARTITIONS);
    let days = (end - start).num_days().max(0);
    let k_i64 = k as i64;
    let mut ranges = Vec::with_capacity(k);
    let mut lo = start;
    for i in 1..=k_i64 {
        let hi = start + Duration::days(days * i / k_i64);
        ranges.push(DateRange { start: lo, end: hi });
        lo = hi;
    }
    ranges
}
