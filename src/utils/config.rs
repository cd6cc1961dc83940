//! Application configuration constants.
//! Tuning and thresholds in one place.

use chrono::NaiveDate;

// ---- Scan pipeline ----

/// Pipeline defaults.
pub struct ScanConsts;

impl ScanConsts {
    /// Date-range partitions for enumeration. Large enough to keep individual
    /// range queries small on a catalog with years of history.
    pub const DEFAULT_PARTITIONS: usize = 1000;
    /// Deadline for one item's metadata fetch in stage 2 (seconds).
    pub const FETCH_TIMEOUT_SECS: u64 = 10;
    /// Fallback worker count when host parallelism cannot be determined.
    pub const FLOOR_WORKERS: usize = 2;
}

/// First day the catalog could contain items; enumeration never starts earlier.
pub fn default_earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 5, 1).expect("constant date is valid")
}

// ---- HTTP transport ----

/// Transport tuning.
pub struct HttpConsts;

impl HttpConsts {
    /// Floor for the socket-level timeout on every request (seconds).
    pub const TRANSPORT_TIMEOUT_FLOOR_SECS: u64 = 30;
    /// Headroom added to the stage-2 fetch deadline when deriving the socket
    /// timeout, so a slow fetch hits the guard's deadline first and stays a
    /// recoverable skip instead of a worker-fatal transport error.
    pub const TRANSPORT_TIMEOUT_MARGIN_SECS: u64 = 5;
}

// ---- Login ----

/// Login flow.
pub struct AuthConsts;

impl AuthConsts {
    /// Credential attempts before giving up.
    pub const MAX_LOGIN_ATTEMPTS: usize = 3;
}
