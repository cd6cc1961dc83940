//! Pipeline components: partitioning, worker pool, stage jobs, driver.

pub mod context;
pub mod enumerate;
pub mod orchestrator;
pub mod partition;
pub mod pool;
pub mod scan;

pub use context::{StageChannels, create_stage_channels, seed_tasks};
pub use enumerate::enumerate_range;
pub use orchestrator::{enumerate_items, run_scan, scan_items};
pub use partition::split_date_range;
pub use pool::{PoolOutcome, Task, join_pool, spawn_workers};
pub use scan::scan_item;

/// Result channel capacity. Bounded so a large catalog cannot grow an
/// unbounded backlog; the driver drains it continuously while workers run,
/// so a full channel only ever slows workers, never deadlocks shutdown.
pub const RESULT_CHANNEL_CAP: usize = 50_000;
