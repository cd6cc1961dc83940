//! Catscan: parallel keyword scanner for remote content catalogs

pub mod catalog;
pub mod classify;
pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

/// Result alias used by public catscan API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline entry points: stage 1, stage 2, and their composition.
pub use pipeline::orchestrator::{enumerate_items, run_scan, scan_items};
