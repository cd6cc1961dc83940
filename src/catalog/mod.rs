//! Catalog access: the client trait the pipeline consumes, typed errors, and
//! the HTTP implementation plus login flow.

pub mod auth;
pub mod http;

use thiserror::Error;

use crate::types::{DateRange, ItemId, ItemSummary};

pub use auth::connect;
pub use http::HttpCatalogClient;

/// Errors from catalog calls. `Transport` and `Auth` are fatal to the worker
/// that hits them (surfaced at pool join); `Malformed` means the item is
/// treated as "not a match" and skipped.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("malformed metadata for {id}: {reason}")]
    Malformed { id: ItemId, reason: String },
}

/// System-level metadata: visibility is all the scan needs.
#[derive(Clone, Copy, Debug)]
pub struct SystemMetadata {
    pub public: bool,
}

/// Descriptive metadata: the title the classifier runs on.
#[derive(Clone, Debug)]
pub struct DescriptiveMetadata {
    pub title: String,
}

/// Read-only catalog handle, shared across all workers in a pool. Assumed
/// stateless aside from auth, so concurrent calls are safe.
pub trait CatalogClient: Send + Sync {
    /// Items created in the half-open window `[range.start, range.end)`.
    fn items_in_range(&self, range: &DateRange) -> Result<Vec<ItemSummary>, CatalogError>;

    fn system_metadata(&self, id: &ItemId) -> Result<SystemMetadata, CatalogError>;

    fn descriptive_metadata(&self, id: &ItemId) -> Result<DescriptiveMetadata, CatalogError>;
}
