//! Utility modules: logging, configuration constants, credential loading.

pub mod config;
pub mod credentials;
pub mod logger;

pub use logger::setup_logging;
