//! Engine module: CLI surface, timeout guard, progress aggregation.

pub mod arg_parser;
pub mod cli;
pub mod progress;
pub mod timeout;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use cli::handle_run;
pub use progress::{ProgressHandle, ProgressTracker};
pub use timeout::{TimeoutOutcome, run_with_timeout};
