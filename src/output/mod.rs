//! Output handling
//!
//! Defines the JSONL record writer and the errors output operations can
//! produce. Output faults are the one error category that ends a run, so
//! they propagate instead of being absorbed like fetch failures.

mod jsonl;

pub use jsonl::JsonlWriter;

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
