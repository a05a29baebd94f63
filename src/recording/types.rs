//! Recording error types.

use thiserror::Error;

/// Errors while writing recorded treadmill state.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Output directory missing or not a directory
    #[error("Output directory not found: {0}")]
    DirectoryNotFound(String),

    /// Failed to create export file
    #[error("Failed to create file: {0}")]
    FileCreationFailed(String),

    /// Failed to write export data
    #[error("Failed to write data: {0}")]
    WriteFailed(String),
}
