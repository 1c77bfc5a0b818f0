//! Application error constructors.
//!
//! Diagnostics about SQL are data, not errors; these cover the tool itself
//! failing (unreadable input, bad configuration, serialization).

pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create output serialization error
pub fn output_error(format: &str, source: impl std::fmt::Display) -> AppError {
    AppError::internal(format!("Failed to render {} output: {}", format, source))
}
