//! services/portal/src/error.rs
//!
//! Defines the primary error type for the portal service.

use std::path::PathBuf;

use crate::config::ConfigError;
use attendance_core::ports::PortError;

/// The primary error type for the `portal` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the attendance core.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The static asset directory the pages link to does not exist.
    #[error("Missing static assets at {}", .0.display())]
    MissingStatic(PathBuf),
}
