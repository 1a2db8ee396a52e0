//! crates/attendance_core/src/ports.rs
//!
//! Defines the error type shared by all core operations and the contract for
//! fetching the raw dataset definition. The core never touches the filesystem
//! itself; adapters in the service crate implement [`DatasetSource`].

use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The error type for all core and port operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// The dataset definition could not be turned into a model.
    #[error("Malformed dataset: {0}")]
    MalformedDataset(String),
    /// No session in the current model carries the requested id.
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Reads the raw JSON definition of days and sessions.
    async fn read_definition(&self) -> PortResult<String>;

    /// A short human-readable name for log lines, e.g. a file path.
    fn describe(&self) -> String;
}

/// A dataset held in memory. Handy for fixtures and embedding.
#[derive(Debug, Clone)]
pub struct InlineDataset {
    json: String,
}

impl InlineDataset {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

#[async_trait]
impl DatasetSource for InlineDataset {
    async fn read_definition(&self) -> PortResult<String> {
        Ok(self.json.clone())
    }

    fn describe(&self) -> String {
        "<inline dataset>".to_string()
    }
}
