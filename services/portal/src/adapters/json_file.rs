//! services/portal/src/adapters/json_file.rs
//!
//! A dataset source backed by a JSON file on disk. The file is re-read on
//! every load so a reset picks up edits made while the server is running.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use attendance_core::ports::{DatasetSource, PortError, PortResult};

#[derive(Debug, Clone)]
pub struct JsonFileDataset {
    path: PathBuf,
}

impl JsonFileDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for JsonFileDataset {
    async fn read_definition(&self) -> PortResult<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PortError::Unexpected(format!("failed to read {}: {}", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
