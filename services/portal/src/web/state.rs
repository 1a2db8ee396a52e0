//! services/portal/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use attendance_core::{DatasetSource, SessionStore};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    /// Where `/mock/reset` reloads the model from.
    pub dataset: Arc<dyn DatasetSource>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Loads the initial model from `dataset` and wraps everything up.
    pub async fn load(
        config: Arc<Config>,
        dataset: Arc<dyn DatasetSource>,
    ) -> attendance_core::PortResult<Self> {
        let store = SessionStore::load(dataset.as_ref()).await?;
        Ok(Self {
            store: Arc::new(store),
            dataset,
            config,
        })
    }
}
