//! crates/attendance_core/src/store.rs
//!
//! The single owning handle around the current [`Model`].
//!
//! Every read that spans sessions and every mutation goes through one mutex.
//! A reload parses the replacement outside the lock and swaps it in whole, so
//! readers see either the old model or the new one and a failed parse leaves
//! the old model in place.

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::attendance::{self, Outcome};
use crate::domain::Model;
use crate::loader::parse_dataset;
use crate::ports::{DatasetSource, PortResult};
use crate::projection::{self, DayView, SessionDetailView};

/// The result of a submission: how it went and what the session looks like now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub outcome: Outcome,
    pub detail: SessionDetailView,
}

pub struct SessionStore {
    model: Mutex<Model>,
}

impl SessionStore {
    pub fn new(model: Model) -> Self {
        Self {
            model: Mutex::new(model),
        }
    }

    /// Builds a store from whatever `source` currently holds.
    pub async fn load(source: &dyn DatasetSource) -> PortResult<Self> {
        let model = read_model(source).await?;
        Ok(Self::new(model))
    }

    pub async fn list_by_day(&self) -> Vec<DayView> {
        let model = self.model.lock().await;
        projection::list_by_day(&model)
    }

    /// The detail view of one session along with its day's anchor.
    pub async fn detail(&self, session_id: &str) -> PortResult<(String, SessionDetailView)> {
        let model = self.model.lock().await;
        let (day, session) = model.find_session(session_id)?;
        Ok((day.anchor.clone(), projection::detail(session)))
    }

    /// Looks up `session_id` and runs the state machine on it, all under one lock.
    pub async fn submit_code(&self, session_id: &str, candidate: &str) -> PortResult<Submission> {
        let mut model = self.model.lock().await;
        let session = model.find_session_mut(session_id)?;
        let outcome = attendance::submit_code(session, candidate);
        debug!(
            session_id,
            outcome = outcome.reason(),
            status = %session.status,
            "Processed attendance code"
        );
        Ok(Submission {
            outcome,
            detail: projection::detail(session),
        })
    }

    /// Replaces the current model with a fresh one from `source`.
    pub async fn reload(&self, source: &dyn DatasetSource) -> PortResult<()> {
        let fresh = read_model(source).await?;
        let sessions = fresh.session_count();
        *self.model.lock().await = fresh;
        info!(source = %source.describe(), sessions, "Dataset reloaded");
        Ok(())
    }
}

async fn read_model(source: &dyn DatasetSource) -> PortResult<Model> {
    let raw = source.read_definition().await?;
    parse_dataset(&raw)
}
