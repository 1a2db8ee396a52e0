//! crates/attendance_core/src/domain.rs
//!
//! Defines the pure, core data structures for the mock portal: days, the
//! attendance sessions they group, and the model that owns them.
//! These structs are independent of any serialization format.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::ports::{PortError, PortResult};

/// Lifecycle state of a single attendance session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    Submitted,
    /// Fixed by the dataset. Never entered or left at runtime.
    Locked,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Submitted => "submitted",
            Status::Locked => "locked",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Status::Pending),
            "submitted" => Ok(Status::Submitted),
            "locked" => Ok(Status::Locked),
            other => Err(PortError::MalformedDataset(format!(
                "unrecognized status '{}'",
                other
            ))),
        }
    }
}

/// One schedulable attendance opportunity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    pub course_code: String,
    pub slot_label: String,
    pub time_label: String,
    pub status: Status,
    /// The expected attendance code. Only ever read by the state machine.
    pub(crate) code: String,
}

impl Session {
    pub fn new(
        session_id: impl Into<String>,
        course_code: impl Into<String>,
        slot_label: impl Into<String>,
        time_label: impl Into<String>,
        status: Status,
        code: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            course_code: course_code.into(),
            slot_label: slot_label.into(),
            time_label: time_label.into(),
            status,
            code: code.into(),
        }
    }
}

/// A named grouping of sessions presented together in the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    pub anchor: String,
    pub label: String,
    pub entries: Vec<Session>,
}

/// The whole loaded dataset. Day and entry order are display order and never change.
#[derive(Debug, Clone, Default)]
pub struct Model {
    days: Vec<Day>,
    // session_id -> (day index, entry index); the first occurrence wins.
    index: HashMap<String, (usize, usize)>,
}

impl Model {
    /// Builds a model and its lookup index.
    ///
    /// Duplicate session ids and anchors are not rejected. Lookups resolve to
    /// the first occurrence in display order and a warning is logged for each
    /// repeat.
    pub fn new(days: Vec<Day>) -> Self {
        for anchor in repeated_anchors(&days) {
            tracing::warn!(
                anchor,
                "Duplicate day anchor in dataset; navigation by anchor is ambiguous"
            );
        }

        let mut index = HashMap::new();
        for (day_idx, day) in days.iter().enumerate() {
            for (entry_idx, entry) in day.entries.iter().enumerate() {
                if index.contains_key(&entry.session_id) {
                    tracing::warn!(
                        session_id = %entry.session_id,
                        anchor = %day.anchor,
                        "Duplicate session id in dataset; lookups resolve to the first occurrence"
                    );
                    continue;
                }
                index.insert(entry.session_id.clone(), (day_idx, entry_idx));
            }
        }
        Self { days, index }
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn session_count(&self) -> usize {
        self.days.iter().map(|d| d.entries.len()).sum()
    }

    /// Returns the day and session whose id matches `session_id`.
    pub fn find_session(&self, session_id: &str) -> PortResult<(&Day, &Session)> {
        let &(day_idx, entry_idx) = self
            .index
            .get(session_id)
            .ok_or_else(|| PortError::SessionNotFound(session_id.to_string()))?;
        let day = &self.days[day_idx];
        Ok((day, &day.entries[entry_idx]))
    }

    /// Mutable counterpart of [`Model::find_session`], for the state machine.
    pub fn find_session_mut(&mut self, session_id: &str) -> PortResult<&mut Session> {
        let &(day_idx, entry_idx) = self
            .index
            .get(session_id)
            .ok_or_else(|| PortError::SessionNotFound(session_id.to_string()))?;
        Ok(&mut self.days[day_idx].entries[entry_idx])
    }
}

/// Anchors that appear on more than one day, each reported once per repeat.
pub fn repeated_anchors(days: &[Day]) -> Vec<&str> {
    let mut seen = HashSet::new();
    days.iter()
        .map(|day| day.anchor.as_str())
        .filter(|anchor| !seen.insert(*anchor))
        .collect()
}
