//! crates/attendance_core/src/projection.rs
//!
//! Read-only views over the model. None of them carry the expected code.

use serde::Serialize;

use crate::domain::{Model, Session, Status};

/// One session as shown in the day listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub course_code: String,
    pub slot_label: String,
    pub time_label: String,
    pub status: Status,
}

/// One day with its sessions in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub anchor: String,
    pub label: String,
    pub entries: Vec<SessionView>,
}

/// A single session as shown on its detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionDetailView {
    pub course_code: String,
    pub slot_label: String,
    pub time_label: String,
    pub status: Status,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.session_id.clone(),
            course_code: session.course_code.clone(),
            slot_label: session.slot_label.clone(),
            time_label: session.time_label.clone(),
            status: session.status,
        }
    }
}

impl From<&Session> for SessionDetailView {
    fn from(session: &Session) -> Self {
        Self {
            course_code: session.course_code.clone(),
            slot_label: session.slot_label.clone(),
            time_label: session.time_label.clone(),
            status: session.status,
        }
    }
}

pub fn list_by_day(model: &Model) -> Vec<DayView> {
    model
        .days()
        .iter()
        .map(|day| DayView {
            anchor: day.anchor.clone(),
            label: day.label.clone(),
            entries: day.entries.iter().map(SessionView::from).collect(),
        })
        .collect()
}

pub fn detail(session: &Session) -> SessionDetailView {
    SessionDetailView::from(session)
}
