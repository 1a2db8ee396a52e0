//! crates/attendance_core/src/attendance.rs
//!
//! The attendance state machine. A session only ever moves from `Pending` to
//! `Submitted`, and only when a matching code is supplied. `Locked` is inert.

use serde::Serialize;

use crate::domain::{Session, Status};

/// The result of one code submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The code matched and the session moved to `Submitted`.
    Accepted,
    /// The session was already submitted; the candidate was not inspected.
    AlreadySubmitted,
    /// The session is locked; the candidate was not inspected.
    Locked,
    /// The session is pending and the code did not match.
    Rejected,
}

impl Outcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, Outcome::Accepted | Outcome::AlreadySubmitted)
    }

    /// The banner text the real portal shows for this outcome.
    pub fn message(self) -> &'static str {
        if self.is_accepted() {
            "Code submitted successfully."
        } else {
            "Invalid code. Please try again."
        }
    }

    /// A short label saying why the attempt ended the way it did.
    pub fn reason(self) -> &'static str {
        match self {
            Outcome::Accepted => "accepted",
            Outcome::AlreadySubmitted => "already submitted",
            Outcome::Locked => "locked",
            Outcome::Rejected => "invalid code",
        }
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Applies a candidate code to `session`.
///
/// Re-submitting an already submitted session always succeeds and a locked
/// session always refuses, whatever the candidate. A pending session accepts
/// a candidate equal to its code after trimming and uppercasing both sides;
/// attempts are unlimited. A blank expected code never matches.
pub fn submit_code(session: &mut Session, candidate: &str) -> Outcome {
    match session.status {
        Status::Submitted => Outcome::AlreadySubmitted,
        Status::Locked => Outcome::Locked,
        Status::Pending => {
            let expected = normalize(&session.code);
            if !expected.is_empty() && expected == normalize(candidate) {
                session.status = Status::Submitted;
                Outcome::Accepted
            } else {
                Outcome::Rejected
            }
        }
    }
}
