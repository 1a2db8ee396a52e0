//! crates/attendance_core/src/loader.rs
//!
//! Turns the raw JSON dataset into a [`Model`].
//!
//! The accepted document is either `{"days": [...]}` or a bare array of days.
//! Each day carries `anchor`, `label` and `entries`; each entry carries
//! `session_id`, `course_code`, `slot_label`, `time_label` and optionally
//! `status` (default `pending`) and `code` (default empty).

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Day, Model, Session, Status};
use crate::ports::{PortError, PortResult};

//=========================================================================================
// "Impure" Dataset Record Structs
//=========================================================================================

// Every field is optional at this layer so a missing one can be reported with
// its location instead of a bare serde message.

#[derive(Deserialize)]
struct DayRecord {
    anchor: Option<String>,
    label: Option<String>,
    #[serde(default)]
    entries: Vec<EntryRecord>,
}

#[derive(Deserialize)]
struct EntryRecord {
    session_id: Option<String>,
    course_code: Option<String>,
    slot_label: Option<String>,
    time_label: Option<String>,
    status: Option<String>,
    code: Option<String>,
}

fn required(value: Option<String>, location: &str, field: &str) -> PortResult<String> {
    value.ok_or_else(|| {
        PortError::MalformedDataset(format!("{}: missing field `{}`", location, field))
    })
}

impl EntryRecord {
    fn to_domain(self, location: &str) -> PortResult<Session> {
        let status = match self.status {
            Some(raw) => raw.parse::<Status>().map_err(|e| match e {
                PortError::MalformedDataset(msg) => {
                    PortError::MalformedDataset(format!("{}: {}", location, msg))
                }
                other => other,
            })?,
            None => Status::Pending,
        };
        Ok(Session {
            session_id: required(self.session_id, location, "session_id")?,
            course_code: required(self.course_code, location, "course_code")?,
            slot_label: required(self.slot_label, location, "slot_label")?,
            time_label: required(self.time_label, location, "time_label")?,
            status,
            code: self.code.unwrap_or_default(),
        })
    }
}

impl DayRecord {
    fn to_domain(self, day_idx: usize) -> PortResult<Day> {
        let location = format!("days[{}]", day_idx);
        let anchor = required(self.anchor, &location, "anchor")?;
        let label = required(self.label, &location, "label")?;
        let entries = self
            .entries
            .into_iter()
            .enumerate()
            .map(|(entry_idx, entry)| {
                entry.to_domain(&format!("{}.entries[{}]", location, entry_idx))
            })
            .collect::<PortResult<Vec<_>>>()?;
        Ok(Day {
            anchor,
            label,
            entries,
        })
    }
}

//=========================================================================================
// Public Entry Points
//=========================================================================================

/// Parses a JSON dataset definition into a fully-built [`Model`].
///
/// Either the whole model is produced or a [`PortError::MalformedDataset`] is
/// returned; nothing partial escapes.
pub fn parse_dataset(json: &str) -> PortResult<Model> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| PortError::MalformedDataset(format!("invalid JSON: {}", e)))?;

    let days_value = match document {
        Value::Array(days) => Value::Array(days),
        Value::Object(mut map) => map.remove("days").unwrap_or(Value::Array(Vec::new())),
        _ => {
            return Err(PortError::MalformedDataset(
                "expected an object with a `days` list or a list of days".to_string(),
            ))
        }
    };

    let records: Vec<DayRecord> = serde_json::from_value(days_value)
        .map_err(|e| PortError::MalformedDataset(format!("days: {}", e)))?;

    let days = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| record.to_domain(idx))
        .collect::<PortResult<Vec<_>>>()?;

    Ok(Model::new(days))
}
