pub mod attendance;
pub mod domain;
pub mod loader;
pub mod ports;
pub mod projection;
pub mod store;

pub use attendance::{submit_code, Outcome};
pub use domain::{Day, Model, Session, Status};
pub use loader::parse_dataset;
pub use ports::{DatasetSource, InlineDataset, PortError, PortResult};
pub use projection::{detail, list_by_day, DayView, SessionDetailView, SessionView};
pub use store::{SessionStore, Submission};
