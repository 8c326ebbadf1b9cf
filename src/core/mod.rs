//! Core module - rolling history, alert state and the session that drives them

mod series;
mod alert;
mod session;
mod engine;

pub use series::{RollingSeries, Sample, DEFAULT_CAPACITY};
pub use alert::{ActiveAlert, AlertState, DEFAULT_ALERT_DURATION};
pub use session::{SessionController, SessionSnapshot, SessionStats};
pub use engine::Engine;

/// Session-relative time: elapsed since the session started
pub type Timestamp = std::time::Duration;
