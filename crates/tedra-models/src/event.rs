use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed priority announced on every curtailment event.
pub const EVENT_PRIORITY: &str = "1";
/// Fixed event type announced on every curtailment event.
pub const EVENT_TYPE: &str = "simple_signal";
/// Event duration, and also the offset from computation time to start time.
pub const EVENT_DURATION_SECONDS: i64 = 60;
/// Wire format of `ADR_start_time`: `YYYY-MM-DD HH:MM:SS.ffffff`.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Discrete curtailment level derived from where the clearing quantity
/// falls within the participant's own demand-curve range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ShedTier {
    NoShed,
    SmallShed,
    MediumShed,
    BigShed,
}

impl ShedTier {
    /// Ordinal announced as the event's `signalPayload`.
    pub fn ordinal(self) -> u8 {
        match self {
            ShedTier::NoShed => 0,
            ShedTier::SmallShed => 1,
            ShedTier::MediumShed => 2,
            ShedTier::BigShed => 3,
        }
    }
}

/// The standardized curtailment signal published on `openADRevent`.
///
/// All fields are strings on the wire; serde renames match the announced
/// schema exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurtailmentEvent {
    #[serde(rename = "event_ID")]
    pub event_id: String,
    pub priority: String,
    #[serde(rename = "ADR_start_time")]
    pub start_time: String,
    pub duration: String,
    #[serde(rename = "signalPayload")]
    pub signal_payload: String,
    pub event_type: String,
}

/// Start time an event computed at `now` announces: `now` plus the fixed
/// duration offset, in the wire format.
pub fn event_start_time(now: DateTime<Utc>) -> String {
    (now + Duration::seconds(EVENT_DURATION_SECONDS))
        .format(START_TIME_FORMAT)
        .to_string()
}
