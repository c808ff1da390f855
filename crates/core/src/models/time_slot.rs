use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A half-hour boundary within business hours and whether it can be booked.
///
/// Slots are derived on every request and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "hour_minute")]
    pub time: NaiveTime,
    pub available: bool,
}

impl TimeSlot {
    pub fn label(&self) -> String {
        self.time.format(hour_minute::FORMAT).to_string()
    }
}

/// `HH:MM` on the wire.
mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(D::Error::custom)
    }
}
