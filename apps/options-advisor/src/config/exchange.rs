//! Exchange settlement convention.

use serde::{Deserialize, Serialize};

use crate::pricing::{DEFAULT_UTC_OFFSET_MINUTES, ExchangeCalendar};

/// Exchange local time and settlement time of day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Exchange offset from UTC in minutes (330 = UTC+05:30).
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    /// Settlement hour, exchange local time.
    #[serde(default = "default_settlement_hour")]
    pub settlement_hour: u32,
    /// Settlement minute.
    #[serde(default = "default_settlement_minute")]
    pub settlement_minute: u32,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
            settlement_hour: default_settlement_hour(),
            settlement_minute: default_settlement_minute(),
        }
    }
}

impl ExchangeConfig {
    /// Calendar for these settings, or `None` if they are out of range.
    #[must_use]
    pub fn calendar(&self) -> Option<ExchangeCalendar> {
        ExchangeCalendar::new(
            self.utc_offset_minutes,
            self.settlement_hour,
            self.settlement_minute,
        )
    }
}

const fn default_utc_offset_minutes() -> i32 {
    DEFAULT_UTC_OFFSET_MINUTES
}
const fn default_settlement_hour() -> u32 {
    15
}
const fn default_settlement_minute() -> u32 {
    30
}
