//! Expiry Calculator
//!
//! Exchange expiry strings look like `28-Nov-2025`. Index options settle at
//! 15:30 exchange local time on the expiry date; time to expiry is measured
//! from `now` to that instant on a 365-day year and never goes negative.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Offset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::PricingError;
use super::black_scholes::DAYS_PER_YEAR;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// IST, the exchange's local time (UTC+05:30).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// An exchange expiry date in `DD-MMM-YYYY` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpiryDate(NaiveDate);

impl ExpiryDate {
    /// Wrap a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for ExpiryDate {
    type Err = PricingError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.trim().split('-').collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(PricingError::bad_date(
                input,
                format!("expected 3 dash-separated parts, got {}", parts.len()),
            ));
        };

        let day: u32 = parse_digits(day, 1..=2)
            .ok_or_else(|| PricingError::bad_date(input, format!("invalid day '{day}'")))?;
        let month = MONTHS
            .iter()
            .position(|m| m == month)
            .ok_or_else(|| PricingError::bad_date(input, format!("unknown month '{month}'")))?;
        let year: u32 = parse_digits(year, 4..=4)
            .ok_or_else(|| PricingError::bad_date(input, format!("invalid year '{year}'")))?;

        NaiveDate::from_ymd_opt(year as i32, month as u32 + 1, day)
            .map(Self)
            .ok_or_else(|| PricingError::bad_date(input, "no such calendar date"))
    }
}

fn parse_digits(token: &str, width: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !width.contains(&token.len()) || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}-{}-{:04}",
            self.0.day(),
            MONTHS[self.0.month0() as usize],
            self.0.year()
        )
    }
}

impl TryFrom<String> for ExpiryDate {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExpiryDate> for String {
    fn from(value: ExpiryDate) -> Self {
        value.to_string()
    }
}

/// Settlement convention of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeCalendar {
    offset: FixedOffset,
    settlement: NaiveTime,
}

impl Default for ExchangeCalendar {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60)
                .unwrap_or_else(|| Utc.fix()),
            settlement: NaiveTime::from_hms_opt(15, 30, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl ExchangeCalendar {
    /// Build a calendar from a UTC offset and a settlement wall-clock time.
    ///
    /// Returns `None` when the offset or time is out of range.
    #[must_use]
    pub fn new(
        utc_offset_minutes: i32,
        settlement_hour: u32,
        settlement_minute: u32,
    ) -> Option<Self> {
        Some(Self {
            offset: FixedOffset::east_opt(utc_offset_minutes.checked_mul(60)?)?,
            settlement: NaiveTime::from_hms_opt(settlement_hour, settlement_minute, 0)?,
        })
    }

    /// Exchange local offset.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The instant at which the expiry settles.
    #[must_use]
    pub fn settlement_instant(&self, expiry: ExpiryDate) -> DateTime<Utc> {
        let local = expiry.date().and_time(self.settlement);
        let utc = local - TimeDelta::seconds(i64::from(self.offset.local_minus_utc()));
        DateTime::from_naive_utc_and_offset(utc, Utc)
    }

    /// Fractional days from `now` until settlement, floored at zero.
    #[must_use]
    pub fn days_until(&self, expiry: ExpiryDate, now: DateTime<Utc>) -> f64 {
        let remaining = self.settlement_instant(expiry) - now;
        (remaining.num_milliseconds() as f64 / MILLIS_PER_DAY).max(0.0)
    }

    /// Time to expiry in years on a 365-day year, never negative.
    #[must_use]
    pub fn time_to_expiry_years(&self, expiry: ExpiryDate, now: DateTime<Utc>) -> f64 {
        self.days_until(expiry, now) / DAYS_PER_YEAR
    }

    /// Whole calendar days left, rounded up; zero once settled.
    #[must_use]
    pub fn days_to_expiry(&self, expiry: ExpiryDate, now: DateTime<Utc>) -> u32 {
        self.days_until(expiry, now).ceil() as u32
    }
}

/// Time to expiry in years under the default exchange convention.
#[must_use]
pub fn time_to_expiry_years(expiry: ExpiryDate, now: DateTime<Utc>) -> f64 {
    ExchangeCalendar::default().time_to_expiry_years(expiry, now)
}
