//! Options pricing.
//!
//! This module provides:
//! - Standard normal primitives (Abramowitz-Stegun CDF)
//! - Black-Scholes prices and Greeks
//! - Exchange expiry parsing and time to expiry
//! - Implied volatility inversion (Newton-Raphson)
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use options_advisor::pricing::{OptionKind, PricingContext};
//!
//! let now = Utc.with_ymd_and_hms(2025, 11, 22, 4, 30, 0).unwrap();
//! let ctx = PricingContext::new(now);
//! let pricing = ctx
//!     .price_exchange_option(26_000.0, 26_000.0, "28-Nov-2025", 14.0, OptionKind::Call)
//!     .unwrap();
//! assert!(pricing.greeks.delta > 0.5);
//! ```

mod black_scholes;
mod error;
mod expiry;
mod iv;
mod normal;

use chrono::{DateTime, Utc};

pub use black_scholes::{
    DAYS_PER_YEAR, Greeks, MarketParameters, OptionKind, OptionPricing, intrinsic_value, price,
};
pub use error::PricingError;
pub use expiry::{DEFAULT_UTC_OFFSET_MINUTES, ExchangeCalendar, ExpiryDate, time_to_expiry_years};
pub use iv::{IvEstimate, IvSolver, IvSolverConfig, implied_volatility};
pub use normal::{norm_cdf, norm_pdf};

/// Default annual risk-free rate (decimal).
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.065;

/// Everything needed to price exchange-quoted contracts at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingContext {
    /// Valuation instant.
    pub now: DateTime<Utc>,
    /// Settlement convention.
    pub calendar: ExchangeCalendar,
    /// Annual risk-free rate (decimal).
    pub risk_free_rate: f64,
}

impl PricingContext {
    /// Context with the default calendar and rate.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            calendar: ExchangeCalendar::default(),
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }

    /// Override the settlement calendar.
    #[must_use]
    pub const fn with_calendar(mut self, calendar: ExchangeCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Override the risk-free rate.
    #[must_use]
    pub const fn with_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Years until `expiry` settles.
    #[must_use]
    pub fn years_to(&self, expiry: ExpiryDate) -> f64 {
        self.calendar.time_to_expiry_years(expiry, self.now)
    }

    /// Whole days until `expiry` settles.
    #[must_use]
    pub fn days_to(&self, expiry: ExpiryDate) -> u32 {
        self.calendar.days_to_expiry(expiry, self.now)
    }

    /// Price a contract given wire units: expiry as `DD-MMM-YYYY` and IV in percent.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidDateFormat`] for a malformed expiry and
    /// [`PricingError::InvalidParameter`] for non-positive inputs.
    pub fn price_exchange_option(
        &self,
        spot: f64,
        strike: f64,
        expiry: &str,
        iv_percent: f64,
        kind: OptionKind,
    ) -> Result<OptionPricing, PricingError> {
        let expiry: ExpiryDate = expiry.parse()?;
        price(MarketParameters::new(
            spot,
            strike,
            self.years_to(expiry),
            self.risk_free_rate,
            iv_percent / 100.0,
            kind,
        ))
    }
}

/// Price an exchange-quoted contract at `now`.
///
/// Free-function form of [`PricingContext::price_exchange_option`] with the
/// default calendar.
pub fn price_exchange_option(
    spot: f64,
    strike: f64,
    expiry: &str,
    iv_percent: f64,
    kind: OptionKind,
    now: DateTime<Utc>,
    risk_free_rate: f64,
) -> Result<OptionPricing, PricingError> {
    PricingContext::new(now)
        .with_rate(risk_free_rate)
        .price_exchange_option(spot, strike, expiry, iv_percent, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn wire_units_match_direct_pricing() {
        let now = Utc.with_ymd_and_hms(2025, 11, 22, 4, 30, 0).unwrap();
        let via_wire = price_exchange_option(
            26_000.0,
            26_100.0,
            "28-Nov-2025",
            14.0,
            OptionKind::Call,
            now,
            DEFAULT_RISK_FREE_RATE,
        )
        .unwrap();

        let t = time_to_expiry_years("28-Nov-2025".parse().unwrap(), now);
        let direct = price(MarketParameters::new(
            26_000.0,
            26_100.0,
            t,
            DEFAULT_RISK_FREE_RATE,
            0.14,
            OptionKind::Call,
        ))
        .unwrap();

        assert_eq!(via_wire, direct);
    }

    #[test]
    fn bad_expiry_is_reported() {
        let ctx = PricingContext::new(Utc::now());
        let err = ctx
            .price_exchange_option(26_000.0, 26_000.0, "2025-11-28", 14.0, OptionKind::Put)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidDateFormat { .. }));
    }
}
