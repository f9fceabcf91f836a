//! Black-Scholes Pricer
//!
//! Closed-form European pricing and Greeks for index options. Greeks follow the
//! exchange dashboard conventions:
//!
//! - theta is per calendar day (annual theta / 365)
//! - vega is per one volatility point (raw vega / 100)
//! - rho is per one rate point (raw rho / 100)
//!
//! Downstream recommendation thresholds compare against per-day theta, so
//! these scalings are part of the contract.

// Black-Scholes uses standard mathematical notation (s, k, t, r, sigma)
// Financial formulas use standard notation where mul_add() obscures meaning
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use serde::{Deserialize, Serialize};

use super::PricingError;
use super::normal::{norm_cdf, norm_pdf};

/// Calendar days per year used for theta and expiry scaling.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    /// Call option (CE on the exchange).
    #[serde(rename = "CE", alias = "call", alias = "CALL")]
    Call,
    /// Put option (PE on the exchange).
    #[serde(rename = "PE", alias = "put", alias = "PUT")]
    Put,
}

impl OptionKind {
    /// Exchange code for the option type.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Call => "CE",
            Self::Put => "PE",
        }
    }
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Inputs to a single pricing call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Underlying spot price.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to expiry in years.
    pub time_to_expiry_years: f64,
    /// Continuously compounded risk-free rate (decimal).
    pub risk_free_rate: f64,
    /// Volatility (decimal, 0.185 = 18.5%).
    pub volatility: f64,
    /// Call or put.
    pub kind: OptionKind,
}

impl MarketParameters {
    /// Create market parameters.
    #[must_use]
    pub const fn new(
        spot: f64,
        strike: f64,
        time_to_expiry_years: f64,
        risk_free_rate: f64,
        volatility: f64,
        kind: OptionKind,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry_years,
            risk_free_rate,
            volatility,
            kind,
        }
    }

    /// Same contract, different volatility.
    #[must_use]
    pub const fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Same contract, different option type.
    #[must_use]
    pub const fn with_kind(mut self, kind: OptionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Intrinsic value at the current spot.
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        intrinsic_value(self.spot, self.strike, self.kind)
    }

    pub(super) fn validate(&self) -> Result<(), PricingError> {
        // Negated comparisons also reject NaN.
        if !(self.spot > 0.0) || !self.spot.is_finite() {
            return Err(PricingError::invalid("spot", self.spot, "must be positive"));
        }
        if !(self.strike > 0.0) || !self.strike.is_finite() {
            return Err(PricingError::invalid(
                "strike",
                self.strike,
                "must be positive",
            ));
        }
        if !(self.volatility > 0.0) || !self.volatility.is_finite() {
            return Err(PricingError::invalid(
                "volatility",
                self.volatility,
                "must be positive",
            ));
        }
        if self.time_to_expiry_years.is_nan() {
            return Err(PricingError::invalid(
                "time_to_expiry_years",
                self.time_to_expiry_years,
                "must be a number",
            ));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(PricingError::invalid(
                "risk_free_rate",
                self.risk_free_rate,
                "must be finite",
            ));
        }
        Ok(())
    }
}

/// Option sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Greeks {
    /// Change in price per unit move of the underlying.
    pub delta: f64,
    /// Change in delta per unit move of the underlying.
    pub gamma: f64,
    /// Price decay per calendar day.
    pub theta: f64,
    /// Price change per one volatility point.
    pub vega: f64,
    /// Price change per one rate point.
    pub rho: f64,
}

/// Theoretical price, its decomposition and Greeks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionPricing {
    /// Model price, never below intrinsic value.
    pub theoretical_price: f64,
    /// Value if exercised now.
    pub intrinsic_value: f64,
    /// `theoretical_price - intrinsic_value`, clamped at zero.
    pub time_value: f64,
    /// Sensitivities.
    pub greeks: Greeks,
}

/// Intrinsic value of an option.
#[must_use]
pub fn intrinsic_value(spot: f64, strike: f64, kind: OptionKind) -> f64 {
    match kind {
        OptionKind::Call => (spot - strike).max(0.0),
        OptionKind::Put => (strike - spot).max(0.0),
    }
}

/// Price an option and compute its Greeks.
///
/// At or past expiry the option is worth its intrinsic value, delta is the
/// exercise indicator and the remaining Greeks are zero.
///
/// The closed-form European put can sit below intrinsic value deep in the
/// money when rates are positive; the reported price is floored at intrinsic
/// so `time_value` is never negative. Greeks are the unfloored closed forms.
///
/// # Errors
///
/// Returns [`PricingError::InvalidParameter`] for non-positive spot, strike or
/// volatility.
pub fn price(params: MarketParameters) -> Result<OptionPricing, PricingError> {
    let (model_price, greeks) = european(params)?;
    let intrinsic = params.intrinsic_value();
    let theoretical_price = model_price.max(intrinsic);

    Ok(OptionPricing {
        theoretical_price,
        intrinsic_value: intrinsic,
        time_value: (theoretical_price - intrinsic).max(0.0),
        greeks,
    })
}

/// Unfloored closed-form price with its Greeks.
///
/// Strictly increasing in volatility while `T > 0`, which the IV solver
/// relies on.
pub(super) fn european(params: MarketParameters) -> Result<(f64, Greeks), PricingError> {
    params.validate()?;

    let MarketParameters {
        spot: s,
        strike: k,
        time_to_expiry_years: t,
        risk_free_rate: r,
        volatility: sigma,
        kind,
    } = params;

    if t <= 0.0 {
        let delta = match kind {
            OptionKind::Call if s > k => 1.0,
            OptionKind::Put if s < k => -1.0,
            _ => 0.0,
        };
        return Ok((
            intrinsic_value(s, k, kind),
            Greeks {
                delta,
                ..Greeks::default()
            },
        ));
    }

    let sqrt_t = t.sqrt();
    let sigma_sqrt_t = sigma * sqrt_t;
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;

    let discount = (-r * t).exp();
    let nd1 = norm_pdf(d1);
    let decay = -(s * nd1 * sigma) / (2.0 * sqrt_t);

    let gamma = nd1 / (s * sigma_sqrt_t);
    let vega = s * nd1 * sqrt_t / 100.0;

    let (model_price, delta, theta, rho) = match kind {
        OptionKind::Call => {
            let cdf_d1 = norm_cdf(d1);
            let cdf_d2 = norm_cdf(d2);
            (
                s * cdf_d1 - k * discount * cdf_d2,
                cdf_d1,
                (decay - r * k * discount * cdf_d2) / DAYS_PER_YEAR,
                k * t * discount * cdf_d2 / 100.0,
            )
        }
        OptionKind::Put => {
            let cdf_neg_d1 = norm_cdf(-d1);
            let cdf_neg_d2 = norm_cdf(-d2);
            (
                k * discount * cdf_neg_d2 - s * cdf_neg_d1,
                norm_cdf(d1) - 1.0,
                (decay + r * k * discount * cdf_neg_d2) / DAYS_PER_YEAR,
                -k * t * discount * cdf_neg_d2 / 100.0,
            )
        }
    };

    Ok((
        model_price,
        Greeks {
            delta,
            gamma,
            theta,
            vega,
            rho,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    fn params(kind: OptionKind) -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.20, kind)
    }

    #[test]
    fn call_atm_matches_reference() {
        let pricing = price(params(OptionKind::Call)).unwrap();
        // Hull: S=K=100, T=1, r=5%, sigma=20% -> 10.4506
        assert!(approx_eq(pricing.theoretical_price, 10.4506, 1e-3));
        assert!(approx_eq(pricing.greeks.delta, 0.6368, 1e-3));
        assert!(approx_eq(pricing.greeks.gamma, 0.018_76, 1e-4));
        // Annual vega 37.52 -> per point 0.3752
        assert!(approx_eq(pricing.greeks.vega, 0.3752, 1e-3));
        // Annual theta -6.414 -> per day
        assert!(approx_eq(pricing.greeks.theta, -6.414 / 365.0, 1e-4));
        // Annual rho 53.23 -> per point
        assert!(approx_eq(pricing.greeks.rho, 0.5323, 1e-3));
    }

    #[test]
    fn put_atm_matches_reference() {
        let pricing = price(params(OptionKind::Put)).unwrap();
        assert!(approx_eq(pricing.theoretical_price, 5.5735, 1e-3));
        assert!(approx_eq(pricing.greeks.delta, -0.3632, 1e-3));
        assert!(pricing.greeks.rho < 0.0);
        assert!(approx_eq(pricing.greeks.theta, -1.658 / 365.0, 1e-4));
    }

    #[test]
    fn put_call_parity_holds_near_the_money() {
        let call = price(params(OptionKind::Call)).unwrap();
        let put = price(params(OptionKind::Put)).unwrap();
        let parity = 100.0 - 100.0 * (-0.05_f64).exp();
        assert!(approx_eq(
            call.theoretical_price - put.theoretical_price,
            parity,
            1e-5
        ));
    }

    #[test]
    fn expired_call_is_intrinsic() {
        let pricing = price(MarketParameters::new(
            26_100.0,
            26_000.0,
            0.0,
            0.065,
            0.15,
            OptionKind::Call,
        ))
        .unwrap();
        assert_eq!(pricing.theoretical_price, 100.0);
        assert_eq!(pricing.intrinsic_value, 100.0);
        assert_eq!(pricing.time_value, 0.0);
        assert_eq!(pricing.greeks.delta, 1.0);
        assert_eq!(pricing.greeks.gamma, 0.0);
        assert_eq!(pricing.greeks.theta, 0.0);
        assert_eq!(pricing.greeks.vega, 0.0);
        assert_eq!(pricing.greeks.rho, 0.0);
    }

    #[test]
    fn expired_otm_put_is_worthless() {
        let pricing = price(MarketParameters::new(
            26_100.0,
            26_000.0,
            -0.01,
            0.065,
            0.15,
            OptionKind::Put,
        ))
        .unwrap();
        assert_eq!(pricing.theoretical_price, 0.0);
        assert_eq!(pricing.greeks.delta, 0.0);
    }

    #[test]
    fn expired_itm_put_has_unit_delta() {
        let pricing = price(MarketParameters::new(
            25_900.0,
            26_000.0,
            0.0,
            0.065,
            0.15,
            OptionKind::Put,
        ))
        .unwrap();
        assert_eq!(pricing.theoretical_price, 100.0);
        assert_eq!(pricing.greeks.delta, -1.0);
    }

    #[test]
    fn negative_rate_discounts_calls() {
        let base = params(OptionKind::Call);
        let negative = price(MarketParameters {
            risk_free_rate: -0.005,
            ..base
        })
        .unwrap();
        let positive = price(base).unwrap();

        assert!(negative.theoretical_price > 0.0);
        assert!(negative.theoretical_price < positive.theoretical_price);
    }

    #[test]
    fn rejects_non_positive_inputs() {
        let base = params(OptionKind::Call);

        let err = price(MarketParameters { spot: 0.0, ..base }).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { field: "spot", .. }
        ));

        let err = price(MarketParameters {
            strike: -100.0,
            ..base
        })
        .unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { field: "strike", .. }
        ));

        let err = price(base.with_volatility(0.0)).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter {
                field: "volatility",
                ..
            }
        ));

        let err = price(base.with_volatility(f64::NAN)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter { .. }));
    }

    #[test]
    fn invalid_inputs_fail_even_when_expired() {
        let expired = MarketParameters::new(-5.0, 100.0, 0.0, 0.05, 0.2, OptionKind::Call);
        assert!(price(expired).is_err());
    }

    #[test]
    fn deep_itm_put_is_floored_at_intrinsic() {
        let pricing = price(MarketParameters::new(
            50.0,
            100.0,
            2.0,
            0.10,
            0.05,
            OptionKind::Put,
        ))
        .unwrap();
        assert_eq!(pricing.theoretical_price, pricing.intrinsic_value);
        assert_eq!(pricing.time_value, 0.0);
        // Greeks stay the closed-form values
        assert!(pricing.greeks.delta < -0.99);
    }

    #[test]
    fn nifty_weekly_greeks_are_sane() {
        // 6 days to expiry, 13% IV
        let pricing = price(MarketParameters::new(
            26_068.15,
            26_050.0,
            6.0 / 365.0,
            0.065,
            0.13,
            OptionKind::Call,
        ))
        .unwrap();
        assert!(pricing.greeks.delta > 0.5 && pricing.greeks.delta < 0.6);
        assert!(pricing.greeks.theta < -10.0);
        assert!(pricing.greeks.vega > 0.0);
        assert!(pricing.theoretical_price > pricing.intrinsic_value);
    }

    #[test]
    fn option_kind_serde_uses_exchange_codes() {
        assert_eq!(serde_json::to_string(&OptionKind::Call).unwrap(), "\"CE\"");
        assert_eq!(serde_json::to_string(&OptionKind::Put).unwrap(), "\"PE\"");
        let parsed: OptionKind = serde_json::from_str("\"call\"").unwrap();
        assert_eq!(parsed, OptionKind::Call);
        assert_eq!(OptionKind::Put.to_string(), "PE");
    }
}
