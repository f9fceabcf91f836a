//! Implied Volatility Solver
//!
//! Newton-Raphson inversion of the Black-Scholes pricer. Works in decimal
//! volatility internally and reports percent, the unit quotes arrive in.
//!
//! The solver never fails on non-convergence: it returns its best estimate
//! with `converged = false` so callers can decide whether to trust it.

use serde::{Deserialize, Serialize};

use super::PricingError;
use super::black_scholes::{MarketParameters, OptionKind, european, price};

/// Configuration for the IV solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IvSolverConfig {
    /// Maximum Newton-Raphson iterations.
    pub max_iterations: u32,
    /// Convergence tolerance (absolute price error).
    pub tolerance: f64,
    /// Starting volatility (decimal).
    pub initial_guess: f64,
    /// Minimum volatility bound (e.g., 0.01 = 1%).
    pub min_vol: f64,
    /// Maximum volatility bound (e.g., 3.0 = 300%).
    pub max_vol: f64,
}

impl Default for IvSolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-4,
            initial_guess: 0.30,
            min_vol: 0.01,
            max_vol: 3.0,
        }
    }
}

/// Result of an IV inversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvEstimate {
    /// Implied volatility in percent (18.5 = 18.5%).
    pub volatility_percent: f64,
    /// Whether the price error fell below tolerance.
    pub converged: bool,
    /// Iterations performed.
    pub iterations: u32,
    /// Absolute price error at the returned volatility.
    pub last_error: f64,
}

/// Implied Volatility Solver.
#[derive(Debug, Clone, Default)]
pub struct IvSolver {
    config: IvSolverConfig,
}

impl IvSolver {
    /// Create a new IV solver with the given configuration.
    #[must_use]
    pub const fn new(config: IvSolverConfig) -> Self {
        Self { config }
    }

    /// Solver configuration.
    #[must_use]
    pub const fn config(&self) -> &IvSolverConfig {
        &self.config
    }

    /// Invert a market price to implied volatility.
    ///
    /// # Arguments
    ///
    /// * `market_price` - Observed option premium
    /// * `s` - Underlying spot
    /// * `k` - Strike price
    /// * `t` - Time to expiry (years)
    /// * `r` - Risk-free rate (decimal)
    /// * `kind` - Call or put
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] when spot or strike are not
    /// positive. A price the model cannot reach is not an error; the estimate
    /// comes back with `converged = false`. So does a premium at or below
    /// intrinsic value, reported at `min_vol`.
    pub fn solve(
        &self,
        market_price: f64,
        s: f64,
        k: f64,
        t: f64,
        r: f64,
        kind: OptionKind,
    ) -> Result<IvEstimate, PricingError> {
        let cfg = &self.config;
        let params = MarketParameters::new(s, k, t, r, cfg.initial_guess, kind);
        params.validate()?;

        // Quoted prices are floored at intrinsic. A premium with no time value
        // is matched by every volatility low enough, so there is no answer.
        let time_value = market_price - params.intrinsic_value();
        if t > 0.0 && time_value <= cfg.tolerance {
            let last_error = price(params.with_volatility(cfg.min_vol))
                .map_or(f64::NAN, |p| (p.theoretical_price - market_price).abs());
            tracing::debug!(
                strike = k,
                %kind,
                market_price,
                time_value,
                "IV solver skipped premium without time value"
            );
            return Ok(estimate(cfg.min_vol, false, 0, last_error));
        }

        // Newton runs on the unfloored closed form, which is strictly
        // increasing in volatility.
        let mut sigma = cfg.initial_guess;
        let mut last_error = f64::NAN;

        for i in 0..cfg.max_iterations {
            let (model, greeks) = european(params.with_volatility(sigma))?;
            let diff = model - market_price;
            last_error = diff.abs();

            if last_error < cfg.tolerance {
                return Ok(estimate(sigma, true, i + 1, last_error));
            }

            // Greeks carry vega per vol point; the update needs it per unit.
            let vega = greeks.vega * 100.0;
            if vega <= 0.0 {
                tracing::debug!(
                    strike = k,
                    %kind,
                    sigma,
                    iterations = i + 1,
                    "IV solver stopped on vanishing vega"
                );
                return Ok(estimate(sigma, false, i + 1, last_error));
            }

            sigma = (sigma - diff / vega).clamp(cfg.min_vol, cfg.max_vol);
        }

        if let Ok((model, _)) = european(params.with_volatility(sigma)) {
            last_error = (model - market_price).abs();
        }
        tracing::debug!(
            strike = k,
            %kind,
            sigma,
            last_error,
            "IV solver hit iteration limit"
        );
        Ok(estimate(sigma, false, cfg.max_iterations, last_error))
    }
}

fn estimate(sigma: f64, converged: bool, iterations: u32, last_error: f64) -> IvEstimate {
    IvEstimate {
        volatility_percent: sigma * 100.0,
        converged,
        iterations,
        last_error,
    }
}

/// Implied volatility in percent with the default solver settings.
///
/// Returns the best estimate whether or not the solver converged; use
/// [`IvSolver::solve`] to inspect convergence.
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    time_to_expiry_years: f64,
    risk_free_rate: f64,
    kind: OptionKind,
) -> Result<f64, PricingError> {
    IvSolver::default()
        .solve(
            market_price,
            spot,
            strike,
            time_to_expiry_years,
            risk_free_rate,
            kind,
        )
        .map(|est| est.volatility_percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market_price(s: f64, k: f64, t: f64, r: f64, vol: f64, kind: OptionKind) -> f64 {
        price(MarketParameters::new(s, k, t, r, vol, kind))
            .unwrap()
            .theoretical_price
    }

    #[test]
    fn recovers_call_volatility() {
        let premium = market_price(100.0, 100.0, 1.0, 0.05, 0.25, OptionKind::Call);
        let est = IvSolver::default()
            .solve(premium, 100.0, 100.0, 1.0, 0.05, OptionKind::Call)
            .unwrap();

        assert!(est.converged);
        assert!((est.volatility_percent - 25.0).abs() < 0.5);
        assert!(est.iterations <= 10);
    }

    #[test]
    fn recovers_nifty_put_volatility() {
        let t = 6.23 / 365.0;
        let premium = market_price(26_000.0, 25_900.0, t, 0.065, 0.14, OptionKind::Put);
        let iv = implied_volatility(premium, 26_000.0, 25_900.0, t, 0.065, OptionKind::Put)
            .unwrap();
        assert!((iv - 14.0).abs() < 0.5);
    }

    #[test]
    fn premium_at_intrinsic_has_no_implied_volatility() {
        // Deep ITM put: the closed form at 10% sits below intrinsic, so the
        // quoted premium is intrinsic exactly.
        let premium = market_price(26_000.0, 26_780.0, 0.5, 0.065, 0.10, OptionKind::Put);
        assert_eq!(premium, 780.0);

        let est = IvSolver::default()
            .solve(premium, 26_000.0, 26_780.0, 0.5, 0.065, OptionKind::Put)
            .unwrap();
        assert!(!est.converged);
        assert_eq!(est.iterations, 0);
        assert!((est.volatility_percent - 1.0).abs() < 1e-9);
        assert!(est.last_error < 1e-9);
    }

    #[test]
    fn recovers_itm_put_volatility_above_intrinsic() {
        let premium = market_price(26_000.0, 26_780.0, 0.02, 0.065, 0.30, OptionKind::Put);
        assert!(premium > 780.0);

        let est = IvSolver::default()
            .solve(premium, 26_000.0, 26_780.0, 0.02, 0.065, OptionKind::Put)
            .unwrap();
        assert!(est.converged);
        assert!((est.volatility_percent - 30.0).abs() < 0.5);
    }

    #[test]
    fn unreachable_price_is_flagged_not_failed() {
        // Far above anything reachable at 300% vol.
        let est = IvSolver::default()
            .solve(500.0, 100.0, 100.0, 0.1, 0.05, OptionKind::Call)
            .unwrap();

        assert!(!est.converged);
        assert!((est.volatility_percent - 300.0).abs() < 1e-9);
        assert!(est.last_error > 1.0);
    }

    #[test]
    fn expired_contract_stops_on_zero_vega() {
        let est = IvSolver::default()
            .solve(5.0, 100.0, 100.0, 0.0, 0.05, OptionKind::Call)
            .unwrap();

        assert!(!est.converged);
        assert_eq!(est.iterations, 1);
        assert!((est.volatility_percent - 30.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_inputs_propagate() {
        let err = IvSolver::default()
            .solve(5.0, 0.0, 100.0, 0.5, 0.05, OptionKind::Call)
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { field: "spot", .. }
        ));

        let err = implied_volatility(5.0, 100.0, -1.0, 0.5, 0.05, OptionKind::Put).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { field: "strike", .. }
        ));
    }

    #[test]
    fn config_defaults_deserialize_from_partial_yaml() {
        let cfg: IvSolverConfig = serde_json::from_str(r#"{"tolerance": 0.001}"#).unwrap();
        assert_eq!(cfg.tolerance, 0.001);
        assert_eq!(cfg.max_iterations, 100);
        assert_eq!(cfg.initial_guess, 0.30);
    }
}
