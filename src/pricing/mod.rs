//! European FX vanilla option pricing.
//!
//! [`price`] values one [`OptionSpec`] under Garman-Kohlhagen and returns a
//! [`PricingResult`] with the premium and Greeks, per unit of base currency
//! and scaled to the notional.
//!
//! ## Units
//!
//! Inputs follow FX quoting: rates and volatility in percent. Per-unit Greeks
//! are with respect to decimal quantities (vega per 1.00 of σ, theta per
//! year, rho per 1.00 of `r_d`). The `*_notional` fields use desk units:
//! vega per vol point, theta per day, rho per 1% rate move.

pub mod garman_kohlhagen;

pub use garman_kohlhagen::{GarmanKohlhagen, price};

use serde::{Deserialize, Serialize};

use crate::conventions::{DAYS_PER_YEAR, ThetaUnit, VegaUnit};
use crate::error;
use crate::types::OptionType;
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Contract and market inputs for one European FX option.
///
/// # Examples
///
/// ```
/// use fxvol::pricing::{OptionSpec, price};
/// use fxvol::OptionType;
///
/// let spec = OptionSpec {
///     spot: 1.0850,
///     strike: 1.0850,
///     tenor_years: 30.0 / 365.0,
///     domestic_rate: 5.0,
///     foreign_rate: 3.5,
///     volatility: 8.0,
///     option_type: OptionType::Call,
///     notional: 1_000_000.0,
/// };
/// let result = price(&spec)?;
/// assert!(result.premium_percent > 0.9 && result.premium_percent < 1.3);
/// # Ok::<(), fxvol::FxVolError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Spot rate, quote currency per unit of base.
    pub spot: f64,
    pub strike: f64,
    /// Time to expiry in years.
    pub tenor_years: f64,
    /// Quote-currency rate, percent.
    pub domestic_rate: f64,
    /// Base-currency rate, percent.
    pub foreign_rate: f64,
    /// Volatility, percent. Zero is allowed.
    pub volatility: f64,
    pub option_type: OptionType,
    /// Base-currency notional.
    pub notional: f64,
}

impl OptionSpec {
    /// Same option at a different volatility (percent).
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Same terms with the other option type.
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Reject `spot ≤ 0`, `strike ≤ 0`, `tenor_years ≤ 0`, `volatility < 0`,
    /// `notional ≤ 0`, and non-finite rates.
    ///
    /// # Errors
    /// Returns [`FxVolError::InvalidInput`](crate::FxVolError::InvalidInput)
    /// naming the first offending field.
    pub fn validate(&self) -> error::Result<()> {
        validate_positive(self.spot, "spot")?;
        validate_positive(self.strike, "strike")?;
        validate_positive(self.tenor_years, "tenor_years")?;
        validate_non_negative(self.volatility, "volatility")?;
        validate_finite(self.domestic_rate, "domestic_rate")?;
        validate_finite(self.foreign_rate, "foreign_rate")?;
        validate_positive(self.notional, "notional")?;
        Ok(())
    }
}

/// Premium and Greeks of one option. Immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub option_type: OptionType,
    pub forward: f64,
    /// Domestic discount factor `exp(−r_d·T)`.
    pub discount_factor: f64,
    /// `±∞` (or 0 at the forward) when volatility is zero.
    pub d1: f64,
    pub d2: f64,
    /// Premium per unit of base currency, in quote currency.
    pub unit_premium: f64,
    /// Premium amount for the notional, in quote currency.
    pub premium: f64,
    /// Premium as a percent of notional (`unit_premium · 100`).
    pub premium_percent: f64,
    /// Forward delta `D·N(d1)` (call) or `D·(N(d1) − 1)` (put), premium unadjusted.
    pub delta: f64,
    /// Second derivative with respect to the forward.
    pub gamma: f64,
    /// Per 1.00 change in σ.
    pub vega: f64,
    /// Per year.
    pub theta: f64,
    /// Per 1.00 change in the domestic rate.
    pub rho: f64,
    /// Per 1.00 change in the foreign rate.
    pub rho_foreign: f64,
    /// `delta · notional`. The delta hedge trades `−delta_notional` of base currency.
    pub delta_notional: f64,
    /// P&L per 1 vol point.
    pub vega_notional: f64,
    /// P&L per calendar day.
    pub theta_notional: f64,
    /// P&L per 1% move in the domestic rate.
    pub rho_notional: f64,
}

impl PricingResult {
    /// Per-unit vega in the requested unit.
    pub fn vega_in(&self, unit: VegaUnit) -> f64 {
        match unit {
            VegaUnit::PerUnitVol => self.vega,
            VegaUnit::PerVolPoint => self.vega / 100.0,
        }
    }

    /// Per-unit theta in the requested unit.
    pub fn theta_in(&self, unit: ThetaUnit) -> f64 {
        match unit {
            ThetaUnit::PerYear => self.theta,
            ThetaUnit::PerDay => self.theta / DAYS_PER_YEAR,
        }
    }

    /// Base-currency amount to trade to delta-hedge the long option.
    pub fn hedge_amount(&self) -> f64 {
        -self.delta_notional
    }
}
