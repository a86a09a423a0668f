//! FX forwards from deposit rates or from quoted forward points.
//!
//! Two entry points exist because callers hold different data:
//!
//! - [`forward_from_rates`]: covered interest parity, `F = S · exp((r_d − r_f) · T)`
//!   with rates in percent.
//! - [`forward_from_points`]: `F = S + points / pip_divisor` from published
//!   outright forward points.
//!
//! The two agree up to quoting-convention rounding.

use serde::{Deserialize, Serialize};

use crate::error;
use crate::validate::{validate_finite, validate_positive};

/// Scaling between forward points (pips) and price units.
///
/// Most pairs quote four decimals, so one pip is `1 / 10000`. Pairs quoted
/// in JPY use two decimals, so one pip is `1 / 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PipDivisor {
    /// 10000 pips per unit of price.
    #[default]
    Standard,
    /// 100 pips per unit of price (JPY-quoted pairs).
    Jpy,
}

impl PipDivisor {
    /// Numeric divisor.
    pub fn value(self) -> f64 {
        match self {
            PipDivisor::Standard => 10_000.0,
            PipDivisor::Jpy => 100.0,
        }
    }

    /// Convention for a six-letter pair code such as `"USDJPY"`.
    ///
    /// The quote currency is the last three letters; `JPY` selects
    /// [`PipDivisor::Jpy`], anything else [`PipDivisor::Standard`].
    ///
    /// # Examples
    /// ```
    /// use fxvol::forward::PipDivisor;
    ///
    /// assert_eq!(PipDivisor::for_pair("USDJPY"), PipDivisor::Jpy);
    /// assert_eq!(PipDivisor::for_pair("eurjpy"), PipDivisor::Jpy);
    /// assert_eq!(PipDivisor::for_pair("EURUSD"), PipDivisor::Standard);
    /// ```
    pub fn for_pair(pair: &str) -> Self {
        let quote_ccy = pair.len().checked_sub(3).and_then(|i| pair.get(i..));
        match quote_ccy {
            Some(ccy) if ccy.eq_ignore_ascii_case("JPY") => PipDivisor::Jpy,
            _ => PipDivisor::Standard,
        }
    }
}

/// Covered-interest-parity forward `F = S · exp((r_d − r_f) · T)`.
///
/// `domestic_rate` and `foreign_rate` are percent. Finite inputs give a
/// finite result; there are no error conditions.
///
/// # Examples
/// ```
/// use fxvol::forward::forward_from_rates;
///
/// let f = forward_from_rates(1.0850, 30.0 / 365.0, 5.0, 3.5);
/// assert!((f - 1.0850 * (0.015_f64 * 30.0 / 365.0).exp()).abs() < 1e-15);
/// ```
#[inline]
pub fn forward_from_rates(spot: f64, tenor_years: f64, domestic_rate: f64, foreign_rate: f64) -> f64 {
    spot * ((domestic_rate - foreign_rate) / 100.0 * tenor_years).exp()
}

/// Outright forward from quoted points: `F = S + points / pip_divisor`.
#[inline]
pub fn forward_from_points(spot: f64, forward_points: f64, pip: PipDivisor) -> f64 {
    spot + forward_points / pip.value()
}

/// Forward points implied by a spot and forward: `(F − S) · pip_divisor`.
#[inline]
pub fn forward_points(spot: f64, forward: f64, pip: PipDivisor) -> f64 {
    (forward - spot) * pip.value()
}

/// Spot and forward for one expiry, the anchor for delta-to-strike inversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForwardReference {
    pub spot: f64,
    pub forward: f64,
    pub tenor_years: f64,
}

impl ForwardReference {
    /// Reference from an explicit spot and forward.
    ///
    /// # Errors
    /// Returns [`FxVolError::InvalidInput`](crate::FxVolError::InvalidInput)
    /// unless all three values are positive and finite.
    pub fn new(spot: f64, forward: f64, tenor_years: f64) -> error::Result<Self> {
        validate_positive(spot, "spot")?;
        validate_positive(forward, "forward")?;
        validate_positive(tenor_years, "tenor_years")?;
        Ok(Self {
            spot,
            forward,
            tenor_years,
        })
    }

    /// Reference whose forward comes from [`forward_from_rates`].
    pub fn from_rates(
        spot: f64,
        tenor_years: f64,
        domestic_rate: f64,
        foreign_rate: f64,
    ) -> error::Result<Self> {
        validate_finite(domestic_rate, "domestic_rate")?;
        validate_finite(foreign_rate, "foreign_rate")?;
        let forward = forward_from_rates(spot, tenor_years, domestic_rate, foreign_rate);
        Self::new(spot, forward, tenor_years)
    }

    /// Reference whose forward comes from [`forward_from_points`].
    pub fn from_points(
        spot: f64,
        forward_points: f64,
        pip: PipDivisor,
        tenor_years: f64,
    ) -> error::Result<Self> {
        validate_finite(forward_points, "forward_points")?;
        let forward = forward_from_points(spot, forward_points, pip);
        Self::new(spot, forward, tenor_years)
    }
}
