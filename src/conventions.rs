//! Market conventions for FX smiles and Greeks.
//!
//! Fixes the ATM strike convention and the unit in which vega and theta are
//! reported, so every consumer reads the same numbers the same way.

use serde::{Deserialize, Serialize};

/// Day-count denominator for year fractions and per-day theta.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Which reference the 50-delta (ATM) strike is pinned to.
///
/// - **Forward** (ATMF): `K_atm = F`. Standard FX market convention.
/// - **Spot** (ATMS): `K_atm = S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AtmConvention {
    /// ATM strike equals the forward.
    #[default]
    Forward,
    /// ATM strike equals spot.
    Spot,
}

/// Unit for vega.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VegaUnit {
    /// Per 1.00 change in σ (100 vol points).
    #[default]
    PerUnitVol,
    /// Per 1 vol point (0.01 change in σ).
    PerVolPoint,
}

/// Unit for theta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThetaUnit {
    /// Per year of calendar time.
    #[default]
    PerYear,
    /// Per calendar day (`/365`).
    PerDay,
}

/// Convert a strike to log-moneyness: k = ln(K / F).
pub fn log_moneyness(strike: f64, forward: f64) -> f64 {
    (strike / forward).ln()
}

/// Convert a strike to simple moneyness: m = K / F.
pub fn moneyness(strike: f64, forward: f64) -> f64 {
    strike / forward
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_market_standard() {
        assert_eq!(AtmConvention::default(), AtmConvention::Forward);
        assert_eq!(VegaUnit::default(), VegaUnit::PerUnitVol);
        assert_eq!(ThetaUnit::default(), ThetaUnit::PerYear);
    }

    #[test]
    fn moneyness_at_the_forward() {
        assert_eq!(log_moneyness(1.1, 1.1), 0.0);
        assert_eq!(moneyness(1.1, 1.1), 1.0);
        assert!(log_moneyness(1.2, 1.1) > 0.0);
    }
}
