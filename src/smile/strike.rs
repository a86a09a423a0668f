//! Delta-to-strike inversion.
//!
//! Market smiles are quoted by Black-Scholes forward delta (not premium
//! adjusted). In the signed convention used here (puts below 50, calls above)
//! the inversion is a single expression:
//!
//! ```text
//! K(δ) = F · exp(Φ⁻¹(δ / 100) · σ · √T)
//! ```
//!
//! A 75-delta point (25-delta call) lands above the forward, a 25-delta put
//! below it, and `δ = 50` returns the forward exactly. `Φ⁻¹` is the general
//! inverse normal CDF, so any delta in (0, 100) is supported.

use crate::error;
use crate::math::inverse_normal_cdf;
use crate::validate::{validate_delta, validate_non_negative, validate_positive};

/// Approximate strike for a signed delta.
///
/// # Arguments
/// * `delta`: Signed delta in (0, 100); 50 is ATM
/// * `vol`: Implied volatility at that delta, percent (≥ 0)
/// * `forward`: Forward for the expiry (> 0)
/// * `tenor_years`: Time to expiry in years (> 0)
///
/// # Errors
/// Returns [`FxVolError::InvalidInput`](crate::FxVolError::InvalidInput) for
/// a delta outside (0, 100) or invalid scalar inputs.
///
/// # Examples
/// ```
/// use fxvol::smile::delta_to_strike;
///
/// let f = 1.10;
/// let put = delta_to_strike(25.0, 9.9, f, 0.25)?;
/// let call = delta_to_strike(75.0, 10.4, f, 0.25)?;
/// assert!(put < f && f < call);
/// assert_eq!(delta_to_strike(50.0, 10.0, f, 0.25)?, f);
/// # Ok::<(), fxvol::FxVolError>(())
/// ```
pub fn delta_to_strike(delta: f64, vol: f64, forward: f64, tenor_years: f64) -> error::Result<f64> {
    validate_delta(delta, "delta")?;
    validate_non_negative(vol, "implied_vol")?;
    validate_positive(forward, "forward")?;
    validate_positive(tenor_years, "tenor_years")?;

    if delta == 50.0 {
        return Ok(forward);
    }
    let z = inverse_normal_cdf(delta / 100.0);
    Ok(forward * (z * vol / 100.0 * tenor_years.sqrt()).exp())
}
