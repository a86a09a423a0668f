//! Garman-Kohlhagen pricing in forward form.
//!
//! ```text
//! F  = S · exp((r_d − r_f) · T)
//! d1 = (ln(F/K) + σ²T/2) / (σ√T),   d2 = d1 − σ√T
//! D  = exp(−r_d · T)
//! call = D · (F·N(d1) − K·N(d2)),   put = D · (K·N(−d2) − F·N(−d1))
//! ```
//!
//! At σ = 0 the log-moneyness term decides `d1 = d2 = ±∞` (or 0 at the
//! forward) and the same formulas yield the discounted intrinsic value.

use crate::conventions::{DAYS_PER_YEAR, log_moneyness};
use crate::error::{self, FxVolError};
use crate::forward::forward_from_rates;
use crate::math::{normal_cdf, normal_pdf};
use crate::pricing::{OptionSpec, PricingResult};
use crate::types::OptionType;

/// Analytic Garman-Kohlhagen pricer for European FX options.
///
/// Holds no state; a single instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct GarmanKohlhagen;

impl GarmanKohlhagen {
    pub fn new() -> Self {
        Self
    }

    /// Price one option.
    ///
    /// # Errors
    /// Returns [`FxVolError::InvalidInput`] if the spec fails
    /// [`OptionSpec::validate`], [`FxVolError::NumericalError`] if the
    /// result is not finite (e.g. overflowing rates).
    pub fn price(&self, spec: &OptionSpec) -> error::Result<PricingResult> {
        spec.validate()?;

        let t = spec.tenor_years;
        let sigma = spec.volatility / 100.0;
        let r_d = spec.domestic_rate / 100.0;
        let k = spec.strike;

        let forward = forward_from_rates(spec.spot, t, spec.domestic_rate, spec.foreign_rate);
        let df = (-r_d * t).exp();
        let sqrt_t = t.sqrt();
        let sig_sqrt_t = sigma * sqrt_t;

        let (d1, d2) = if sig_sqrt_t > 0.0 {
            let d1 = (-log_moneyness(k, forward) + 0.5 * sigma * sigma * t) / sig_sqrt_t;
            (d1, d1 - sig_sqrt_t)
        } else {
            #[cfg(feature = "logging")]
            tracing::debug!(forward, strike = k, "zero volatility, pricing intrinsic");
            let d = if forward > k {
                f64::INFINITY
            } else if forward < k {
                f64::NEG_INFINITY
            } else {
                0.0
            };
            (d, d)
        };

        let n_d1 = normal_cdf(d1);
        let n_d2 = normal_cdf(d2);
        let pdf_d1 = normal_pdf(d1);

        let (unit_premium, delta, rho, rho_foreign) = match spec.option_type {
            OptionType::Call => (
                df * (forward * n_d1 - k * n_d2),
                df * n_d1,
                k * t * df * n_d2,
                -forward * t * df * n_d1,
            ),
            OptionType::Put => (
                df * (k * normal_cdf(-d2) - forward * normal_cdf(-d1)),
                df * (n_d1 - 1.0),
                -k * t * df * normal_cdf(-d2),
                forward * t * df * normal_cdf(-d1),
            ),
        };

        // Dirac mass at F = K when σ = 0; reported as zero.
        let gamma = if sig_sqrt_t > 0.0 {
            df * pdf_d1 / (forward * sig_sqrt_t)
        } else {
            0.0
        };
        let vega = df * forward * pdf_d1 * sqrt_t;
        let theta = -(forward * pdf_d1 * sigma / (2.0 * sqrt_t)) * df - r_d * unit_premium;

        let notional = spec.notional;
        let premium_percent = unit_premium * 100.0;
        let result = PricingResult {
            option_type: spec.option_type,
            forward,
            discount_factor: df,
            d1,
            d2,
            unit_premium,
            premium: premium_percent / 100.0 * notional,
            premium_percent,
            delta,
            gamma,
            vega,
            theta,
            rho,
            rho_foreign,
            delta_notional: delta * notional,
            vega_notional: vega * notional / 100.0,
            theta_notional: theta * notional / DAYS_PER_YEAR,
            rho_notional: rho * notional / 100.0,
        };

        let outputs = [
            forward,
            unit_premium,
            delta,
            gamma,
            vega,
            theta,
            rho,
            rho_foreign,
        ];
        if outputs.iter().any(|v| !v.is_finite()) {
            return Err(FxVolError::NumericalError {
                message: format!("non-finite Garman-Kohlhagen output for {spec:?}"),
            });
        }
        Ok(result)
    }
}

/// Price one option with [`GarmanKohlhagen`].
pub fn price(spec: &OptionSpec) -> error::Result<PricingResult> {
    GarmanKohlhagen.price(spec)
}
