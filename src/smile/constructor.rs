//! Smile construction from ATM, risk-reversal, and butterfly quotes.
//!
//! For each delta bucket `d` with both quotes present:
//!
//! ```text
//! put_vol(d)  = atm − rr/2 + bf     emitted at delta d
//! call_vol(d) = atm + rr/2 + bf     emitted at delta 100 − d
//! ```
//!
//! plus the ATM point at delta 50. Buckets with an absent RR or BF are
//! skipped and reported through [`FxSmile::missing`]; buckets whose quotes
//! imply a negative wing vol are skipped and reported through
//! [`FxSmile::rejected`].

use crate::conventions::AtmConvention;
use crate::error;
use crate::forward::ForwardReference;
use crate::quote::{DeltaBucket, MarketQuote};
use crate::smile::strike::delta_to_strike;
use crate::smile::{FxSmile, SmilePoint};

/// Put- and call-wing vols for one bucket: `(atm − rr/2 + bf, atm + rr/2 + bf)`.
///
/// # Examples
/// ```
/// use fxvol::smile::wing_vols;
///
/// let (put, call) = wing_vols(10.0, 0.5, 0.15);
/// assert!((put - 9.9).abs() < 1e-12);
/// assert!((call - 10.4).abs() < 1e-12);
/// ```
pub fn wing_vols(atm_vol: f64, risk_reversal: f64, butterfly: f64) -> (f64, f64) {
    let half_rr = 0.5 * risk_reversal;
    (atm_vol - half_rr + butterfly, atm_vol + half_rr + butterfly)
}

/// Builds [`FxSmile`]s from [`MarketQuote`]s.
///
/// Stateless apart from its configuration; one constructor can be shared
/// across threads and reused for every tenor.
///
/// # Examples
///
/// ```
/// use fxvol::quote::{DeltaBucket, MarketQuote};
/// use fxvol::smile::SmileConstructor;
/// use fxvol::types::Tenor;
///
/// let quote = MarketQuote::new("EURUSD", 1.0850, Tenor::ThreeMonths, 5.0, 3.5, 10.0)
///     .with_risk_reversal(DeltaBucket::D25, 0.5)
///     .with_butterfly(DeltaBucket::D25, 0.15);
///
/// let smile = SmileConstructor::new()
///     .buckets(&[DeltaBucket::D25])
///     .construct_with_strikes(&quote)?;
///
/// assert_eq!(smile.points().len(), 3);
/// assert!(smile.is_complete());
/// assert!(smile.points().iter().all(|p| p.strike.is_some()));
/// # Ok::<(), fxvol::FxVolError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SmileConstructor {
    atm_convention: AtmConvention,
    buckets: Vec<DeltaBucket>,
}

impl Default for SmileConstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl SmileConstructor {
    /// Constructor requesting all five buckets with forward-ATM strikes.
    pub fn new() -> Self {
        Self {
            atm_convention: AtmConvention::default(),
            buckets: DeltaBucket::ALL.to_vec(),
        }
    }

    /// Set whether the ATM strike is the forward or spot.
    pub fn atm_convention(mut self, convention: AtmConvention) -> Self {
        self.atm_convention = convention;
        self
    }

    /// Restrict the requested buckets. Only requested buckets can be missing.
    pub fn buckets(mut self, buckets: &[DeltaBucket]) -> Self {
        let mut buckets = buckets.to_vec();
        buckets.sort_unstable();
        buckets.dedup();
        self.buckets = buckets;
        self
    }

    /// Smile vols without strikes.
    ///
    /// # Errors
    /// Returns [`FxVolError::InvalidInput`](crate::FxVolError::InvalidInput)
    /// if the quote fails validation.
    pub fn construct(&self, quote: &MarketQuote) -> error::Result<FxSmile> {
        self.construct_with_reference(quote, None)
    }

    /// Smile vols with strikes derived from the quote's own forward.
    ///
    /// See [`MarketQuote::forward_reference`].
    pub fn construct_with_strikes(&self, quote: &MarketQuote) -> error::Result<FxSmile> {
        let reference = quote.forward_reference()?;
        self.construct_with_reference(quote, Some(reference))
    }

    /// Smile vols, with strikes when a reference is supplied.
    ///
    /// With `reference = None` every point's strike is `None`.
    pub fn construct_with_reference(
        &self,
        quote: &MarketQuote,
        reference: Option<ForwardReference>,
    ) -> error::Result<FxSmile> {
        #[cfg(feature = "logging")]
        tracing::debug!(
            pair = %quote.pair,
            tenor_days = quote.tenor_days,
            n_buckets = self.buckets.len(),
            with_reference = reference.is_some(),
            "smile construction started"
        );

        quote.validate()?;

        let mut points = Vec::with_capacity(2 * self.buckets.len() + 1);
        let mut missing = Vec::new();
        let mut rejected = Vec::new();

        points.push(SmilePoint {
            delta: 50,
            implied_vol: quote.atm_vol,
            strike: None,
        });

        for &bucket in &self.buckets {
            let Some((rr, bf)) = quote.wing(bucket) else {
                missing.push(bucket);
                continue;
            };
            let (put_vol, call_vol) = wing_vols(quote.atm_vol, rr, bf);
            if put_vol < 0.0 || call_vol < 0.0 {
                #[cfg(feature = "logging")]
                tracing::warn!(
                    pair = %quote.pair,
                    tenor_days = quote.tenor_days,
                    bucket = %bucket,
                    put_vol,
                    call_vol,
                    "negative wing vol, bucket rejected"
                );
                rejected.push(bucket);
                continue;
            }
            points.push(SmilePoint {
                delta: bucket.put_delta(),
                implied_vol: put_vol,
                strike: None,
            });
            points.push(SmilePoint {
                delta: bucket.call_delta(),
                implied_vol: call_vol,
                strike: None,
            });
        }

        points.sort_unstable_by_key(|p| p.delta);

        if let Some(r) = &reference {
            for p in &mut points {
                p.strike = Some(self.strike_for(p, r, quote.tenor_years)?);
            }
        }

        #[cfg(feature = "logging")]
        {
            if !missing.is_empty() {
                tracing::warn!(
                    pair = %quote.pair,
                    tenor_days = quote.tenor_days,
                    missing = ?missing,
                    "smile has buckets with absent RR/BF quotes"
                );
            }
            tracing::debug!(n_points = points.len(), "smile construction complete");
        }

        Ok(FxSmile {
            tenor_days: quote.tenor_days,
            tenor_years: quote.tenor_years,
            atm_vol: quote.atm_vol,
            atm_convention: self.atm_convention,
            points,
            missing,
            rejected,
            reference,
        })
    }

    fn strike_for(
        &self,
        point: &SmilePoint,
        reference: &ForwardReference,
        tenor_years: f64,
    ) -> error::Result<f64> {
        if point.delta == 50 {
            return Ok(match self.atm_convention {
                AtmConvention::Forward => reference.forward,
                AtmConvention::Spot => reference.spot,
            });
        }
        delta_to_strike(
            f64::from(point.delta),
            point.implied_vol,
            reference.forward,
            tenor_years,
        )
    }
}

/// Build a smile (no strikes) with the default constructor.
pub fn build_smile(quote: &MarketQuote) -> error::Result<FxSmile> {
    SmileConstructor::new().construct(quote)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::FxVolError;
    use crate::types::Tenor;

    fn quote() -> MarketQuote {
        MarketQuote::new("EURUSD", 1.0850, Tenor::ThreeMonths, 5.0, 3.5, 10.0)
    }

    #[test]
    fn smile_vols_for_25d_bucket() {
        let q = quote()
            .with_risk_reversal(DeltaBucket::D25, 0.5)
            .with_butterfly(DeltaBucket::D25, 0.15);
        let smile = SmileConstructor::new()
            .buckets(&[DeltaBucket::D25])
            .construct(&q)
            .unwrap();

        let deltas: Vec<i32> = smile.points().iter().map(|p| p.delta).collect();
        assert_eq!(deltas, vec![25, 50, 75]);
        assert_abs_diff_eq!(smile.point(25).unwrap().implied_vol, 9.9, epsilon = 1e-12);
        assert_abs_diff_eq!(smile.point(50).unwrap().implied_vol, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(smile.point(75).unwrap().implied_vol, 10.4, epsilon = 1e-12);
    }

    #[test]
    fn missing_butterfly_skips_bucket() {
        let q = quote()
            .with_risk_reversal(DeltaBucket::D25, 0.5)
            .with_butterfly(DeltaBucket::D25, 0.15)
            .with_risk_reversal(DeltaBucket::D10, 1.1);
        let smile = build_smile(&q).unwrap();

        assert!(smile.missing().contains(&DeltaBucket::D10));
        assert!(smile.point(10).is_none());
        assert!(smile.point(90).is_none());
        assert_eq!(
            smile.missing(),
            &[DeltaBucket::D5, DeltaBucket::D10, DeltaBucket::D15, DeltaBucket::D35]
        );
        assert!(!smile.is_complete());
    }

    #[test]
    fn zero_quotes_are_used_not_skipped() {
        let q = quote()
            .with_risk_reversal(DeltaBucket::D35, 0.0)
            .with_butterfly(DeltaBucket::D35, 0.0);
        let smile = SmileConstructor::new()
            .buckets(&[DeltaBucket::D35])
            .construct(&q)
            .unwrap();
        assert!(smile.is_complete());
        assert_eq!(smile.point(35).unwrap().implied_vol, 10.0);
        assert_eq!(smile.point(65).unwrap().implied_vol, 10.0);
    }

    #[test]
    fn no_reference_means_no_strikes() {
        let q = quote()
            .with_risk_reversal(DeltaBucket::D25, 0.5)
            .with_butterfly(DeltaBucket::D25, 0.15);
        let smile = build_smile(&q).unwrap();
        assert!(smile.points().iter().all(|p| p.strike.is_none()));
        assert!(smile.reference().is_none());
    }

    #[test]
    fn atm_strike_follows_convention() {
        let q = quote();
        let fwd = q.forward_reference().unwrap().forward;

        let atmf = SmileConstructor::new().construct_with_strikes(&q).unwrap();
        assert_eq!(atmf.point(50).unwrap().strike, Some(fwd));

        let atms = SmileConstructor::new()
            .atm_convention(AtmConvention::Spot)
            .construct_with_strikes(&q)
            .unwrap();
        assert_eq!(atms.point(50).unwrap().strike, Some(1.0850));
    }

    #[test]
    fn wing_strikes_straddle_forward() {
        let q = quote()
            .with_risk_reversal(DeltaBucket::D25, 0.5)
            .with_butterfly(DeltaBucket::D25, 0.15)
            .with_risk_reversal(DeltaBucket::D10, 0.9)
            .with_butterfly(DeltaBucket::D10, 0.45);
        let smile = SmileConstructor::new().construct_with_strikes(&q).unwrap();
        let fwd = smile.reference().unwrap().forward;

        let strikes: Vec<f64> = smile.points().iter().map(|p| p.strike.unwrap()).collect();
        for w in strikes.windows(2) {
            assert!(w[0] < w[1]);
        }
        assert!(smile.point(10).unwrap().strike.unwrap() < fwd);
        assert!(smile.point(90).unwrap().strike.unwrap() > fwd);
    }

    #[test]
    fn negative_wing_vol_rejects_only_that_bucket() {
        let q = MarketQuote::new("EURUSD", 1.0850, Tenor::OneMonth, 5.0, 3.5, 1.0)
            .with_risk_reversal(DeltaBucket::D10, 4.0)
            .with_butterfly(DeltaBucket::D10, 0.1)
            .with_risk_reversal(DeltaBucket::D25, 0.2)
            .with_butterfly(DeltaBucket::D25, 0.05);
        let smile = SmileConstructor::new()
            .buckets(&[DeltaBucket::D10, DeltaBucket::D25])
            .construct_with_strikes(&q)
            .unwrap();

        assert_eq!(smile.rejected(), &[DeltaBucket::D10]);
        assert!(smile.missing().is_empty());
        assert!(!smile.is_complete());
        assert!(smile.point(10).is_none());
        assert!(smile.point(90).is_none());
        assert_abs_diff_eq!(smile.point(25).unwrap().implied_vol, 0.95, epsilon = 1e-12);
        assert!(smile.point(75).unwrap().strike.is_some());

        assert!(matches!(
            smile.require_complete(),
            Err(FxVolError::InvalidInput { field: "butterfly", .. })
        ));
        assert!(matches!(
            smile.bucket_vols(DeltaBucket::D10),
            Err(FxVolError::InvalidInput { field: "butterfly", .. })
        ));
    }

    #[test]
    fn invalid_quote_is_rejected() {
        let mut q = quote();
        q.spot = -1.0;
        assert!(matches!(
            build_smile(&q),
            Err(FxVolError::InvalidInput { field: "spot", .. })
        ));
    }

    #[test]
    fn requested_buckets_are_deduplicated() {
        let c = SmileConstructor::new().buckets(&[DeltaBucket::D25, DeltaBucket::D5, DeltaBucket::D25]);
        let smile = c.construct(&quote()).unwrap();
        assert_eq!(smile.missing(), &[DeltaBucket::D5, DeltaBucket::D25]);
    }
}
