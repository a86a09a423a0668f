//! Multi-tenor FX volatility surface.
//!
//! An [`FxVolSurface`] holds one [`FxSmile`] per quoted tenor of a single
//! currency pair, sorted by expiry. Across tenors it interpolates in total
//! variance; within a tenor it interpolates the smile in delta or strike.
//! Build one with [`SurfaceBuilder`].

pub mod builder;
pub(crate) mod interp;

pub use builder::SurfaceBuilder;

use serde::{Deserialize, Serialize};

use crate::error::{self, FxVolError};
use crate::pricing::{OptionSpec, PricingResult, price};
use crate::quote::{DeltaBucket, MarketQuote};
use crate::smile::FxSmile;
use crate::surface::interp::interpolate_total_variance;
use crate::types::{OptionType, Tenor, Vol};
use crate::validate::{validate_delta, validate_positive};

/// One tenor row of a delta grid. `None` where no point was emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRow {
    pub tenor_days: u32,
    pub tenor_years: f64,
    /// Vols (percent) in the order of the requested deltas.
    pub vols: Vec<Option<f64>>,
}

/// Volatility surface for one currency pair: per-tenor smiles sorted by expiry.
///
/// Immutable after construction and `Send + Sync`; share it across pricing
/// threads with `Arc`.
///
/// # Examples
///
/// ```
/// use fxvol::quote::{DeltaBucket, MarketQuote};
/// use fxvol::surface::SurfaceBuilder;
/// use fxvol::types::Tenor;
///
/// let one_month = MarketQuote::new("EURUSD", 1.0850, Tenor::OneMonth, 5.0, 3.5, 7.8)
///     .with_risk_reversal(DeltaBucket::D25, -0.35)
///     .with_butterfly(DeltaBucket::D25, 0.18);
/// let three_months = MarketQuote::new("EURUSD", 1.0850, Tenor::ThreeMonths, 4.9, 3.4, 8.2)
///     .with_risk_reversal(DeltaBucket::D25, -0.45)
///     .with_butterfly(DeltaBucket::D25, 0.22);
///
/// let surface = SurfaceBuilder::new()
///     .add_quote(three_months)
///     .add_quote(one_month)
///     .build()?;
///
/// assert_eq!(surface.tenors().len(), 2);
/// let atm_2m = surface.vol(60.0 / 365.0, 50.0)?;
/// assert!(atm_2m.0 > 7.8 && atm_2m.0 < 8.2);
/// # Ok::<(), fxvol::FxVolError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FxVolSurfaceRaw", into = "FxVolSurfaceRaw")]
pub struct FxVolSurface {
    pair: String,
    spot: f64,
    quotes: Vec<MarketQuote>,
    smiles: Vec<FxSmile>,
}

#[derive(Serialize, Deserialize)]
struct FxVolSurfaceRaw {
    pair: String,
    spot: f64,
    quotes: Vec<MarketQuote>,
    smiles: Vec<FxSmile>,
}

impl From<FxVolSurface> for FxVolSurfaceRaw {
    fn from(s: FxVolSurface) -> Self {
        Self {
            pair: s.pair,
            spot: s.spot,
            quotes: s.quotes,
            smiles: s.smiles,
        }
    }
}

impl TryFrom<FxVolSurfaceRaw> for FxVolSurface {
    type Error = FxVolError;

    /// Same invariants as [`SurfaceBuilder::build`]: one smile per quote,
    /// aligned and strictly increasing in expiry, all on one pair and spot.
    fn try_from(raw: FxVolSurfaceRaw) -> Result<Self, Self::Error> {
        validate_positive(raw.spot, "spot")?;
        if raw.smiles.is_empty() {
            return Err(FxVolError::InvalidInput {
                field: "smiles",
                message: "at least one tenor is required".into(),
            });
        }
        if raw.smiles.len() != raw.quotes.len() {
            return Err(FxVolError::InvalidInput {
                field: "quotes",
                message: format!(
                    "{} quotes for {} smiles",
                    raw.quotes.len(),
                    raw.smiles.len()
                ),
            });
        }
        for (q, s) in raw.quotes.iter().zip(&raw.smiles) {
            q.validate()?;
            if !q.pair.eq_ignore_ascii_case(&raw.pair) {
                return Err(FxVolError::InvalidInput {
                    field: "pair",
                    message: format!("quote for {} on a {} surface", q.pair, raw.pair),
                });
            }
            if q.spot != raw.spot {
                return Err(FxVolError::InvalidInput {
                    field: "spot",
                    message: format!("{}d quote has spot {}, expected {}", q.tenor_days, q.spot, raw.spot),
                });
            }
            if q.tenor_days != s.tenor_days() || q.tenor_years != s.tenor_years() {
                return Err(FxVolError::InvalidInput {
                    field: "tenor_days",
                    message: format!("{}d quote paired with a {}d smile", q.tenor_days, s.tenor_days()),
                });
            }
        }
        if !raw
            .smiles
            .windows(2)
            .all(|w| w[0].tenor_years() < w[1].tenor_years())
        {
            return Err(FxVolError::InvalidInput {
                field: "smiles",
                message: "tenors must be strictly increasing".into(),
            });
        }
        Ok(Self {
            pair: raw.pair,
            spot: raw.spot,
            quotes: raw.quotes,
            smiles: raw.smiles,
        })
    }
}

impl FxVolSurface {
    pub fn pair(&self) -> &str {
        &self.pair
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Smiles, shortest tenor first.
    pub fn smiles(&self) -> &[FxSmile] {
        &self.smiles
    }

    /// Source quotes, aligned with [`smiles`](Self::smiles).
    pub fn quotes(&self) -> &[MarketQuote] {
        &self.quotes
    }

    /// Tenors in years, ascending.
    pub fn tenors(&self) -> Vec<f64> {
        self.smiles.iter().map(FxSmile::tenor_years).collect()
    }

    /// Smile for a standard tenor, if quoted.
    pub fn smile(&self, tenor: Tenor) -> Option<&FxSmile> {
        self.index_of_days(tenor.days()).map(|i| &self.smiles[i])
    }

    /// `(tenor_years, ATM vol)` per tenor.
    pub fn atm_term_structure(&self) -> Vec<(f64, Vol)> {
        self.smiles
            .iter()
            .map(|s| (s.tenor_years(), s.atm_vol()))
            .collect()
    }

    /// Every tenor with missing buckets, as `(tenor_days, buckets)`.
    pub fn missing_buckets(&self) -> Vec<(u32, Vec<DeltaBucket>)> {
        self.smiles
            .iter()
            .filter(|s| !s.missing().is_empty())
            .map(|s| (s.tenor_days(), s.missing().to_vec()))
            .collect()
    }

    /// Every tenor with buckets rejected for a negative wing vol.
    pub fn rejected_buckets(&self) -> Vec<(u32, Vec<DeltaBucket>)> {
        self.smiles
            .iter()
            .filter(|s| !s.rejected().is_empty())
            .map(|s| (s.tenor_days(), s.rejected().to_vec()))
            .collect()
    }

    /// Vol at any expiry and delta.
    ///
    /// Each tenor's smile is interpolated at `delta`, then tenors are
    /// interpolated linearly in total variance (flat vol outside the range).
    ///
    /// # Errors
    /// Returns [`FxVolError::InvalidInput`] for a non-positive expiry or a
    /// delta outside (0, 100).
    pub fn vol(&self, expiry: f64, delta: f64) -> error::Result<Vol> {
        validate_positive(expiry, "expiry")?;
        validate_delta(delta, "delta")?;
        let tenors = self.tenors();
        let vols = self
            .smiles
            .iter()
            .map(|s| s.vol_at_delta(delta).map(|v| v.0))
            .collect::<error::Result<Vec<f64>>>()?;
        Ok(Vol(interpolate_total_variance(&tenors, &vols, expiry)))
    }

    /// Emitted smile points on a (tenor × delta) grid.
    ///
    /// No interpolation: a delta with no emitted point (missing bucket or
    /// off-grid delta) is `None`.
    pub fn grid(&self, deltas: &[i32]) -> Vec<SurfaceRow> {
        self.smiles
            .iter()
            .map(|s| SurfaceRow {
                tenor_days: s.tenor_days(),
                tenor_years: s.tenor_years(),
                vols: deltas
                    .iter()
                    .map(|&d| s.point(d).map(|p| p.implied_vol))
                    .collect(),
            })
            .collect()
    }

    /// Price a vanilla off the smile of a quoted tenor.
    ///
    /// Volatility is read from the smile at `strike`; spot, rates, and expiry
    /// come from that tenor's quote.
    ///
    /// # Errors
    /// Returns [`FxVolError::InvalidInput`] if the tenor is not on the surface
    /// or the pricing inputs are invalid.
    pub fn price(
        &self,
        tenor: Tenor,
        strike: f64,
        option_type: OptionType,
        notional: f64,
    ) -> error::Result<PricingResult> {
        let i = self
            .index_of_days(tenor.days())
            .ok_or_else(|| FxVolError::InvalidInput {
                field: "tenor",
                message: format!("{tenor} is not quoted on the {} surface", self.pair),
            })?;
        let quote = &self.quotes[i];
        let vol = self.smiles[i].vol_at_strike(strike)?;
        price(&OptionSpec {
            spot: quote.spot,
            strike,
            tenor_years: quote.tenor_years,
            domestic_rate: quote.domestic_rate,
            foreign_rate: quote.foreign_rate,
            volatility: vol.0,
            option_type,
            notional,
        })
    }

    fn index_of_days(&self, days: u32) -> Option<usize> {
        self.smiles.iter().position(|s| s.tenor_days() == days)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn quote(tenor: Tenor, atm: f64, rr25: f64, bf25: f64) -> MarketQuote {
        MarketQuote::new("EURUSD", 1.0850, tenor, 5.0, 3.5, atm)
            .with_risk_reversal(DeltaBucket::D25, rr25)
            .with_butterfly(DeltaBucket::D25, bf25)
    }

    fn surface() -> FxVolSurface {
        SurfaceBuilder::new()
            .buckets(&[DeltaBucket::D10, DeltaBucket::D25])
            .add_quote(quote(Tenor::OneMonth, 7.8, -0.35, 0.18))
            .add_quote(quote(Tenor::ThreeMonths, 8.2, -0.45, 0.22))
            .add_quote(
                quote(Tenor::OneYear, 8.9, -0.6, 0.3)
                    .with_risk_reversal(DeltaBucket::D10, -1.2)
                    .with_butterfly(DeltaBucket::D10, 0.95),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn atm_term_structure_is_sorted() {
        let s = surface();
        let ts = s.atm_term_structure();
        assert_eq!(ts.len(), 3);
        assert_eq!(ts[0].1, Vol(7.8));
        assert_eq!(ts[2].1, Vol(8.9));
        assert!(ts.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn vol_at_quoted_tenor_matches_smile() {
        let s = surface();
        let smile = s.smile(Tenor::ThreeMonths).unwrap();
        let v = s.vol(Tenor::ThreeMonths.years(), 25.0).unwrap();
        assert_abs_diff_eq!(v.0, smile.point(25).unwrap().implied_vol, epsilon = 1e-12);
    }

    #[test]
    fn missing_buckets_per_tenor() {
        let s = surface();
        assert_eq!(
            s.missing_buckets(),
            vec![(30, vec![DeltaBucket::D10]), (90, vec![DeltaBucket::D10])]
        );
    }

    #[test]
    fn grid_leaves_missing_points_empty() {
        let s = surface();
        let rows = s.grid(&[10, 25, 50, 75, 90]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].vols[0], None);
        assert_eq!(rows[0].vols[4], None);
        assert_eq!(rows[0].vols[2], Some(7.8));
        assert!(rows[2].vols.iter().all(Option::is_some));
    }

    #[test]
    fn price_reads_vol_from_smile() {
        let s = surface();
        let smile = s.smile(Tenor::OneYear).unwrap();
        let p75 = smile.point(75).unwrap();
        let r = s
            .price(Tenor::OneYear, p75.strike.unwrap(), OptionType::Call, 1_000_000.0)
            .unwrap();

        let q = &s.quotes()[2];
        let direct = price(&OptionSpec {
            spot: q.spot,
            strike: p75.strike.unwrap(),
            tenor_years: q.tenor_years,
            domestic_rate: q.domestic_rate,
            foreign_rate: q.foreign_rate,
            volatility: p75.implied_vol,
            option_type: OptionType::Call,
            notional: 1_000_000.0,
        })
        .unwrap();
        assert_abs_diff_eq!(r.premium, direct.premium, epsilon = 1e-6);
    }

    #[test]
    fn price_rejects_unquoted_tenor() {
        let s = surface();
        assert!(matches!(
            s.price(Tenor::SixMonths, 1.08, OptionType::Put, 1.0),
            Err(FxVolError::InvalidInput { field: "tenor", .. })
        ));
    }

    #[test]
    fn vol_validates_inputs() {
        let s = surface();
        assert!(s.vol(0.0, 50.0).is_err());
        assert!(s.vol(0.5, 0.0).is_err());
    }

    #[test]
    fn rejected_buckets_per_tenor() {
        let s = SurfaceBuilder::new()
            .buckets(&[DeltaBucket::D25])
            .add_quote(quote(Tenor::OneMonth, 7.8, -0.35, 0.18))
            .add_quote(quote(Tenor::ThreeMonths, 0.5, -2.0, 0.1))
            .build()
            .unwrap();
        assert_eq!(s.rejected_buckets(), vec![(90, vec![DeltaBucket::D25])]);
        assert!(s.missing_buckets().is_empty());
        // The rejected tenor still has its ATM point.
        assert!(s.vol(Tenor::ThreeMonths.years(), 50.0).is_ok());
    }

    #[test]
    fn serde_round_trip() {
        let s = surface();
        let json = serde_json::to_string(&s).unwrap();
        let back: FxVolSurface = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    fn surface_json(edit: impl FnOnce(&mut serde_json::Value)) -> String {
        let mut v = serde_json::to_value(surface()).unwrap();
        edit(&mut v);
        v.to_string()
    }

    #[test]
    fn deserialize_rejects_empty_surface() {
        let json = surface_json(|v| {
            v["smiles"] = serde_json::json!([]);
            v["quotes"] = serde_json::json!([]);
        });
        assert!(serde_json::from_str::<FxVolSurface>(&json).is_err());
    }

    #[test]
    fn deserialize_rejects_misaligned_quotes() {
        let json = surface_json(|v| {
            v["quotes"].as_array_mut().unwrap().pop();
        });
        assert!(serde_json::from_str::<FxVolSurface>(&json).is_err());

        let json = surface_json(|v| v["quotes"] = serde_json::json!([]));
        assert!(serde_json::from_str::<FxVolSurface>(&json).is_err());

        // Same count, but quotes out of step with their smiles.
        let json = surface_json(|v| v["quotes"].as_array_mut().unwrap().swap(0, 1));
        assert!(serde_json::from_str::<FxVolSurface>(&json).is_err());
    }

    #[test]
    fn deserialize_rejects_unsorted_tenors() {
        let json = surface_json(|v| {
            v["quotes"].as_array_mut().unwrap().swap(0, 2);
            v["smiles"].as_array_mut().unwrap().swap(0, 2);
        });
        assert!(serde_json::from_str::<FxVolSurface>(&json).is_err());
    }

    #[test]
    fn deserialize_rejects_foreign_pair() {
        let json = surface_json(|v| v["pair"] = serde_json::json!("GBPUSD"));
        assert!(serde_json::from_str::<FxVolSurface>(&json).is_err());
    }

    #[test]
    fn surface_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FxVolSurface>();
    }
}
