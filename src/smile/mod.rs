//! Single-tenor FX volatility smiles in delta space.
//!
//! A smile is a discrete set of [`SmilePoint`]s, one per quoted wing plus ATM,
//! built from a [`MarketQuote`](crate::quote::MarketQuote) by
//! [`SmileConstructor`]. Strikes are attached when a spot/forward reference
//! is available and left as `None` otherwise.
//!
//! ## Delta convention
//!
//! Deltas are signed percentages on a 0–100 axis: below 50 is the put wing
//! (a 25-delta put is stored as `25`), above 50 the call wing (a 25-delta
//! call is `75`), and `50` is ATM.

pub mod constructor;
pub mod strike;

pub use constructor::{SmileConstructor, build_smile, wing_vols};
pub use strike::delta_to_strike;

use serde::{Deserialize, Serialize};

use crate::conventions::AtmConvention;
use crate::error::{self, FxVolError};
use crate::forward::ForwardReference;
use crate::quote::DeltaBucket;
use crate::types::{Strike, Vol};
use crate::validate::{validate_delta, validate_non_negative, validate_positive};

/// One (delta, vol, strike) point of a smile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmilePoint {
    /// Signed delta: `< 50` put wing, `> 50` call wing, `50` ATM.
    pub delta: i32,
    /// Implied volatility, percent.
    pub implied_vol: f64,
    /// Approximate strike, absent when no spot/forward reference was supplied.
    pub strike: Option<f64>,
}

impl SmilePoint {
    pub fn is_atm(&self) -> bool {
        self.delta == 50
    }

    pub fn is_put_wing(&self) -> bool {
        self.delta < 50
    }

    pub fn is_call_wing(&self) -> bool {
        self.delta > 50
    }

    /// The strike, or [`FxVolError::MissingReference`] if none was derived.
    pub fn require_strike(&self) -> error::Result<f64> {
        self.strike
            .ok_or(FxVolError::MissingReference { delta: self.delta })
    }
}

/// A constructed smile for one tenor.
///
/// Immutable once built. Points are sorted by ascending delta; buckets whose
/// quotes were absent are listed in [`missing`](Self::missing), buckets whose
/// quotes imply a negative wing vol in [`rejected`](Self::rejected), and
/// neither has points. Deserialization re-checks these invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FxSmileRaw", into = "FxSmileRaw")]
pub struct FxSmile {
    tenor_days: u32,
    tenor_years: f64,
    atm_vol: f64,
    atm_convention: AtmConvention,
    points: Vec<SmilePoint>,
    missing: Vec<DeltaBucket>,
    rejected: Vec<DeltaBucket>,
    reference: Option<ForwardReference>,
}

#[derive(Serialize, Deserialize)]
struct FxSmileRaw {
    tenor_days: u32,
    tenor_years: f64,
    atm_vol: f64,
    atm_convention: AtmConvention,
    points: Vec<SmilePoint>,
    #[serde(default)]
    missing: Vec<DeltaBucket>,
    #[serde(default)]
    rejected: Vec<DeltaBucket>,
    #[serde(default)]
    reference: Option<ForwardReference>,
}

impl From<FxSmile> for FxSmileRaw {
    fn from(s: FxSmile) -> Self {
        Self {
            tenor_days: s.tenor_days,
            tenor_years: s.tenor_years,
            atm_vol: s.atm_vol,
            atm_convention: s.atm_convention,
            points: s.points,
            missing: s.missing,
            rejected: s.rejected,
            reference: s.reference,
        }
    }
}

impl TryFrom<FxSmileRaw> for FxSmile {
    type Error = FxVolError;

    fn try_from(raw: FxSmileRaw) -> Result<Self, Self::Error> {
        validate_positive(raw.tenor_years, "tenor_years")?;
        validate_non_negative(raw.atm_vol, "atm_vol")?;
        let reference = raw
            .reference
            .map(|r| ForwardReference::new(r.spot, r.forward, r.tenor_years))
            .transpose()?;

        let invalid_points = |message: String| FxVolError::InvalidInput {
            field: "points",
            message,
        };
        if !raw.points.windows(2).all(|w| w[0].delta < w[1].delta) {
            return Err(invalid_points("deltas must be strictly increasing".into()));
        }
        let atm = raw
            .points
            .iter()
            .find(|p| p.is_atm())
            .ok_or_else(|| invalid_points("no ATM point at delta 50".into()))?;
        if atm.implied_vol != raw.atm_vol {
            return Err(invalid_points(format!(
                "ATM point vol {} differs from atm_vol {}",
                atm.implied_vol, raw.atm_vol
            )));
        }
        for p in &raw.points {
            validate_non_negative(p.implied_vol, "implied_vol")?;
            match (p.strike, &reference) {
                (Some(k), Some(_)) => {
                    validate_positive(k, "strike")?;
                }
                (None, None) => {}
                _ => {
                    return Err(invalid_points(format!(
                        "strike at delta {} does not match the reference",
                        p.delta
                    )));
                }
            }
            if p.is_atm() {
                continue;
            }
            let bucket = DeltaBucket::try_from(p.delta.min(100 - p.delta))
                .map_err(|_| invalid_points(format!("delta {} is not a quoted bucket", p.delta)))?;
            if raw.missing.contains(&bucket) || raw.rejected.contains(&bucket) {
                return Err(invalid_points(format!("{bucket} is both emitted and unusable")));
            }
            if raw.points.binary_search_by_key(&(100 - p.delta), |q| q.delta).is_err() {
                return Err(invalid_points(format!("{bucket} has only one wing")));
            }
        }
        for (list, field) in [(&raw.missing, "missing"), (&raw.rejected, "rejected")] {
            if !list.windows(2).all(|w| w[0] < w[1]) {
                return Err(FxVolError::InvalidInput {
                    field,
                    message: "buckets must be strictly increasing".into(),
                });
            }
        }

        Ok(Self {
            tenor_days: raw.tenor_days,
            tenor_years: raw.tenor_years,
            atm_vol: raw.atm_vol,
            atm_convention: raw.atm_convention,
            points: raw.points,
            missing: raw.missing,
            rejected: raw.rejected,
            reference,
        })
    }
}

impl FxSmile {
    pub fn tenor_days(&self) -> u32 {
        self.tenor_days
    }

    pub fn tenor_years(&self) -> f64 {
        self.tenor_years
    }

    /// ATM volatility (the delta-50 point).
    pub fn atm_vol(&self) -> Vol {
        Vol(self.atm_vol)
    }

    pub fn atm_convention(&self) -> AtmConvention {
        self.atm_convention
    }

    /// Emitted points, ascending delta.
    pub fn points(&self) -> &[SmilePoint] {
        &self.points
    }

    /// Requested buckets with an absent RR or BF quote, ascending.
    pub fn missing(&self) -> &[DeltaBucket] {
        &self.missing
    }

    /// Requested buckets whose RR/BF quotes imply a negative wing vol, ascending.
    pub fn rejected(&self) -> &[DeltaBucket] {
        &self.rejected
    }

    /// Every requested bucket produced points.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.rejected.is_empty()
    }

    /// The spot/forward reference used for strikes, if any.
    pub fn reference(&self) -> Option<&ForwardReference> {
        self.reference.as_ref()
    }

    /// This smile if every requested bucket produced points.
    ///
    /// # Errors
    /// Returns [`FxVolError::IncompleteQuote`] listing the missing buckets, or
    /// [`FxVolError::InvalidInput`] on `butterfly` for rejected buckets.
    pub fn require_complete(&self) -> error::Result<&Self> {
        if !self.missing.is_empty() {
            return Err(FxVolError::IncompleteQuote {
                tenor_days: self.tenor_days,
                missing: self.missing.clone(),
            });
        }
        if let Some(bucket) = self.rejected.first() {
            return Err(rejected_bucket(self.tenor_days, *bucket));
        }
        Ok(self)
    }

    /// The emitted point at exactly this delta.
    pub fn point(&self, delta: i32) -> Option<&SmilePoint> {
        self.points
            .binary_search_by_key(&delta, |p| p.delta)
            .ok()
            .map(|i| &self.points[i])
    }

    /// Vol of a quoted bucket wing, distinguishing "not quoted" from "not requested".
    ///
    /// # Errors
    /// Returns [`FxVolError::IncompleteQuote`] if the bucket's quotes were absent
    /// and [`FxVolError::InvalidInput`] if they implied a negative vol or the
    /// bucket was never requested.
    pub fn bucket_vols(&self, bucket: DeltaBucket) -> error::Result<(Vol, Vol)> {
        if self.missing.contains(&bucket) {
            return Err(FxVolError::IncompleteQuote {
                tenor_days: self.tenor_days,
                missing: vec![bucket],
            });
        }
        if self.rejected.contains(&bucket) {
            return Err(rejected_bucket(self.tenor_days, bucket));
        }
        match (self.point(bucket.put_delta()), self.point(bucket.call_delta())) {
            (Some(put), Some(call)) => Ok((Vol(put.implied_vol), Vol(call.implied_vol))),
            _ => Err(FxVolError::InvalidInput {
                field: "delta_bucket",
                message: format!("{bucket} was not requested for this smile"),
            }),
        }
    }

    /// Vol at any delta in (0, 100).
    ///
    /// Linear between emitted points, flat beyond the outermost wings.
    /// Missing buckets are bridged by their neighbours.
    ///
    /// # Errors
    /// Returns [`FxVolError::InvalidInput`] for a delta outside (0, 100).
    pub fn vol_at_delta(&self, delta: f64) -> error::Result<Vol> {
        validate_delta(delta, "delta")?;
        let nodes: Vec<(f64, f64)> = self
            .points
            .iter()
            .map(|p| (f64::from(p.delta), p.implied_vol))
            .collect();
        Ok(Vol(interpolate_flat(&nodes, delta)))
    }

    /// Approximate strike at any delta in (0, 100), using the interpolated vol.
    ///
    /// At exactly 50 the ATM convention applies.
    ///
    /// # Errors
    /// Returns [`FxVolError::MissingReference`] if the smile has no reference.
    pub fn strike_for_delta(&self, delta: f64) -> error::Result<Strike> {
        validate_delta(delta, "delta")?;
        let reference = self.reference.as_ref().ok_or(FxVolError::MissingReference {
            delta: delta.round() as i32,
        })?;
        if delta == 50.0 {
            return Ok(Strike(match self.atm_convention {
                AtmConvention::Forward => reference.forward,
                AtmConvention::Spot => reference.spot,
            }));
        }
        let vol = self.vol_at_delta(delta)?;
        delta_to_strike(delta, vol.0, reference.forward, self.tenor_years).map(Strike)
    }

    /// Vol at an absolute strike.
    ///
    /// Linear in strike between the points' derived strikes, flat outside.
    ///
    /// # Errors
    /// Returns [`FxVolError::MissingReference`] if the smile has no strikes,
    /// [`FxVolError::InvalidInput`] for a non-positive strike.
    pub fn vol_at_strike(&self, strike: f64) -> error::Result<Vol> {
        validate_positive(strike, "strike")?;
        let mut nodes = Vec::with_capacity(self.points.len());
        for p in &self.points {
            nodes.push((p.require_strike()?, p.implied_vol));
        }
        nodes.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Vol(interpolate_flat(&nodes, strike)))
    }
}

fn rejected_bucket(tenor_days: u32, bucket: DeltaBucket) -> FxVolError {
    FxVolError::InvalidInput {
        field: "butterfly",
        message: format!("{tenor_days}d {bucket} quotes imply a negative wing vol"),
    }
}

/// Piecewise-linear interpolation over `(x, y)` nodes sorted by `x`, flat outside.
///
/// `nodes` must be non-empty. Coincident `x` values resolve to the left node.
fn interpolate_flat(nodes: &[(f64, f64)], x: f64) -> f64 {
    let n = nodes.len();
    if x <= nodes[0].0 {
        return nodes[0].1;
    }
    if x >= nodes[n - 1].0 {
        return nodes[n - 1].1;
    }
    let right = nodes.partition_point(|&(xi, _)| xi < x);
    let (x0, y0) = nodes[right - 1];
    let (x1, y1) = nodes[right];
    let width = x1 - x0;
    if width <= 0.0 {
        return y0;
    }
    let alpha = (x - x0) / width;
    (1.0 - alpha) * y0 + alpha * y1
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quote::MarketQuote;
    use crate::types::Tenor;

    fn full_quote() -> MarketQuote {
        MarketQuote::new("EURUSD", 1.0850, Tenor::ThreeMonths, 5.0, 3.5, 8.0)
            .with_risk_reversal(DeltaBucket::D10, -0.9)
            .with_butterfly(DeltaBucket::D10, 0.6)
            .with_risk_reversal(DeltaBucket::D25, -0.4)
            .with_butterfly(DeltaBucket::D25, 0.2)
    }

    fn smile_with_strikes() -> FxSmile {
        SmileConstructor::new()
            .buckets(&[DeltaBucket::D10, DeltaBucket::D25])
            .construct_with_strikes(&full_quote())
            .unwrap()
    }

    #[test]
    fn interpolation_hits_nodes_and_midpoints() {
        let nodes = [(10.0, 1.0), (20.0, 3.0), (40.0, 2.0)];
        assert_eq!(interpolate_flat(&nodes, 10.0), 1.0);
        assert_eq!(interpolate_flat(&nodes, 20.0), 3.0);
        assert_abs_diff_eq!(interpolate_flat(&nodes, 15.0), 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(interpolate_flat(&nodes, 30.0), 2.5, epsilon = 1e-15);
        assert_eq!(interpolate_flat(&nodes, 5.0), 1.0);
        assert_eq!(interpolate_flat(&nodes, 50.0), 2.0);
    }

    #[test]
    fn interpolation_single_node() {
        assert_eq!(interpolate_flat(&[(50.0, 8.0)], 10.0), 8.0);
    }

    #[test]
    fn vol_at_delta_between_points() {
        let smile = smile_with_strikes();
        let v25 = smile.point(25).unwrap().implied_vol;
        let v50 = smile.point(50).unwrap().implied_vol;
        let v = smile.vol_at_delta(37.5).unwrap();
        assert_abs_diff_eq!(v.0, 0.5 * (v25 + v50), epsilon = 1e-12);
    }

    #[test]
    fn vol_at_delta_flat_beyond_wings() {
        let smile = smile_with_strikes();
        let v10 = smile.point(10).unwrap().implied_vol;
        let v90 = smile.point(90).unwrap().implied_vol;
        assert_eq!(smile.vol_at_delta(2.0).unwrap().0, v10);
        assert_eq!(smile.vol_at_delta(98.0).unwrap().0, v90);
        assert!(smile.vol_at_delta(100.0).is_err());
    }

    #[test]
    fn vol_at_strike_recovers_point_vols() {
        let smile = smile_with_strikes();
        for p in smile.points() {
            let v = smile.vol_at_strike(p.strike.unwrap()).unwrap();
            assert_abs_diff_eq!(v.0, p.implied_vol, epsilon = 1e-12);
        }
    }

    #[test]
    fn strike_for_delta_matches_points() {
        let smile = smile_with_strikes();
        for p in smile.points() {
            let k = smile.strike_for_delta(f64::from(p.delta)).unwrap();
            assert_abs_diff_eq!(k.0, p.strike.unwrap(), epsilon = 1e-12);
        }
    }

    #[test]
    fn strike_queries_need_reference() {
        let smile = build_smile(&full_quote()).unwrap();
        assert!(matches!(
            smile.vol_at_strike(1.08),
            Err(FxVolError::MissingReference { .. })
        ));
        assert!(matches!(
            smile.strike_for_delta(25.0),
            Err(FxVolError::MissingReference { delta: 25 })
        ));
        assert!(matches!(
            smile.points()[0].require_strike(),
            Err(FxVolError::MissingReference { delta: 5 })
        ));
    }

    #[test]
    fn bucket_vols_reports_missing_and_unrequested() {
        let q = full_quote().with_risk_reversal(DeltaBucket::D15, 0.3);
        let smile = SmileConstructor::new()
            .buckets(&[DeltaBucket::D10, DeltaBucket::D15])
            .construct(&q)
            .unwrap();

        let (put, call) = smile.bucket_vols(DeltaBucket::D10).unwrap();
        assert_abs_diff_eq!(put.0, 8.0 + 0.45 + 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(call.0, 8.0 - 0.45 + 0.6, epsilon = 1e-12);

        assert!(matches!(
            smile.bucket_vols(DeltaBucket::D15),
            Err(FxVolError::IncompleteQuote { tenor_days: 90, .. })
        ));
        assert!(matches!(
            smile.bucket_vols(DeltaBucket::D25),
            Err(FxVolError::InvalidInput { .. })
        ));
    }

    #[test]
    fn require_complete() {
        let smile = smile_with_strikes();
        assert!(smile.require_complete().is_ok());

        let partial = build_smile(&full_quote()).unwrap();
        match partial.require_complete() {
            Err(FxVolError::IncompleteQuote { missing, .. }) => {
                assert_eq!(missing, vec![DeltaBucket::D5, DeltaBucket::D15, DeltaBucket::D35]);
            }
            other => panic!("expected IncompleteQuote, got {other:?}"),
        }
    }

    #[test]
    fn point_wings() {
        let smile = smile_with_strikes();
        assert!(smile.point(10).unwrap().is_put_wing());
        assert!(smile.point(50).unwrap().is_atm());
        assert!(smile.point(75).unwrap().is_call_wing());
    }

    #[test]
    fn serde_round_trip() {
        let smile = smile_with_strikes();
        let json = serde_json::to_string(&smile).unwrap();
        let back: FxSmile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, smile);
    }

    fn smile_json(smile: &FxSmile, edit: impl FnOnce(&mut serde_json::Value)) -> String {
        let mut v = serde_json::to_value(smile).unwrap();
        edit(&mut v);
        v.to_string()
    }

    fn points(v: &mut serde_json::Value) -> &mut Vec<serde_json::Value> {
        v["points"].as_array_mut().unwrap()
    }

    #[test]
    fn deserialize_rejects_empty_or_atm_less_points() {
        let smile = smile_with_strikes();

        let json = smile_json(&smile, |v| v["points"] = serde_json::json!([]));
        assert!(serde_json::from_str::<FxSmile>(&json).is_err());

        let json = smile_json(&smile, |v| points(v).retain(|p| p["delta"] != 50));
        assert!(serde_json::from_str::<FxSmile>(&json).is_err());

        let json = smile_json(&smile, |v| v["atm_vol"] = serde_json::json!(9.0));
        assert!(serde_json::from_str::<FxSmile>(&json).is_err());
    }

    #[test]
    fn deserialize_rejects_unsorted_or_duplicate_deltas() {
        let smile = smile_with_strikes();

        let json = smile_json(&smile, |v| points(v).swap(0, 1));
        assert!(serde_json::from_str::<FxSmile>(&json).is_err());

        let json = smile_json(&smile, |v| {
            let first = points(v)[0].clone();
            points(v).insert(0, first);
        });
        assert!(serde_json::from_str::<FxSmile>(&json).is_err());
    }

    #[test]
    fn deserialize_rejects_inconsistent_wings() {
        let smile = smile_with_strikes();

        // A put wing without its call wing.
        let json = smile_json(&smile, |v| points(v).retain(|p| p["delta"] != 90));
        assert!(serde_json::from_str::<FxSmile>(&json).is_err());

        // Off-bucket delta.
        let json = smile_json(&smile, |v| {
            points(v)[0]["delta"] = serde_json::json!(7);
        });
        assert!(serde_json::from_str::<FxSmile>(&json).is_err());

        // Points for a bucket also reported missing.
        let json = smile_json(&smile, |v| v["missing"] = serde_json::json!(["D10"]));
        assert!(serde_json::from_str::<FxSmile>(&json).is_err());

        // Strikes without a reference.
        let json = smile_json(&smile, |v| v["reference"] = serde_json::Value::Null);
        assert!(serde_json::from_str::<FxSmile>(&json).is_err());

        let json = smile_json(&smile, |v| {
            points(v)[0]["implied_vol"] = serde_json::json!(-1.0);
        });
        assert!(serde_json::from_str::<FxSmile>(&json).is_err());
    }

    #[test]
    fn deserialized_smile_interpolates_without_panicking() {
        let smile = build_smile(&full_quote()).unwrap();
        let json = serde_json::to_string(&smile).unwrap();
        let back: FxSmile = serde_json::from_str(&json).unwrap();
        assert!(back.vol_at_delta(25.0).is_ok());
        assert!(back.vol_at_delta(1.0).is_ok());
        assert!(matches!(
            back.vol_at_strike(1.08),
            Err(FxVolError::MissingReference { .. })
        ));
    }
}
