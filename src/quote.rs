//! Per-tenor FX volatility market quotes.
//!
//! A [`MarketQuote`] carries the already-parsed market data for one currency
//! pair and one tenor: spot, deposit rates, ATM volatility, and risk-reversal
//! and butterfly quotes per [`DeltaBucket`]. Absent RR/BF quotes are simply
//! not present in the maps; they are never stored as zero.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conventions::DAYS_PER_YEAR;
use crate::error::{self, FxVolError};
use crate::forward::{ForwardReference, PipDivisor};
use crate::types::Tenor;
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Allowed gap between `tenor_years` and `tenor_days / 365` (JSON decimals).
const TENOR_TOLERANCE: f64 = 1e-9;

/// Delta buckets at which risk reversals and butterflies are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeltaBucket {
    D5,
    D10,
    D15,
    D25,
    D35,
}

impl DeltaBucket {
    /// Every quoted bucket, ascending.
    pub const ALL: [DeltaBucket; 5] = [
        DeltaBucket::D5,
        DeltaBucket::D10,
        DeltaBucket::D15,
        DeltaBucket::D25,
        DeltaBucket::D35,
    ];

    /// Bucket delta in percent (5, 10, 15, 25, 35).
    pub fn value(self) -> i32 {
        match self {
            DeltaBucket::D5 => 5,
            DeltaBucket::D10 => 10,
            DeltaBucket::D15 => 15,
            DeltaBucket::D25 => 25,
            DeltaBucket::D35 => 35,
        }
    }

    /// Signed delta of the put wing point (equal to [`value`](Self::value)).
    pub fn put_delta(self) -> i32 {
        self.value()
    }

    /// Signed delta of the call wing point (`100 − value`).
    pub fn call_delta(self) -> i32 {
        100 - self.value()
    }
}

impl TryFrom<i32> for DeltaBucket {
    type Error = FxVolError;

    fn try_from(delta: i32) -> Result<Self, Self::Error> {
        DeltaBucket::ALL
            .into_iter()
            .find(|b| b.value() == delta)
            .ok_or_else(|| FxVolError::InvalidInput {
                field: "delta_bucket",
                message: format!("{delta} is not a quoted bucket (5, 10, 15, 25, 35)"),
            })
    }
}

impl fmt::Display for DeltaBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.value())
    }
}

/// Market data for one currency pair and tenor.
///
/// Rates and volatilities are in percent (`5.25` means 5.25%), and
/// risk reversals and butterflies are in volatility points.
///
/// # Examples
///
/// ```
/// use fxvol::quote::{DeltaBucket, MarketQuote};
/// use fxvol::types::Tenor;
///
/// let quote = MarketQuote::new("EURUSD", 1.0850, Tenor::OneMonth, 5.0, 3.5, 8.0)
///     .with_risk_reversal(DeltaBucket::D25, -0.45)
///     .with_butterfly(DeltaBucket::D25, 0.20);
///
/// assert_eq!(quote.tenor_days, 30);
/// assert!(quote.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Six-letter pair code, base then quote currency (e.g. `"EURUSD"`).
    pub pair: String,
    /// Spot rate, quote currency per unit of base currency.
    pub spot: f64,
    pub tenor_days: u32,
    pub tenor_years: f64,
    /// Quote-currency deposit rate, percent.
    pub domestic_rate: f64,
    /// Base-currency deposit rate, percent.
    pub foreign_rate: f64,
    /// ATM volatility, percent.
    pub atm_vol: f64,
    /// Risk reversal (call vol − put vol) per bucket, vol points.
    #[serde(default)]
    pub risk_reversal: BTreeMap<DeltaBucket, f64>,
    /// Butterfly (average wing vol − ATM vol) per bucket, vol points.
    #[serde(default)]
    pub butterfly: BTreeMap<DeltaBucket, f64>,
    /// Published outright forward points, in pips, when available.
    #[serde(default)]
    pub forward_points: Option<f64>,
}

impl MarketQuote {
    /// Create a quote for a standard tenor with no RR/BF data yet.
    pub fn new(
        pair: impl Into<String>,
        spot: f64,
        tenor: Tenor,
        domestic_rate: f64,
        foreign_rate: f64,
        atm_vol: f64,
    ) -> Self {
        Self {
            pair: pair.into(),
            spot,
            tenor_days: tenor.days(),
            tenor_years: tenor.years(),
            domestic_rate,
            foreign_rate,
            atm_vol,
            risk_reversal: BTreeMap::new(),
            butterfly: BTreeMap::new(),
            forward_points: None,
        }
    }

    /// Override the maturity with a broken-date day count (`years = days / 365`).
    pub fn with_tenor_days(mut self, days: u32) -> Self {
        self.tenor_days = days;
        self.tenor_years = f64::from(days) / DAYS_PER_YEAR;
        self
    }

    /// Set the risk-reversal quote for a bucket.
    pub fn with_risk_reversal(mut self, bucket: DeltaBucket, rr: f64) -> Self {
        self.risk_reversal.insert(bucket, rr);
        self
    }

    /// Set the butterfly quote for a bucket.
    pub fn with_butterfly(mut self, bucket: DeltaBucket, bf: f64) -> Self {
        self.butterfly.insert(bucket, bf);
        self
    }

    /// Set published forward points (pips).
    pub fn with_forward_points(mut self, points: f64) -> Self {
        self.forward_points = Some(points);
        self
    }

    /// The standard tenor matching `tenor_days`, if any.
    pub fn tenor(&self) -> Option<Tenor> {
        Tenor::from_days(self.tenor_days)
    }

    /// Both RR and BF for a bucket, or `None` if either is absent.
    pub fn wing(&self, bucket: DeltaBucket) -> Option<(f64, f64)> {
        let rr = self.risk_reversal.get(&bucket)?;
        let bf = self.butterfly.get(&bucket)?;
        Some((*rr, *bf))
    }

    /// Pip divisor for this pair's forward points.
    pub fn pip_divisor(&self) -> PipDivisor {
        PipDivisor::for_pair(&self.pair)
    }

    /// Spot/forward reference for strike derivation.
    ///
    /// Published forward points take precedence over the rate-parity forward.
    pub fn forward_reference(&self) -> error::Result<ForwardReference> {
        self.validate()?;
        match self.forward_points {
            Some(points) => ForwardReference::from_points(
                self.spot,
                points,
                self.pip_divisor(),
                self.tenor_years,
            ),
            None => ForwardReference::from_rates(
                self.spot,
                self.tenor_years,
                self.domestic_rate,
                self.foreign_rate,
            ),
        }
    }

    /// Check the quote invariants: `spot > 0`, `atm_vol ≥ 0`, `tenor_years > 0`
    /// and equal to `tenor_days / 365`, and every rate, RR, BF, and
    /// forward-point value finite.
    ///
    /// # Errors
    /// Returns [`FxVolError::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> error::Result<()> {
        validate_positive(self.spot, "spot")?;
        validate_positive(self.tenor_years, "tenor_years")?;
        let day_count_years = f64::from(self.tenor_days) / DAYS_PER_YEAR;
        if (self.tenor_years - day_count_years).abs() > TENOR_TOLERANCE {
            return Err(FxVolError::InvalidInput {
                field: "tenor_years",
                message: format!(
                    "{} years disagrees with {}d / 365 = {day_count_years}",
                    self.tenor_years, self.tenor_days
                ),
            });
        }
        validate_non_negative(self.atm_vol, "atm_vol")?;
        validate_finite(self.domestic_rate, "domestic_rate")?;
        validate_finite(self.foreign_rate, "foreign_rate")?;
        for rr in self.risk_reversal.values() {
            validate_finite(*rr, "risk_reversal")?;
        }
        for bf in self.butterfly.values() {
            validate_finite(*bf, "butterfly")?;
        }
        if let Some(points) = self.forward_points {
            validate_finite(points, "forward_points")?;
        }
        Ok(())
    }
}
