//! Builder API for FX volatility surface construction.
//!
//! ```
//! use fxvol::quote::{DeltaBucket, MarketQuote};
//! use fxvol::surface::SurfaceBuilder;
//! use fxvol::types::Tenor;
//!
//! let quotes = [
//!     (Tenor::OneWeek, 7.1, -0.20, 0.12),
//!     (Tenor::OneMonth, 7.6, -0.30, 0.16),
//!     (Tenor::SixMonths, 8.4, -0.55, 0.25),
//! ]
//! .map(|(tenor, atm, rr, bf)| {
//!     MarketQuote::new("EURUSD", 1.0850, tenor, 5.0, 3.5, atm)
//!         .with_risk_reversal(DeltaBucket::D25, rr)
//!         .with_butterfly(DeltaBucket::D25, bf)
//! });
//!
//! let surface = SurfaceBuilder::new()
//!     .buckets(&[DeltaBucket::D25])
//!     .add_quotes(quotes)
//!     .build()
//!     .unwrap();
//!
//! assert!(surface.missing_buckets().is_empty());
//! ```

use crate::conventions::AtmConvention;
use crate::error::{self, FxVolError};
use crate::quote::{DeltaBucket, MarketQuote};
use crate::smile::{FxSmile, SmileConstructor};
use crate::surface::FxVolSurface;
use crate::validate::validate_positive;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builder for [`FxVolSurface`] from per-tenor market quotes.
///
/// Accumulates quotes for one currency pair, then constructs a smile with
/// strikes for each tenor and assembles them in expiry order.
#[derive(Debug, Default)]
pub struct SurfaceBuilder {
    pair: Option<String>,
    spot: Option<f64>,
    constructor: SmileConstructor,
    quotes: Vec<MarketQuote>,
}

impl SurfaceBuilder {
    /// Create a new builder (all buckets, forward-ATM strikes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Expected currency pair. Defaults to the first quote's pair.
    pub fn pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    /// Spot snapshot applied to every quote.
    ///
    /// Without it, all quotes must already agree on spot.
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// ATM strike convention for every smile.
    pub fn atm_convention(mut self, convention: AtmConvention) -> Self {
        self.constructor = self.constructor.atm_convention(convention);
        self
    }

    /// Requested delta buckets for every smile.
    pub fn buckets(mut self, buckets: &[DeltaBucket]) -> Self {
        self.constructor = self.constructor.buckets(buckets);
        self
    }

    /// Add one tenor's quote.
    pub fn add_quote(mut self, quote: MarketQuote) -> Self {
        self.quotes.push(quote);
        self
    }

    /// Add several tenors' quotes.
    pub fn add_quotes(mut self, quotes: impl IntoIterator<Item = MarketQuote>) -> Self {
        self.quotes.extend(quotes);
        self
    }

    /// Build the surface.
    ///
    /// Sorts quotes by expiry and constructs a smile with strikes for each.
    ///
    /// # Errors
    /// Returns [`FxVolError::InvalidInput`] if there are no quotes, quotes
    /// mix currency pairs or spots, two quotes share a tenor, or any quote
    /// fails smile construction.
    pub fn build(self) -> error::Result<FxVolSurface> {
        #[cfg(feature = "logging")]
        tracing::debug!(n_tenors = self.quotes.len(), "surface build started");

        let Self {
            pair,
            spot,
            constructor,
            mut quotes,
        } = self;

        let first = quotes.first().ok_or_else(|| FxVolError::InvalidInput {
            field: "quotes",
            message: "at least one tenor quote is required".into(),
        })?;
        let pair = pair.unwrap_or_else(|| first.pair.clone());
        let explicit_spot = spot.is_some();
        let spot = match spot {
            Some(s) => validate_positive(s, "spot")?,
            None => first.spot,
        };

        for q in &mut quotes {
            if !q.pair.eq_ignore_ascii_case(&pair) {
                return Err(FxVolError::InvalidInput {
                    field: "pair",
                    message: format!("quote for {} on a {pair} surface", q.pair),
                });
            }
            if explicit_spot {
                q.spot = spot;
            } else if q.spot != spot {
                return Err(FxVolError::InvalidInput {
                    field: "spot",
                    message: format!(
                        "{}d quote has spot {}, expected {spot}",
                        q.tenor_days, q.spot
                    ),
                });
            }
        }

        quotes.sort_by(|a, b| a.tenor_years.total_cmp(&b.tenor_years));
        for w in quotes.windows(2) {
            if w[0].tenor_days == w[1].tenor_days {
                return Err(FxVolError::InvalidInput {
                    field: "tenor_days",
                    message: format!("duplicate {}d tenor", w[0].tenor_days),
                });
            }
        }

        let smiles = construct_all(&constructor, &quotes)?;

        #[cfg(feature = "logging")]
        tracing::debug!(
            pair = %pair,
            n_tenors = smiles.len(),
            n_incomplete = smiles.iter().filter(|s| !s.is_complete()).count(),
            "surface build complete"
        );

        Ok(FxVolSurface {
            pair,
            spot,
            quotes,
            smiles,
        })
    }
}

#[cfg(not(feature = "parallel"))]
fn construct_all(
    constructor: &SmileConstructor,
    quotes: &[MarketQuote],
) -> error::Result<Vec<FxSmile>> {
    quotes
        .iter()
        .map(|q| constructor.construct_with_strikes(q))
        .collect()
}

#[cfg(feature = "parallel")]
fn construct_all(
    constructor: &SmileConstructor,
    quotes: &[MarketQuote],
) -> error::Result<Vec<FxSmile>> {
    quotes
        .par_iter()
        .map(|q| constructor.construct_with_strikes(q))
        .collect()
}
