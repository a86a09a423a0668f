//! # fxvol
//!
//! FX volatility smile construction and Garman-Kohlhagen option pricing.
//!
//! Converts market-quoted volatility instruments (ATM, risk reversals,
//! butterflies at fixed delta buckets) into a delta-space smile with
//! approximate strikes, and prices European FX vanillas and their Greeks off
//! that smile.
//!
//! ## Architecture
//!
//! - **`forward`**: covered-interest-parity and forward-point forwards
//! - **`smile`**: per-tenor smile construction, delta→strike inversion, interpolation
//! - **`pricing`**: Garman-Kohlhagen premium and Greeks
//! - **`surface`**: multi-tenor assembly of smiles for one currency pair
//!
//! ## Design
//!
//! - **Percent in, percent out.** Rates, vols, RR and BF follow FX quoting
//!   (`8.0` means 8%). Conversion to decimals happens inside the formulas.
//! - **No silent defaults.** Absent RR/BF quotes are reported as missing
//!   buckets, and strikes without a spot/forward reference are `None`.
//! - **No panics.** Every fallible operation returns [`Result`].
//! - **Stateless and thread-safe.** Constructors, pricers, and surfaces hold
//!   no mutable state and are `Send + Sync`.
//! - **Serializable.** Value types implement Serde `Serialize` / `Deserialize`.
//!
//! ## Example
//!
//! ```
//! use fxvol::quote::{DeltaBucket, MarketQuote};
//! use fxvol::smile::SmileConstructor;
//! use fxvol::pricing::{OptionSpec, price};
//! use fxvol::{OptionType, Tenor};
//!
//! let quote = MarketQuote::new("EURUSD", 1.0850, Tenor::OneMonth, 5.0, 3.5, 8.0)
//!     .with_risk_reversal(DeltaBucket::D25, -0.40)
//!     .with_butterfly(DeltaBucket::D25, 0.20);
//!
//! let smile = SmileConstructor::new().construct_with_strikes(&quote)?;
//! let put_25 = smile.point(25).unwrap();
//!
//! let result = price(&OptionSpec {
//!     spot: quote.spot,
//!     strike: put_25.require_strike()?,
//!     tenor_years: quote.tenor_years,
//!     domestic_rate: quote.domestic_rate,
//!     foreign_rate: quote.foreign_rate,
//!     volatility: put_25.implied_vol,
//!     option_type: OptionType::Put,
//!     notional: 1_000_000.0,
//! })?;
//!
//! // Close to a 25-delta put.
//! assert!(result.delta < -0.2 && result.delta > -0.3);
//! # Ok::<(), fxvol::FxVolError>(())
//! ```

pub mod conventions;
pub mod error;
pub mod forward;
pub mod math;
pub mod pricing;
pub mod quote;
pub mod smile;
pub mod surface;
pub mod types;
mod validate;

#[doc(inline)]
pub use error::{FxVolError, Result};
#[doc(inline)]
pub use forward::{ForwardReference, PipDivisor, forward_from_points, forward_from_rates};
#[doc(inline)]
pub use pricing::{OptionSpec, PricingResult, price};
#[doc(inline)]
pub use quote::{DeltaBucket, MarketQuote};
#[doc(inline)]
pub use smile::{FxSmile, SmileConstructor, SmilePoint};
#[doc(inline)]
pub use surface::{FxVolSurface, SurfaceBuilder};
#[doc(inline)]
pub use types::{OptionType, Strike, Tenor, Vol};

/// Covered-interest-parity forward; alias of [`forward_from_rates`].
pub use forward::forward_from_rates as forward;
