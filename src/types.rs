//! Core domain types for FX smile construction and pricing.
//!
//! # Newtype Strategy
//!
//! **Outputs use newtypes**: [`Vol`] and [`Strike`] wrap values returned from
//! smile queries so callers can't mix a volatility with a strike.
//!
//! **Inputs use bare `f64`**: `vol_at_delta(delta: f64)` and friends accept
//! raw floats. Parameter names already say what is being passed.
//!
//! FX market convention quotes volatility in percent, and so does [`Vol`]:
//! `Vol(8.0)` is 8% annualized volatility.
//!
//! # Why no `Eq` or `Ord`?
//! These types wrap `f64`, which does not implement `Eq` or `Ord` because `NaN`
//! breaks total ordering. We derive `PartialEq` and `PartialOrd` only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::conventions::DAYS_PER_YEAR;
use crate::error::FxVolError;

/// Strike `K` of an FX option, quote currency per unit of base currency.
///
/// # Examples
/// ```
/// use fxvol::types::Strike;
/// let strike = Strike(1.0850);
/// assert_eq!(strike.0, 1.0850);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Strike(pub f64);

/// Implied volatility in percent.
///
/// # Examples
/// ```
/// use fxvol::types::Vol;
/// let vol = Vol(8.0); // 8% annualized
/// assert_eq!(vol.as_decimal(), 0.08);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vol(pub f64);

impl Vol {
    /// The volatility as a decimal fraction (8% → 0.08).
    pub fn as_decimal(self) -> f64 {
        self.0 / 100.0
    }
}

/// Option type: call or put on the base currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to buy base currency at the strike.
    Call,
    /// Right to sell base currency at the strike.
    Put,
}

/// Standard FX option tenors with their fixed day counts.
///
/// Year fractions are `days / 365`.
///
/// # Examples
/// ```
/// use fxvol::types::Tenor;
///
/// let t: Tenor = "1M".parse().unwrap();
/// assert_eq!(t.days(), 30);
/// assert!((t.years() - 30.0 / 365.0).abs() < 1e-15);
/// assert_eq!(Tenor::TwoYears.to_string(), "2Y");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tenor {
    #[serde(rename = "ON")]
    Overnight,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "2W")]
    TwoWeeks,
    #[serde(rename = "3W")]
    ThreeWeeks,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "2M")]
    TwoMonths,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "4M")]
    FourMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "9M")]
    NineMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "2Y")]
    TwoYears,
}

impl Tenor {
    /// Every tenor, shortest first.
    pub const ALL: [Tenor; 12] = [
        Tenor::Overnight,
        Tenor::OneWeek,
        Tenor::TwoWeeks,
        Tenor::ThreeWeeks,
        Tenor::OneMonth,
        Tenor::TwoMonths,
        Tenor::ThreeMonths,
        Tenor::FourMonths,
        Tenor::SixMonths,
        Tenor::NineMonths,
        Tenor::OneYear,
        Tenor::TwoYears,
    ];

    /// Calendar days to expiry.
    pub fn days(self) -> u32 {
        match self {
            Tenor::Overnight => 1,
            Tenor::OneWeek => 7,
            Tenor::TwoWeeks => 14,
            Tenor::ThreeWeeks => 21,
            Tenor::OneMonth => 30,
            Tenor::TwoMonths => 60,
            Tenor::ThreeMonths => 90,
            Tenor::FourMonths => 120,
            Tenor::SixMonths => 180,
            Tenor::NineMonths => 270,
            Tenor::OneYear => 365,
            Tenor::TwoYears => 730,
        }
    }

    /// Year fraction, `days / 365`.
    pub fn years(self) -> f64 {
        f64::from(self.days()) / DAYS_PER_YEAR
    }

    /// Market label (`"ON"`, `"1W"`, ..., `"2Y"`).
    pub fn label(self) -> &'static str {
        match self {
            Tenor::Overnight => "ON",
            Tenor::OneWeek => "1W",
            Tenor::TwoWeeks => "2W",
            Tenor::ThreeWeeks => "3W",
            Tenor::OneMonth => "1M",
            Tenor::TwoMonths => "2M",
            Tenor::ThreeMonths => "3M",
            Tenor::FourMonths => "4M",
            Tenor::SixMonths => "6M",
            Tenor::NineMonths => "9M",
            Tenor::OneYear => "1Y",
            Tenor::TwoYears => "2Y",
        }
    }

    /// The tenor with exactly this day count, if it is in the table.
    pub fn from_days(days: u32) -> Option<Tenor> {
        Tenor::ALL.into_iter().find(|t| t.days() == days)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tenor {
    type Err = FxVolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        let tenor = match label.as_str() {
            "ON" | "O/N" => Tenor::Overnight,
            "1W" => Tenor::OneWeek,
            "2W" => Tenor::TwoWeeks,
            "3W" => Tenor::ThreeWeeks,
            "1M" => Tenor::OneMonth,
            "2M" => Tenor::TwoMonths,
            "3M" => Tenor::ThreeMonths,
            "4M" => Tenor::FourMonths,
            "6M" => Tenor::SixMonths,
            "9M" => Tenor::NineMonths,
            "1Y" | "12M" => Tenor::OneYear,
            "2Y" | "24M" => Tenor::TwoYears,
            _ => {
                return Err(FxVolError::InvalidInput {
                    field: "tenor",
                    message: format!("unknown tenor label {s:?}"),
                });
            }
        };
        Ok(tenor)
    }
}
