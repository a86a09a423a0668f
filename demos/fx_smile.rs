//! Build a single-tenor FX smile from ATM, risk-reversal and butterfly quotes.
//!
//! Demonstrates:
//!   1. Quoting a tenor with partial RR/BF coverage
//!   2. Constructing the smile with strikes (forward-ATM and spot-ATM)
//!   3. Inspecting missing buckets instead of silent defaults
//!   4. Interpolating vol in delta and strike space
//!
//! Run with: `cargo run --example fx_smile`

use fxvol::conventions::AtmConvention;
use fxvol::quote::{DeltaBucket, MarketQuote};
use fxvol::smile::SmileConstructor;
use fxvol::types::Tenor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ---------------------------------------------------------------
    // 1. USDJPY 3M: 10D and 25D quoted, 35D butterfly not yet in
    // ---------------------------------------------------------------

    let quote = MarketQuote::new("USDJPY", 151.30, Tenor::ThreeMonths, 0.25, 5.30, 10.5)
        .with_forward_points(-185.0) // JPY pairs quote points in 1/100
        .with_risk_reversal(DeltaBucket::D10, -2.10)
        .with_butterfly(DeltaBucket::D10, 1.05)
        .with_risk_reversal(DeltaBucket::D25, -1.20)
        .with_butterfly(DeltaBucket::D25, 0.35)
        .with_risk_reversal(DeltaBucket::D35, -0.55);

    // ---------------------------------------------------------------
    // 2. Construct
    // ---------------------------------------------------------------

    let constructor = SmileConstructor::new().buckets(&[
        DeltaBucket::D10,
        DeltaBucket::D25,
        DeltaBucket::D35,
    ]);
    let smile = constructor.construct_with_strikes(&quote)?;

    if let Some(reference) = smile.reference() {
        println!(
            "USDJPY 3M  spot {:.3}  forward {:.3}\n",
            reference.spot, reference.forward
        );
    }

    println!("  delta    vol      strike");
    for p in smile.points() {
        let strike = p.strike.map_or("-".to_string(), |k| format!("{k:.3}"));
        println!("  {:>5}  {:>6.3}%  {:>9}", p.delta, p.implied_vol, strike);
    }

    // ---------------------------------------------------------------
    // 3. Missing buckets are reported, not zeroed
    // ---------------------------------------------------------------

    let missing: Vec<String> = smile.missing().iter().map(ToString::to_string).collect();
    println!("\nmissing buckets: [{}]", missing.join(", "));
    if let Err(e) = smile.require_complete() {
        println!("require_complete: {e}");
    }

    // ---------------------------------------------------------------
    // 4. Interpolation
    // ---------------------------------------------------------------

    println!("\n--- Interpolated ---\n");
    for delta in [15.0, 30.0, 60.0, 80.0] {
        let vol = smile.vol_at_delta(delta)?;
        let strike = smile.strike_for_delta(delta)?;
        println!("  {delta:>4}D  vol {:>6.3}%  strike {:>8.3}", vol.0, strike.0);
    }
    let k = 150.0;
    println!("  K={k}  vol {:.3}%", smile.vol_at_strike(k)?.0);

    // ATM struck at spot instead of the forward
    let atms = constructor
        .atm_convention(AtmConvention::Spot)
        .construct_with_strikes(&quote)?;
    if let Some(atm) = atms.point(50) {
        println!("\nATM strike (spot convention): {:?}", atm.strike);
    }

    Ok(())
}
