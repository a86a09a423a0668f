//! Assemble a multi-tenor EURUSD surface and price off it.
//!
//! Demonstrates:
//!   1. Feeding per-tenor quotes into `SurfaceBuilder`
//!   2. ATM term structure and the emitted delta grid
//!   3. Vol at arbitrary expiry (total-variance interpolation)
//!   4. Pricing a vanilla with vol read from the smile
//!
//! Run with: `cargo run --example fx_surface`

use fxvol::quote::{DeltaBucket, MarketQuote};
use fxvol::surface::SurfaceBuilder;
use fxvol::types::{OptionType, Tenor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ---------------------------------------------------------------
    // 1. Market data: (tenor, ATM, 25D RR, 25D BF, 10D RR, 10D BF)
    // ---------------------------------------------------------------

    let rows = [
        (Tenor::OneWeek, 6.90, -0.20, 0.12, -0.45, 0.40),
        (Tenor::OneMonth, 7.60, -0.30, 0.16, -0.65, 0.55),
        (Tenor::ThreeMonths, 8.10, -0.45, 0.22, -0.95, 0.78),
        (Tenor::SixMonths, 8.40, -0.55, 0.25, -1.15, 0.90),
        (Tenor::OneYear, 8.75, -0.65, 0.28, -1.35, 1.02),
    ];

    let surface = SurfaceBuilder::new()
        .pair("EURUSD")
        .spot(1.0850)
        .buckets(&[DeltaBucket::D10, DeltaBucket::D25])
        .add_quotes(rows.map(|(tenor, atm, rr25, bf25, rr10, bf10)| {
            MarketQuote::new("EURUSD", 1.0850, tenor, 5.0, 3.5, atm)
                .with_risk_reversal(DeltaBucket::D25, rr25)
                .with_butterfly(DeltaBucket::D25, bf25)
                .with_risk_reversal(DeltaBucket::D10, rr10)
                .with_butterfly(DeltaBucket::D10, bf10)
        }))
        .build()?;

    println!("Surface built: {} tenors\n", surface.tenors().len());

    // ---------------------------------------------------------------
    // 2. Term structure and grid
    // ---------------------------------------------------------------

    println!("--- ATM term structure ---\n");
    for (t, vol) in surface.atm_term_structure() {
        println!("  T={t:.4}  {:.2}%", vol.0);
    }

    let deltas = [10, 25, 50, 75, 90];
    println!("\n--- Delta grid ---\n");
    print!("  {:>5}", "days");
    for d in deltas {
        print!("  {d:>6}");
    }
    println!();
    for row in surface.grid(&deltas) {
        print!("  {:>5}", row.tenor_days);
        for v in &row.vols {
            match v {
                Some(v) => print!("  {v:>6.3}"),
                None => print!("  {:>6}", "-"),
            }
        }
        println!();
    }

    // ---------------------------------------------------------------
    // 3. Arbitrary expiry
    // ---------------------------------------------------------------

    println!("\n--- Interpolated vols ---\n");
    for expiry in [0.01, 0.15, 0.35, 0.75, 1.5] {
        let put = surface.vol(expiry, 25.0)?;
        let atm = surface.vol(expiry, 50.0)?;
        let call = surface.vol(expiry, 75.0)?;
        println!(
            "  T={expiry:<5} 25P {:.3}%  ATM {:.3}%  25C {:.3}%",
            put.0, atm.0, call.0
        );
    }

    // ---------------------------------------------------------------
    // 4. Price off the 3M smile
    // ---------------------------------------------------------------

    let strike = 1.0700;
    let r = surface.price(Tenor::ThreeMonths, strike, OptionType::Put, 5_000_000.0)?;
    println!("\n--- EURUSD 3M put K={strike} on 5mm ---\n");
    println!("  premium   {:.2} USD ({:.4}%)", r.premium, r.premium_percent);
    println!("  delta     {:.4}", r.delta);
    println!("  vega      {:.2} per vol point", r.vega_notional);

    Ok(())
}
