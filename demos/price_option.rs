//! Price a one-month EURUSD vanilla with Garman-Kohlhagen.
//!
//! Demonstrates:
//!   1. Building an `OptionSpec` from percent-quoted market data
//!   2. Reading premium and Greeks per unit and scaled by notional
//!   3. Switching vega/theta reporting units
//!   4. Put-call parity on the forward
//!
//! Run with: `cargo run --example price_option`

use fxvol::conventions::{ThetaUnit, VegaUnit};
use fxvol::pricing::{OptionSpec, price};
use fxvol::types::OptionType;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ---------------------------------------------------------------
    // 1. Market: EURUSD 1M, spot-struck call, 1mm EUR notional
    // ---------------------------------------------------------------

    let call = OptionSpec {
        spot: 1.0850,
        strike: 1.0850,
        tenor_years: 30.0 / 365.0,
        domestic_rate: 5.0, // USD deposit, percent
        foreign_rate: 3.5,  // EUR deposit, percent
        volatility: 8.0,
        option_type: OptionType::Call,
        notional: 1_000_000.0,
    };

    let r = price(&call)?;

    // ---------------------------------------------------------------
    // 2. Premium and Greeks
    // ---------------------------------------------------------------

    println!("--- EURUSD 1M {:?} K={:.4} ---\n", call.option_type, call.strike);
    println!("  forward          {:>14.6}", r.forward);
    println!("  discount factor  {:>14.6}", r.discount_factor);
    println!("  premium          {:>13.4}%", r.premium_percent);
    println!("  premium (USD)    {:>14.2}", r.premium);
    println!("  delta            {:>14.4}   hedge {:>12.0} EUR", r.delta, r.hedge_amount());
    println!("  gamma            {:>14.4}", r.gamma);
    println!("  vega / vol pt    {:>14.2}", r.vega_notional);
    println!("  theta / day      {:>14.2}", r.theta_notional);
    println!("  rho / 1%         {:>14.2}", r.rho_notional);

    // ---------------------------------------------------------------
    // 3. Unit conventions
    // ---------------------------------------------------------------

    println!("\n--- Unit conventions (per unit notional) ---\n");
    println!("  vega per unit vol  {:>10.6}", r.vega_in(VegaUnit::PerUnitVol));
    println!("  vega per vol point {:>10.6}", r.vega_in(VegaUnit::PerVolPoint));
    println!("  theta per year     {:>10.6}", r.theta_in(ThetaUnit::PerYear));
    println!("  theta per day      {:>10.6}", r.theta_in(ThetaUnit::PerDay));

    // ---------------------------------------------------------------
    // 4. Put-call parity: C − P = D·(F − K)
    // ---------------------------------------------------------------

    let put = price(&call.with_option_type(OptionType::Put))?;
    let lhs = r.unit_premium - put.unit_premium;
    let rhs = r.discount_factor * (r.forward - call.strike);
    println!("\n--- Put-call parity ---\n");
    println!("  C - P     {lhs:.10}");
    println!("  D(F - K)  {rhs:.10}");

    Ok(())
}
