//! exp-balance-sim: Monte Carlo mean net balance of a hot/cold wallet
//! after a fixed timespan, with transfer and theft diagnostics per μ.
//!
//! Usage:
//!   exp-balance-sim 79.0 78.0 0.01 0.01 [20000 1000 100 130] [--seed N] [--json]

use anyhow::Result;
use custody_core::{
    config::{HourlyRates, MuRange, RunConfig},
    engine::RunSummary,
    sweep,
};
use custody_tools::{as_count, as_threshold, print_domain_error, print_json_rows, print_usage, Invocation};

const USAGE: &str = "Usage: exp-balance-sim mean_d mean_w mean_t_h p_t_c [timespan_hours iterations mu_low mu_high]   e.g. exp-balance-sim 79.0 78.0 0.01 0.01 20000 1000 100 130";

fn main() -> Result<()> {
    env_logger::init();

    let inv = Invocation::from_env();
    let Some(v) = inv.shaped::<f64>(4, &[20000.0, 1000.0, 100.0, 130.0]) else {
        print_usage(USAGE);
        return Ok(());
    };
    let (Some(iterations), Some(mu_low), Some(mu_high)) =
        (as_count(v[5]), as_threshold(v[6]), as_threshold(v[7]))
    else {
        print_usage(USAGE);
        return Ok(());
    };

    let rates = HourlyRates::new(v[0], v[1], v[2]);
    let (p_cold_theft, timespan_hours) = (v[3], v[4]);
    let seed = inv.seed_or_clock();
    log::info!("exp-balance-sim seed={seed}");

    let rows = match sweep::simulate_balance(
        rates,
        p_cold_theft,
        timespan_hours,
        MuRange::inclusive(mu_low, mu_high),
        RunConfig::new(iterations, seed),
    ) {
        Ok(rows) => rows,
        Err(e) => {
            print_domain_error(&e);
            return Ok(());
        }
    };

    if inv.json {
        return print_json_rows(&rows);
    }

    println!("\nmD: {}", rates.deposit);
    println!("mu  exp_bal");
    for row in &rows {
        print_summary(row);
    }
    Ok(())
}

fn print_summary(row: &RunSummary) {
    println!("{}  {}", row.threshold, row.mean_net_balance);
    println!("Avg h->c transfers: {}", row.mean_hot_cold_transfers);
    println!("Avg c->h transfers: {}", row.mean_cold_hot_transfers);
    println!("Avg h. w. thefts: {}", row.mean_hot_thefts);
    println!("Avg c. w. thefts: {}", row.mean_cold_thefts);
    println!("Avg h. w. balance: {}", row.mean_hot_balance);
    println!("Avg c. w. balance: {}", row.mean_cold_balance);
    println!("Avg underfunded refills: {}", row.mean_underfunded_refills);
    println!();
}
