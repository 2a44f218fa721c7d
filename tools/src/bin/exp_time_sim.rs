//! exp-time-sim: Monte Carlo mean time until a hot wallet of capacity μ
//! first runs dry, swept over an inclusive μ range.
//!
//! Usage:
//!   exp-time-sim 80.0 78.0 0.001 [1000 5 500] [--seed N] [--json]

use anyhow::Result;
use custody_core::{
    config::{HourlyRates, MuRange, RunConfig},
    sweep,
};
use custody_tools::{as_count, as_threshold, print_domain_error, print_json_rows, print_usage, Invocation};

const USAGE: &str = "Usage: exp-time-sim mean_d mean_w mean_t_h [iterations mu_low mu_high]   e.g. exp-time-sim 80.0 78.0 0.001 1000 5 500";

fn main() -> Result<()> {
    env_logger::init();

    let inv = Invocation::from_env();
    let Some(v) = inv.shaped::<f64>(3, &[1000.0, 5.0, 500.0]) else {
        print_usage(USAGE);
        return Ok(());
    };
    let (Some(iterations), Some(mu_low), Some(mu_high)) =
        (as_count(v[3]), as_threshold(v[4]), as_threshold(v[5]))
    else {
        print_usage(USAGE);
        return Ok(());
    };

    let rates = HourlyRates::new(v[0], v[1], v[2]);
    let seed = inv.seed_or_clock();
    log::info!("exp-time-sim seed={seed}");

    let rows = match sweep::simulate_depletion(
        rates,
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

    println!("\n mu  time");
    println!("----------------");
    for row in &rows {
        println!("{}  {:5.1}", row.threshold, row.mean_elapsed_hours);
    }
    Ok(())
}
