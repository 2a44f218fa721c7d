//! exp-time-theory: closed-form expected depletion time (hours) for
//! μ = mu_low, mu_low + mu_inc, ... below mu_high.

use anyhow::Result;
use custody_core::{
    config::{HourlyRates, MuRange},
    sweep,
};
use custody_tools::{as_threshold, print_domain_error, print_json_rows, print_usage, Invocation};

const USAGE: &str = "Usage: exp-time-theory mean_d mean_w mean_t_h [mu_low mu_high mu_inc]   e.g. exp-time-theory 79.0 78.0 0.01 10 600 10";

fn main() -> Result<()> {
    env_logger::init();

    let inv = Invocation::from_env();
    let Some(v) = inv.shaped::<f64>(3, &[10.0, 600.0, 10.0]) else {
        print_usage(USAGE);
        return Ok(());
    };
    let (Some(mu_low), Some(mu_high), Some(mu_inc)) =
        (as_threshold(v[3]), as_threshold(v[4]), as_threshold(v[5]))
    else {
        print_usage(USAGE);
        return Ok(());
    };

    let rates = HourlyRates::new(v[0], v[1], v[2]);
    let rows = match sweep::theory_time(rates, MuRange::exclusive(mu_low, mu_high, mu_inc)) {
        Ok(rows) => rows,
        Err(e) => {
            print_domain_error(&e);
            return Ok(());
        }
    };

    if inv.json {
        return print_json_rows(&rows);
    }

    println!("\n mu   exp_time");
    println!("-----------------");
    for row in &rows {
        println!("{:3}   {:4.2}", row.mu, row.expected_time_hours);
    }
    Ok(())
}
