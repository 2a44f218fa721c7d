//! exp-balance-theory: closed-form expected balance per μ, composed from
//! the expected depletion time and the calibrated loss factor γ.

use anyhow::Result;
use custody_core::{
    config::{HourlyRates, MuRange},
    sweep,
};
use custody_tools::{as_threshold, print_domain_error, print_json_rows, print_usage, Invocation};

const USAGE: &str = "Usage: exp-balance-theory mean_d mean_w mean_t_h p_t_c [mu_low mu_high]   e.g. exp-balance-theory 80.0 78.0 0.01 0.01 100 130";

fn main() -> Result<()> {
    env_logger::init();

    let inv = Invocation::from_env();
    let Some(v) = inv.shaped::<f64>(4, &[100.0, 130.0]) else {
        print_usage(USAGE);
        return Ok(());
    };
    let (Some(mu_low), Some(mu_high)) = (as_threshold(v[4]), as_threshold(v[5])) else {
        print_usage(USAGE);
        return Ok(());
    };

    let rates = HourlyRates::new(v[0], v[1], v[2]);
    let rows = match sweep::theory_balance(rates, v[3], MuRange::exclusive(mu_low, mu_high, 1)) {
        Ok(rows) => rows,
        Err(e) => {
            print_domain_error(&e);
            return Ok(());
        }
    };

    if inv.json {
        return print_json_rows(&rows);
    }

    println!("\n mu    bal");
    println!("------------------");
    for row in &rows {
        println!("{:3}   {:4.4}", row.mu, row.expected_balance);
    }
    Ok(())
}
