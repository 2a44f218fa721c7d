//! μ sweeps — thin orchestration over the engine and the solver.
//! One call into the core per μ; no state carried between points.

use crate::{
    config::{horizon_from_hours, HourlyRates, ModelParameters, MuRange, RunConfig},
    engine::{MonteCarloEngine, RunSummary, SimMode},
    error::SimResult,
    rng::RngBank,
    solver::RecurrenceModel,
    types::Threshold,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRow {
    pub mu:                  Threshold,
    pub expected_time_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub mu:               Threshold,
    pub expected_balance: f64,
}

/// Monte Carlo depletion time per μ. Each μ draws from its own
/// family of trial streams, so one point can be rerun in isolation.
pub fn simulate_depletion(
    rates: HourlyRates,
    range: MuRange,
    run: RunConfig,
) -> SimResult<Vec<RunSummary>> {
    simulate_sweep(rates, 0.0, SimMode::Depletion, range, run)
}

/// Monte Carlo terminal balance per μ over a fixed horizon in hours.
pub fn simulate_balance(
    rates: HourlyRates,
    cold_theft_probability: f64,
    timespan_hours: f64,
    range: MuRange,
    run: RunConfig,
) -> SimResult<Vec<RunSummary>> {
    let mode = SimMode::Balance { horizon: horizon_from_hours(timespan_hours)? };
    simulate_sweep(rates, cold_theft_probability, mode, range, run)
}

fn simulate_sweep(
    rates: HourlyRates,
    cold_theft_probability: f64,
    mode: SimMode,
    range: MuRange,
    run: RunConfig,
) -> SimResult<Vec<RunSummary>> {
    rates.validate()?;
    range.validate()?;
    let root_bank = RngBank::new(run.seed);
    log::info!("sweep mode={mode:?} mu={range:?} iterations={} seed={:#x}", run.iterations, run.seed);

    range
        .values()
        .into_iter()
        .map(|mu| -> SimResult<RunSummary> {
            let params = ModelParameters::from_hourly(
                rates.deposit,
                rates.withdrawal,
                rates.hot_theft,
                cold_theft_probability,
                mu,
            )?;
            let started = Instant::now();
            let engine = MonteCarloEngine::new(params, mode, run)?
                .with_bank(root_bank.for_sweep_point(u64::from(mu)));
            let summary = engine.run()?;
            log::debug!(
                "mu={mu} done in {:.3}s: net={:.2} time={:.2}h",
                started.elapsed().as_secs_f64(),
                summary.mean_net_balance,
                summary.mean_elapsed_hours
            );
            Ok(summary)
        })
        .collect()
}

/// Closed-form expected depletion time per μ, in hours.
pub fn theory_time(rates: HourlyRates, range: MuRange) -> SimResult<Vec<TimeRow>> {
    range.validate()?;
    let model = RecurrenceModel::new(rates.deposit, rates.withdrawal, rates.hot_theft)?;
    range
        .values()
        .into_iter()
        .map(|mu| -> SimResult<TimeRow> {
            Ok(TimeRow {
                mu,
                expected_time_hours: model.expected_time(mu)?,
            })
        })
        .collect()
}

/// Closed-form expected balance per μ.
pub fn theory_balance(
    rates: HourlyRates,
    cold_theft_probability: f64,
    range: MuRange,
) -> SimResult<Vec<BalanceRow>> {
    range.validate()?;
    let model = RecurrenceModel::new(rates.deposit, rates.withdrawal, rates.hot_theft)?;
    range
        .values()
        .into_iter()
        .map(|mu| -> SimResult<BalanceRow> {
            Ok(BalanceRow {
                mu,
                expected_balance: model.expected_balance(mu, cold_theft_probability)?,
            })
        })
        .collect()
}
