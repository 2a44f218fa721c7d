//! The Monte Carlo engine — runs independent wallet trials and folds
//! their terminal state into run-level means.
//!
//! TRIAL LOOP (fixed, same for both modes):
//!   1. Pick the most imminent of the three pending event times.
//!   2. Move the clock there and re-arm only the process that fired.
//!   3. Apply the transition to the wallet (plus refill in balance mode).
//!   4. Stop on the mode's terminal condition.
//!
//! RULES:
//!   - Every trial owns its wallet, its clock and its random stream.
//!   - Trial i always draws from stream i of the run's RngBank, so the
//!     summary is identical whether trials run sequentially or on rayon.
//!   - Outcomes are folded in trial order, FOLD_CHUNK trials at a time,
//!     so memory stays flat however many iterations are requested.

use crate::{
    clock::EventClock,
    config::{ModelParameters, RunConfig},
    error::{SimError, SimResult},
    rng::{RngBank, StreamRng},
    types::{seconds_to_hours, Balance, SimSeconds, Threshold},
    wallet::{WalletCounters, WalletState},
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Trials buffered between folds.
pub const FOLD_CHUNK: u64 = 4096;

/// Terminal condition of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SimMode {
    /// Two-tier wallet with refills, run until the time horizon.
    /// Events scheduled after the horizon are not applied.
    Balance { horizon: SimSeconds },
    /// Hot tier only, run until it first hits zero.
    Depletion,
}

impl SimMode {
    fn validate(&self) -> SimResult<()> {
        match self {
            Self::Balance { horizon } if !(horizon.is_finite() && *horizon > 0.0) => {
                Err(SimError::InvalidRunConfig {
                    reason: format!("horizon must be positive, got {horizon}"),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Terminal state of one trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub trial:   u64,
    /// Time of the last applied event, in seconds.
    pub elapsed: SimSeconds,
    pub events:  u64,
    pub wallet:  WalletState,
}

/// Per-trial means over a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub threshold:                 Threshold,
    pub iterations:                u64,
    pub mean_elapsed_hours:        f64,
    pub mean_net_balance:          f64,
    pub mean_hot_balance:          f64,
    pub mean_cold_balance:         f64,
    pub mean_hot_cold_transfers:   f64,
    pub mean_cold_hot_transfers:   f64,
    pub mean_hot_thefts:           f64,
    pub mean_cold_thefts:          f64,
    pub mean_underfunded_refills:  f64,
    pub total_underfunded_refills: u64,
    pub mean_events:               f64,
}

#[derive(Debug, Default)]
struct Totals {
    elapsed:  f64,
    net:      Balance,
    hot:      Balance,
    cold:     Balance,
    events:   u64,
    counters: WalletCounters,
}

impl Totals {
    fn fold(&mut self, outcome: &TrialOutcome) {
        let w = &outcome.wallet;
        self.elapsed += outcome.elapsed;
        self.net += w.net_balance();
        self.hot += w.hot;
        self.cold += w.cold;
        self.events += outcome.events;
        self.counters.hot_cold_transfers += w.counters.hot_cold_transfers;
        self.counters.cold_hot_transfers += w.counters.cold_hot_transfers;
        self.counters.hot_thefts += w.counters.hot_thefts;
        self.counters.cold_thefts += w.counters.cold_thefts;
        self.counters.underfunded_refills += w.counters.underfunded_refills;
    }

    fn into_summary(self, threshold: Threshold, n: u64) -> RunSummary {
        let mean = |x: f64| x / n as f64;
        RunSummary {
            threshold,
            iterations:                n,
            mean_elapsed_hours:        seconds_to_hours(mean(self.elapsed)),
            mean_net_balance:          mean(self.net as f64),
            mean_hot_balance:          mean(self.hot as f64),
            mean_cold_balance:         mean(self.cold as f64),
            mean_hot_cold_transfers:   mean(self.counters.hot_cold_transfers as f64),
            mean_cold_hot_transfers:   mean(self.counters.cold_hot_transfers as f64),
            mean_hot_thefts:           mean(self.counters.hot_thefts as f64),
            mean_cold_thefts:          mean(self.counters.cold_thefts as f64),
            mean_underfunded_refills:  mean(self.counters.underfunded_refills as f64),
            total_underfunded_refills: self.counters.underfunded_refills,
            mean_events:               mean(self.events as f64),
        }
    }
}

pub struct MonteCarloEngine {
    pub params: ModelParameters,
    pub mode:   SimMode,
    pub run:    RunConfig,
    bank:       RngBank,
}

impl MonteCarloEngine {
    pub fn new(params: ModelParameters, mode: SimMode, run: RunConfig) -> SimResult<Self> {
        params.validate()?;
        mode.validate()?;
        run.validate()?;
        Ok(Self {
            params,
            mode,
            run,
            bank: RngBank::new(run.seed),
        })
    }

    /// Use an explicit bank instead of one seeded from `run.seed`.
    pub fn with_bank(mut self, bank: RngBank) -> Self {
        self.bank = bank;
        self
    }

    /// Run a single trial on its own stream.
    pub fn run_trial(&self, trial: u64) -> SimResult<TrialOutcome> {
        let mut rng = self.bank.for_trial(trial);
        simulate_trial(&self.params, self.mode, trial, &mut rng)
    }

    /// Run every trial in trial-index order.
    pub fn run_outcomes(&self) -> SimResult<Vec<TrialOutcome>> {
        self.run_range(0..self.run.iterations)
    }

    /// Run the trials with indices in `trials`, returned in index order.
    pub fn run_range(&self, trials: Range<u64>) -> SimResult<Vec<TrialOutcome>> {
        let (start, end) = (trials.start as usize, trials.end as usize);
        if self.run.parallel {
            (start..end).into_par_iter().map(|i| self.run_trial(i as u64)).collect()
        } else {
            (start..end).map(|i| self.run_trial(i as u64)).collect()
        }
    }

    pub fn run(&self) -> SimResult<RunSummary> {
        log::debug!(
            "mu={} mode={:?} iterations={} seed={:#x}",
            self.params.threshold,
            self.mode,
            self.run.iterations,
            self.bank.master_seed()
        );
        let n = self.run.iterations;
        let mut totals = Totals::default();
        let mut start = 0;
        while start < n {
            let end = n.min(start + FOLD_CHUNK);
            for outcome in &self.run_range(start..end)? {
                totals.fold(outcome);
            }
            start = end;
        }
        let summary = totals.into_summary(self.params.threshold, n);
        if summary.total_underfunded_refills > 0 {
            log::warn!(
                "mu={}: {} refills found the cold tier short of mu",
                summary.threshold,
                summary.total_underfunded_refills
            );
        }
        Ok(summary)
    }
}

/// Drive one wallet from a full hot tier to the mode's terminal condition.
pub fn simulate_trial(
    params: &ModelParameters,
    mode: SimMode,
    trial: u64,
    rng: &mut StreamRng,
) -> SimResult<TrialOutcome> {
    let mut clock = EventClock::start(params, rng)?;
    let mut events = 0u64;

    let wallet = match mode {
        SimMode::Balance { horizon } => {
            let mut wallet = WalletState::two_tier(params.threshold);
            while clock.peek().1 <= horizon {
                let event = clock.advance(rng)?;
                wallet.step(event, params.cold_theft_probability, rng);
                events += 1;
            }
            wallet
        }
        SimMode::Depletion => {
            let mut wallet = WalletState::hot_only(params.threshold);
            while !wallet.is_hot_empty() {
                let event = clock.advance(rng)?;
                wallet.apply(event);
                events += 1;
            }
            wallet
        }
    };

    Ok(TrialOutcome {
        trial,
        elapsed: clock.now,
        events,
        wallet,
    })
}
