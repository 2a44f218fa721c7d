//! Run configuration — model parameters, trial counts and μ sweeps.
//!
//! Every struct here can be deserialized from JSON, so callers
//! must run `validate()` (the engine does) before trusting the values.

use crate::{
    error::{SimError, SimResult},
    types::{per_hour_to_per_second, SimSeconds, Threshold, SECONDS_PER_HOUR},
};
use serde::{Deserialize, Serialize};

/// Rates as a user types them: events per hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyRates {
    pub deposit:    f64,
    pub withdrawal: f64,
    pub hot_theft:  f64,
}

impl HourlyRates {
    pub fn new(deposit: f64, withdrawal: f64, hot_theft: f64) -> Self {
        Self { deposit, withdrawal, hot_theft }
    }

    pub fn validate(&self) -> SimResult<()> {
        check_rate("deposit_rate", self.deposit)?;
        check_rate("withdrawal_rate", self.withdrawal)?;
        check_rate("hot_theft_rate", self.hot_theft)
    }
}

/// Rates of the three Poisson processes plus the per-refill cold theft
/// probability and the hot-tier capacity μ. Rates share one time unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub deposit_rate:           f64,
    pub withdrawal_rate:        f64,
    pub hot_theft_rate:         f64,
    #[serde(default)]
    pub cold_theft_probability: f64,
    pub threshold:              Threshold,
}

impl ModelParameters {
    pub fn new(
        deposit_rate: f64,
        withdrawal_rate: f64,
        hot_theft_rate: f64,
        cold_theft_probability: f64,
        threshold: Threshold,
    ) -> SimResult<Self> {
        let params = Self {
            deposit_rate,
            withdrawal_rate,
            hot_theft_rate,
            cold_theft_probability,
            threshold,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build from events-per-hour rates; the result is per second,
    /// which is what the event-driven clock runs in.
    pub fn from_hourly(
        deposits_per_hour: f64,
        withdrawals_per_hour: f64,
        thefts_per_hour: f64,
        cold_theft_probability: f64,
        threshold: Threshold,
    ) -> SimResult<Self> {
        Self::new(
            per_hour_to_per_second(deposits_per_hour),
            per_hour_to_per_second(withdrawals_per_hour),
            per_hour_to_per_second(thefts_per_hour),
            cold_theft_probability,
            threshold,
        )
    }

    pub fn with_threshold(self, threshold: Threshold) -> SimResult<Self> {
        Self { threshold, ..self }.validate_into()
    }

    pub fn validate(&self) -> SimResult<()> {
        check_rate("deposit_rate", self.deposit_rate)?;
        check_rate("withdrawal_rate", self.withdrawal_rate)?;
        check_rate("hot_theft_rate", self.hot_theft_rate)?;
        if !(0.0..=1.0).contains(&self.cold_theft_probability) {
            return Err(SimError::InvalidProbability {
                name:  "cold_theft_probability",
                value: self.cold_theft_probability,
            });
        }
        if self.threshold == 0 {
            return Err(SimError::InvalidThreshold);
        }
        Ok(())
    }

    fn validate_into(self) -> SimResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

pub(crate) fn check_rate(name: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidRate { name, value })
    }
}

/// How many trials to run and which seed to derive their streams from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub iterations: u64,
    pub seed:       u64,
    /// Run trials on the rayon pool. Results do not depend on this flag.
    #[serde(default = "default_parallel")]
    pub parallel:   bool,
}

fn default_parallel() -> bool { true }

impl RunConfig {
    pub fn new(iterations: u64, seed: u64) -> Self {
        Self { iterations, seed, parallel: true }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.iterations == 0 {
            return Err(SimError::InvalidRunConfig {
                reason: "iterations must be >= 1".into(),
            });
        }
        Ok(())
    }
}

/// Convert a horizon given in hours into simulation seconds.
pub fn horizon_from_hours(hours: f64) -> SimResult<SimSeconds> {
    if !(hours.is_finite() && hours > 0.0) {
        return Err(SimError::InvalidRunConfig {
            reason: format!("timespan must be a positive number of hours, got {hours}"),
        });
    }
    Ok(hours * SECONDS_PER_HOUR)
}

/// A sweep over μ. The simulators sweep inclusively; the closed-form
/// drivers stop before `high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuRange {
    pub low:       Threshold,
    pub high:      Threshold,
    pub step:      Threshold,
    pub inclusive: bool,
}

impl MuRange {
    pub fn inclusive(low: Threshold, high: Threshold) -> Self {
        Self { low, high, step: 1, inclusive: true }
    }

    pub fn exclusive(low: Threshold, high: Threshold, step: Threshold) -> Self {
        Self { low, high, step, inclusive: false }
    }

    pub fn validate(&self) -> SimResult<()> {
        let empty = if self.inclusive { self.low > self.high } else { self.low >= self.high };
        if self.low == 0 || self.step == 0 || empty {
            return Err(SimError::InvalidMuRange {
                low:  self.low,
                high: self.high,
                step: self.step,
            });
        }
        Ok(())
    }

    pub fn values(&self) -> Vec<Threshold> {
        let step = self.step.max(1) as usize;
        if self.inclusive {
            (self.low..=self.high).step_by(step).collect()
        } else {
            (self.low..self.high).step_by(step).collect()
        }
    }
}
