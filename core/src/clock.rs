//! Simulation clock — exponential inter-event sampling and the three
//! pending event times of a trial.

use crate::{
    config::ModelParameters,
    error::{SimError, SimResult},
    event::{next_event, WalletEvent},
    rng::StreamRng,
    types::SimSeconds,
};
use serde::{Deserialize, Serialize};

/// Draw an exponential waiting time `-ln(u) / rate`.
///
/// Fails on a rate that is zero, negative or not finite.
pub fn sample_exponential(rate: f64, rng: &mut StreamRng) -> SimResult<SimSeconds> {
    if !(rate.is_finite() && rate > 0.0) {
        return Err(SimError::InvalidRate { name: "exponential", value: rate });
    }
    Ok(-rng.next_f64_open().ln() / rate)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventClock {
    pub now:          SimSeconds,
    pub t_deposit:    SimSeconds,
    pub t_withdrawal: SimSeconds,
    pub t_theft:      SimSeconds,
    rates:            [f64; 3],
}

impl EventClock {
    /// Start a clock at time zero with all three processes armed.
    pub fn start(params: &ModelParameters, rng: &mut StreamRng) -> SimResult<Self> {
        let rates = [params.deposit_rate, params.withdrawal_rate, params.hot_theft_rate];
        Ok(Self {
            now:          0.0,
            t_deposit:    sample_exponential(rates[0], rng)?,
            t_withdrawal: sample_exponential(rates[1], rng)?,
            t_theft:      sample_exponential(rates[2], rng)?,
            rates,
        })
    }

    /// The next event to fire and its absolute time, without advancing.
    pub fn peek(&self) -> (WalletEvent, SimSeconds) {
        let event = next_event(self.t_deposit, self.t_withdrawal, self.t_theft);
        (event, self.pending(event))
    }

    pub fn pending(&self, event: WalletEvent) -> SimSeconds {
        match event {
            WalletEvent::Deposit    => self.t_deposit,
            WalletEvent::Withdrawal => self.t_withdrawal,
            WalletEvent::Theft      => self.t_theft,
        }
    }

    /// Move the clock to the next event and re-arm only that process.
    /// The other two pending times are left untouched.
    pub fn advance(&mut self, rng: &mut StreamRng) -> SimResult<WalletEvent> {
        let (event, at) = self.peek();
        self.now = at;
        match event {
            WalletEvent::Deposit    => self.t_deposit += sample_exponential(self.rates[0], rng)?,
            WalletEvent::Withdrawal => self.t_withdrawal += sample_exponential(self.rates[1], rng)?,
            WalletEvent::Theft      => self.t_theft += sample_exponential(self.rates[2], rng)?,
        }
        Ok(event)
    }
}
