//! Wallet state machine — hot and cold balances plus transition counters.
//!
//! RULE: A WalletState is owned by exactly one trial loop and is
//! only mutated through the transitions below.

use crate::{
    event::WalletEvent,
    rng::StreamRng,
    types::{Balance, Threshold},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletCounters {
    pub hot_cold_transfers:  u64,
    pub cold_hot_transfers:  u64,
    pub hot_thefts:          u64,
    pub cold_thefts:         u64,
    /// Refills where the cold tier held less than μ and was drained to zero.
    pub underfunded_refills: u64,
}

/// What happened during a single refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefillOutcome {
    pub underfunded: bool,
    pub cold_theft:  bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    pub threshold: Threshold,
    pub hot:       Balance,
    pub cold:      Balance,
    pub counters:  WalletCounters,
    cold_tier:     bool,
}

impl WalletState {
    /// Full hot tier, empty cold tier. Overflow deposits spill to cold
    /// and an empty hot tier is refilled from it.
    pub fn two_tier(threshold: Threshold) -> Self {
        Self {
            threshold,
            hot:       Balance::from(threshold),
            cold:      0,
            counters:  WalletCounters::default(),
            cold_tier: true,
        }
    }

    /// Full hot tier with nothing behind it. Deposits above μ are dropped.
    pub fn hot_only(threshold: Threshold) -> Self {
        Self {
            cold_tier: false,
            ..Self::two_tier(threshold)
        }
    }

    pub fn has_cold_tier(&self) -> bool {
        self.cold_tier
    }

    fn capacity(&self) -> Balance {
        Balance::from(self.threshold)
    }

    pub fn is_hot_empty(&self) -> bool {
        self.hot <= 0
    }

    /// Final funds minus the μ the wallet started with.
    pub fn net_balance(&self) -> Balance {
        self.hot + self.cold - self.capacity()
    }

    pub fn deposit(&mut self) {
        if self.hot < self.capacity() {
            self.hot += 1;
        } else if self.cold_tier {
            self.cold += 1;
            self.counters.hot_cold_transfers += 1;
        }
    }

    pub fn withdraw(&mut self) {
        self.hot -= 1;
    }

    pub fn hot_theft(&mut self) {
        self.hot = 0;
        self.counters.hot_thefts += 1;
    }

    pub fn apply(&mut self, event: WalletEvent) {
        match event {
            WalletEvent::Deposit    => self.deposit(),
            WalletEvent::Withdrawal => self.withdraw(),
            WalletEvent::Theft      => self.hot_theft(),
        }
    }

    /// Top the hot tier back up to μ from cold, then roll for a cold theft.
    /// A cold tier short of μ is drained to zero and the refill is
    /// counted as underfunded.
    pub fn refill(&mut self, cold_theft_probability: f64, rng: &mut StreamRng) -> RefillOutcome {
        debug_assert!(self.cold_tier, "refill() on a hot-only wallet");
        let mu = self.capacity();
        let underfunded = self.cold < mu;
        if underfunded {
            self.counters.underfunded_refills += 1;
        }
        self.cold = (self.cold - mu).max(0);
        self.hot = mu;
        self.counters.cold_hot_transfers += 1;

        let cold_theft = rng.at_or_below(cold_theft_probability);
        if cold_theft {
            self.cold = 0;
            self.counters.cold_thefts += 1;
        }
        RefillOutcome { underfunded, cold_theft }
    }

    /// Apply an event and, on a two-tier wallet, refill if the hot tier ran dry.
    pub fn step(
        &mut self,
        event: WalletEvent,
        cold_theft_probability: f64,
        rng: &mut StreamRng,
    ) -> Option<RefillOutcome> {
        self.apply(event);
        if self.cold_tier && self.is_hot_empty() {
            Some(self.refill(cold_theft_probability, rng))
        } else {
            None
        }
    }
}
