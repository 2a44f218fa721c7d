//! Closed-form expected depletion time.
//!
//! With the hot tier at balance k (1 ≤ k ≤ μ) and rates d, w, t, the
//! expected time T_k to first reach zero satisfies the first-step
//! recurrence
//!
//!   (d + w + t)·T_k = 1 + d·T_{k+1} + w·T_{k-1}     for k < μ
//!   (w + t)·T_μ     = 1 + w·T_{μ-1}                  (deposits at μ dropped)
//!   T_0 = 0
//!
//! whose homogeneous part has characteristic polynomial
//! d·x² − (d+w+t)·x + w. The polynomial is −t at x = 1, so for t > 0
//! the roots straddle one: x1 < 1 < x2. That is what lets
//! `expected_time` factor out x2^(μ−1) and keep every remaining power ≤ 1.
//!
//! Units follow the rates: per-hour rates give hours.

use crate::{
    config::check_rate,
    error::{SimError, SimResult},
    types::Threshold,
};
use serde::{Deserialize, Serialize};

/// Empirically calibrated loss-amplification factor γ of the
/// expected-balance formula.
pub const LOSS_AMPLIFICATION: f64 = 0.84;

/// Allowed gap between x1·x2 and w/d.
pub const ROOT_PRODUCT_TOLERANCE: f64 = 1e-5;

/// Relative gap under which d and w are treated as equal.
const BALANCED_RATE_EPSILON: f64 = 1e-12;

/// Below t = NEGLIGIBLE_THEFT_RATIO·(d + w) the closed form is the
/// difference of two terms of order 1/t and loses its digits.
pub const NEGLIGIBLE_THEFT_RATIO: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceModel {
    pub deposit_rate:    f64,
    pub withdrawal_rate: f64,
    pub theft_rate:      f64,
    pub discriminant:    f64,
    pub x1:              f64,
    pub x2:              f64,
    balanced:            bool,
    negligible_theft:    bool,
}

impl RecurrenceModel {
    pub fn new(deposit_rate: f64, withdrawal_rate: f64, theft_rate: f64) -> SimResult<Self> {
        check_rate("deposit_rate", deposit_rate)?;
        check_rate("withdrawal_rate", withdrawal_rate)?;
        check_rate("hot_theft_rate", theft_rate)?;
        let (d, w, t) = (deposit_rate, withdrawal_rate, theft_rate);

        // (d+w+t)² − 4dw rewritten without the cancelling subtraction.
        let disc_sq = (d - w).powi(2) + 2.0 * t * (d + w) + t * t;
        let discriminant = disc_sq.sqrt();
        if discriminant == 0.0 || !discriminant.is_finite() {
            return Err(SimError::DegenerateRecurrence {
                deposit:    d,
                withdrawal: w,
                theft:      t,
            });
        }

        let s = d + w + t;
        // x1 = (s − Δ)/(2d), taken through x1 = 2w/(s + Δ) to avoid cancellation.
        let x1 = 2.0 * w / (s + discriminant);
        let x2 = (s + discriminant) / (2.0 * d);

        let product = x1 * x2;
        let expected = w / d;
        if !(x1 <= x2) || (product - expected).abs() >= ROOT_PRODUCT_TOLERANCE {
            return Err(SimError::RootProductViolation { product, expected });
        }

        let balanced = (d - w).abs() <= BALANCED_RATE_EPSILON * d.max(w);
        if balanced {
            log::debug!("d == w ({d}); expected times use the direct recurrence solve");
        }
        let negligible_theft = t < NEGLIGIBLE_THEFT_RATIO * (d + w);
        if negligible_theft {
            log::debug!("t={t} is negligible against d+w={}; expected times use the direct recurrence solve", d + w);
        }

        Ok(Self {
            deposit_rate: d,
            withdrawal_rate: w,
            theft_rate: t,
            discriminant,
            x1,
            x2,
            balanced,
            negligible_theft,
        })
    }

    /// True when deposit and withdrawal rates coincide.
    pub fn is_balanced(&self) -> bool {
        self.balanced
    }

    /// True when the theft rate is too small for the closed form to
    /// keep its precision.
    pub fn is_theft_negligible(&self) -> bool {
        self.negligible_theft
    }

    /// True when `expected_time` bypasses the closed form.
    pub fn uses_recurrence(&self) -> bool {
        self.balanced || self.negligible_theft
    }

    pub fn root_product(&self) -> f64 {
        self.x1 * self.x2
    }

    /// Expected time for a full hot tier of capacity μ to first hit zero.
    pub fn expected_time(&self, mu: Threshold) -> SimResult<f64> {
        if mu == 0 {
            return Err(SimError::InvalidThreshold);
        }
        if self.uses_recurrence() {
            return expected_time_by_recurrence(
                self.deposit_rate,
                self.withdrawal_rate,
                self.theft_rate,
                mu,
            );
        }

        let (w, t) = (self.withdrawal_rate, self.theft_rate);
        let (x1, x2) = (self.x1, self.x2);
        let k = f64::from(mu - 1);

        let a = w * (x1 - 1.0) + t * x1;
        let b = w * (x2 - 1.0) + t * x2;
        // denom / x2^k; strictly negative since b > 0 and a·r^k ≤ max(a, 0) < b.
        let scaled_denom = a * (x1 / x2).powf(k) - b;
        // (x1·x2)^k / x2^k = x1^k ≤ 1
        let scaled_numer = x1.powf(k);

        Ok(1.0 / t + (w * (x2 - x1) / t) * scaled_numer / scaled_denom)
    }

    /// Direct evaluation with raw powers. Overflows once x2^(μ−1) leaves
    /// the f64 range; kept for comparison against `expected_time`.
    pub fn expected_time_naive(&self, mu: Threshold) -> SimResult<f64> {
        if mu == 0 {
            return Err(SimError::InvalidThreshold);
        }
        let (w, t) = (self.withdrawal_rate, self.theft_rate);
        let (x1, x2) = (self.x1, self.x2);
        let k = f64::from(mu - 1);
        let denom = (w * (x1 - 1.0) + t * x1) * x1.powf(k) - (w * (x2 - 1.0) + t * x2) * x2.powf(k);
        Ok(1.0 / t + (w * (x2 - x1) / t) * (x1 * x2).powf(k) / denom)
    }

    /// Expected long-run balance with the calibrated γ.
    pub fn expected_balance(&self, mu: Threshold, cold_theft_probability: f64) -> SimResult<f64> {
        self.balance_with_gamma(mu, cold_theft_probability, LOSS_AMPLIFICATION)
    }

    /// balance(μ) = (d − w)·T(μ)/p − γ·t·T(μ)·μ/p
    pub fn balance_with_gamma(
        &self,
        mu: Threshold,
        cold_theft_probability: f64,
        gamma: f64,
    ) -> SimResult<f64> {
        let p = cold_theft_probability;
        if !(p > 0.0 && p <= 1.0) {
            return Err(SimError::InvalidProbability {
                name:  "cold_theft_probability",
                value: p,
            });
        }
        let time = self.expected_time(mu)?;
        let income = (self.deposit_rate - self.withdrawal_rate) * time / p;
        let losses = gamma * self.theft_rate * time * f64::from(mu) / p;
        Ok(income - losses)
    }
}

/// Solve the first-step equations for T_μ directly (Thomas algorithm,
/// forward sweep only since T_μ is the last unknown). O(μ), valid for
/// any positive rates including d == w.
pub fn expected_time_by_recurrence(
    deposit_rate: f64,
    withdrawal_rate: f64,
    theft_rate: f64,
    mu: Threshold,
) -> SimResult<f64> {
    check_rate("deposit_rate", deposit_rate)?;
    check_rate("withdrawal_rate", withdrawal_rate)?;
    check_rate("hot_theft_rate", theft_rate)?;
    if mu == 0 {
        return Err(SimError::InvalidThreshold);
    }
    let (d, w, t) = (deposit_rate, withdrawal_rate, theft_rate);
    let total = d + w + t;

    // Row k: −w·T_{k−1} + diag_k·T_k − d·T_{k+1} = 1, with T_0 = 0.
    let mut c_prime = 0.0;
    let mut d_prime = 0.0;
    for k in 1..=mu {
        let (diag, upper) = if k < mu { (total, -d) } else { (w + t, 0.0) };
        let m = diag + w * c_prime;
        c_prime = upper / m;
        d_prime = (1.0 + w * d_prime) / m;
    }
    Ok(d_prime)
}
