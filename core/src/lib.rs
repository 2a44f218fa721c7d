//! Hot/cold custody simulator.
//!
//! Two estimators of the same quantity, the expected time until a hot
//! wallet of capacity μ first runs dry:
//!   - `engine`: event-driven Monte Carlo over three Poisson clocks
//!   - `solver`: closed form from the governing recurrence's roots
//!
//! `sweep` runs either one over a range of μ.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod rng;
pub mod solver;
pub mod sweep;
pub mod types;
pub mod wallet;
