//! Shared primitive types used across the entire simulation.

/// Simulation time. The event-driven clock runs in seconds.
pub type SimSeconds = f64;

/// A wallet balance in whole units. Signed so a withdrawal may
/// drive the hot tier to zero or below before a refill check.
pub type Balance = i64;

/// Hot-tier capacity μ.
pub type Threshold = u32;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Convert an events-per-hour rate into events-per-second.
pub fn per_hour_to_per_second(rate_per_hour: f64) -> f64 {
    rate_per_hour / SECONDS_PER_HOUR
}

pub fn seconds_to_hours(secs: SimSeconds) -> f64 {
    secs / SECONDS_PER_HOUR
}
