//! Shared plumbing for the four runner binaries: positional argument
//! handling, seeds, and row output.
//!
//! Usage (all rates in events per hour):
//!   exp-balance-sim    mean_d mean_w mean_t_h p_t_c [timespan_hours iterations mu_low mu_high]
//!   exp-time-sim       mean_d mean_w mean_t_h [iterations mu_low mu_high]
//!   exp-time-theory    mean_d mean_w mean_t_h [mu_low mu_high mu_inc]
//!   exp-balance-theory mean_d mean_w mean_t_h p_t_c [mu_low mu_high]
//!
//! Flags accepted anywhere: `--seed N` (simulators), `--json`.

use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};
use std::str::FromStr;

/// Command line split into positional values and flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    pub positional: Vec<String>,
    pub seed:       Option<u64>,
    pub json:       bool,
}

impl Invocation {
    pub fn from_env() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    /// Strip the flags out; everything else is positional.
    /// A `--seed` with a missing or unparsable value is left as a
    /// positional so the count check rejects the invocation.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut inv = Self::default();
        let mut iter = args.into_iter().peekable();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--json" => inv.json = true,
                "--seed" => match iter.peek().and_then(|v| v.parse::<u64>().ok()) {
                    Some(seed) => {
                        inv.seed = Some(seed);
                        iter.next();
                    }
                    None => inv.positional.push(arg),
                },
                _ => inv.positional.push(arg),
            }
        }
        inv
    }

    /// Parse the positionals against a fixed shape: `required` values,
    /// optionally followed by exactly `optional.len()` more. Missing
    /// optionals take the given defaults. `None` means "print usage".
    pub fn shaped<T: FromStr + Copy>(&self, required: usize, optional: &[T]) -> Option<Vec<T>> {
        let n = self.positional.len();
        if n != required && n != required + optional.len() {
            return None;
        }
        let mut values = self
            .positional
            .iter()
            .map(|s| s.parse::<T>().ok())
            .collect::<Option<Vec<T>>>()?;
        if n == required {
            values.extend_from_slice(optional);
        }
        Some(values)
    }

    /// Seed from `--seed`, else from the wall clock.
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Values that are whole numbers in the shape but arrive as f64.
pub fn as_count(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64)
        .then_some(value as u64)
}

pub fn as_threshold(value: f64) -> Option<u32> {
    as_count(value).map(|v| v as u32)
}

pub fn print_usage(usage: &str) {
    println!("{usage}");
}

/// Report a domain error the way usage is reported: one line, clean exit.
pub fn print_domain_error(err: &custody_core::error::SimError) {
    log::error!("{err}");
    println!("error: {err}");
}

/// One JSON object per line.
pub fn print_json_rows<T: Serialize>(rows: &[T]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in rows {
        writeln!(out, "{}", serde_json::to_string(row)?)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(args: &[&str]) -> Invocation {
        Invocation::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn flags_are_stripped_from_positionals() {
        let i = inv(&["80", "--seed", "7", "78", "--json", "0.01"]);
        assert_eq!(i.positional, vec!["80", "78", "0.01"]);
        assert_eq!(i.seed, Some(7));
        assert!(i.json);
    }

    #[test]
    fn optional_block_is_all_or_nothing() {
        let defaults = [1000.0, 5.0, 500.0];
        assert_eq!(
            inv(&["80", "78", "0.01"]).shaped(3, &defaults),
            Some(vec![80.0, 78.0, 0.01, 1000.0, 5.0, 500.0])
        );
        assert_eq!(
            inv(&["80", "78", "0.01", "10", "1", "2"]).shaped(3, &defaults),
            Some(vec![80.0, 78.0, 0.01, 10.0, 1.0, 2.0])
        );
        assert_eq!(inv(&["80", "78", "0.01", "10"]).shaped(3, &defaults), None);
        assert_eq!(inv(&["80", "78"]).shaped(3, &defaults), None);
    }

    #[test]
    fn unparsable_values_mean_usage() {
        assert_eq!(inv(&["80", "abc", "0.01"]).shaped::<f64>(3, &[]), None);
        assert_eq!(inv(&["80", "78", "0.01", "--seed"]).shaped::<f64>(3, &[]), None);
    }

    #[test]
    fn counts_must_be_whole() {
        assert_eq!(as_count(1000.0), Some(1000));
        assert_eq!(as_count(2.5), None);
        assert_eq!(as_count(-1.0), None);
        assert_eq!(as_threshold(130.0), Some(130));
    }
}
