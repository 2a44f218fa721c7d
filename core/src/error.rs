use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid rate '{name}': {value} (must be finite and > 0)")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("Invalid probability '{name}': {value} (must lie in [0, 1])")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("Invalid threshold: mu must be >= 1")]
    InvalidThreshold,

    #[error("Invalid run config: {reason}")]
    InvalidRunConfig { reason: String },

    #[error("Invalid mu range: low={low} high={high} step={step}")]
    InvalidMuRange { low: u32, high: u32, step: u32 },

    #[error("Unsupported parameter combination: repeated characteristic root (d={deposit}, w={withdrawal}, t={theft})")]
    DegenerateRecurrence { deposit: f64, withdrawal: f64, theft: f64 },

    #[error("Root product check failed: x1*x2={product}, expected w/d={expected}")]
    RootProductViolation { product: f64, expected: f64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
