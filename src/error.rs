//! Error taxonomy for configuration loading and per-target purchase cycles.
//!
//! Only a `ConfigError` raised while loading the file at startup is fatal.
//! Every `CycleError` is logged by the controller and the loop moves on.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} could not be read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file {0} is empty")]
    Empty(PathBuf),

    #[error("`{key}` is missing or is not [x, y, width, height]")]
    InvalidRegion { key: &'static str },

    #[error("target {name:?} has no valid `position` [x, y]")]
    InvalidPosition { name: String },

    #[error("target {name:?} has non-positive ideal price {ideal_price}")]
    NonPositiveIdealPrice { name: String, ideal_price: f64 },
}

/// Which of the two screen reads a cycle error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadField {
    Name,
    Price,
}

impl fmt::Display for ReadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadField::Name => write!(f, "name"),
            ReadField::Price => write!(f, "price"),
        }
    }
}

/// Why recognized text yielded no name or price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no text recognized")]
    NoText,

    #[error("first candidate is empty")]
    EmptyCandidate,

    #[error("no digits in {0:?}")]
    NoDigits(String),
}

/// Reasons a single target's cycle ended without a decision.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0} region capture failed")]
    Capture(ReadField),

    #[error("{field} could not be recognized: {reason}")]
    Extraction { field: ReadField, reason: ExtractError },

    #[error("input injection failed: {0}")]
    Input(String),
}
