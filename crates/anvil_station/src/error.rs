//! # Station Error Types
//!
//! All errors that can occur while driving an anvil session.

use anvil_engine::EngineError;
use thiserror::Error;

/// Errors that can occur at the anvil station.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StationError {
    /// The current slots do not produce a result.
    #[error("no anvil result to take")]
    NoResult,

    /// The player cannot pay for the result.
    #[error("insufficient levels: need {required}, have {available}")]
    InsufficientLevels {
        /// The level cost of the result.
        required: u32,
        /// The player's current level.
        available: u32,
    },

    /// A configured cost cap rejects the result ("too expensive").
    #[error("too expensive: cost {cost} reaches cap {cap}")]
    CostAboveCap {
        /// The level cost of the result.
        cost: u32,
        /// The configured cap.
        cap: u32,
    },

    /// Engine configuration failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<toml::de::Error> for StationError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for station operations.
pub type StationResult<T> = Result<T, StationError>;
