//! # Engine Error Types
//!
//! Evaluation itself is total and never fails. These errors only surface at
//! the configuration boundary, when the enchantment table or item kinds are
//! read from external TOML.

use thiserror::Error;

/// Errors that can occur while configuring the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An item kind key did not name any known kind.
    #[error("unknown item kind: {0}")]
    UnknownItemKind(String),

    /// An applicability flag name did not match any kind flag.
    #[error("unknown kind flag: {0}")]
    UnknownKindFlag(String),

    /// The TOML document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),

    /// The configuration parsed but violates a table invariant.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

/// Result type for engine configuration.
pub type EngineResult<T> = Result<T, EngineError>;
