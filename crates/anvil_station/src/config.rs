//! # Station Configuration
//!
//! Loaded once at startup from TOML:
//!
//! ```toml
//! # Leave out for no cap at all
//! max_cost = 40
//! show_cost_indicator = true
//! uses_key = "anvil_uses"
//! legacy_repair_cost_fallback = true
//!
//! [[enchantment]]
//! key = "sharpness"
//! max_level = 10
//! ```

use anvil_engine::{EnchantmentOverride, EnchantmentRegistry};
use serde::{Deserialize, Serialize};

use crate::error::{StationError, StationResult};

/// Default tag key for the prior-work counter.
pub const DEFAULT_USES_KEY: &str = "anvil_uses";

/// Upper bound on the level cost the station will accept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CostCap {
    /// Any cost is accepted.
    #[default]
    Uncapped,
    /// Costs at or above the limit are too expensive.
    Capped(u32),
}

impl CostCap {
    /// Builds a cap from an optional limit.
    #[must_use]
    pub const fn from_limit(limit: Option<u32>) -> Self {
        match limit {
            Some(limit) => Self::Capped(limit),
            None => Self::Uncapped,
        }
    }

    /// Returns true if a result of this cost may be taken.
    #[inline]
    #[must_use]
    pub const fn admits(self, cost: u32) -> bool {
        match self {
            Self::Uncapped => true,
            Self::Capped(limit) => cost < limit,
        }
    }

    /// The limit, if any.
    #[must_use]
    pub const fn limit(self) -> Option<u32> {
        match self {
            Self::Uncapped => None,
            Self::Capped(limit) => Some(limit),
        }
    }
}

/// Station settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Cost at which results become too expensive. `None` for no cap.
    pub max_cost: Option<u32>,
    /// Whether players see the cost indicator.
    pub show_cost_indicator: bool,
    /// Tag key holding the prior-work counter.
    pub uses_key: String,
    /// Read the legacy repair-cost field when the tag is missing.
    pub legacy_repair_cost_fallback: bool,
    /// Overrides layered on the standard enchantment table.
    #[serde(rename = "enchantment")]
    pub enchantments: Vec<EnchantmentOverride>,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            max_cost: None,
            show_cost_indicator: true,
            uses_key: DEFAULT_USES_KEY.to_string(),
            legacy_repair_cost_fallback: true,
            enchantments: Vec::new(),
        }
    }
}

impl StationConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or fails validation.
    pub fn from_toml_str(document: &str) -> StationResult<Self> {
        let config: Self = toml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings for values that can never work.
    ///
    /// # Errors
    ///
    /// Returns `StationError::InvalidConfig` for an empty tag key or a cap
    /// of 0, which would refuse every result.
    pub fn validate(&self) -> StationResult<()> {
        if self.uses_key.trim().is_empty() {
            return Err(StationError::InvalidConfig(
                "uses_key must not be empty".to_string(),
            ));
        }
        if self.max_cost == Some(0) {
            return Err(StationError::InvalidConfig(
                "max_cost must be at least 1; leave it out for no cap".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured cost cap.
    #[must_use]
    pub const fn cost_cap(&self) -> CostCap {
        CostCap::from_limit(self.max_cost)
    }

    /// Builds the enchantment table with this config's overrides applied.
    ///
    /// # Errors
    ///
    /// Returns `StationError::Engine` if an override is invalid.
    pub fn build_registry(&self) -> StationResult<EnchantmentRegistry> {
        let registry = EnchantmentRegistry::standard()
            .clone()
            .with_overrides(&self.enchantments)?;
        Ok(registry)
    }
}
