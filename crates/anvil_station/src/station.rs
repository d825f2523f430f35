//! # Anvil Station
//!
//! Shared, long-lived state behind every anvil on a server: the parsed
//! config, the enchantment table, the prior-work store and the cost
//! indicator. Sessions borrow it; it never holds slot contents itself.

use anvil_engine::EnchantmentRegistry;

use crate::config::{CostCap, StationConfig};
use crate::error::StationResult;
use crate::indicator::CostIndicator;
use crate::persist::PriorWorkStore;
use crate::session::AnvilSession;

/// Server-wide anvil state.
pub struct AnvilStation {
    /// Settings loaded at startup.
    config: StationConfig,
    /// Enchantment table with overrides applied.
    registry: EnchantmentRegistry,
    /// Prior-work tag access.
    store: PriorWorkStore,
    /// Per-player cost bars.
    indicator: CostIndicator,
}

impl AnvilStation {
    /// Builds a station from validated settings.
    ///
    /// # Errors
    ///
    /// Returns error if the settings or enchantment overrides are invalid.
    pub fn new(config: StationConfig) -> StationResult<Self> {
        config.validate()?;
        let registry = config.build_registry()?;
        let store = PriorWorkStore::from_config(&config);
        let indicator = CostIndicator::new(config.show_cost_indicator, config.cost_cap());

        tracing::info!(
            "Anvil station ready: cap={:?}, {} enchantments, uses_key={}",
            config.cost_cap(),
            registry.len(),
            store.uses_key()
        );

        Ok(Self {
            config,
            registry,
            store,
            indicator,
        })
    }

    /// Builds a station from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns error if the document does not parse or is invalid.
    pub fn from_toml_str(document: &str) -> StationResult<Self> {
        Self::new(StationConfig::from_toml_str(document)?)
    }

    /// Opens a session with empty slots.
    #[must_use]
    pub fn open(&self) -> AnvilSession<'_> {
        AnvilSession::new(self)
    }

    /// Settings in use.
    #[must_use]
    pub const fn config(&self) -> &StationConfig {
        &self.config
    }

    /// The configured cost cap.
    #[must_use]
    pub const fn cost_cap(&self) -> CostCap {
        self.config.cost_cap()
    }

    /// Enchantment table in use.
    #[must_use]
    pub const fn registry(&self) -> &EnchantmentRegistry {
        &self.registry
    }

    /// Prior-work tag access.
    #[must_use]
    pub const fn store(&self) -> &PriorWorkStore {
        &self.store
    }

    /// Per-player cost bars.
    #[must_use]
    pub const fn indicator(&self) -> &CostIndicator {
        &self.indicator
    }
}

impl Default for AnvilStation {
    fn default() -> Self {
        Self {
            config: StationConfig::default(),
            registry: EnchantmentRegistry::standard().clone(),
            store: PriorWorkStore::default(),
            indicator: CostIndicator::default(),
        }
    }
}
