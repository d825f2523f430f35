//! # Prior-Work Persistence
//!
//! The engine treats the prior-work counter as an opaque field of a
//! snapshot. On the host it lives in the item's persistent tag container,
//! separate from ordinary durability, so mending and other repairs never
//! reset it.
//!
//! Items made before the tag existed only carry the legacy repair-cost
//! field. Reads fall back to it; writes mirror the counter into both.

use std::collections::BTreeMap;

use anvil_engine::{EnchantmentMap, ItemKind, ItemSnapshot};
use serde::{Deserialize, Serialize};

use crate::config::StationConfig;

/// Persistent tag container of a stored item.
pub type TagMap = BTreeMap<String, i32>;

/// An item as the host stores it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    /// Item category.
    pub kind: ItemKind,
    /// Current wear.
    #[serde(default)]
    pub damage: u32,
    /// Applied or stored enchantments.
    #[serde(default)]
    pub enchantments: EnchantmentMap,
    /// Custom display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Stack size.
    #[serde(default = "default_amount")]
    pub amount: i32,
    /// Persistent integer tags.
    #[serde(default)]
    pub tags: TagMap,
    /// Legacy repair-cost field.
    #[serde(default)]
    pub repair_cost: i32,
}

const fn default_amount() -> i32 {
    1
}

impl StoredItem {
    /// Creates a single undamaged item.
    #[must_use]
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            amount: 1,
            ..Self::default()
        }
    }

    /// Returns true if this slot holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_air() || self.amount <= 0
    }

    /// Reads the item into an engine snapshot.
    #[must_use]
    pub fn snapshot(&self, store: &PriorWorkStore) -> ItemSnapshot {
        ItemSnapshot {
            kind: self.kind,
            damage: self.damage,
            enchantments: self.enchantments.clone(),
            repair_uses: store.read(self),
            display_name: self.display_name.clone(),
            amount: self.amount,
        }
    }

    /// Writes an engine result back onto this item.
    ///
    /// Kind and stack size are left alone. Prior-work storage is only
    /// written when the counter actually moved, so a plain rename leaves
    /// both the tag and the legacy field as they were.
    pub fn apply(&mut self, output: &ItemSnapshot, store: &PriorWorkStore) {
        self.damage = output.damage;
        self.enchantments.clone_from(&output.enchantments);
        self.display_name.clone_from(&output.display_name);
        if output.repair_uses != store.read(self) {
            store.write(self, output.repair_uses);
        }
    }
}

impl From<ItemSnapshot> for StoredItem {
    fn from(snapshot: ItemSnapshot) -> Self {
        Self {
            kind: snapshot.kind,
            damage: snapshot.damage,
            enchantments: snapshot.enchantments,
            display_name: snapshot.display_name,
            amount: snapshot.amount,
            tags: TagMap::new(),
            repair_cost: 0,
        }
    }
}

/// Reads and writes the prior-work counter on stored items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriorWorkStore {
    uses_key: String,
    legacy_fallback: bool,
}

impl PriorWorkStore {
    /// Creates a store for the given tag key.
    #[must_use]
    pub fn new(uses_key: impl Into<String>, legacy_fallback: bool) -> Self {
        Self {
            uses_key: uses_key.into(),
            legacy_fallback,
        }
    }

    /// Creates a store from station settings.
    #[must_use]
    pub fn from_config(config: &StationConfig) -> Self {
        Self::new(config.uses_key.clone(), config.legacy_repair_cost_fallback)
    }

    /// The tag key in use.
    #[must_use]
    pub fn uses_key(&self) -> &str {
        &self.uses_key
    }

    /// Current counter, never negative.
    #[must_use]
    pub fn read(&self, item: &StoredItem) -> i32 {
        match item.tags.get(&self.uses_key) {
            Some(&uses) => uses.max(0),
            None if self.legacy_fallback => item.repair_cost.max(0),
            None => 0,
        }
    }

    /// Stores the counter in the tag and mirrors it to the legacy field.
    pub fn write(&self, item: &mut StoredItem, uses: i32) {
        let uses = uses.max(0);
        item.tags.insert(self.uses_key.clone(), uses);
        item.repair_cost = uses;
    }
}

impl Default for PriorWorkStore {
    fn default() -> Self {
        Self::from_config(&StationConfig::default())
    }
}
