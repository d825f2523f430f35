//! # Item Snapshots
//!
//! Immutable value describing one anvil slot at the moment of evaluation.
//! The engine never mutates a snapshot it is given; every operation returns
//! a new one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enchantment::EnchantmentId;
use crate::kind::ItemKind;

/// Enchantment identifier to level. Ordered for deterministic merges.
pub type EnchantmentMap = BTreeMap<EnchantmentId, u32>;

/// One input or output slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    /// Item category.
    pub kind: ItemKind,
    /// Current wear, `0..=kind.max_durability()`.
    #[serde(default)]
    pub damage: u32,
    /// Applied enchantments, or stored ones for book containers.
    #[serde(default)]
    pub enchantments: EnchantmentMap,
    /// Prior-work counter. Negative values are treated as 0.
    #[serde(default)]
    pub repair_uses: i32,
    /// Custom display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Stack size.
    #[serde(default = "default_amount")]
    pub amount: i32,
}

const fn default_amount() -> i32 {
    1
}

impl ItemSnapshot {
    /// Creates an undamaged, unenchanted single item.
    #[must_use]
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            damage: 0,
            enchantments: EnchantmentMap::new(),
            repair_uses: 0,
            display_name: None,
            amount: 1,
        }
    }

    /// Sets the damage, clamped to the kind's durability.
    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage.min(self.kind.max_durability());
        self
    }

    /// Adds an enchantment (levels below 1 are raised to 1).
    #[must_use]
    pub fn with_enchantment(mut self, id: impl Into<EnchantmentId>, level: u32) -> Self {
        self.enchantments.insert(id.into(), level.max(1));
        self
    }

    /// Sets the prior-work counter.
    #[must_use]
    pub fn with_repair_uses(mut self, uses: i32) -> Self {
        self.repair_uses = uses;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the stack size.
    #[must_use]
    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }

    /// Returns true if this slot holds nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_air() || self.amount <= 0
    }

    /// Durability left before the item breaks.
    #[inline]
    #[must_use]
    pub fn remaining_durability(&self) -> u32 {
        self.kind.max_durability().saturating_sub(self.damage)
    }

    /// Level of an enchantment, or 0 if absent.
    #[inline]
    #[must_use]
    pub fn enchantment_level(&self, id: &EnchantmentId) -> u32 {
        self.enchantments.get(id).copied().unwrap_or(0)
    }
}
