//! # Combination Engine
//!
//! The anvil state machine. Every evaluation falls into exactly one mode,
//! checked in this order:
//!
//! 1. **Empty left**: nothing to work on
//! 2. **Rename only**: no right input, non-empty rename text
//! 3. **Unit repair**: right is the left item's repair material
//! 4. **Same-kind merge**: two damageable items of the same kind
//! 5. **Enchant merge**: anything else, including enchanted books
//!
//! Whatever the mode, an output that does not differ from the left input
//! is refused.
//!
//! ## Purity
//!
//! Evaluation is a total function of its inputs. Snapshots are borrowed and
//! never mutated, so one registry can serve any number of threads.

use serde::{Deserialize, Serialize};

use crate::change;
use crate::cost;
use crate::enchantment::EnchantmentRegistry;
use crate::item::{EnchantmentMap, ItemSnapshot};
use crate::kind::ItemKind;
use crate::repair::{self, UnitRepairPlan};

/// Which branch of the state machine handled an evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombineMode {
    /// Left slot was empty.
    EmptyLeft,
    /// Only the display name changes.
    RenameOnly,
    /// Right slot held the repair material.
    UnitRepair,
    /// Two items of the same damageable kind.
    SameKindMerge,
    /// Enchantments from the right applied or stored onto the left.
    EnchantMerge,
}

/// Result of one anvil evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationOutcome {
    /// The offered result, or `None` for a refusal.
    pub produced: Option<ItemSnapshot>,
    /// Level cost. Never clamped.
    pub cost: u32,
    /// Units to take from the right stack (unit repair only).
    pub material_units_consumed: u32,
    /// True if the result differs from the left input.
    pub changed: bool,
    /// Branch that produced this outcome.
    pub mode: CombineMode,
}

impl CombinationOutcome {
    /// A refusal: no result, nothing charged, nothing consumed.
    #[must_use]
    pub const fn refused(mode: CombineMode) -> Self {
        Self {
            produced: None,
            cost: 0,
            material_units_consumed: 0,
            changed: false,
            mode,
        }
    }

    /// Returns true if no result is offered.
    #[inline]
    #[must_use]
    pub const fn is_refused(&self) -> bool {
        self.produced.is_none()
    }
}

/// A classified input pair, carrying only what its mode needs.
#[derive(Debug)]
enum Combination<'a> {
    EmptyLeft,
    RenameOnly { name: &'a str },
    UnitRepair { material: &'a ItemSnapshot, plan: UnitRepairPlan },
    SameKindMerge { donor: &'a ItemSnapshot },
    EnchantMerge { donor: Option<&'a ItemSnapshot> },
}

impl Combination<'_> {
    const fn mode(&self) -> CombineMode {
        match self {
            Self::EmptyLeft => CombineMode::EmptyLeft,
            Self::RenameOnly { .. } => CombineMode::RenameOnly,
            Self::UnitRepair { .. } => CombineMode::UnitRepair,
            Self::SameKindMerge { .. } => CombineMode::SameKindMerge,
            Self::EnchantMerge { .. } => CombineMode::EnchantMerge,
        }
    }
}

fn classify<'a>(
    left: &ItemSnapshot,
    right: Option<&'a ItemSnapshot>,
    rename: Option<&'a str>,
) -> Combination<'a> {
    if left.is_empty() {
        return Combination::EmptyLeft;
    }
    match (right, rename) {
        (None, Some(name)) => Combination::RenameOnly { name },
        (None, None) => Combination::EnchantMerge { donor: None },
        (Some(right), _) => {
            if let Some(plan) = repair::resolve(left, right) {
                if plan.units_consumed > 0 {
                    return Combination::UnitRepair {
                        material: right,
                        plan,
                    };
                }
            }
            if right.kind == left.kind && left.kind.is_damageable() {
                Combination::SameKindMerge { donor: right }
            } else {
                Combination::EnchantMerge { donor: Some(right) }
            }
        }
    }
}

/// Evaluates an anvil against the standard enchantment table.
///
/// An empty `right` snapshot is treated as absent, and an empty `rename`
/// as no rename.
#[must_use]
pub fn evaluate(
    left: &ItemSnapshot,
    right: Option<&ItemSnapshot>,
    rename: Option<&str>,
) -> CombinationOutcome {
    evaluate_with(EnchantmentRegistry::standard(), left, right, rename)
}

/// Evaluates an anvil against a specific enchantment table.
#[must_use]
pub fn evaluate_with(
    registry: &EnchantmentRegistry,
    left: &ItemSnapshot,
    right: Option<&ItemSnapshot>,
    rename: Option<&str>,
) -> CombinationOutcome {
    let right = right.filter(|item| !item.is_empty());
    let rename = rename.filter(|name| !name.is_empty());
    let renamed = rename.is_some_and(|name| left.display_name.as_deref() != Some(name));

    let combination = classify(left, right, rename);
    let mode = combination.mode();
    tracing::trace!("Anvil mode {:?} for {} + {:?}", mode, left.kind, right.map(|item| item.kind));

    let (output, cost, units) = match combination {
        Combination::EmptyLeft => return CombinationOutcome::refused(mode),
        Combination::RenameOnly { name } => (with_name(left.clone(), Some(name)), 1, 0),
        Combination::UnitRepair { material, plan } => {
            let mut output = with_name(plan.apply(left), rename);
            output.repair_uses = next_repair_uses(left, material);
            let cost = cost::unit_repair_cost(left, material, plan.units_consumed);
            (output, cost, plan.units_consumed)
        }
        Combination::SameKindMerge { donor } => {
            let mut output = left.clone();
            output.damage = merged_damage(left, donor);
            output.enchantments =
                merge_enchantments(registry, &left.enchantments, &donor.enchantments, left.kind);
            output.repair_uses = next_repair_uses(left, donor);
            let output = with_name(output, rename);
            let cost = cost::combination_cost(registry, left, Some(donor), renamed, &output);
            (output, cost, 0)
        }
        Combination::EnchantMerge { donor } => {
            let mut output = left.clone();
            if let Some(donor) = donor {
                output.enchantments = merge_enchantments(
                    registry,
                    &left.enchantments,
                    &donor.enchantments,
                    left.kind,
                );
                output.repair_uses = next_repair_uses(left, donor);
            }
            let output = with_name(output, rename);
            let cost = cost::combination_cost(registry, left, donor, renamed, &output);
            (output, cost, 0)
        }
    };

    if !change::changed(left, &output) {
        tracing::debug!("Anvil refused: {:?} leaves {} unchanged", mode, left.kind);
        return CombinationOutcome::refused(mode);
    }

    tracing::trace!("Anvil result: mode={:?}, cost={}, units={}", mode, cost, units);
    CombinationOutcome {
        produced: Some(output),
        cost,
        material_units_consumed: units,
        changed: true,
        mode,
    }
}

/// Folds `incoming` enchantments into `base` for an item of kind `target`.
///
/// - Enchantments that cannot apply to `target` are skipped, unless
///   `target` is a book container.
/// - A shared enchantment goes up one level when both levels match,
///   otherwise the higher level wins.
/// - A new enchantment evicts everything it conflicts with.
///
/// Every level in the returned map is clamped to its max level.
#[must_use]
pub fn merge_enchantments(
    registry: &EnchantmentRegistry,
    base: &EnchantmentMap,
    incoming: &EnchantmentMap,
    target: ItemKind,
) -> EnchantmentMap {
    let stores_any = target.is_book_container();
    let merged = incoming.iter().fold(base.clone(), |mut acc, (id, &level)| {
        if !stores_any && !registry.is_applicable(id, target) {
            return acc;
        }
        let max = registry.max_level(id);
        if let Some(current) = acc.get(id).copied() {
            let next = if current == level {
                current.saturating_add(1).min(max)
            } else {
                current.max(level)
            };
            acc.insert(id.clone(), next);
        } else {
            acc.retain(|existing, _| !registry.conflicts_with(id, existing));
            acc.insert(id.clone(), level.min(max));
        }
        acc
    });

    merged
        .into_iter()
        .map(|(id, level)| {
            let max = registry.max_level(&id);
            (id, level.min(max))
        })
        .collect()
}

/// Damage after pooling both items' remaining durability plus a 12% bonus.
#[must_use]
pub fn merged_damage(left: &ItemSnapshot, donor: &ItemSnapshot) -> u32 {
    let max = left.kind.max_durability();
    let donor_remaining = if donor.kind.is_damageable() {
        max.saturating_sub(donor.damage)
    } else {
        0
    };
    let bonus = max * 12 / 100;
    let pooled = left
        .remaining_durability()
        .saturating_add(donor_remaining)
        .saturating_add(bonus);
    max - pooled.min(max)
}

fn next_repair_uses(left: &ItemSnapshot, right: &ItemSnapshot) -> i32 {
    left.repair_uses.max(right.repair_uses).max(0).saturating_add(1)
}

fn with_name(mut item: ItemSnapshot, name: Option<&str>) -> ItemSnapshot {
    if let Some(name) = name {
        item.display_name = Some(name.to_string());
    }
    item
}
