//! # Cost Calculator
//!
//! Level cost of an anvil combination. The total is the sum of:
//!
//! | Term | Amount |
//! |------|--------|
//! | Prior work | `2^uses - 1` for each input, uses clamped to `0..=15` |
//! | Durability bonus | +2 when a same-kind merge reduced damage |
//! | Enchantments | `base_cost * level` per improved enchantment, halved for books |
//! | Rename | +1 when the name actually changes |
//!
//! A total of 0 is raised to 1 when enchantments or the name changed.
//! There is no upper bound.

use crate::enchantment::EnchantmentRegistry;
use crate::item::ItemSnapshot;

/// Highest prior-work count that still grows the penalty.
pub const MAX_PENALTY_USES: i32 = 15;

/// Surcharge for an item that has been worked `uses` times before.
#[must_use]
pub const fn prior_work_penalty(uses: i32) -> u32 {
    let n = if uses < 0 {
        0
    } else if uses > MAX_PENALTY_USES {
        MAX_PENALTY_USES
    } else {
        uses
    };
    (1u32 << n) - 1
}

/// Cost of a merge or rename producing `output`.
///
/// `renamed` is true only when the rename text is non-empty and differs
/// from the left item's current name.
#[must_use]
pub fn combination_cost(
    registry: &EnchantmentRegistry,
    left: &ItemSnapshot,
    right: Option<&ItemSnapshot>,
    renamed: bool,
    output: &ItemSnapshot,
) -> u32 {
    let mut cost = prior_work_penalty(left.repair_uses)
        .saturating_add(right.map_or(0, |right| prior_work_penalty(right.repair_uses)));

    if let Some(right) = right {
        let same_kind = right.kind == left.kind && left.kind.is_damageable();
        if same_kind && output.damage < left.damage {
            cost = cost.saturating_add(2);
        }
        cost = cost.saturating_add(enchantment_cost(registry, left, right, output));
    }

    if renamed {
        cost = cost.saturating_add(1);
    }

    if cost == 0 && (left.enchantments != output.enchantments || renamed) {
        cost = 1;
    }
    cost
}

/// Cost of a unit repair: prior work on both inputs plus one per unit.
#[must_use]
pub fn unit_repair_cost(left: &ItemSnapshot, right: &ItemSnapshot, units_consumed: u32) -> u32 {
    prior_work_penalty(left.repair_uses)
        .saturating_add(prior_work_penalty(right.repair_uses))
        .saturating_add(units_consumed)
}

/// Charge for every enchantment the right input improved on the output.
fn enchantment_cost(
    registry: &EnchantmentRegistry,
    left: &ItemSnapshot,
    right: &ItemSnapshot,
    output: &ItemSnapshot,
) -> u32 {
    let halve = right.kind.is_book_container();
    right
        .enchantments
        .iter()
        .filter_map(|(id, &incoming)| {
            let prior = left.enchantment_level(id);
            let fin = output.enchantments.get(id).copied()?;
            if fin <= prior {
                return None;
            }
            // Equal-level merges charge for the upgraded level
            let used = if incoming == prior { fin } else { incoming };
            let term = registry.base_cost(id).saturating_mul(used);
            Some(if halve { term.saturating_add(1) / 2 } else { term })
        })
        .fold(0u32, u32::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enchantment::EnchantmentId;
    use crate::kind::{ItemKind, ToolShape, ToolTier};

    fn sword() -> ItemSnapshot {
        ItemSnapshot::new(ItemKind::Tool(ToolTier::Diamond, ToolShape::Sword))
    }

    #[test]
    fn test_prior_work_penalty() {
        assert_eq!(prior_work_penalty(0), 0);
        assert_eq!(prior_work_penalty(1), 1);
        assert_eq!(prior_work_penalty(5), 31);
        assert_eq!(prior_work_penalty(15), 32767);
        assert_eq!(prior_work_penalty(40), 32767);
        assert_eq!(prior_work_penalty(-4), 0);
    }

    #[test]
    fn test_fresh_enchant_charges_incoming_level() {
        let reg = EnchantmentRegistry::standard();
        let left = sword();
        let right = sword().with_enchantment(EnchantmentId::SMITE, 4);
        let output = sword()
            .with_enchantment(EnchantmentId::SMITE, 4)
            .with_repair_uses(1);
        // smite weight 2 * level 4
        assert_eq!(combination_cost(reg, &left, Some(&right), false, &output), 8);
    }

    #[test]
    fn test_book_source_rounds_half_up() {
        let reg = EnchantmentRegistry::standard();
        let left = sword();
        let book = ItemSnapshot::new(ItemKind::EnchantedBook)
            .with_enchantment(EnchantmentId::LOOTING, 3);
        let output = sword().with_enchantment(EnchantmentId::LOOTING, 3);
        // (4 * 3 + 1) / 2
        assert_eq!(combination_cost(reg, &left, Some(&book), false, &output), 6);
    }

    #[test]
    fn test_no_charge_without_improvement() {
        let reg = EnchantmentRegistry::standard();
        let left = sword().with_enchantment(EnchantmentId::SHARPNESS, 5);
        let right = sword().with_enchantment(EnchantmentId::SHARPNESS, 3);
        let output = left.clone();
        assert_eq!(combination_cost(reg, &left, Some(&right), false, &output), 0);
    }

    #[test]
    fn test_rename_adds_one() {
        let reg = EnchantmentRegistry::standard();
        let left = sword().with_repair_uses(2);
        let output = left.clone().named("Edge");
        assert_eq!(combination_cost(reg, &left, None, true, &output), 4);
    }

    #[test]
    fn test_unit_repair_cost() {
        let left = sword().with_repair_uses(3);
        let right = ItemSnapshot::new(ItemKind::Material(crate::kind::Material::Diamond));
        assert_eq!(unit_repair_cost(&left, &right, 2), 9);
    }
}
