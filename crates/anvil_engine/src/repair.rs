//! # Unit-Repair Resolver
//!
//! Recognises when the right slot holds the plain repair material for the
//! left item's category, and works out how many units that repair needs.
//!
//! ## Unit accounting
//!
//! - One unit restores a quarter of the item's max durability (at least 1).
//! - Units needed rounds up, so the last unit may over-repair.
//! - Units consumed never exceeds the stack on the right.

use crate::item::ItemSnapshot;
use crate::kind::{ArmorTier, Gear, ItemKind, Material, ToolTier};

/// How a unit repair would play out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitRepairPlan {
    /// Damage removed per unit of material.
    pub per_unit: u32,
    /// Units required to fully repair the item.
    pub units_needed: u32,
    /// Units that will actually be taken from the right stack.
    pub units_consumed: u32,
}

impl UnitRepairPlan {
    /// Damage this plan removes.
    #[inline]
    #[must_use]
    pub const fn restored(&self) -> u32 {
        self.per_unit.saturating_mul(self.units_consumed)
    }

    /// Returns `item` with the plan's damage reduction applied.
    #[must_use]
    pub fn apply(&self, item: &ItemSnapshot) -> ItemSnapshot {
        ItemSnapshot {
            damage: item.damage.saturating_sub(self.restored()),
            ..item.clone()
        }
    }
}

/// Builds a unit-repair plan, or `None` when `right` is not the repair
/// material for `left` or `left` has no damage to repair.
#[must_use]
pub fn resolve(left: &ItemSnapshot, right: &ItemSnapshot) -> Option<UnitRepairPlan> {
    if !is_repair_material(left.kind, right.kind) {
        return None;
    }
    let max = left.kind.max_durability();
    if max == 0 || left.damage == 0 {
        return None;
    }

    let per_unit = (max / 4).max(1);
    let units_needed = left.damage.div_ceil(per_unit);
    let available = u32::try_from(right.amount).unwrap_or(0);

    Some(UnitRepairPlan {
        per_unit,
        units_needed,
        units_consumed: units_needed.min(available),
    })
}

/// Returns true if `material` repairs items of kind `target`.
#[must_use]
pub fn is_repair_material(target: ItemKind, material: ItemKind) -> bool {
    let ItemKind::Material(material) = material else {
        return false;
    };
    match target {
        ItemKind::Gear(Gear::Elytra) => material == Material::PhantomMembrane,
        ItemKind::Gear(Gear::TurtleHelmet) => material == Material::TurtleScute,
        ItemKind::Gear(Gear::WolfArmor) => material == Material::ArmadilloScute,
        ItemKind::Gear(Gear::Mace) => material == Material::BreezeRod,
        ItemKind::Armor(ArmorTier::Leather, _) => material == Material::Leather,
        ItemKind::Tool(ToolTier::Wooden, _) | ItemKind::Gear(Gear::Shield) => {
            matches!(material, Material::Planks(_))
        }
        ItemKind::Tool(ToolTier::Stone, _) => matches!(
            material,
            Material::Cobblestone | Material::CobbledDeepslate | Material::Blackstone
        ),
        ItemKind::Tool(ToolTier::Iron, _)
        | ItemKind::Armor(ArmorTier::Iron | ArmorTier::Chainmail, _) => {
            material == Material::IronIngot
        }
        ItemKind::Tool(ToolTier::Golden, _) | ItemKind::Armor(ArmorTier::Golden, _) => {
            material == Material::GoldIngot
        }
        ItemKind::Tool(ToolTier::Diamond, _) | ItemKind::Armor(ArmorTier::Diamond, _) => {
            material == Material::Diamond
        }
        ItemKind::Tool(ToolTier::Netherite, _) | ItemKind::Armor(ArmorTier::Netherite, _) => {
            material == Material::NetheriteIngot
        }
        _ => false,
    }
}
