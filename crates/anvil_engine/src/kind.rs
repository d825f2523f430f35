//! # Item Kind Catalogue
//!
//! Closed catalogue of every item category the anvil cares about.
//!
//! A kind decides three things for the engine:
//! 1. Maximum durability (0 for anything that cannot wear down)
//! 2. Whether it is a book-kind container that stores enchantments
//! 3. Which [`KindFlags`] it carries, which drives enchantment applicability
//!
//! Kinds round-trip through a stable snake_case key (`diamond_sword`,
//! `oak_planks`, `enchanted_book`) so hosts and TOML files can name them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Capability flags for an item kind.
///
/// Enchantments declare the flags they accept; an enchantment applies to a
/// kind when the two sets intersect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KindFlags(u32);

impl KindFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Item has durability and can be repaired.
    pub const DAMAGEABLE: Self = Self(1 << 0);
    /// Swords.
    pub const SWORD: Self = Self(1 << 1);
    /// Axes (also counted as mining tools).
    pub const AXE: Self = Self(1 << 2);
    /// Pickaxes, axes, shovels and hoes.
    pub const MINING: Self = Self(1 << 3);
    /// Shears.
    pub const SHEARS: Self = Self(1 << 4);
    /// Head armor slot.
    pub const HEAD: Self = Self(1 << 5);
    /// Chest armor slot.
    pub const CHEST: Self = Self(1 << 6);
    /// Leg armor slot.
    pub const LEGS: Self = Self(1 << 7);
    /// Foot armor slot.
    pub const FEET: Self = Self(1 << 8);
    /// Anything worn by a player (armor, elytra).
    pub const WEARABLE: Self = Self(1 << 9);
    /// Bows.
    pub const BOW: Self = Self(1 << 10);
    /// Crossbows.
    pub const CROSSBOW: Self = Self(1 << 11);
    /// Tridents.
    pub const TRIDENT: Self = Self(1 << 12);
    /// Fishing rods.
    pub const FISHING_ROD: Self = Self(1 << 13);
    /// Maces.
    pub const MACE: Self = Self(1 << 14);
    /// Enchantment storage books.
    pub const BOOK: Self = Self(1 << 15);
    /// Any armor slot.
    pub const ARMOR: Self = Self(Self::HEAD.0 | Self::CHEST.0 | Self::LEGS.0 | Self::FEET.0);

    /// Creates flags from raw value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Checks if any flag of `flag` is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    /// Combines two flag sets.
    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    /// Parses a single flag name as used in configuration files.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownKindFlag` for unrecognised names.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        let flag = match name {
            "damageable" => Self::DAMAGEABLE,
            "sword" => Self::SWORD,
            "axe" => Self::AXE,
            "mining" => Self::MINING,
            "shears" => Self::SHEARS,
            "head" => Self::HEAD,
            "chest" => Self::CHEST,
            "legs" => Self::LEGS,
            "feet" => Self::FEET,
            "armor" => Self::ARMOR,
            "wearable" => Self::WEARABLE,
            "bow" => Self::BOW,
            "crossbow" => Self::CROSSBOW,
            "trident" => Self::TRIDENT,
            "fishing_rod" => Self::FISHING_ROD,
            "mace" => Self::MACE,
            "book" => Self::BOOK,
            other => return Err(EngineError::UnknownKindFlag(other.to_string())),
        };
        Ok(flag)
    }
}

/// Tool material tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolTier {
    /// Wooden tools, repaired with planks.
    Wooden,
    /// Stone tools, repaired with stone-family blocks.
    Stone,
    /// Iron tools.
    Iron,
    /// Golden tools.
    Golden,
    /// Diamond tools.
    Diamond,
    /// Netherite tools.
    Netherite,
}

impl ToolTier {
    /// Every tool tier.
    pub const ALL: [Self; 6] = [
        Self::Wooden,
        Self::Stone,
        Self::Iron,
        Self::Golden,
        Self::Diamond,
        Self::Netherite,
    ];

    const fn key(self) -> &'static str {
        match self {
            Self::Wooden => "wooden",
            Self::Stone => "stone",
            Self::Iron => "iron",
            Self::Golden => "golden",
            Self::Diamond => "diamond",
            Self::Netherite => "netherite",
        }
    }

    const fn max_durability(self) -> u32 {
        match self {
            Self::Wooden => 59,
            Self::Stone => 131,
            Self::Iron => 250,
            Self::Golden => 32,
            Self::Diamond => 1561,
            Self::Netherite => 2031,
        }
    }
}

/// Tool shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolShape {
    /// Sword.
    Sword,
    /// Pickaxe.
    Pickaxe,
    /// Axe.
    Axe,
    /// Shovel.
    Shovel,
    /// Hoe.
    Hoe,
}

impl ToolShape {
    /// Every tool shape.
    pub const ALL: [Self; 5] = [Self::Sword, Self::Pickaxe, Self::Axe, Self::Shovel, Self::Hoe];

    const fn key(self) -> &'static str {
        match self {
            Self::Sword => "sword",
            Self::Pickaxe => "pickaxe",
            Self::Axe => "axe",
            Self::Shovel => "shovel",
            Self::Hoe => "hoe",
        }
    }

    const fn flags(self) -> KindFlags {
        match self {
            Self::Sword => KindFlags::SWORD,
            Self::Axe => KindFlags::AXE.with(KindFlags::MINING),
            Self::Pickaxe | Self::Shovel | Self::Hoe => KindFlags::MINING,
        }
    }
}

/// Armor material tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArmorTier {
    /// Leather armor.
    Leather,
    /// Chainmail armor, repaired with iron ingots.
    Chainmail,
    /// Iron armor.
    Iron,
    /// Golden armor.
    Golden,
    /// Diamond armor.
    Diamond,
    /// Netherite armor.
    Netherite,
}

impl ArmorTier {
    /// Every armor tier.
    pub const ALL: [Self; 6] = [
        Self::Leather,
        Self::Chainmail,
        Self::Iron,
        Self::Golden,
        Self::Diamond,
        Self::Netherite,
    ];

    const fn key(self) -> &'static str {
        match self {
            Self::Leather => "leather",
            Self::Chainmail => "chainmail",
            Self::Iron => "iron",
            Self::Golden => "golden",
            Self::Diamond => "diamond",
            Self::Netherite => "netherite",
        }
    }

    /// Durability multiplier applied to the per-slot base.
    const fn durability_factor(self) -> u32 {
        match self {
            Self::Leather => 5,
            Self::Chainmail | Self::Iron => 15,
            Self::Golden => 7,
            Self::Diamond => 33,
            Self::Netherite => 37,
        }
    }
}

/// Armor slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArmorSlot {
    /// Helmet.
    Helmet,
    /// Chestplate.
    Chestplate,
    /// Leggings.
    Leggings,
    /// Boots.
    Boots,
}

impl ArmorSlot {
    /// Every armor slot.
    pub const ALL: [Self; 4] = [Self::Helmet, Self::Chestplate, Self::Leggings, Self::Boots];

    const fn key(self) -> &'static str {
        match self {
            Self::Helmet => "helmet",
            Self::Chestplate => "chestplate",
            Self::Leggings => "leggings",
            Self::Boots => "boots",
        }
    }

    const fn base_durability(self) -> u32 {
        match self {
            Self::Helmet => 11,
            Self::Chestplate => 16,
            Self::Leggings => 15,
            Self::Boots => 13,
        }
    }

    const fn flags(self) -> KindFlags {
        match self {
            Self::Helmet => KindFlags::HEAD,
            Self::Chestplate => KindFlags::CHEST,
            Self::Leggings => KindFlags::LEGS,
            Self::Boots => KindFlags::FEET,
        }
    }
}

/// Standalone damageable equipment outside the tier grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gear {
    /// Elytra, repaired with phantom membrane.
    Elytra,
    /// Turtle shell helmet, repaired with turtle scute.
    TurtleHelmet,
    /// Wolf armor, repaired with armadillo scute.
    WolfArmor,
    /// Mace, repaired with breeze rods.
    Mace,
    /// Shield, repaired with planks.
    Shield,
    /// Bow.
    Bow,
    /// Crossbow.
    Crossbow,
    /// Trident.
    Trident,
    /// Fishing rod.
    FishingRod,
    /// Shears.
    Shears,
    /// Flint and steel.
    FlintAndSteel,
    /// Carrot on a stick.
    CarrotOnAStick,
    /// Warped fungus on a stick.
    WarpedFungusOnAStick,
    /// Brush.
    Brush,
}

impl Gear {
    /// Every gear kind.
    pub const ALL: [Self; 14] = [
        Self::Elytra,
        Self::TurtleHelmet,
        Self::WolfArmor,
        Self::Mace,
        Self::Shield,
        Self::Bow,
        Self::Crossbow,
        Self::Trident,
        Self::FishingRod,
        Self::Shears,
        Self::FlintAndSteel,
        Self::CarrotOnAStick,
        Self::WarpedFungusOnAStick,
        Self::Brush,
    ];

    const fn key(self) -> &'static str {
        match self {
            Self::Elytra => "elytra",
            Self::TurtleHelmet => "turtle_helmet",
            Self::WolfArmor => "wolf_armor",
            Self::Mace => "mace",
            Self::Shield => "shield",
            Self::Bow => "bow",
            Self::Crossbow => "crossbow",
            Self::Trident => "trident",
            Self::FishingRod => "fishing_rod",
            Self::Shears => "shears",
            Self::FlintAndSteel => "flint_and_steel",
            Self::CarrotOnAStick => "carrot_on_a_stick",
            Self::WarpedFungusOnAStick => "warped_fungus_on_a_stick",
            Self::Brush => "brush",
        }
    }

    const fn max_durability(self) -> u32 {
        match self {
            Self::Elytra => 432,
            Self::TurtleHelmet => 275,
            Self::Mace => 500,
            Self::Shield => 336,
            Self::Bow => 384,
            Self::Crossbow => 465,
            Self::Trident => 250,
            Self::Shears => 238,
            Self::WarpedFungusOnAStick => 100,
            Self::CarrotOnAStick => 25,
            Self::WolfArmor | Self::FishingRod | Self::FlintAndSteel | Self::Brush => 64,
        }
    }

    const fn flags(self) -> KindFlags {
        let extra = match self {
            Self::Elytra => KindFlags::WEARABLE,
            Self::TurtleHelmet => KindFlags::WEARABLE.with(KindFlags::HEAD),
            Self::Mace => KindFlags::MACE,
            Self::Bow => KindFlags::BOW,
            Self::Crossbow => KindFlags::CROSSBOW,
            Self::Trident => KindFlags::TRIDENT,
            Self::FishingRod => KindFlags::FISHING_ROD,
            Self::Shears => KindFlags::SHEARS,
            Self::WolfArmor
            | Self::Shield
            | Self::FlintAndSteel
            | Self::CarrotOnAStick
            | Self::WarpedFungusOnAStick
            | Self::Brush => KindFlags::NONE,
        };
        KindFlags::DAMAGEABLE.with(extra)
    }
}

/// Wood family, for the plank repair material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wood {
    /// Oak.
    Oak,
    /// Spruce.
    Spruce,
    /// Birch.
    Birch,
    /// Jungle.
    Jungle,
    /// Acacia.
    Acacia,
    /// Dark oak.
    DarkOak,
    /// Mangrove.
    Mangrove,
    /// Cherry.
    Cherry,
    /// Bamboo.
    Bamboo,
    /// Crimson (nether).
    Crimson,
    /// Warped (nether).
    Warped,
    /// Pale oak.
    PaleOak,
}

impl Wood {
    /// Every wood family.
    pub const ALL: [Self; 12] = [
        Self::Oak,
        Self::Spruce,
        Self::Birch,
        Self::Jungle,
        Self::Acacia,
        Self::DarkOak,
        Self::Mangrove,
        Self::Cherry,
        Self::Bamboo,
        Self::Crimson,
        Self::Warped,
        Self::PaleOak,
    ];

    const fn key(self) -> &'static str {
        match self {
            Self::Oak => "oak",
            Self::Spruce => "spruce",
            Self::Birch => "birch",
            Self::Jungle => "jungle",
            Self::Acacia => "acacia",
            Self::DarkOak => "dark_oak",
            Self::Mangrove => "mangrove",
            Self::Cherry => "cherry",
            Self::Bamboo => "bamboo",
            Self::Crimson => "crimson",
            Self::Warped => "warped",
            Self::PaleOak => "pale_oak",
        }
    }
}

/// Plain materials that may be placed in the right slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    /// Any plank of the given wood family.
    Planks(Wood),
    /// Cobblestone.
    Cobblestone,
    /// Cobbled deepslate.
    CobbledDeepslate,
    /// Blackstone.
    Blackstone,
    /// Iron ingot.
    IronIngot,
    /// Gold ingot.
    GoldIngot,
    /// Diamond.
    Diamond,
    /// Netherite ingot.
    NetheriteIngot,
    /// Leather.
    Leather,
    /// Phantom membrane.
    PhantomMembrane,
    /// Turtle scute.
    TurtleScute,
    /// Armadillo scute.
    ArmadilloScute,
    /// Breeze rod.
    BreezeRod,
    /// Stick (never a repair material).
    Stick,
}

impl Material {
    const SIMPLE: [Self; 13] = [
        Self::Cobblestone,
        Self::CobbledDeepslate,
        Self::Blackstone,
        Self::IronIngot,
        Self::GoldIngot,
        Self::Diamond,
        Self::NetheriteIngot,
        Self::Leather,
        Self::PhantomMembrane,
        Self::TurtleScute,
        Self::ArmadilloScute,
        Self::BreezeRod,
        Self::Stick,
    ];

    fn key(self) -> String {
        let key = match self {
            Self::Planks(wood) => return format!("{}_planks", wood.key()),
            Self::Cobblestone => "cobblestone",
            Self::CobbledDeepslate => "cobbled_deepslate",
            Self::Blackstone => "blackstone",
            Self::IronIngot => "iron_ingot",
            Self::GoldIngot => "gold_ingot",
            Self::Diamond => "diamond",
            Self::NetheriteIngot => "netherite_ingot",
            Self::Leather => "leather",
            Self::PhantomMembrane => "phantom_membrane",
            Self::TurtleScute => "turtle_scute",
            Self::ArmadilloScute => "armadillo_scute",
            Self::BreezeRod => "breeze_rod",
            Self::Stick => "stick",
        };
        key.to_string()
    }
}

/// The category of an item in an anvil slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ItemKind {
    /// Empty slot.
    #[default]
    Air,
    /// A tiered tool or weapon.
    Tool(ToolTier, ToolShape),
    /// A tiered armor piece.
    Armor(ArmorTier, ArmorSlot),
    /// Standalone equipment.
    Gear(Gear),
    /// A plain, unenchanted book.
    Book,
    /// A book carrying stored enchantments.
    EnchantedBook,
    /// A plain material.
    Material(Material),
}

impl ItemKind {
    /// Maximum durability, or 0 for kinds that do not wear down.
    #[must_use]
    pub const fn max_durability(self) -> u32 {
        match self {
            Self::Tool(tier, _) => tier.max_durability(),
            Self::Armor(tier, slot) => slot.base_durability() * tier.durability_factor(),
            Self::Gear(gear) => gear.max_durability(),
            Self::Air | Self::Book | Self::EnchantedBook | Self::Material(_) => 0,
        }
    }

    /// Returns true if this kind has durability.
    #[inline]
    #[must_use]
    pub const fn is_damageable(self) -> bool {
        self.max_durability() > 0
    }

    /// Returns true if this kind stores enchantments instead of applying them.
    #[inline]
    #[must_use]
    pub const fn is_book_container(self) -> bool {
        matches!(self, Self::EnchantedBook)
    }

    /// Returns true for the empty-slot marker.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Capability flags used for enchantment applicability.
    #[must_use]
    pub const fn flags(self) -> KindFlags {
        match self {
            Self::Tool(_, shape) => KindFlags::DAMAGEABLE.with(shape.flags()),
            Self::Armor(_, slot) => KindFlags::DAMAGEABLE
                .with(KindFlags::WEARABLE)
                .with(slot.flags()),
            Self::Gear(gear) => gear.flags(),
            Self::EnchantedBook => KindFlags::BOOK,
            Self::Air | Self::Book | Self::Material(_) => KindFlags::NONE,
        }
    }

    /// Stable snake_case key.
    #[must_use]
    pub fn key(self) -> String {
        match self {
            Self::Air => "air".to_string(),
            Self::Tool(tier, shape) => format!("{}_{}", tier.key(), shape.key()),
            Self::Armor(tier, slot) => format!("{}_{}", tier.key(), slot.key()),
            Self::Gear(gear) => gear.key().to_string(),
            Self::Book => "book".to_string(),
            Self::EnchantedBook => "enchanted_book".to_string(),
            Self::Material(material) => material.key(),
        }
    }

    /// Iterates over every kind in the catalogue.
    pub fn catalogue() -> impl Iterator<Item = Self> {
        let tools = ToolTier::ALL
            .into_iter()
            .flat_map(|tier| ToolShape::ALL.into_iter().map(move |shape| Self::Tool(tier, shape)));
        let armor = ArmorTier::ALL
            .into_iter()
            .flat_map(|tier| ArmorSlot::ALL.into_iter().map(move |slot| Self::Armor(tier, slot)));
        let planks = Wood::ALL
            .into_iter()
            .map(|wood| Self::Material(Material::Planks(wood)));
        [Self::Air, Self::Book, Self::EnchantedBook]
            .into_iter()
            .chain(tools)
            .chain(armor)
            .chain(Gear::ALL.into_iter().map(Self::Gear))
            .chain(planks)
            .chain(Material::SIMPLE.into_iter().map(Self::Material))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for ItemKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key.strip_prefix("minecraft:").unwrap_or(&key);
        Self::catalogue()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| EngineError::UnknownItemKind(s.to_string()))
    }
}

impl TryFrom<String> for ItemKind {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        kind.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armor_durability_table() {
        assert_eq!(ItemKind::Armor(ArmorTier::Leather, ArmorSlot::Chestplate).max_durability(), 80);
        assert_eq!(ItemKind::Armor(ArmorTier::Iron, ArmorSlot::Helmet).max_durability(), 165);
        assert_eq!(ItemKind::Armor(ArmorTier::Golden, ArmorSlot::Boots).max_durability(), 91);
        assert_eq!(ItemKind::Armor(ArmorTier::Diamond, ArmorSlot::Leggings).max_durability(), 495);
        assert_eq!(ItemKind::Armor(ArmorTier::Netherite, ArmorSlot::Chestplate).max_durability(), 592);
    }

    #[test]
    fn test_non_damageable_kinds() {
        assert_eq!(ItemKind::EnchantedBook.max_durability(), 0);
        assert_eq!(ItemKind::Material(Material::Diamond).max_durability(), 0);
        assert!(!ItemKind::Air.is_damageable());
        assert!(ItemKind::Gear(Gear::Elytra).is_damageable());
    }

    #[test]
    fn test_only_enchanted_book_is_container() {
        assert!(ItemKind::EnchantedBook.is_book_container());
        assert!(!ItemKind::Book.is_book_container());
        assert!(!ItemKind::Tool(ToolTier::Diamond, ToolShape::Sword).is_book_container());
    }

    #[test]
    fn test_key_round_trip_for_whole_catalogue() {
        for kind in ItemKind::catalogue() {
            let parsed: ItemKind = kind.key().parse().unwrap();
            assert_eq!(parsed, kind, "key {} did not round-trip", kind.key());
        }
    }

    #[test]
    fn test_parse_accepts_namespace_and_case() {
        let kind: ItemKind = "minecraft:Diamond_Sword".parse().unwrap();
        assert_eq!(kind, ItemKind::Tool(ToolTier::Diamond, ToolShape::Sword));
        assert!(matches!("ruby_sword".parse::<ItemKind>(), Err(EngineError::UnknownItemKind(_))));
    }

    #[test]
    fn test_axe_counts_as_mining_and_axe() {
        let flags = ItemKind::Tool(ToolTier::Iron, ToolShape::Axe).flags();
        assert!(flags.has(KindFlags::AXE));
        assert!(flags.has(KindFlags::MINING));
        assert!(!flags.has(KindFlags::SWORD));
    }
}
