//! # Enchantment Registry
//!
//! Static lookup of per-enchantment attributes:
//!
//! - base cost weight (multiplied by level when an anvil charges for it)
//! - maximum level
//! - incompatibility set
//! - which item kinds it may be applied to
//!
//! The standard table is built once per process and shared. Every query is a
//! total function: identifiers the table does not know fall back to a base
//! cost of 1, a max level of 1, no conflicts, and no applicable kinds.
//!
//! ## Overrides
//!
//! A server may layer a TOML document on top of the standard table:
//!
//! ```toml
//! [[enchantment]]
//! key = "sharpness"
//! base_cost = 2
//! max_level = 10
//!
//! [[enchantment]]
//! key = "lifesteal"
//! base_cost = 8
//! max_level = 3
//! applies_to = ["sword", "axe"]
//! conflicts = ["mending"]
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::kind::{ItemKind, KindFlags};

/// Identifier of an enchantment (`"sharpness"`, `"mending"`).
///
/// Ordered so enchantment maps iterate deterministically.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EnchantmentId(Cow<'static, str>);

macro_rules! enchantment_ids {
    ($($name:ident => $key:literal),* $(,)?) => {
        impl EnchantmentId {
            $(
                #[doc = concat!("`", $key, "`")]
                pub const $name: Self = Self(Cow::Borrowed($key));
            )*
        }
    };
}

enchantment_ids! {
    PROTECTION => "protection",
    FIRE_PROTECTION => "fire_protection",
    FEATHER_FALLING => "feather_falling",
    BLAST_PROTECTION => "blast_protection",
    PROJECTILE_PROTECTION => "projectile_protection",
    RESPIRATION => "respiration",
    AQUA_AFFINITY => "aqua_affinity",
    THORNS => "thorns",
    DEPTH_STRIDER => "depth_strider",
    FROST_WALKER => "frost_walker",
    SOUL_SPEED => "soul_speed",
    SWIFT_SNEAK => "swift_sneak",
    SHARPNESS => "sharpness",
    SMITE => "smite",
    BANE_OF_ARTHROPODS => "bane_of_arthropods",
    KNOCKBACK => "knockback",
    FIRE_ASPECT => "fire_aspect",
    LOOTING => "looting",
    SWEEPING_EDGE => "sweeping_edge",
    EFFICIENCY => "efficiency",
    SILK_TOUCH => "silk_touch",
    UNBREAKING => "unbreaking",
    FORTUNE => "fortune",
    POWER => "power",
    PUNCH => "punch",
    FLAME => "flame",
    INFINITY => "infinity",
    IMPALING => "impaling",
    RIPTIDE => "riptide",
    LOYALTY => "loyalty",
    CHANNELING => "channeling",
    MULTISHOT => "multishot",
    PIERCING => "piercing",
    QUICK_CHARGE => "quick_charge",
    LUCK_OF_THE_SEA => "luck_of_the_sea",
    LURE => "lure",
    MENDING => "mending",
    BINDING_CURSE => "binding_curse",
    VANISHING_CURSE => "vanishing_curse",
    DENSITY => "density",
    BREACH => "breach",
    WIND_BURST => "wind_burst",
}

/// Key the sweeping enchantment had before it was renamed.
const LEGACY_SWEEPING_KEY: &str = "sweeping";

impl EnchantmentId {
    /// Creates an identifier from any key, stripping a `minecraft:` namespace.
    ///
    /// The pre-1.20.5 key `sweeping` resolves to [`Self::SWEEPING_EDGE`].
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let bare = key.strip_prefix("minecraft:").unwrap_or(key.as_str());
        if bare == LEGACY_SWEEPING_KEY {
            return Self::SWEEPING_EDGE;
        }
        if bare.len() == key.len() {
            return Self(Cow::Owned(key));
        }
        Self(Cow::Owned(bare.to_string()))
    }

    /// Returns the key.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EnchantmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EnchantmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EnchantmentId {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<EnchantmentId> for String {
    fn from(id: EnchantmentId) -> Self {
        id.0.into_owned()
    }
}

impl From<&'static str> for EnchantmentId {
    fn from(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }
}

/// Attributes of one enchantment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnchantmentSpec {
    /// Cost weight per level.
    pub base_cost: u32,
    /// Highest legal level.
    pub max_level: u32,
    /// Enchantments that may never coexist with this one.
    pub conflicts: Vec<EnchantmentId>,
    /// Kind flags this enchantment may be applied to.
    pub applies_to: KindFlags,
}

/// One row of the standard table: key, base cost, max level, applicability.
type StandardRow = (EnchantmentId, u32, u32, KindFlags);

const SWORD_OR_AXE: KindFlags = KindFlags::SWORD.with(KindFlags::AXE);
const MELEE: KindFlags = SWORD_OR_AXE.with(KindFlags::MACE);

const STANDARD_TABLE: [StandardRow; 42] = [
    // Armor
    (EnchantmentId::PROTECTION, 1, 4, KindFlags::ARMOR),
    (EnchantmentId::FIRE_PROTECTION, 2, 4, KindFlags::ARMOR),
    (EnchantmentId::FEATHER_FALLING, 4, 4, KindFlags::FEET),
    (EnchantmentId::BLAST_PROTECTION, 4, 4, KindFlags::ARMOR),
    (EnchantmentId::PROJECTILE_PROTECTION, 2, 4, KindFlags::ARMOR),
    (EnchantmentId::RESPIRATION, 4, 3, KindFlags::HEAD),
    (EnchantmentId::AQUA_AFFINITY, 4, 1, KindFlags::HEAD),
    (EnchantmentId::THORNS, 8, 3, KindFlags::ARMOR),
    (EnchantmentId::DEPTH_STRIDER, 4, 3, KindFlags::FEET),
    (EnchantmentId::FROST_WALKER, 4, 2, KindFlags::FEET),
    (EnchantmentId::SOUL_SPEED, 8, 3, KindFlags::FEET),
    (EnchantmentId::SWIFT_SNEAK, 8, 3, KindFlags::LEGS),
    // Tools / weapons
    (EnchantmentId::SHARPNESS, 1, 5, SWORD_OR_AXE),
    (EnchantmentId::SMITE, 2, 5, MELEE),
    (EnchantmentId::BANE_OF_ARTHROPODS, 2, 5, MELEE),
    (EnchantmentId::KNOCKBACK, 2, 2, KindFlags::SWORD),
    (EnchantmentId::FIRE_ASPECT, 4, 2, KindFlags::SWORD.with(KindFlags::MACE)),
    (EnchantmentId::LOOTING, 4, 3, KindFlags::SWORD),
    (EnchantmentId::SWEEPING_EDGE, 4, 3, KindFlags::SWORD),
    (EnchantmentId::EFFICIENCY, 1, 5, KindFlags::MINING.with(KindFlags::SHEARS)),
    (EnchantmentId::SILK_TOUCH, 8, 1, KindFlags::MINING),
    (EnchantmentId::UNBREAKING, 2, 3, KindFlags::DAMAGEABLE),
    (EnchantmentId::FORTUNE, 4, 3, KindFlags::MINING),
    // Bows
    (EnchantmentId::POWER, 1, 5, KindFlags::BOW),
    (EnchantmentId::PUNCH, 4, 2, KindFlags::BOW),
    (EnchantmentId::FLAME, 4, 1, KindFlags::BOW),
    (EnchantmentId::INFINITY, 8, 1, KindFlags::BOW),
    // Trident
    (EnchantmentId::IMPALING, 4, 5, KindFlags::TRIDENT),
    (EnchantmentId::RIPTIDE, 4, 3, KindFlags::TRIDENT),
    (EnchantmentId::LOYALTY, 4, 3, KindFlags::TRIDENT),
    (EnchantmentId::CHANNELING, 8, 1, KindFlags::TRIDENT),
    // Crossbow
    (EnchantmentId::MULTISHOT, 4, 1, KindFlags::CROSSBOW),
    (EnchantmentId::PIERCING, 4, 4, KindFlags::CROSSBOW),
    (EnchantmentId::QUICK_CHARGE, 4, 3, KindFlags::CROSSBOW),
    // Fishing rod
    (EnchantmentId::LUCK_OF_THE_SEA, 4, 3, KindFlags::FISHING_ROD),
    (EnchantmentId::LURE, 4, 3, KindFlags::FISHING_ROD),
    // Misc
    (EnchantmentId::MENDING, 4, 1, KindFlags::DAMAGEABLE),
    (EnchantmentId::BINDING_CURSE, 8, 1, KindFlags::WEARABLE),
    (EnchantmentId::VANISHING_CURSE, 8, 1, KindFlags::DAMAGEABLE),
    // Mace (no entry in the community cost table, so weight 1)
    (EnchantmentId::DENSITY, 1, 5, KindFlags::MACE),
    (EnchantmentId::BREACH, 1, 4, KindFlags::MACE),
    (EnchantmentId::WIND_BURST, 1, 3, KindFlags::MACE),
];

/// Mutually exclusive sets: every member conflicts with every other member.
const EXCLUSIVE_SETS: [&[EnchantmentId]; 7] = [
    &[
        EnchantmentId::PROTECTION,
        EnchantmentId::FIRE_PROTECTION,
        EnchantmentId::BLAST_PROTECTION,
        EnchantmentId::PROJECTILE_PROTECTION,
    ],
    &[
        EnchantmentId::SHARPNESS,
        EnchantmentId::SMITE,
        EnchantmentId::BANE_OF_ARTHROPODS,
        EnchantmentId::IMPALING,
        EnchantmentId::DENSITY,
        EnchantmentId::BREACH,
    ],
    &[EnchantmentId::DEPTH_STRIDER, EnchantmentId::FROST_WALKER],
    &[EnchantmentId::SILK_TOUCH, EnchantmentId::FORTUNE],
    &[EnchantmentId::INFINITY, EnchantmentId::MENDING],
    &[EnchantmentId::MULTISHOT, EnchantmentId::PIERCING],
    &[EnchantmentId::RIPTIDE, EnchantmentId::LOYALTY],
];

/// One-sided exclusions (riptide excludes channeling, but loyalty and
/// channeling are compatible).
const EXCLUSIVE_PAIRS: [(EnchantmentId, EnchantmentId); 1] =
    [(EnchantmentId::RIPTIDE, EnchantmentId::CHANNELING)];

/// Fallback weights for identifiers the table does not know.
const UNKNOWN_BASE_COST: u32 = 1;
const UNKNOWN_MAX_LEVEL: u32 = 1;

/// The enchantment table consulted by the engine.
#[derive(Clone, Debug, Default)]
pub struct EnchantmentRegistry {
    specs: HashMap<EnchantmentId, EnchantmentSpec>,
}

impl EnchantmentRegistry {
    /// Creates an empty registry (every query uses fallback weights).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the shared standard table, built on first use.
    #[must_use]
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<EnchantmentRegistry> = OnceLock::new();
        STANDARD.get_or_init(Self::build_standard)
    }

    fn build_standard() -> Self {
        let mut specs: HashMap<EnchantmentId, EnchantmentSpec> = STANDARD_TABLE
            .iter()
            .map(|(id, base_cost, max_level, applies_to)| {
                (
                    id.clone(),
                    EnchantmentSpec {
                        base_cost: *base_cost,
                        max_level: *max_level,
                        conflicts: Vec::new(),
                        applies_to: *applies_to,
                    },
                )
            })
            .collect();

        for set in EXCLUSIVE_SETS {
            for member in set {
                if let Some(spec) = specs.get_mut(member) {
                    spec.conflicts
                        .extend(set.iter().filter(|other| *other != member).cloned());
                }
            }
        }
        for (a, b) in EXCLUSIVE_PAIRS {
            if let Some(spec) = specs.get_mut(&a) {
                spec.conflicts.push(b);
            }
        }

        Self { specs }
    }

    /// Builds the standard table with a TOML override document applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or an override
    /// violates a table invariant.
    pub fn from_toml_str(document: &str) -> EngineResult<Self> {
        let overrides: RegistryOverrides = toml::from_str(document)?;
        Self::standard().clone().with_overrides(&overrides.enchantment)
    }

    /// Applies overrides on top of this registry.
    ///
    /// Fields left out of an override keep their current value; a new key
    /// starts from the fallback weights.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` for a zero base cost or max
    /// level, and `EngineError::UnknownKindFlag` for bad applicability names.
    pub fn with_overrides(mut self, overrides: &[EnchantmentOverride]) -> EngineResult<Self> {
        for entry in overrides {
            let id = EnchantmentId::new(entry.key.clone());
            let spec = self.specs.entry(id.clone()).or_insert_with(|| EnchantmentSpec {
                base_cost: UNKNOWN_BASE_COST,
                max_level: UNKNOWN_MAX_LEVEL,
                conflicts: Vec::new(),
                applies_to: KindFlags::NONE,
            });

            if let Some(base_cost) = entry.base_cost {
                if base_cost == 0 {
                    return Err(EngineError::InvalidConfig(format!(
                        "enchantment {id} must have base_cost >= 1"
                    )));
                }
                spec.base_cost = base_cost;
            }
            if let Some(max_level) = entry.max_level {
                if max_level == 0 {
                    return Err(EngineError::InvalidConfig(format!(
                        "enchantment {id} must have max_level >= 1"
                    )));
                }
                spec.max_level = max_level;
            }
            if let Some(names) = &entry.applies_to {
                spec.applies_to = names.iter().try_fold(KindFlags::NONE, |acc, name| {
                    KindFlags::from_name(name).map(|flag| acc.with(flag))
                })?;
            }
            if let Some(conflicts) = &entry.conflicts {
                spec.conflicts = conflicts
                    .iter()
                    .map(|key| EnchantmentId::new(key.clone()))
                    .filter(|other| *other != id)
                    .collect();
            }
        }
        Ok(self)
    }

    /// Returns the spec for a known enchantment.
    #[must_use]
    pub fn spec(&self, id: &EnchantmentId) -> Option<&EnchantmentSpec> {
        self.specs.get(id)
    }

    /// Number of enchantments in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Cost weight per level (always at least 1).
    #[must_use]
    pub fn base_cost(&self, id: &EnchantmentId) -> u32 {
        self.spec(id).map_or(UNKNOWN_BASE_COST, |spec| spec.base_cost)
    }

    /// Highest legal level (always at least 1).
    #[must_use]
    pub fn max_level(&self, id: &EnchantmentId) -> u32 {
        self.spec(id).map_or(UNKNOWN_MAX_LEVEL, |spec| spec.max_level)
    }

    /// Returns true if `a` and `b` may not coexist. Symmetric and irreflexive.
    #[must_use]
    pub fn conflicts_with(&self, a: &EnchantmentId, b: &EnchantmentId) -> bool {
        if a == b {
            return false;
        }
        let lists = |x: &EnchantmentId, y: &EnchantmentId| {
            self.spec(x).is_some_and(|spec| spec.conflicts.contains(y))
        };
        lists(a, b) || lists(b, a)
    }

    /// Returns true if the enchantment may be applied to items of `kind`.
    #[must_use]
    pub fn is_applicable(&self, id: &EnchantmentId, kind: ItemKind) -> bool {
        self.spec(id)
            .is_some_and(|spec| kind.flags().has(spec.applies_to))
    }
}

/// One `[[enchantment]]` entry of an override document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnchantmentOverride {
    /// Enchantment key.
    pub key: String,
    /// Replacement cost weight.
    #[serde(default)]
    pub base_cost: Option<u32>,
    /// Replacement max level.
    #[serde(default)]
    pub max_level: Option<u32>,
    /// Replacement applicability, as kind flag names.
    #[serde(default)]
    pub applies_to: Option<Vec<String>>,
    /// Replacement conflict list.
    #[serde(default)]
    pub conflicts: Option<Vec<String>>,
}

/// Top-level shape of an override document.
#[derive(Clone, Debug, Default, Deserialize)]
struct RegistryOverrides {
    #[serde(default)]
    enchantment: Vec<EnchantmentOverride>,
}
