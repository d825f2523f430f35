//! # Anvil Engine
//!
//! Pure combination and cost rules for an anvil with no level cap.
//!
//! ## Design Principles
//!
//! 1. **Pure evaluation** - Snapshots in, outcome out. No session state, no I/O
//! 2. **Integer math only** - Durability bonus and book halving use integer division
//! 3. **No ceiling** - Cost grows as far as prior work and enchantments take it
//! 4. **Deterministic merges** - Enchantments are folded in key order
//!
//! ## Thread Safety
//!
//! Every public function takes shared references. The standard enchantment
//! table is built once and may be read from any thread.
//!
//! ## Example
//!
//! ```rust
//! use anvil_engine::{evaluate, EnchantmentId, ItemKind, ItemSnapshot, ToolShape, ToolTier};
//!
//! let sword = ItemSnapshot::new(ItemKind::Tool(ToolTier::Diamond, ToolShape::Sword))
//!     .with_enchantment(EnchantmentId::SHARPNESS, 4);
//! let book = ItemSnapshot::new(ItemKind::EnchantedBook)
//!     .with_enchantment(EnchantmentId::SHARPNESS, 4);
//!
//! let outcome = evaluate(&sword, Some(&book), None);
//! let result = outcome.produced.expect("sharpness upgrades");
//! assert_eq!(result.enchantment_level(&EnchantmentId::SHARPNESS), 5);
//! assert_eq!(outcome.cost, 3);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod change;
pub mod combine;
pub mod cost;
pub mod enchantment;
pub mod error;
pub mod item;
pub mod kind;
pub mod repair;

pub use change::changed;
pub use combine::{evaluate, evaluate_with, CombinationOutcome, CombineMode};
pub use cost::{combination_cost, prior_work_penalty, unit_repair_cost};
pub use enchantment::{EnchantmentId, EnchantmentOverride, EnchantmentRegistry, EnchantmentSpec};
pub use error::{EngineError, EngineResult};
pub use item::{EnchantmentMap, ItemSnapshot};
pub use kind::{ArmorSlot, ArmorTier, Gear, ItemKind, KindFlags, Material, ToolShape, ToolTier, Wood};
pub use repair::UnitRepairPlan;
