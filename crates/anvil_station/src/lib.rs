//! # Anvil Station
//!
//! Host-side glue around [`anvil_engine`]: everything the pure engine
//! leaves to its caller.
//!
//! ## Responsibilities
//!
//! 1. **Fresh reads** - Slots are snapshotted on every evaluation
//! 2. **Prior work** - The repair-use counter lives in a persistent tag
//! 3. **Level gate** - `levels >= cost`, waived for creative players
//! 4. **No ceiling by default** - A cost cap only exists when configured
//! 5. **Cost indicator** - Per-player bar, drained by the UI as events
//!
//! ## Example
//!
//! ```rust
//! use anvil_engine::{ItemKind, ToolShape, ToolTier};
//! use anvil_station::{AnvilStation, Player, StoredItem};
//!
//! let station = AnvilStation::default();
//! let mut player = Player::new(1, 5);
//! let mut session = station.open();
//! session.set_left(Some(StoredItem::new(ItemKind::Tool(ToolTier::Iron, ToolShape::Axe))));
//! session.set_rename_text(Some("Splitter".to_string()));
//!
//! let outcome = session.prepare(Some(&player));
//! assert_eq!(outcome.cost, 1);
//!
//! let axe = session.take_result(&mut player).expect("affordable");
//! assert_eq!(axe.display_name.as_deref(), Some("Splitter"));
//! assert_eq!(player.level, 4);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod indicator;
pub mod persist;
pub mod session;
pub mod station;

pub use config::{CostCap, StationConfig, DEFAULT_USES_KEY};
pub use error::{StationError, StationResult};
pub use indicator::{
    CostIndicator, GameMode, IndicatorColor, IndicatorEvent, IndicatorState, Player, PlayerId,
};
pub use persist::{PriorWorkStore, StoredItem, TagMap};
pub use session::AnvilSession;
pub use station::AnvilStation;
