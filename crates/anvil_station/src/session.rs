//! # Anvil Session
//!
//! One player's use of one anvil: two input slots and the rename field.
//!
//! ## Flow
//!
//! ```text
//! set_left / set_right / set_rename_text
//!         │
//!         ▼
//!     prepare() ──> engine evaluate ──> cost indicator
//!         │
//!         ▼
//!   take_result() ──> cap check ──> level gate ──> commit slots
//! ```
//!
//! Slots are snapshotted fresh on every `prepare` and `take_result`, so a
//! result is always priced against what the slots hold right now.

use anvil_engine::{evaluate_with, CombinationOutcome, CombineMode, ItemSnapshot};

use crate::config::CostCap;
use crate::error::{StationError, StationResult};
use crate::indicator::Player;
use crate::persist::StoredItem;
use crate::station::AnvilStation;

/// Slot contents of an open anvil.
pub struct AnvilSession<'s> {
    /// Shared station state.
    station: &'s AnvilStation,
    /// Item being worked on.
    left: Option<StoredItem>,
    /// Sacrifice, book or repair material.
    right: Option<StoredItem>,
    /// Text typed into the rename field.
    rename_text: Option<String>,
}

impl<'s> AnvilSession<'s> {
    /// Creates an empty session.
    #[must_use]
    pub const fn new(station: &'s AnvilStation) -> Self {
        Self {
            station,
            left: None,
            right: None,
            rename_text: None,
        }
    }

    /// Puts an item in the left slot, returning what was there.
    pub fn set_left(&mut self, item: Option<StoredItem>) -> Option<StoredItem> {
        std::mem::replace(&mut self.left, item)
    }

    /// Puts an item in the right slot, returning what was there.
    pub fn set_right(&mut self, item: Option<StoredItem>) -> Option<StoredItem> {
        std::mem::replace(&mut self.right, item)
    }

    /// Sets the rename field.
    pub fn set_rename_text(&mut self, text: Option<String>) {
        self.rename_text = text;
    }

    /// Left slot contents.
    #[must_use]
    pub const fn left(&self) -> Option<&StoredItem> {
        self.left.as_ref()
    }

    /// Right slot contents.
    #[must_use]
    pub const fn right(&self) -> Option<&StoredItem> {
        self.right.as_ref()
    }

    /// Rename field contents.
    #[must_use]
    pub fn rename_text(&self) -> Option<&str> {
        self.rename_text.as_deref()
    }

    /// Evaluates the current slots without touching the indicator.
    #[must_use]
    pub fn evaluate(&self) -> CombinationOutcome {
        let store = self.station.store();
        let left = self
            .left
            .as_ref()
            .map_or_else(ItemSnapshot::default, |item| item.snapshot(store));
        let right = self.right.as_ref().map(|item| item.snapshot(store));
        evaluate_with(
            self.station.registry(),
            &left,
            right.as_ref(),
            self.rename_text.as_deref(),
        )
    }

    /// Evaluates the current slots and refreshes `viewer`'s cost bar.
    ///
    /// The outcome is returned unclamped even when a cost cap would stop it
    /// from being taken, so the UI can show the real price.
    #[must_use]
    pub fn prepare(&self, viewer: Option<&Player>) -> CombinationOutcome {
        let outcome = self.evaluate();
        if !outcome.is_refused() && !self.station.cost_cap().admits(outcome.cost) {
            tracing::debug!(
                "Anvil result costs {} which reaches cap {:?}",
                outcome.cost,
                self.station.cost_cap()
            );
        }
        self.refresh_indicator(viewer, &outcome);
        outcome
    }

    /// Takes the result: charges `player`, consumes inputs, returns the item.
    ///
    /// # Errors
    ///
    /// - `NoResult` if the slots do not produce anything
    /// - `CostAboveCap` if a configured cap rejects the cost
    /// - `InsufficientLevels` if a non-creative player cannot pay
    ///
    /// On error no slot or level is touched.
    pub fn take_result(&mut self, player: &mut Player) -> StationResult<StoredItem> {
        let outcome = self.evaluate();
        let output = outcome.produced.as_ref().ok_or(StationError::NoResult)?;
        let cost = outcome.cost;

        if let CostCap::Capped(cap) = self.station.cost_cap() {
            if cost >= cap {
                return Err(StationError::CostAboveCap { cost, cap });
            }
        }
        if !player.can_afford(cost) {
            return Err(StationError::InsufficientLevels {
                required: cost,
                available: player.level,
            });
        }
        let mut committed = self.left.take().ok_or(StationError::NoResult)?;

        committed.apply(output, self.station.store());
        match outcome.mode {
            CombineMode::UnitRepair => self.consume_right(outcome.material_units_consumed),
            CombineMode::SameKindMerge | CombineMode::EnchantMerge => self.right = None,
            CombineMode::RenameOnly | CombineMode::EmptyLeft => {}
        }
        if !player.is_privileged() {
            player.level = player.level.saturating_sub(cost);
        }
        self.rename_text = None;

        tracing::info!(
            "Player {} took anvil result {} ({:?}) for {} levels",
            player.id.0,
            committed.kind,
            outcome.mode,
            cost
        );

        let remaining = self.evaluate();
        self.refresh_indicator(Some(&*player), &remaining);
        Ok(committed)
    }

    /// Closes the session, hiding the cost bar and handing back both slots.
    pub fn close(self, player: &Player) -> (Option<StoredItem>, Option<StoredItem>) {
        self.station.indicator().hide(player.id);
        (self.left, self.right)
    }

    fn consume_right(&mut self, units: u32) {
        let Some(right) = self.right.as_mut() else {
            return;
        };
        let units = i32::try_from(units).unwrap_or(i32::MAX);
        right.amount = right.amount.saturating_sub(units);
        if right.amount <= 0 {
            self.right = None;
        }
    }

    fn refresh_indicator(&self, viewer: Option<&Player>, outcome: &CombinationOutcome) {
        let indicator = self.station.indicator();
        if !indicator.is_enabled() {
            return;
        }
        let Some(player) = viewer else {
            tracing::warn!("Anvil cost indicator skipped: no player session");
            return;
        };
        if outcome.is_refused() {
            indicator.hide(player.id);
        } else {
            indicator.show_or_update(player, outcome.cost);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_engine::{EnchantmentId, ItemKind, Material, ToolShape, ToolTier};

    fn sword() -> StoredItem {
        StoredItem::new(ItemKind::Tool(ToolTier::Iron, ToolShape::Sword))
    }

    #[test]
    fn test_empty_session_has_no_result() {
        let station = AnvilStation::default();
        let mut session = station.open();
        let mut player = Player::new(1, 10);
        assert!(session.evaluate().is_refused());
        assert_eq!(
            session.take_result(&mut player),
            Err(StationError::NoResult)
        );
    }

    #[test]
    fn test_rename_commit() {
        let station = AnvilStation::default();
        let mut session = station.open();
        let mut player = Player::new(1, 10);
        session.set_left(Some(sword()));
        session.set_rename_text(Some("Edge".to_string()));

        let committed = session.take_result(&mut player).unwrap();
        assert_eq!(committed.display_name.as_deref(), Some("Edge"));
        assert_eq!(player.level, 9);
        assert!(session.left().is_none());
        assert!(session.rename_text().is_none());
    }

    #[test]
    fn test_partial_unit_repair_leaves_material() {
        let station = AnvilStation::default();
        let mut session = station.open();
        let mut player = Player::new(1, 10);
        let mut left = sword();
        left.damage = 100;
        let mut ingots = StoredItem::new(ItemKind::Material(Material::IronIngot));
        ingots.amount = 10;
        session.set_left(Some(left));
        session.set_right(Some(ingots));

        // max 250, per unit 62, needs 2
        let committed = session.take_result(&mut player).unwrap();
        assert_eq!(committed.damage, 0);
        assert_eq!(session.right().map(|item| item.amount), Some(8));
        assert_eq!(player.level, 8);
        assert_eq!(station.store().read(&committed), 1);
    }

    #[test]
    fn test_failed_take_touches_nothing() {
        let station = AnvilStation::default();
        let mut session = station.open();
        let mut player = Player::new(1, 0);
        let mut book = StoredItem::new(ItemKind::EnchantedBook);
        book.enchantments.insert(EnchantmentId::SHARPNESS, 5);
        session.set_left(Some(sword()));
        session.set_right(Some(book));

        let err = session.take_result(&mut player).unwrap_err();
        assert_eq!(
            err,
            StationError::InsufficientLevels {
                required: 3,
                available: 0
            }
        );
        assert!(session.left().is_some());
        assert!(session.right().is_some());
    }
}
