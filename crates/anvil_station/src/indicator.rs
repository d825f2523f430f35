//! # Cost Indicator
//!
//! An always-visible bar that tells each player what the current anvil
//! result costs and whether they can pay for it.
//!
//! The indicator only keeps state. Rendering belongs to the UI, which
//! drains [`IndicatorEvent`]s every frame.
//!
//! Nothing here can fail: a player without a bar is simply skipped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::CostCap;

/// Unique player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

/// Game mode of a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Normal play, levels are charged.
    #[default]
    Survival,
    /// Free building, anvil costs are waived.
    Creative,
    /// Adventure maps.
    Adventure,
    /// Observer.
    Spectator,
}

/// The parts of a player the anvil cares about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player identity.
    pub id: PlayerId,
    /// Experience level.
    pub level: u32,
    /// Current game mode.
    pub game_mode: GameMode,
}

impl Player {
    /// Creates a survival player.
    #[must_use]
    pub const fn new(id: u64, level: u32) -> Self {
        Self {
            id: PlayerId(id),
            level,
            game_mode: GameMode::Survival,
        }
    }

    /// Sets the game mode.
    #[must_use]
    pub const fn with_game_mode(mut self, game_mode: GameMode) -> Self {
        self.game_mode = game_mode;
        self
    }

    /// Returns true if this player skips the level gate.
    #[inline]
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        matches!(self.game_mode, GameMode::Creative)
    }

    /// Returns true if this player may pay `cost` levels.
    #[inline]
    #[must_use]
    pub const fn can_afford(&self, cost: u32) -> bool {
        self.is_privileged() || self.level >= cost
    }
}

/// Bar colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorColor {
    /// The player can take the result.
    Green,
    /// The player cannot afford the result, or it is over the cost cap.
    Red,
}

/// What one player's bar currently shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorState {
    /// Level cost shown.
    pub cost: u32,
    /// Bar title, e.g. `Anvil cost: 12`.
    pub title: String,
    /// Bar colour.
    pub color: IndicatorColor,
    /// Fill fraction in `0.0..=1.0`.
    pub progress: f64,
}

impl IndicatorState {
    /// Computes the bar for `player` looking at a result of `cost`.
    ///
    /// A result the cap rejects is red for everyone, creative players
    /// included. The title still shows the full price.
    #[must_use]
    pub fn for_player(player: &Player, cost: u32, cap: CostCap) -> Self {
        let color = if cap.admits(cost) && player.can_afford(cost) {
            IndicatorColor::Green
        } else {
            IndicatorColor::Red
        };
        let progress = if player.is_privileged() || cost == 0 {
            1.0
        } else {
            f64::from(player.level.min(cost)) / f64::from(cost)
        };
        Self {
            cost,
            title: format!("Anvil cost: {cost}"),
            color,
            progress,
        }
    }
}

/// Indicator change for the UI.
#[derive(Clone, Debug, PartialEq)]
pub enum IndicatorEvent {
    /// A bar appeared.
    Shown {
        /// Owner of the bar.
        player: PlayerId,
        /// What it shows.
        state: IndicatorState,
    },
    /// An existing bar changed.
    Updated {
        /// Owner of the bar.
        player: PlayerId,
        /// What it shows now.
        state: IndicatorState,
    },
    /// A bar was removed.
    Hidden {
        /// Former owner of the bar.
        player: PlayerId,
    },
}

/// Per-player cost bars.
pub struct CostIndicator {
    /// Whether bars are shown at all.
    enabled: bool,
    /// Cap that decides whether a result can be taken at all.
    cap: CostCap,
    /// Current bar per player.
    bars: parking_lot::RwLock<HashMap<PlayerId, IndicatorState>>,
    /// Event buffer for the UI.
    event_buffer: parking_lot::Mutex<Vec<IndicatorEvent>>,
}

impl CostIndicator {
    /// Creates an indicator. A disabled indicator ignores every call.
    #[must_use]
    pub fn new(enabled: bool, cap: CostCap) -> Self {
        Self {
            enabled,
            cap,
            bars: parking_lot::RwLock::new(HashMap::new()),
            event_buffer: parking_lot::Mutex::new(Vec::with_capacity(64)),
        }
    }

    /// Returns true if bars are shown.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Shows a bar for `player`, or updates the one already shown.
    pub fn show_or_update(&self, player: &Player, cost: u32) {
        if !self.enabled {
            return;
        }
        let state = IndicatorState::for_player(player, cost, self.cap);
        let previous = self.bars.write().insert(player.id, state.clone());

        let event = match previous {
            Some(previous) if previous == state => return,
            Some(_) => IndicatorEvent::Updated {
                player: player.id,
                state,
            },
            None => IndicatorEvent::Shown {
                player: player.id,
                state,
            },
        };
        self.event_buffer.lock().push(event);
    }

    /// Removes the bar for `player`. Returns true if one was shown.
    pub fn hide(&self, player: PlayerId) -> bool {
        if self.bars.write().remove(&player).is_none() {
            return false;
        }
        self.event_buffer.lock().push(IndicatorEvent::Hidden { player });
        true
    }

    /// The bar currently shown to `player`.
    #[must_use]
    pub fn state(&self, player: PlayerId) -> Option<IndicatorState> {
        self.bars.read().get(&player).cloned()
    }

    /// Number of players with a visible bar.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.bars.read().len()
    }

    /// Drains all pending indicator events.
    ///
    /// The UI should call this every frame.
    pub fn drain_events(&self) -> Vec<IndicatorEvent> {
        let mut events = self.event_buffer.lock();
        std::mem::take(&mut *events)
    }

    /// Peeks at pending event count (for debug UI).
    #[must_use]
    pub fn pending_event_count(&self) -> usize {
        self.event_buffer.lock().len()
    }
}

impl Default for CostIndicator {
    fn default() -> Self {
        Self::new(true, CostCap::Uncapped)
    }
}

// Thread safety is guaranteed by:
// - parking_lot::RwLock for bars
// - parking_lot::Mutex for event_buffer

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_for_affordable_cost() {
        let state = IndicatorState::for_player(&Player::new(1, 30), 12, CostCap::Uncapped);
        assert_eq!(state.title, "Anvil cost: 12");
        assert_eq!(state.color, IndicatorColor::Green);
        assert!((state.progress - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_state_for_unaffordable_cost() {
        let state = IndicatorState::for_player(&Player::new(1, 10), 40, CostCap::Uncapped);
        assert_eq!(state.color, IndicatorColor::Red);
        assert!((state.progress - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_creative_is_always_full() {
        let player = Player::new(1, 0).with_game_mode(GameMode::Creative);
        let state = IndicatorState::for_player(&player, 500, CostCap::Uncapped);
        assert_eq!(state.color, IndicatorColor::Green);
        assert!((state.progress - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_capped_cost_is_red_for_everyone() {
        let cap = CostCap::Capped(40);
        let rich = IndicatorState::for_player(&Player::new(1, 1000), 98, cap);
        assert_eq!(rich.title, "Anvil cost: 98");
        assert_eq!(rich.color, IndicatorColor::Red);

        let creative = Player::new(2, 0).with_game_mode(GameMode::Creative);
        let state = IndicatorState::for_player(&creative, 40, cap);
        assert_eq!(state.color, IndicatorColor::Red);

        let state = IndicatorState::for_player(&creative, 39, cap);
        assert_eq!(state.color, IndicatorColor::Green);
    }

    #[test]
    fn test_event_lifecycle() {
        let indicator = CostIndicator::new(true, CostCap::Uncapped);
        let player = Player::new(7, 5);

        indicator.show_or_update(&player, 3);
        indicator.show_or_update(&player, 3);
        indicator.show_or_update(&player, 9);
        assert!(indicator.hide(player.id));
        assert!(!indicator.hide(player.id));

        let events = indicator.drain_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], IndicatorEvent::Shown { .. }));
        assert!(matches!(
            &events[1],
            IndicatorEvent::Updated { state, .. } if state.color == IndicatorColor::Red
        ));
        assert_eq!(events[2], IndicatorEvent::Hidden { player: PlayerId(7) });
        assert_eq!(indicator.pending_event_count(), 0);
    }

    #[test]
    fn test_disabled_indicator_is_silent() {
        let indicator = CostIndicator::new(false, CostCap::Uncapped);
        indicator.show_or_update(&Player::new(1, 1), 5);
        assert_eq!(indicator.active_count(), 0);
        assert!(indicator.drain_events().is_empty());
    }
}
