//! End-to-end anvil sessions: pricing, gating, commit and indicator.

use anvil_engine::{ArmorSlot, ArmorTier, EnchantmentId, ItemKind, ToolShape, ToolTier};
use anvil_station::{
    AnvilStation, GameMode, IndicatorColor, IndicatorEvent, Player, PlayerId, StationError,
    StoredItem,
};

fn book(id: EnchantmentId, level: u32) -> StoredItem {
    let mut item = StoredItem::new(ItemKind::EnchantedBook);
    item.enchantments.insert(id, level);
    item
}

/// Worked boots plus a loaded book: 63 + 3 + 8 + 12 + 12 = 98 levels.
fn load_expensive(station: &AnvilStation, session: &mut anvil_station::AnvilSession<'_>) {
    let mut boots = StoredItem::new(ItemKind::Armor(ArmorTier::Netherite, ArmorSlot::Boots));
    station.store().write(&mut boots, 6);

    let mut loaded = book(EnchantmentId::FEATHER_FALLING, 4);
    loaded.enchantments.insert(EnchantmentId::SOUL_SPEED, 3);
    loaded.enchantments.insert(EnchantmentId::THORNS, 3);
    station.store().write(&mut loaded, 2);

    session.set_left(Some(boots));
    session.set_right(Some(loaded));
}

#[test]
fn test_uncapped_result_above_forty() {
    let station = AnvilStation::default();
    let mut session = station.open();
    load_expensive(&station, &mut session);
    let mut player = Player::new(1, 100);

    let outcome = session.prepare(Some(&player));
    assert_eq!(outcome.cost, 98);

    let boots = session.take_result(&mut player).unwrap();
    assert_eq!(player.level, 2);
    assert_eq!(station.store().read(&boots), 7);
    assert_eq!(boots.repair_cost, 7);
    assert_eq!(boots.enchantments.len(), 3);
    assert!(session.right().is_none());
    assert!(session.left().is_none());
}

#[test]
fn test_configured_cap_is_too_expensive() {
    let station = AnvilStation::from_toml_str("max_cost = 40").unwrap();
    let mut session = station.open();
    load_expensive(&station, &mut session);
    let mut player = Player::new(1, 1000);

    // The price is still shown in full, but the bar warns it cannot be taken
    let outcome = session.prepare(Some(&player));
    assert_eq!(outcome.cost, 98);
    assert!(outcome.produced.is_some());
    let state = station.indicator().state(player.id).unwrap();
    assert_eq!(state.title, "Anvil cost: 98");
    assert_eq!(state.color, IndicatorColor::Red);

    assert_eq!(
        session.take_result(&mut player),
        Err(StationError::CostAboveCap { cost: 98, cap: 40 })
    );
    assert_eq!(player.level, 1000);
    assert!(session.left().is_some());
}

#[test]
fn test_creative_bypasses_level_gate() {
    let station = AnvilStation::default();
    let mut session = station.open();
    load_expensive(&station, &mut session);
    let mut player = Player::new(1, 0).with_game_mode(GameMode::Creative);

    assert!(session.take_result(&mut player).is_ok());
    assert_eq!(player.level, 0);
}

#[test]
fn test_indicator_follows_affordability() {
    let station = AnvilStation::default();
    let mut session = station.open();
    load_expensive(&station, &mut session);

    let poor = Player::new(9, 49);
    let _ = session.prepare(Some(&poor));
    let state = station.indicator().state(PlayerId(9)).unwrap();
    assert_eq!(state.title, "Anvil cost: 98");
    assert_eq!(state.color, IndicatorColor::Red);
    assert!((state.progress - 0.5).abs() < f64::EPSILON);

    let rich = Player::new(9, 200);
    let _ = session.prepare(Some(&rich));
    let (left, right) = session.close(&rich);
    assert!(left.is_some() && right.is_some());

    let events = station.indicator().drain_events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], IndicatorEvent::Shown { .. }));
    assert!(matches!(
        &events[1],
        IndicatorEvent::Updated { state, .. } if state.color == IndicatorColor::Green
    ));
    assert_eq!(events[2], IndicatorEvent::Hidden { player: PlayerId(9) });
    assert_eq!(station.indicator().active_count(), 0);
}

#[test]
fn test_missing_viewer_degrades_silently() {
    let station = AnvilStation::default();
    let mut session = station.open();
    load_expensive(&station, &mut session);

    let outcome = session.prepare(None);
    assert_eq!(outcome.cost, 98);
    assert_eq!(station.indicator().pending_event_count(), 0);
}

#[test]
fn test_disabled_indicator_still_commits() {
    let station = AnvilStation::from_toml_str("show_cost_indicator = false").unwrap();
    let mut session = station.open();
    load_expensive(&station, &mut session);
    let mut player = Player::new(3, 98);

    assert!(session.take_result(&mut player).is_ok());
    assert_eq!(player.level, 0);
    assert!(station.indicator().drain_events().is_empty());
}

#[test]
fn test_legacy_repair_cost_fallback() {
    let mut sword = StoredItem::new(ItemKind::Tool(ToolTier::Iron, ToolShape::Sword));
    sword.repair_cost = 3;

    let station = AnvilStation::default();
    let mut session = station.open();
    session.set_left(Some(sword.clone()));
    session.set_right(Some(book(EnchantmentId::UNBREAKING, 1)));
    // 2^3 - 1 prior work, unbreaking (2 + 1) / 2
    assert_eq!(session.evaluate().cost, 8);

    let mut player = Player::new(1, 30);
    let committed = session.take_result(&mut player).unwrap();
    assert_eq!(committed.tags.get("anvil_uses"), Some(&4));
    assert_eq!(committed.repair_cost, 4);

    let strict = AnvilStation::from_toml_str("legacy_repair_cost_fallback = false").unwrap();
    let mut session = strict.open();
    session.set_left(Some(sword.clone()));
    session.set_right(Some(book(EnchantmentId::UNBREAKING, 1)));
    assert_eq!(session.evaluate().cost, 1);

    // Renaming never touches the legacy field
    let mut session = strict.open();
    session.set_left(Some(sword));
    session.set_rename_text(Some("Keepsake".to_string()));
    let renamed = session.take_result(&mut player).unwrap();
    assert_eq!(renamed.display_name.as_deref(), Some("Keepsake"));
    assert_eq!(renamed.repair_cost, 3);
    assert!(renamed.tags.is_empty());
}

#[test]
fn test_prior_work_compounds_across_sessions() {
    let station = AnvilStation::default();
    let mut player = Player::new(1, 100);
    let mut pickaxe = StoredItem::new(ItemKind::Tool(ToolTier::Diamond, ToolShape::Pickaxe));

    let steps = [
        (EnchantmentId::EFFICIENCY, 1),
        (EnchantmentId::UNBREAKING, 2),
        (EnchantmentId::FORTUNE, 5),
    ];
    for (id, expected_cost) in steps {
        let mut session = station.open();
        session.set_left(Some(pickaxe));
        session.set_right(Some(book(id, 1)));
        assert_eq!(session.evaluate().cost, expected_cost);
        pickaxe = session.take_result(&mut player).unwrap();
    }

    assert_eq!(station.store().read(&pickaxe), 3);
    assert_eq!(player.level, 100 - 8);
}

#[test]
fn test_enchantment_overrides_reprice() {
    let station = AnvilStation::from_toml_str(
        r#"
        [[enchantment]]
        key = "efficiency"
        base_cost = 10
        "#,
    )
    .unwrap();
    let mut session = station.open();
    session.set_left(Some(StoredItem::new(ItemKind::Tool(
        ToolTier::Iron,
        ToolShape::Shovel,
    ))));
    session.set_right(Some(book(EnchantmentId::EFFICIENCY, 3)));

    // (10 * 3 + 1) / 2
    assert_eq!(session.evaluate().cost, 15);
}
