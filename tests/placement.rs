mod common;

use chrono::Utc;
use skyline::{
    grid::TileId,
    territory::ChunkId,
    world::{GameRules, PlaceOutcome, PurchasePrompt, ToolOutcome, FUNDS_WARNING, TERRAIN_WARNING},
    zone::ZoneType,
    messages::Severity,
};

use common::{default_flat_game, flat_game};

#[test]
fn terrain_is_never_built_on() {
    let mut state = default_flat_game();
    let now = Utc::now();
    let water = TileId::new(12, 14);
    let rock = TileId::new(13, 14);
    state.grid.set_zone(water, ZoneType::Water);
    state.grid.set_zone(rock, ZoneType::Rock);
    let before = state.grid.clone();

    for tile in [water, rock] {
        for zone in [ZoneType::Road, ZoneType::Empty, ZoneType::Hospital] {
            assert_eq!(state.place(tile, zone, now), PlaceOutcome::Terrain);
        }
    }
    assert_eq!(state.grid, before);
    assert_eq!(state.stats.treasury, 150_000);
    let latest = state.messages.latest().unwrap();
    assert_eq!(latest.text, TERRAIN_WARNING);
    assert_eq!(latest.severity, Severity::Warning);
}

#[test]
fn locked_sector_prompts_instead_of_building() {
    let mut state = default_flat_game();
    let before = state.grid.clone();
    let outcome = state.place(TileId::new(3, 3), ZoneType::Road, Utc::now());
    let prompt = PurchasePrompt {
        chunk: ChunkId::new(0, 0),
        cost: 75_000,
    };
    assert_eq!(outcome, PlaceOutcome::Locked(prompt));
    assert_eq!(state.purchase_prompt, Some(prompt));
    assert_eq!(state.grid, before);
    assert_eq!(state.stats.treasury, 150_000);
}

#[test]
fn unmapped_sector_uses_default_price() {
    let rules = GameRules {
        grid_size: 40,
        ..GameRules::default()
    };
    let mut state = flat_game(rules);
    let outcome = state.place(TileId::new(35, 5), ZoneType::Road, Utc::now());
    assert_eq!(
        outcome,
        PlaceOutcome::Locked(PurchasePrompt {
            chunk: ChunkId::new(3, 0),
            cost: 50_000
        })
    );
}

#[test]
fn placement_debits_zone_cost() {
    let mut state = default_flat_game();
    let now = Utc::now();
    let tile = TileId::new(10, 10);
    assert_eq!(
        state.place(tile, ZoneType::ResidentialLow, now),
        PlaceOutcome::Placed {
            previous: ZoneType::Empty,
            cost: 100
        }
    );
    assert_eq!(state.stats.treasury, 149_900);
    assert_eq!(state.place(tile, ZoneType::ResidentialLow, now), PlaceOutcome::Unchanged);
    assert_eq!(state.stats.treasury, 149_900);

    state.place(TileId::new(11, 10), ZoneType::Hospital, now);
    assert_eq!(state.stats.treasury, 134_900);
}

#[test]
fn insufficient_funds_warns_and_keeps_tile() {
    let mut state = default_flat_game();
    state.stats.treasury = 7_999;
    let tile = TileId::new(15, 15);
    assert_eq!(
        state.place(tile, ZoneType::PowerPlant, Utc::now()),
        PlaceOutcome::InsufficientFunds {
            cost: 8_000,
            treasury: 7_999
        }
    );
    assert_eq!(state.zone_at(tile), Some(ZoneType::Empty));
    assert_eq!(state.messages.latest().unwrap().text, FUNDS_WARNING);
}

#[test]
fn tool_markers_and_terrain_are_not_placeable() {
    let mut state = default_flat_game();
    let tile = TileId::new(15, 15);
    for zone in [ZoneType::Move, ZoneType::Water, ZoneType::Rock] {
        assert_eq!(state.place(tile, zone, Utc::now()), PlaceOutcome::NotPlaceable);
    }
    assert_eq!(state.zone_at(tile), Some(ZoneType::Empty));
}

#[test]
fn clear_land_tool_is_free() {
    let mut state = default_flat_game();
    let now = Utc::now();
    let tile = TileId::new(19, 19);
    state.place(tile, ZoneType::Road, now);
    state.set_tool(ZoneType::Empty);
    assert_eq!(
        state.apply_tool(tile, now),
        ToolOutcome::Place(PlaceOutcome::Placed {
            previous: ZoneType::Road,
            cost: 0
        })
    );
    assert_eq!(state.stats.treasury, 149_950);
}

#[test]
fn configured_costs_apply() {
    let mut rules = GameRules::default();
    rules.zones.overrides.insert(ZoneType::Road, 5);
    let mut state = flat_game(rules);
    state.place(TileId::new(10, 10), ZoneType::Road, Utc::now());
    assert_eq!(state.stats.treasury, 149_995);
}
