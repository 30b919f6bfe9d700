mod common;

use chrono::Utc;
use skyline::{engine::Engine, grid::TileId, zone::ZoneType};

use common::default_flat_game;

#[test]
fn empty_city_holds_steady() {
    let mut state = default_flat_game();
    let mut engine = Engine::standard();
    let summary = engine.tick(&mut state).unwrap();
    assert_eq!(summary.day, 2);
    assert_eq!(state.stats.net_income, 0);
    assert_eq!(state.stats.population, 0);
    assert_eq!(state.stats.treasury, 150_000);
    assert_eq!(state.stats.happiness, 70);
    assert_eq!(state.stats.happiness_details, vec!["Base Happiness (+70)"]);
}

#[test]
fn lone_house_without_utilities() {
    let mut state = default_flat_game();
    state.place(TileId::new(10, 10), ZoneType::ResidentialLow, Utc::now());
    assert_eq!(state.stats.treasury, 149_900);

    Engine::standard().tick(&mut state).unwrap();
    let stats = &state.stats;
    assert_eq!(stats.population, 10);
    assert_eq!(stats.resources.power_usage, 5);
    assert_eq!(stats.resources.water_usage, 4);
    assert_eq!(stats.resources.sewage_usage, 3);
    assert_eq!(stats.net_income, 15);
    assert_eq!(stats.treasury, 149_915);
    assert_eq!(stats.happiness, 20);
    assert_eq!(
        stats.happiness_details,
        vec![
            "Base Happiness (+70)",
            "Power Outages (-20)",
            "Water Shortage (-20)",
            "Sewage Overflow (-10)",
        ]
    );
}

#[test]
fn serviced_district_is_content() {
    let mut state = default_flat_game();
    let now = Utc::now();
    let layout = [
        (10, 10, ZoneType::ResidentialMed),
        (11, 10, ZoneType::ResidentialMed),
        (12, 10, ZoneType::ResidentialMed),
        (13, 10, ZoneType::PowerPlant),
        (14, 10, ZoneType::WaterTower),
        (15, 10, ZoneType::SewagePlant),
        (16, 10, ZoneType::PoliceStation),
        (17, 10, ZoneType::Park),
        (18, 10, ZoneType::Road),
    ];
    for (x, y, zone) in layout {
        state.place(TileId::new(x, y), zone, now);
    }
    let treasury = state.stats.treasury;

    Engine::standard().tick(&mut state).unwrap();
    let stats = &state.stats;
    assert_eq!(stats.population, 150);
    assert_eq!(stats.resources.power, 1_000);
    assert_eq!(stats.resources.water, 500);
    assert_eq!(stats.resources.sewage, 800);
    // 225 tax against 100 + 50 + 60 + 1 upkeep.
    assert_eq!(stats.net_income, -(100 + 50 + 60 + 1) + 225);
    assert_eq!(stats.treasury, treasury + stats.net_income);
    assert_eq!(stats.happiness, 77);
    assert_eq!(
        stats.happiness_details,
        vec![
            "Base Happiness (+70)",
            "Parks & Recreation (+2)",
            "Police Coverage (+5)",
        ]
    );
}

#[test]
fn bankruptcy_reads_treasury_before_the_tick() {
    let mut state = default_flat_game();
    state.stats.treasury = -5;
    state.place(TileId::new(10, 10), ZoneType::CommercialLow, Utc::now());
    assert_eq!(state.zone_at(TileId::new(10, 10)), Some(ZoneType::Empty));
    state.grid.set_zone(TileId::new(10, 10), ZoneType::CommercialLow);

    let mut engine = Engine::standard();
    engine.tick(&mut state).unwrap();
    // Commerce taxes 30 so the city is solvent again, but the penalty still lands.
    assert_eq!(state.stats.treasury, 25);
    assert!(state
        .stats
        .happiness_details
        .contains(&"City Bankruptcy (-10)".to_string()));

    engine.tick(&mut state).unwrap();
    assert!(!state
        .stats
        .happiness_details
        .contains(&"City Bankruptcy (-10)".to_string()));
}

#[test]
fn crowded_city_without_parks_loses_morale() {
    let mut state = default_flat_game();
    for x in 10..16 {
        state.grid.set_zone(TileId::new(x, 12), ZoneType::ResidentialHigh);
    }
    Engine::standard().tick(&mut state).unwrap();
    assert_eq!(state.stats.population, 1_200);
    assert_eq!(
        state.stats.happiness_details.last().map(String::as_str),
        Some("No Green Space (-5)")
    );
    assert_eq!(state.stats.happiness, 15);
}

#[test]
fn each_tick_advances_exactly_one_day() {
    let mut state = default_flat_game();
    let mut engine = Engine::standard();
    for expected in 2..=40 {
        let summary = engine.tick(&mut state).unwrap();
        assert_eq!(summary.day, expected);
        assert_eq!(state.stats.day, expected);
    }
}

#[test]
fn tick_keeps_name_demand_and_services() {
    let mut state = default_flat_game();
    state.rename_city("Verdant Reach");
    let demand = state.stats.demand.clone();
    Engine::standard().tick(&mut state).unwrap();
    assert_eq!(state.stats.name, "Verdant Reach");
    assert_eq!(state.stats.demand, demand);
    assert_eq!(state.stats.services.police, 0.0);
}
