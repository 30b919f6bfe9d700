use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneType {
    #[default]
    Empty,
    ResidentialLow,
    ResidentialMed,
    ResidentialHigh,
    CommercialLow,
    CommercialMed,
    CommercialHigh,
    IndustrialLow,
    IndustrialMed,
    IndustrialHigh,
    Road,
    PowerPlant,
    WindTurbine,
    WaterTower,
    SewagePlant,
    PoliceStation,
    FireStation,
    Hospital,
    School,
    Park,
    Move,
    Water,
    Rock,
}

impl ZoneType {
    pub const ALL: [ZoneType; 23] = [
        ZoneType::Empty,
        ZoneType::ResidentialLow,
        ZoneType::ResidentialMed,
        ZoneType::ResidentialHigh,
        ZoneType::CommercialLow,
        ZoneType::CommercialMed,
        ZoneType::CommercialHigh,
        ZoneType::IndustrialLow,
        ZoneType::IndustrialMed,
        ZoneType::IndustrialHigh,
        ZoneType::Road,
        ZoneType::PowerPlant,
        ZoneType::WindTurbine,
        ZoneType::WaterTower,
        ZoneType::SewagePlant,
        ZoneType::PoliceStation,
        ZoneType::FireStation,
        ZoneType::Hospital,
        ZoneType::School,
        ZoneType::Park,
        ZoneType::Move,
        ZoneType::Water,
        ZoneType::Rock,
    ];

    /// Listed purchase price used when no override is configured.
    pub fn base_cost(self) -> i64 {
        match self {
            ZoneType::Empty | ZoneType::Move | ZoneType::Water | ZoneType::Rock => 0,
            ZoneType::ResidentialLow => 100,
            ZoneType::ResidentialMed => 500,
            ZoneType::ResidentialHigh => 2_500,
            ZoneType::CommercialLow => 200,
            ZoneType::CommercialMed => 1_000,
            ZoneType::CommercialHigh => 5_000,
            ZoneType::IndustrialLow => 300,
            ZoneType::IndustrialMed => 1_500,
            ZoneType::IndustrialHigh => 7_500,
            ZoneType::Road => 50,
            ZoneType::PowerPlant => 8_000,
            ZoneType::WindTurbine => 4_000,
            ZoneType::WaterTower => 3_000,
            ZoneType::SewagePlant => 5_000,
            ZoneType::PoliceStation => 10_000,
            ZoneType::FireStation => 10_000,
            ZoneType::Hospital => 15_000,
            ZoneType::School => 12_000,
            ZoneType::Park => 1_500,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ZoneType::Empty => "Clear Land",
            ZoneType::ResidentialLow => "Low Density Housing",
            ZoneType::ResidentialMed => "Medium Density Housing",
            ZoneType::ResidentialHigh => "High Density Housing",
            ZoneType::CommercialLow => "Low Density Commerce",
            ZoneType::CommercialMed => "Medium Density Commerce",
            ZoneType::CommercialHigh => "High Density Commerce",
            ZoneType::IndustrialLow => "Light Industry",
            ZoneType::IndustrialMed => "Medium Industry",
            ZoneType::IndustrialHigh => "Heavy Industry",
            ZoneType::Road => "Road",
            ZoneType::PowerPlant => "Power Plant",
            ZoneType::WindTurbine => "Wind Turbine",
            ZoneType::WaterTower => "Water Tower",
            ZoneType::SewagePlant => "Sewage Plant",
            ZoneType::PoliceStation => "Police Station",
            ZoneType::FireStation => "Fire Station",
            ZoneType::Hospital => "Hospital",
            ZoneType::School => "School",
            ZoneType::Park => "Park",
            ZoneType::Move => "Move Tool",
            ZoneType::Water => "Water (Terrain)",
            ZoneType::Rock => "Rock (Terrain)",
        }
    }

    /// Natural terrain: never built on, demolished, or moved onto.
    pub fn is_terrain(self) -> bool {
        matches!(self, ZoneType::Water | ZoneType::Rock)
    }

    /// Whether `place` accepts this zone. EMPTY is the clear-land tool.
    pub fn is_placeable(self) -> bool {
        match self {
            ZoneType::Move | ZoneType::Water | ZoneType::Rock => false,
            ZoneType::Empty
            | ZoneType::ResidentialLow
            | ZoneType::ResidentialMed
            | ZoneType::ResidentialHigh
            | ZoneType::CommercialLow
            | ZoneType::CommercialMed
            | ZoneType::CommercialHigh
            | ZoneType::IndustrialLow
            | ZoneType::IndustrialMed
            | ZoneType::IndustrialHigh
            | ZoneType::Road
            | ZoneType::PowerPlant
            | ZoneType::WindTurbine
            | ZoneType::WaterTower
            | ZoneType::SewagePlant
            | ZoneType::PoliceStation
            | ZoneType::FireStation
            | ZoneType::Hospital
            | ZoneType::School
            | ZoneType::Park => true,
        }
    }
}

/// Per-zone price table. Overrides come from configuration; anything not
/// overridden falls back to [`ZoneType::base_cost`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneCatalog {
    #[serde(default)]
    pub overrides: BTreeMap<ZoneType, i64>,
}

impl ZoneCatalog {
    pub fn cost(&self, zone: ZoneType) -> i64 {
        if !zone.is_placeable() || zone == ZoneType::Empty {
            return 0;
        }
        self.overrides
            .get(&zone)
            .copied()
            .unwrap_or_else(|| zone.base_cost())
    }
}

/// Tile counts per zone type, taken once per tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneCounts {
    counts: BTreeMap<ZoneType, u64>,
}

impl ZoneCounts {
    pub fn tally<I>(zones: I) -> Self
    where
        I: IntoIterator<Item = ZoneType>,
    {
        let mut counts = ZoneCounts::default();
        for zone in zones {
            *counts.counts.entry(zone).or_insert(0) += 1;
        }
        counts
    }

    pub fn with(mut self, zone: ZoneType, count: u64) -> Self {
        self.set(zone, count);
        self
    }

    pub fn set(&mut self, zone: ZoneType, count: u64) {
        if count == 0 {
            self.counts.remove(&zone);
        } else {
            self.counts.insert(zone, count);
        }
    }

    pub fn get(&self, zone: ZoneType) -> u64 {
        self.counts.get(&zone).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}
