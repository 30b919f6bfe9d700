use serde::{Deserialize, Serialize};

pub const INITIAL_TREASURY: i64 = 150_000;
pub const OPENING_HAPPINESS: u8 = 80;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Demand {
    pub residential: f64,
    pub commercial: f64,
    pub industrial: f64,
}

impl Default for Demand {
    fn default() -> Self {
        Self {
            residential: 50.0,
            commercial: 20.0,
            industrial: 10.0,
        }
    }
}

/// Capacity and usage per utility. Usage is stored floored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resources {
    pub power: u64,
    pub water: u64,
    pub sewage: u64,
    pub power_usage: u64,
    pub water_usage: u64,
    pub sewage_usage: u64,
}

impl Resources {
    pub fn power_short(&self) -> bool {
        self.power_usage > self.power
    }

    pub fn water_short(&self) -> bool {
        self.water_usage > self.water
    }

    pub fn sewage_short(&self) -> bool {
        self.sewage_usage > self.sewage
    }
}

/// Coverage percentages. Reserved: nothing computes them yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Services {
    pub police: f64,
    pub fire: f64,
    pub health: f64,
    pub education: f64,
}

/// Per-day city snapshot. Replaced wholesale by every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CityStats {
    pub name: String,
    #[serde(rename = "money")]
    pub treasury: i64,
    pub net_income: i64,
    pub population: u64,
    pub happiness: u8,
    pub happiness_details: Vec<String>,
    pub demand: Demand,
    pub resources: Resources,
    pub services: Services,
    pub day: u64,
}

impl Default for CityStats {
    fn default() -> Self {
        Self::opening(String::new(), INITIAL_TREASURY)
    }
}

impl CityStats {
    /// Day-one stats for a freshly founded city.
    pub fn opening(name: String, treasury: i64) -> Self {
        Self {
            name,
            treasury,
            net_income: 0,
            population: 0,
            happiness: OPENING_HAPPINESS,
            happiness_details: vec![format!("Base Happiness (+{OPENING_HAPPINESS})")],
            demand: Demand::default(),
            resources: Resources::default(),
            services: Services::default(),
            day: 1,
        }
    }
}
