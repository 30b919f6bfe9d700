use anyhow::Result;

use crate::{
    engine::{System, SystemContext, TickFrame},
    zone::ZoneType,
};

pub const POWER_PER_PLANT: u64 = 1_000;
pub const POWER_PER_TURBINE: u64 = 200;
pub const WATER_PER_TOWER: u64 = 500;
pub const SEWAGE_PER_PLANT: u64 = 800;

/// Capacity from utility buildings, usage from residents and low-density
/// commerce and industry.
pub struct UtilitySystem;

impl UtilitySystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UtilitySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for UtilitySystem {
    fn name(&self) -> &str {
        "utilities"
    }

    fn run(&mut self, _ctx: &SystemContext, frame: &mut TickFrame<'_>) -> Result<()> {
        let census = frame.census;
        let pop = frame.next.population as f64;

        let resources = &mut frame.next.resources;
        resources.power = POWER_PER_PLANT * census.get(ZoneType::PowerPlant)
            + POWER_PER_TURBINE * census.get(ZoneType::WindTurbine);
        resources.water = WATER_PER_TOWER * census.get(ZoneType::WaterTower);
        resources.sewage = SEWAGE_PER_PLANT * census.get(ZoneType::SewagePlant);

        let ledger = &mut frame.ledger;
        ledger.power_usage = pop * 0.5
            + 20.0 * census.get(ZoneType::CommercialLow) as f64
            + 50.0 * census.get(ZoneType::IndustrialLow) as f64;
        ledger.water_usage = pop * 0.4;
        ledger.sewage_usage = pop * 0.3;

        resources.power_usage = ledger.power_usage.floor() as u64;
        resources.water_usage = ledger.water_usage.floor() as u64;
        resources.sewage_usage = ledger.sewage_usage.floor() as u64;
        Ok(())
    }
}
