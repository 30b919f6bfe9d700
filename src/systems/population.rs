use anyhow::Result;

use crate::{
    engine::{System, SystemContext, TickFrame},
    zone::ZoneType,
};

pub const RESIDENTS_LOW: u64 = 10;
pub const RESIDENTS_MED: u64 = 50;
pub const RESIDENTS_HIGH: u64 = 200;

pub struct PopulationSystem;

impl PopulationSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PopulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PopulationSystem {
    fn name(&self) -> &str {
        "population"
    }

    fn run(&mut self, _ctx: &SystemContext, frame: &mut TickFrame<'_>) -> Result<()> {
        let census = frame.census;
        frame.next.population = RESIDENTS_LOW * census.get(ZoneType::ResidentialLow)
            + RESIDENTS_MED * census.get(ZoneType::ResidentialMed)
            + RESIDENTS_HIGH * census.get(ZoneType::ResidentialHigh);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CityStats;
    use crate::zone::ZoneCounts;

    #[test]
    fn residents_per_density() {
        let census = ZoneCounts::default()
            .with(ZoneType::ResidentialLow, 3)
            .with(ZoneType::ResidentialMed, 2)
            .with(ZoneType::ResidentialHigh, 1)
            .with(ZoneType::CommercialHigh, 9);
        let previous = CityStats::default();
        let mut frame = TickFrame::new(&previous, &census);
        let ctx = SystemContext { day: 1, city: "" };
        PopulationSystem::new().run(&ctx, &mut frame).unwrap();
        assert_eq!(frame.next.population, 30 + 100 + 200);
    }
}
