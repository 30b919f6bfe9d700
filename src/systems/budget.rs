use anyhow::Result;

use crate::{
    engine::{System, SystemContext, TickFrame},
    zone::ZoneType,
};

pub struct BudgetSystem;

impl BudgetSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BudgetSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for BudgetSystem {
    fn name(&self) -> &str {
        "budget"
    }

    fn run(&mut self, _ctx: &SystemContext, frame: &mut TickFrame<'_>) -> Result<()> {
        let census = frame.census;
        let count = |zone: ZoneType| census.get(zone) as f64;

        let tax = 1.5 * frame.next.population as f64
            + 30.0 * count(ZoneType::CommercialLow)
            + 40.0 * count(ZoneType::IndustrialLow);
        let maintenance = 100.0 * count(ZoneType::PowerPlant)
            + 20.0 * count(ZoneType::WindTurbine)
            + 50.0 * count(ZoneType::WaterTower)
            + 60.0 * count(ZoneType::SewagePlant)
            + count(ZoneType::Road);

        let net_income = (tax - maintenance).floor() as i64;
        frame.ledger.tax = tax;
        frame.ledger.maintenance = maintenance;
        frame.next.net_income = net_income;
        frame.next.treasury = frame.previous.treasury + net_income;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CityStats;
    use crate::zone::ZoneCounts;

    fn run(census: &ZoneCounts, population: u64, treasury: i64) -> CityStats {
        let previous = CityStats::opening("Test".into(), treasury);
        let mut frame = TickFrame::new(&previous, census);
        frame.next.population = population;
        let ctx = SystemContext { day: 1, city: "Test" };
        BudgetSystem::new().run(&ctx, &mut frame).unwrap();
        frame.next
    }

    #[test]
    fn tax_minus_maintenance() {
        let census = ZoneCounts::default()
            .with(ZoneType::CommercialLow, 2)
            .with(ZoneType::PowerPlant, 1)
            .with(ZoneType::Road, 10);
        let next = run(&census, 100, 1_000);
        // 150 + 60 - 100 - 10
        assert_eq!(next.net_income, 100);
        assert_eq!(next.treasury, 1_100);
    }

    #[test]
    fn fractional_deficit_floors_down() {
        let census = ZoneCounts::default().with(ZoneType::Road, 1);
        let next = run(&census, 1, 0);
        // 1.5 - 1 = 0.5
        assert_eq!(next.net_income, 0);
        let census = ZoneCounts::default().with(ZoneType::Road, 2);
        let next = run(&census, 1, 0);
        // 1.5 - 2 = -0.5
        assert_eq!(next.net_income, -1);
        assert_eq!(next.treasury, -1);
    }
}
