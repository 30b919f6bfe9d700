use anyhow::Result;

use crate::{
    engine::{System, SystemContext, TickFrame},
    zone::ZoneType,
};

pub const BASE_HAPPINESS: i64 = 70;
pub const PARK_BONUS_EACH: i64 = 2;
pub const PARK_BONUS_CAP: i64 = 20;
pub const POLICE_BONUS: i64 = 5;
pub const POLICE_MIN_POPULATION: u64 = 100;
pub const POWER_OUTAGE_PENALTY: i64 = 20;
pub const WATER_SHORTAGE_PENALTY: i64 = 20;
pub const SEWAGE_OVERFLOW_PENALTY: i64 = 10;
pub const BANKRUPTCY_PENALTY: i64 = 10;
pub const NO_GREEN_SPACE_PENALTY: i64 = 5;
pub const NO_GREEN_SPACE_POPULATION: u64 = 1_000;

/// Itemized morale. Every contribution is recorded in evaluation order,
/// then the total is clamped to 0..=100.
pub struct HappinessSystem;

impl HappinessSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HappinessSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for HappinessSystem {
    fn name(&self) -> &str {
        "happiness"
    }

    fn run(&mut self, _ctx: &SystemContext, frame: &mut TickFrame<'_>) -> Result<()> {
        let parks = frame.census.get(ZoneType::Park);
        let police = frame.census.get(ZoneType::PoliceStation);
        let population = frame.next.population;

        let mut score = BASE_HAPPINESS;
        let mut details = vec![format!("Base Happiness (+{BASE_HAPPINESS})")];

        if parks > 0 {
            let bonus = (parks as i64 * PARK_BONUS_EACH).min(PARK_BONUS_CAP);
            score += bonus;
            details.push(format!("Parks & Recreation (+{bonus})"));
        }
        if police > 0 && population > POLICE_MIN_POPULATION {
            score += POLICE_BONUS;
            details.push(format!("Police Coverage (+{POLICE_BONUS})"));
        }
        if frame.ledger.power_short(&frame.next) {
            score -= POWER_OUTAGE_PENALTY;
            details.push(format!("Power Outages (-{POWER_OUTAGE_PENALTY})"));
        }
        if frame.ledger.water_short(&frame.next) {
            score -= WATER_SHORTAGE_PENALTY;
            details.push(format!("Water Shortage (-{WATER_SHORTAGE_PENALTY})"));
        }
        if frame.ledger.sewage_short(&frame.next) {
            score -= SEWAGE_OVERFLOW_PENALTY;
            details.push(format!("Sewage Overflow (-{SEWAGE_OVERFLOW_PENALTY})"));
        }
        if frame.previous.treasury < 0 {
            score -= BANKRUPTCY_PENALTY;
            details.push(format!("City Bankruptcy (-{BANKRUPTCY_PENALTY})"));
        }
        if population > NO_GREEN_SPACE_POPULATION && parks == 0 {
            score -= NO_GREEN_SPACE_PENALTY;
            details.push(format!("No Green Space (-{NO_GREEN_SPACE_PENALTY})"));
        }

        frame.next.happiness = score.clamp(0, 100) as u8;
        frame.next.happiness_details = details;
        Ok(())
    }
}
