use anyhow::{Context, Result};

use crate::{
    stats::CityStats,
    systems::{BudgetSystem, CalendarSystem, HappinessSystem, PopulationSystem, UtilitySystem},
    world::GameState,
    zone::ZoneCounts,
};

pub struct EngineBuilder {
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            systems: self.systems,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw per-tick figures that systems hand to each other. Usage stays
/// unfloored here; only [`CityStats`] stores the floored values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickLedger {
    pub power_usage: f64,
    pub water_usage: f64,
    pub sewage_usage: f64,
    pub tax: f64,
    pub maintenance: f64,
}

impl TickLedger {
    pub fn power_short(&self, stats: &CityStats) -> bool {
        self.power_usage > stats.resources.power as f64
    }

    pub fn water_short(&self, stats: &CityStats) -> bool {
        self.water_usage > stats.resources.water as f64
    }

    pub fn sewage_short(&self, stats: &CityStats) -> bool {
        self.sewage_usage > stats.resources.sewage as f64
    }
}

/// Working state for one tick. `next` is committed only if every system
/// succeeds.
pub struct TickFrame<'a> {
    pub census: &'a ZoneCounts,
    pub previous: &'a CityStats,
    pub next: CityStats,
    pub ledger: TickLedger,
}

impl<'a> TickFrame<'a> {
    pub fn new(previous: &'a CityStats, census: &'a ZoneCounts) -> Self {
        Self {
            census,
            previous,
            next: previous.clone(),
            ledger: TickLedger::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    pub day: u64,
    pub population: u64,
    pub net_income: i64,
    pub treasury: i64,
    pub happiness: u8,
}

impl TickSummary {
    fn of(stats: &CityStats) -> Self {
        Self {
            day: stats.day,
            population: stats.population,
            net_income: stats.net_income,
            treasury: stats.treasury,
            happiness: stats.happiness,
        }
    }
}

pub struct Engine {
    systems: Vec<Box<dyn System>>,
}

impl Engine {
    /// The daily pipeline in evaluation order.
    pub fn standard() -> Self {
        EngineBuilder::new()
            .with_system(PopulationSystem::new())
            .with_system(UtilitySystem::new())
            .with_system(BudgetSystem::new())
            .with_system(HappinessSystem::new())
            .with_system(CalendarSystem::new())
            .build()
    }

    /// Computes the stats that follow `previous` for a grid with `census`.
    pub fn step_stats(&mut self, previous: &CityStats, census: &ZoneCounts) -> Result<CityStats> {
        let mut frame = TickFrame::new(previous, census);
        let ctx = SystemContext {
            day: previous.day,
            city: &previous.name,
        };
        for system in &mut self.systems {
            let name = system.name().to_string();
            system
                .run(&ctx, &mut frame)
                .with_context(|| format!("system '{name}' failed on day {}", ctx.day))?;
        }
        Ok(frame.next)
    }

    pub fn tick(&mut self, state: &mut GameState) -> Result<TickSummary> {
        let census = state.grid.zone_counts();
        let next = self.step_stats(&state.stats, &census)?;
        state.stats = next;
        let summary = TickSummary::of(&state.stats);
        tracing::debug!(
            day = summary.day,
            population = summary.population,
            net_income = summary.net_income,
            treasury = summary.treasury,
            happiness = summary.happiness,
            "tick"
        );
        Ok(summary)
    }

    pub fn run(&mut self, state: &mut GameState, ticks: u64) -> Result<Option<TickSummary>> {
        let mut last = None;
        for _ in 0..ticks {
            last = Some(self.tick(state)?);
        }
        Ok(last)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::standard()
    }
}

pub struct SystemContext<'a> {
    /// Day being closed out by this tick.
    pub day: u64,
    pub city: &'a str,
}

pub trait System {
    fn name(&self) -> &str;
    fn run(&mut self, ctx: &SystemContext, frame: &mut TickFrame<'_>) -> Result<()>;
}
