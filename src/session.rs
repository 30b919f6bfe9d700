use std::time::Duration;

use anyhow::Result;
use chrono::Utc;

use crate::{
    config::GameConfig,
    engine::{Engine, TickSummary},
    rng::RngManager,
    save::{self, LoadOutcome, SaveEntry, SaveOutcome},
    scheduler::TickScheduler,
    store::KeyValueStore,
    world::{GameRules, GameState},
};

/// One running game: state, the daily engine, its clock, and where saves go.
pub struct Session<S: KeyValueStore> {
    pub state: GameState,
    engine: Engine,
    scheduler: TickScheduler,
    store: S,
    store_key: String,
    rng: RngManager,
    pause_changes: u64,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(config: &GameConfig, store: S) -> Self {
        let mut rng = match config.seed {
            Some(seed) => RngManager::new(seed),
            None => RngManager::from_entropy(),
        };
        let state = GameState::new_game(GameRules::from(config), &mut rng, Utc::now());
        let scheduler = TickScheduler::new(config.tick_period(), state.epoch());
        let pause_changes = state.pause_changes();
        Self {
            state,
            engine: Engine::standard(),
            scheduler,
            store,
            store_key: config.storage.key.clone(),
            rng,
            pause_changes,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Feeds wall-clock time and runs every tick that came due. Any pause
    /// toggle since the last call restarts the period from zero.
    pub fn advance(&mut self, elapsed: Duration) -> Result<Vec<TickSummary>> {
        let changes = self.state.pause_changes();
        if changes != self.pause_changes {
            self.pause_changes = changes;
            self.scheduler.cancel();
        }
        self.scheduler.set_paused(self.state.ui.is_paused);
        let due = self.scheduler.advance(elapsed, self.state.epoch());
        let mut summaries = Vec::new();
        for _ in 0..due {
            summaries.push(self.engine.tick(&mut self.state)?);
        }
        Ok(summaries)
    }

    /// Runs `days` ticks immediately, ignoring the clock and pause flag.
    pub fn simulate_days(&mut self, days: u64) -> Result<Option<TickSummary>> {
        self.engine.run(&mut self.state, days)
    }

    pub fn restart(&mut self) {
        self.state.restart(&mut self.rng, Utc::now());
    }

    pub fn save(&mut self, name: &str) -> SaveOutcome {
        save::save_city(
            &mut self.state,
            &mut self.store,
            &self.store_key,
            name,
            &mut self.rng,
            Utc::now(),
        )
    }

    pub fn saves(&self) -> Vec<SaveEntry> {
        save::read_entries(&self.store, &self.store_key)
    }

    /// Loads a save by id or name.
    pub fn load(&mut self, selector: &str) -> LoadOutcome {
        save::load_city(
            &mut self.state,
            &self.store,
            &self.store_key,
            selector,
            Utc::now(),
        )
    }

    pub fn load_entry(&mut self, entry: SaveEntry) -> LoadOutcome {
        save::apply_entry(&mut self.state, entry.data, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session() -> Session<MemoryStore> {
        let config = GameConfig {
            seed: Some(8),
            ..GameConfig::default()
        };
        Session::new(&config, MemoryStore::new())
    }

    #[test]
    fn ticks_follow_the_clock() {
        let mut session = session();
        assert!(session.advance(Duration::from_millis(999)).unwrap().is_empty());
        let ran = session.advance(Duration::from_millis(2_001)).unwrap();
        assert_eq!(ran.len(), 2);
        assert_eq!(session.state.stats.day, 3);
    }

    #[test]
    fn paused_game_does_not_tick() {
        let mut session = session();
        session.advance(Duration::from_millis(900)).unwrap();
        session.state.toggle_pause();
        assert!(session.advance(Duration::from_secs(10)).unwrap().is_empty());
        session.state.toggle_pause();
        // The 900ms from before the pause is gone.
        assert!(session.advance(Duration::from_millis(200)).unwrap().is_empty());
        assert_eq!(session.state.stats.day, 1);
    }

    #[test]
    fn pause_and_resume_between_advances_drops_partial_tick() {
        let mut session = session();
        session.advance(Duration::from_millis(900)).unwrap();
        session.state.toggle_pause();
        session.state.toggle_pause();
        assert!(session.advance(Duration::from_millis(200)).unwrap().is_empty());
        assert_eq!(session.scheduler().pending(), Duration::from_millis(200));
        assert_eq!(session.advance(Duration::from_millis(800)).unwrap().len(), 1);
        assert_eq!(session.state.stats.day, 2);
    }

    #[test]
    fn restart_cancels_pending_time() {
        let mut session = session();
        session.advance(Duration::from_millis(900)).unwrap();
        session.restart();
        assert!(session.advance(Duration::from_millis(500)).unwrap().is_empty());
        assert_eq!(session.scheduler().pending(), Duration::ZERO);
        assert_eq!(session.advance(Duration::from_secs(1)).unwrap().len(), 1);
    }

    #[test]
    fn save_then_load_by_name() {
        let mut session = session();
        assert!(matches!(session.save("Alpha"), SaveOutcome::Saved { .. }));
        session.simulate_days(3).unwrap();
        assert_eq!(session.state.stats.day, 4);
        assert!(matches!(session.load("Alpha"), LoadOutcome::Loaded { .. }));
        assert_eq!(session.state.stats.day, 1);
        assert_eq!(session.load("missing"), LoadOutcome::NotFound);

        session.simulate_days(2).unwrap();
        let entry = session.saves().remove(0);
        assert!(matches!(session.load_entry(entry), LoadOutcome::Loaded { .. }));
        assert_eq!(session.state.stats.day, 1);
        assert_eq!(session.saves().len(), 1);
    }
}
