#![allow(dead_code)]

use chrono::Utc;
use skyline::{
    grid::Grid,
    rng::RngManager,
    world::{GameRules, GameState},
};

/// A new game on flat land so placement tests never hit generated terrain.
pub fn flat_game(rules: GameRules) -> GameState {
    let mut rng = RngManager::new(17);
    let mut state = GameState::new_game(rules, &mut rng, Utc::now());
    state.grid = Grid::new(state.rules.grid_size);
    state
}

pub fn default_flat_game() -> GameState {
    flat_game(GameRules::default())
}
