pub mod advisor;
pub mod components;
pub mod config;
pub mod engine;
pub mod grid;
pub mod messages;
pub mod names;
pub mod rng;
pub mod save;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod store;
pub mod systems;
pub mod terrain;
pub mod territory;
pub mod world;
pub mod zone;

pub use config::{ConfigLoader, GameConfig};
pub use engine::{Engine, EngineBuilder, TickSummary};
pub use session::Session;
pub use world::GameState;
