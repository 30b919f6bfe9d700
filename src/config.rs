use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    stats::INITIAL_TREASURY,
    territory::{ChunkId, SectorPrices, DEFAULT_SECTOR_PRICE},
    zone::{ZoneCatalog, ZoneType},
};

pub const DEFAULT_STORE_KEY: &str = "skyline-city-saves-v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("{field} must not be negative, got {value}")]
    NegativePrice { field: String, value: i64 },
    #[error("starting chunk {chunk} lies outside a {grid_size}x{grid_size} grid of {chunk_size}-tile chunks")]
    StartingChunkOutOfBounds {
        chunk: ChunkId,
        grid_size: u32,
        chunk_size: u32,
    },
}

fn default_name() -> String {
    "skyline".into()
}

fn default_grid_size() -> u32 {
    30
}

fn default_chunk_size() -> u32 {
    10
}

fn default_starting_chunk() -> ChunkId {
    ChunkId::new(1, 1)
}

fn default_initial_treasury() -> i64 {
    INITIAL_TREASURY
}

fn default_tick_period_ms() -> u64 {
    1_000
}

fn default_sector_price() -> i64 {
    DEFAULT_SECTOR_PRICE
}

fn default_sector_prices() -> BTreeMap<ChunkId, i64> {
    SectorPrices::default().prices
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("saves")
}

fn default_store_key() -> String {
    DEFAULT_STORE_KEY.into()
}

fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Master seed; a fresh one is drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u32,
    #[serde(default = "default_starting_chunk")]
    pub starting_chunk: ChunkId,
    #[serde(default = "default_initial_treasury")]
    pub initial_treasury: i64,
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,
    #[serde(default)]
    pub zone_costs: BTreeMap<ZoneType, i64>,
    #[serde(default = "default_sector_prices")]
    pub sector_prices: BTreeMap<ChunkId, i64>,
    #[serde(default = "default_sector_price")]
    pub default_sector_price: i64,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_store_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            key: default_store_key(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            seed: None,
            grid_size: default_grid_size(),
            chunk_size: default_chunk_size(),
            starting_chunk: default_starting_chunk(),
            initial_treasury: default_initial_treasury(),
            tick_period_ms: default_tick_period_ms(),
            zone_costs: BTreeMap::new(),
            sector_prices: default_sector_prices(),
            default_sector_price: default_sector_price(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::Zero { field: "grid_size" });
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::Zero { field: "chunk_size" });
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Zero {
                field: "tick_period_ms",
            });
        }
        let last = (self.grid_size - 1) / self.chunk_size;
        if self.starting_chunk.cx > last || self.starting_chunk.cy > last {
            return Err(ConfigError::StartingChunkOutOfBounds {
                chunk: self.starting_chunk,
                grid_size: self.grid_size,
                chunk_size: self.chunk_size,
            });
        }
        if self.default_sector_price < 0 {
            return Err(ConfigError::NegativePrice {
                field: "default_sector_price".into(),
                value: self.default_sector_price,
            });
        }
        if let Some((chunk, &value)) = self.sector_prices.iter().find(|(_, price)| **price < 0) {
            return Err(ConfigError::NegativePrice {
                field: format!("sector_prices.{chunk}"),
                value,
            });
        }
        if let Some((zone, &value)) = self.zone_costs.iter().find(|(_, cost)| **cost < 0) {
            return Err(ConfigError::NegativePrice {
                field: format!("zone_costs.{}", zone.display_name()),
                value,
            });
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn zone_catalog(&self) -> ZoneCatalog {
        ZoneCatalog {
            overrides: self.zone_costs.clone(),
        }
    }

    pub fn sector_prices(&self) -> SectorPrices {
        SectorPrices {
            prices: self.sector_prices.clone(),
            default_price: self.default_sector_price,
        }
    }
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: GameConfig = serde_yaml::from_str(&data).map_err(|source| {
            ConfigError::Parse {
                path: path.clone(),
                source,
            }
        })?;
        config.validate()?;
        Ok(config)
    }
}
