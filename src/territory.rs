use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::TileId;

pub const DEFAULT_SECTOR_PRICE: i64 = 50_000;

/// Sector identity, `"cx-cy"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChunkId {
    pub cx: u32,
    pub cy: u32,
}

impl ChunkId {
    pub fn new(cx: u32, cy: u32) -> Self {
        Self { cx, cy }
    }

    pub fn containing(tile: TileId, chunk_size: u32) -> Self {
        Self::new(tile.x / chunk_size, tile.y / chunk_size)
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.cx, self.cy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed chunk id '{0}'")]
pub struct ChunkIdError(pub String);

impl FromStr for ChunkId {
    type Err = ChunkIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cx, cy) = s.split_once('-').ok_or_else(|| ChunkIdError(s.to_string()))?;
        let cx = cx.parse().map_err(|_| ChunkIdError(s.to_string()))?;
        let cy = cy.parse().map_err(|_| ChunkIdError(s.to_string()))?;
        Ok(ChunkId::new(cx, cy))
    }
}

impl TryFrom<String> for ChunkId {
    type Error = ChunkIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChunkId> for String {
    fn from(value: ChunkId) -> Self {
        value.to_string()
    }
}

fn default_sector_price() -> i64 {
    DEFAULT_SECTOR_PRICE
}

/// Purchase price per sector with a fallback for unmapped sectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorPrices {
    #[serde(default)]
    pub prices: BTreeMap<ChunkId, i64>,
    #[serde(default = "default_sector_price")]
    pub default_price: i64,
}

impl Default for SectorPrices {
    fn default() -> Self {
        let prices = [
            ((0, 0), 75_000),
            ((1, 0), 25_000),
            ((2, 0), 75_000),
            ((0, 1), 40_000),
            ((1, 1), 0),
            ((2, 1), 40_000),
            ((0, 2), 90_000),
            ((1, 2), 25_000),
            ((2, 2), 120_000),
        ]
        .into_iter()
        .map(|((cx, cy), price)| (ChunkId::new(cx, cy), price))
        .collect();
        Self {
            prices,
            default_price: DEFAULT_SECTOR_PRICE,
        }
    }
}

impl SectorPrices {
    pub fn price(&self, chunk: ChunkId) -> i64 {
        // Zero entries fall back to the default, same as unmapped sectors.
        match self.prices.get(&chunk) {
            Some(price) if *price > 0 => *price,
            _ => self.default_price,
        }
    }
}

/// Unlocked-sector bookkeeping for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    chunk_size: u32,
    unlocked: BTreeSet<ChunkId>,
}

impl Territory {
    pub fn new(chunk_size: u32, starting: ChunkId) -> Self {
        let mut unlocked = BTreeSet::new();
        unlocked.insert(starting);
        Self {
            chunk_size,
            unlocked,
        }
    }

    /// Restores a persisted set. The starting sector is always re-added.
    pub fn restore<I>(chunk_size: u32, starting: ChunkId, unlocked: I) -> Self
    where
        I: IntoIterator<Item = ChunkId>,
    {
        let mut territory = Self::new(chunk_size, starting);
        territory.unlocked.extend(unlocked);
        territory
    }

    pub fn chunk_of(&self, tile: TileId) -> ChunkId {
        ChunkId::containing(tile, self.chunk_size)
    }

    pub fn is_unlocked(&self, chunk: ChunkId) -> bool {
        self.unlocked.contains(&chunk)
    }

    pub fn owns_tile(&self, tile: TileId) -> bool {
        self.is_unlocked(self.chunk_of(tile))
    }

    /// Returns `false` when the sector was already unlocked.
    pub fn unlock(&mut self, chunk: ChunkId) -> bool {
        self.unlocked.insert(chunk)
    }

    pub fn unlocked(&self) -> impl Iterator<Item = ChunkId> + '_ {
        self.unlocked.iter().copied()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_map_to_containing_sector() {
        assert_eq!(ChunkId::containing(TileId::new(0, 0), 10), ChunkId::new(0, 0));
        assert_eq!(ChunkId::containing(TileId::new(19, 10), 10), ChunkId::new(1, 1));
        assert_eq!(ChunkId::containing(TileId::new(29, 5), 10).to_string(), "2-0");
    }

    #[test]
    fn unmapped_sectors_use_default_price() {
        let prices = SectorPrices::default();
        assert_eq!(prices.price(ChunkId::new(0, 1)), 40_000);
        assert_eq!(prices.price(ChunkId::new(2, 2)), 120_000);
        assert_eq!(prices.price(ChunkId::new(7, 7)), DEFAULT_SECTOR_PRICE);
    }

    #[test]
    fn starting_sector_survives_restore() {
        let start = ChunkId::new(1, 1);
        let territory = Territory::restore(10, start, [ChunkId::new(0, 1)]);
        assert!(territory.is_unlocked(start));
        assert!(territory.is_unlocked(ChunkId::new(0, 1)));
        assert_eq!(territory.unlocked_count(), 2);
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut territory = Territory::new(10, ChunkId::new(1, 1));
        assert!(territory.unlock(ChunkId::new(2, 1)));
        assert!(!territory.unlock(ChunkId::new(2, 1)));
        assert_eq!(territory.unlocked_count(), 2);
    }
}
