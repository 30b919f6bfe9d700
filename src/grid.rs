use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Tile;
use crate::zone::{ZoneCounts, ZoneType};

/// Tile identity. Rendered as `"x-y"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TileId {
    pub x: u32,
    pub y: u32,
}

impl TileId {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Neighbor at `(x + dx, y + dy)`, or `None` when it leaves a grid of
    /// side `size`.
    pub fn offset(self, dx: i32, dy: i32, size: u32) -> Option<TileId> {
        let x = i64::from(self.x) + i64::from(dx);
        let y = i64::from(self.y) + i64::from(dy);
        let size = i64::from(size);
        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        Some(TileId::new(x as u32, y as u32))
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed tile id '{0}'")]
pub struct TileIdError(pub String);

impl FromStr for TileId {
    type Err = TileIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once('-').ok_or_else(|| TileIdError(s.to_string()))?;
        let x = x.parse().map_err(|_| TileIdError(s.to_string()))?;
        let y = y.parse().map_err(|_| TileIdError(s.to_string()))?;
        Ok(TileId::new(x, y))
    }
}

impl TryFrom<String> for TileId {
    type Error = TileIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TileId> for String {
    fn from(value: TileId) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("expected {expected} tiles for a {size}x{size} grid, found {found}")]
    TileCount {
        size: u32,
        expected: usize,
        found: usize,
    },
    #[error("tile {id} is stored at ({x}, {y})")]
    Misplaced { id: TileId, x: u32, y: u32 },
}

/// Authoritative square tile store, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// All-EMPTY grid of side `size`.
    pub fn new(size: u32) -> Self {
        let mut tiles = Vec::with_capacity((size as usize) * (size as usize));
        for y in 0..size {
            for x in 0..size {
                tiles.push(Tile::new(x, y, ZoneType::Empty));
            }
        }
        Self { size, tiles }
    }

    /// Rebuilds a grid from persisted tiles, accepting any order but
    /// requiring exactly one tile per coordinate.
    pub fn from_tiles(size: u32, tiles: Vec<Tile>) -> Result<Self, GridError> {
        let expected = (size as usize) * (size as usize);
        if tiles.len() != expected {
            return Err(GridError::TileCount {
                size,
                expected,
                found: tiles.len(),
            });
        }
        let mut slots: Vec<Option<Tile>> = vec![None; expected];
        for mut tile in tiles {
            if tile.x >= size || tile.y >= size || tile.id != TileId::new(tile.x, tile.y) {
                return Err(GridError::Misplaced {
                    id: tile.id,
                    x: tile.x,
                    y: tile.y,
                });
            }
            let idx = (tile.y as usize) * (size as usize) + tile.x as usize;
            if slots[idx].is_some() {
                return Err(GridError::Misplaced {
                    id: tile.id,
                    x: tile.x,
                    y: tile.y,
                });
            }
            tile.id = TileId::new(tile.x, tile.y);
            slots[idx] = Some(tile);
        }
        // Count matched and no slot was filled twice, so every slot is set.
        let tiles = slots.into_iter().flatten().collect();
        Ok(Self { size, tiles })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.size && y < self.size
    }

    #[inline]
    fn index(&self, id: TileId) -> Option<usize> {
        if self.in_bounds(id.x, id.y) {
            Some((id.y as usize) * (self.size as usize) + id.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.index(id).map(|idx| &self.tiles[idx])
    }

    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.index(id).map(move |idx| &mut self.tiles[idx])
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn zone_counts(&self) -> ZoneCounts {
        ZoneCounts::tally(self.tiles.iter().map(|tile| tile.zone))
    }

    /// Sets the zone of `id` and resets its growth level.
    pub fn set_zone(&mut self, id: TileId, zone: ZoneType) -> bool {
        match self.get_mut(id) {
            Some(tile) => {
                tile.zone = zone;
                tile.level = 0;
                true
            }
            None => false,
        }
    }

    /// Exchanges `(zone, level)` between two tiles. Identity stays put.
    pub fn swap_contents(&mut self, a: TileId, b: TileId) -> bool {
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            return false;
        };
        if ia == ib {
            return true;
        }
        let (zone_a, level_a) = (self.tiles[ia].zone, self.tiles[ia].level);
        let (zone_b, level_b) = (self.tiles[ib].zone, self.tiles[ib].level);
        self.tiles[ia].zone = zone_b;
        self.tiles[ia].level = level_b;
        self.tiles[ib].zone = zone_a;
        self.tiles[ib].level = level_a;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_id_round_trips_through_text() {
        let id = TileId::new(12, 7);
        assert_eq!(id.to_string(), "12-7");
        assert_eq!("12-7".parse::<TileId>().unwrap(), id);
        assert!("12_7".parse::<TileId>().is_err());
        assert!("-1-3".parse::<TileId>().is_err());
    }

    #[test]
    fn offset_respects_bounds() {
        let id = TileId::new(0, 29);
        assert_eq!(id.offset(-1, 0, 30), None);
        assert_eq!(id.offset(0, 1, 30), None);
        assert_eq!(id.offset(1, -1, 30), Some(TileId::new(1, 28)));
    }

    #[test]
    fn new_grid_is_row_major() {
        let grid = Grid::new(4);
        assert_eq!(grid.len(), 16);
        assert_eq!(grid.tiles()[5].id, TileId::new(1, 1));
        assert!(grid.get(TileId::new(4, 0)).is_none());
    }

    #[test]
    fn from_tiles_rejects_gaps_and_duplicates() {
        let grid = Grid::new(2);
        let mut tiles = grid.tiles().to_vec();
        tiles.reverse();
        let rebuilt = Grid::from_tiles(2, tiles.clone()).unwrap();
        assert_eq!(rebuilt, grid);

        let mut duplicated = tiles.clone();
        duplicated[0] = duplicated[1].clone();
        assert!(matches!(
            Grid::from_tiles(2, duplicated),
            Err(GridError::Misplaced { .. })
        ));

        tiles.pop();
        assert!(matches!(
            Grid::from_tiles(2, tiles),
            Err(GridError::TileCount { found: 3, .. })
        ));
    }

    #[test]
    fn swap_moves_zone_and_level_only() {
        let mut grid = Grid::new(3);
        let a = TileId::new(0, 0);
        let b = TileId::new(1, 0);
        grid.set_zone(a, ZoneType::Park);
        grid.get_mut(a).unwrap().level = 2;
        assert!(grid.swap_contents(a, b));
        assert_eq!(grid.get(a).unwrap().zone, ZoneType::Empty);
        assert_eq!(grid.get(b).unwrap().zone, ZoneType::Park);
        assert_eq!(grid.get(b).unwrap().level, 2);
        assert_eq!(grid.get(b).unwrap().id, b);
    }
}
