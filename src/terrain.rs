use rand::Rng;

use crate::grid::Grid;
use crate::grid::TileId;
use crate::zone::ZoneType;

pub const RIVER_HALF_WIDTH: f64 = 1.3;
pub const RIVER_AMPLITUDE: f64 = 2.5;
pub const RIVER_WAVELENGTH: f64 = 5.0;
pub const RIVER_OFFSET_RANGE: f64 = 100.0;
pub const ROCK_PROBABILITY: f64 = 0.03;

/// Row the river is centered on in column `x`.
pub fn river_center(x: u32, offset: f64, size: u32) -> f64 {
    ((f64::from(x) + offset) / RIVER_WAVELENGTH).sin() * RIVER_AMPLITUDE + f64::from(size) / 2.0
}

/// Lays a sine-wave river across the map, then scatters rock over the
/// remaining open land.
pub fn generate<R: Rng + ?Sized>(size: u32, rng: &mut R) -> Grid {
    let offset = rng.gen_range(0.0..RIVER_OFFSET_RANGE);
    let mut grid = Grid::new(size);
    for y in 0..size {
        for x in 0..size {
            let mut zone = ZoneType::Empty;
            if (f64::from(y) - river_center(x, offset, size)).abs() < RIVER_HALF_WIDTH {
                zone = ZoneType::Water;
            }
            if zone == ZoneType::Empty && rng.gen_bool(ROCK_PROBABILITY) {
                zone = ZoneType::Rock;
            }
            grid.set_zone(TileId::new(x, y), zone);
        }
    }
    grid
}
