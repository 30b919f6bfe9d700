use serde::{Deserialize, Serialize};

use crate::grid::TileId;
use crate::zone::ZoneType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub id: TileId,
    pub x: u32,
    pub y: u32,
    #[serde(rename = "type")]
    pub zone: ZoneType,
    // Growth and coverage fields are carried for save compatibility; the tick
    // never reads or writes them.
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub density: f64,
    #[serde(default)]
    pub is_powered: bool,
    #[serde(default)]
    pub has_water: bool,
}

impl Tile {
    pub fn new(x: u32, y: u32, zone: ZoneType) -> Self {
        Self {
            id: TileId::new(x, y),
            x,
            y,
            zone,
            level: 0,
            density: 0.0,
            is_powered: false,
            has_water: false,
        }
    }
}

pub const CAMERA_PAN_LIMIT: f64 = 2_000.0;
pub const CAMERA_MIN_ZOOM: f64 = 0.2;
pub const CAMERA_MAX_ZOOM: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub rotation: f64,
    pub tilt: f64,
    pub zoom: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            tilt: 0.0,
            zoom: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl Camera {
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x = (self.x + dx).clamp(-CAMERA_PAN_LIMIT, CAMERA_PAN_LIMIT);
        self.y = (self.y + dy).clamp(-CAMERA_PAN_LIMIT, CAMERA_PAN_LIMIT);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(CAMERA_MIN_ZOOM, CAMERA_MAX_ZOOM);
    }

    pub fn reset(&mut self) {
        *self = Camera::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiFlags {
    pub show_left_panel: bool,
    pub show_right_panel: bool,
    pub selected_tool: ZoneType,
    pub is_paused: bool,
}

impl Default for UiFlags {
    fn default() -> Self {
        Self {
            show_left_panel: true,
            show_right_panel: true,
            selected_tool: ZoneType::Road,
            is_paused: false,
        }
    }
}
