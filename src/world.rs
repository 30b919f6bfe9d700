use chrono::{DateTime, Utc};

use crate::{
    advisor,
    components::{Camera, UiFlags},
    config::GameConfig,
    grid::{Grid, TileId},
    messages::{MessageLog, Sender, Severity},
    names,
    rng::RngManager,
    stats::CityStats,
    terrain,
    territory::{ChunkId, SectorPrices, Territory},
    zone::{ZoneCatalog, ZoneType},
};

pub const WELCOME_TEXT: &str =
    "Welcome, Mayor. System ready. Zoning commercial and industrial blocks generates city revenue.";
pub const RESTART_TEXT: &str = "Game Restarted. Welcome, Mayor. A new city awaits your command.";
pub const TERRAIN_WARNING: &str = "Cannot build on natural terrain.";
pub const FUNDS_WARNING: &str = "Insufficient funds!";
pub const TREASURY_WARNING: &str = "Insufficient treasury funds!";

/// Fixed rules of a game, resolved from [`GameConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    pub grid_size: u32,
    pub chunk_size: u32,
    pub starting_chunk: ChunkId,
    pub initial_treasury: i64,
    pub zones: ZoneCatalog,
    pub sectors: SectorPrices,
}

impl From<&GameConfig> for GameRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            grid_size: config.grid_size,
            chunk_size: config.chunk_size,
            starting_chunk: config.starting_chunk,
            initial_treasury: config.initial_treasury,
            zones: config.zone_catalog(),
            sectors: config.sector_prices(),
        }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchasePrompt {
    pub chunk: ChunkId,
    pub cost: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    Placed { previous: ZoneType, cost: i64 },
    Unchanged,
    Locked(PurchasePrompt),
    Terrain,
    InsufficientFunds { cost: i64, treasury: i64 },
    NotPlaceable,
    OutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    Place(PlaceOutcome),
    Selected(TileId),
    NothingToSelect,
    Locked(PurchasePrompt),
    Terrain,
    OutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemolishOutcome {
    Cleared { previous: ZoneType },
    AlreadyEmpty,
    SelectionCleared,
    Terrain,
    Locked,
    OutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { to: TileId },
    NoSelection,
    OutOfBounds,
    Terrain,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Unlocked { chunk: ChunkId, cost: i64 },
    AlreadyUnlocked,
    InsufficientFunds { cost: i64, treasury: i64 },
    OutOfBounds,
}

/// The whole mutable state of one game. Every player action is a method
/// here; nothing else writes to it except the tick engine and persistence.
#[derive(Debug, Clone)]
pub struct GameState {
    pub rules: GameRules,
    pub grid: Grid,
    pub stats: CityStats,
    pub territory: Territory,
    pub messages: MessageLog,
    pub camera: Camera,
    pub ui: UiFlags,
    pub move_selection: Option<TileId>,
    pub purchase_prompt: Option<PurchasePrompt>,
    epoch: u64,
    pause_changes: u64,
}

impl GameState {
    pub fn new_game(rules: GameRules, rng: &mut RngManager, now: DateTime<Utc>) -> Self {
        let grid = terrain::generate(rules.grid_size, &mut rng.stream("terrain"));
        let name = names::generate_city_name(&mut rng.stream("names"));
        let mut messages = MessageLog::default();
        messages.system(Severity::Info, WELCOME_TEXT, now);
        tracing::info!(city = %name, seed = rng.seed(), "new game");
        Self {
            stats: CityStats::opening(name, rules.initial_treasury),
            territory: Territory::new(rules.chunk_size, rules.starting_chunk),
            grid,
            messages,
            camera: Camera::default(),
            ui: UiFlags::default(),
            move_selection: None,
            purchase_prompt: None,
            epoch: 0,
            pause_changes: 0,
            rules,
        }
    }

    /// Fresh terrain, stats and territory under a new name. Panels and the
    /// pause flag carry over.
    pub fn restart(&mut self, rng: &mut RngManager, now: DateTime<Utc>) {
        self.grid = terrain::generate(self.rules.grid_size, &mut rng.stream("terrain"));
        let name = names::generate_city_name(&mut rng.stream("names"));
        tracing::info!(city = %name, "game restarted");
        self.stats = CityStats::opening(name, self.rules.initial_treasury);
        self.territory = Territory::new(self.rules.chunk_size, self.rules.starting_chunk);
        self.messages = MessageLog::default();
        self.messages.system(Severity::Info, RESTART_TEXT, now);
        self.camera.reset();
        self.ui.selected_tool = ZoneType::Road;
        self.clear_transient();
        self.bump_epoch();
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Bumped on every pause toggle, so a clock can notice a pause and
    /// resume that both happened between two of its reads.
    pub fn pause_changes(&self) -> u64 {
        self.pause_changes
    }

    pub(crate) fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    pub(crate) fn clear_transient(&mut self) {
        self.move_selection = None;
        self.purchase_prompt = None;
    }

    pub fn zone_at(&self, tile: TileId) -> Option<ZoneType> {
        self.grid.get(tile).map(|t| t.zone)
    }

    fn prompt_for(&mut self, chunk: ChunkId) -> PurchasePrompt {
        let prompt = PurchasePrompt {
            chunk,
            cost: self.rules.sectors.price(chunk),
        };
        self.purchase_prompt = Some(prompt);
        prompt
    }

    /// Click with the active tool.
    pub fn apply_tool(&mut self, tile: TileId, now: DateTime<Utc>) -> ToolOutcome {
        match self.ui.selected_tool {
            ZoneType::Move => self.select_for_move(tile, now),
            tool => ToolOutcome::Place(self.place(tile, tool, now)),
        }
    }

    pub fn select_for_move(&mut self, tile: TileId, now: DateTime<Utc>) -> ToolOutcome {
        let Some(zone) = self.zone_at(tile) else {
            return ToolOutcome::OutOfBounds;
        };
        let chunk = self.territory.chunk_of(tile);
        if !self.territory.is_unlocked(chunk) {
            return ToolOutcome::Locked(self.prompt_for(chunk));
        }
        if zone.is_terrain() {
            self.messages.system(Severity::Warning, TERRAIN_WARNING, now);
            return ToolOutcome::Terrain;
        }
        if zone == ZoneType::Empty {
            return ToolOutcome::NothingToSelect;
        }
        self.move_selection = Some(tile);
        ToolOutcome::Selected(tile)
    }

    pub fn place(&mut self, tile: TileId, zone: ZoneType, now: DateTime<Utc>) -> PlaceOutcome {
        let Some(current) = self.zone_at(tile) else {
            return PlaceOutcome::OutOfBounds;
        };
        if !zone.is_placeable() {
            return PlaceOutcome::NotPlaceable;
        }
        let chunk = self.territory.chunk_of(tile);
        if !self.territory.is_unlocked(chunk) {
            return PlaceOutcome::Locked(self.prompt_for(chunk));
        }
        if current.is_terrain() {
            self.messages.system(Severity::Warning, TERRAIN_WARNING, now);
            return PlaceOutcome::Terrain;
        }
        let cost = self.rules.zones.cost(zone);
        if self.stats.treasury < cost {
            self.messages.system(Severity::Warning, FUNDS_WARNING, now);
            return PlaceOutcome::InsufficientFunds {
                cost,
                treasury: self.stats.treasury,
            };
        }
        if current == zone {
            return PlaceOutcome::Unchanged;
        }
        self.grid.set_zone(tile, zone);
        self.stats.treasury -= cost;
        tracing::debug!(%tile, zone = zone.display_name(), cost, "zone placed");
        PlaceOutcome::Placed {
            previous: current,
            cost,
        }
    }

    pub fn demolish(&mut self, tile: TileId) -> DemolishOutcome {
        if self.ui.selected_tool == ZoneType::Move {
            self.move_selection = None;
            return DemolishOutcome::SelectionCleared;
        }
        let Some(current) = self.zone_at(tile) else {
            return DemolishOutcome::OutOfBounds;
        };
        if current.is_terrain() {
            return DemolishOutcome::Terrain;
        }
        if !self.territory.owns_tile(tile) {
            return DemolishOutcome::Locked;
        }
        if current == ZoneType::Empty {
            return DemolishOutcome::AlreadyEmpty;
        }
        self.grid.set_zone(tile, ZoneType::Empty);
        DemolishOutcome::Cleared { previous: current }
    }

    /// Swaps the contents of `tile` with its neighbour at `(dx, dy)`.
    pub fn nudge(&mut self, tile: TileId, dx: i32, dy: i32) -> MoveOutcome {
        let Some(source) = self.zone_at(tile) else {
            return MoveOutcome::OutOfBounds;
        };
        let Some(target) = tile.offset(dx, dy, self.grid.size()) else {
            return MoveOutcome::OutOfBounds;
        };
        let Some(target_zone) = self.zone_at(target) else {
            return MoveOutcome::OutOfBounds;
        };
        if source.is_terrain() || target_zone.is_terrain() {
            return MoveOutcome::Terrain;
        }
        if !self.territory.owns_tile(tile) || !self.territory.owns_tile(target) {
            return MoveOutcome::Locked;
        }
        self.grid.swap_contents(tile, target);
        self.move_selection = Some(target);
        MoveOutcome::Moved { to: target }
    }

    pub fn nudge_selection(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        match self.move_selection {
            Some(tile) => self.nudge(tile, dx, dy),
            None => MoveOutcome::NoSelection,
        }
    }

    pub fn clear_move_selection(&mut self) {
        self.move_selection = None;
    }

    pub fn purchase(&mut self, chunk: ChunkId, now: DateTime<Utc>) -> PurchaseOutcome {
        let span = self.rules.grid_size.div_ceil(self.rules.chunk_size);
        if chunk.cx >= span || chunk.cy >= span {
            return PurchaseOutcome::OutOfBounds;
        }
        if self.territory.is_unlocked(chunk) {
            return PurchaseOutcome::AlreadyUnlocked;
        }
        let cost = self.rules.sectors.price(chunk);
        if self.stats.treasury < cost {
            self.messages.system(Severity::Warning, TREASURY_WARNING, now);
            return PurchaseOutcome::InsufficientFunds {
                cost,
                treasury: self.stats.treasury,
            };
        }
        self.territory.unlock(chunk);
        self.stats.treasury -= cost;
        tracing::info!(%chunk, cost, treasury = self.stats.treasury, "sector purchased");
        PurchaseOutcome::Unlocked { chunk, cost }
    }

    /// Buys the prompted sector. The prompt stays open when funds fall short.
    pub fn confirm_purchase(&mut self, now: DateTime<Utc>) -> Option<PurchaseOutcome> {
        let prompt = self.purchase_prompt?;
        let outcome = self.purchase(prompt.chunk, now);
        if !matches!(outcome, PurchaseOutcome::InsufficientFunds { .. }) {
            self.purchase_prompt = None;
        }
        Some(outcome)
    }

    pub fn dismiss_purchase(&mut self) -> bool {
        self.purchase_prompt.take().is_some()
    }

    pub fn rename_city(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.stats.name = trimmed.to_string();
        true
    }

    pub fn set_tool(&mut self, tool: ZoneType) {
        self.ui.selected_tool = tool;
        self.move_selection = None;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.ui.is_paused = !self.ui.is_paused;
        self.pause_changes += 1;
        self.ui.is_paused
    }

    pub fn toggle_left_panel(&mut self) -> bool {
        self.ui.show_left_panel = !self.ui.show_left_panel;
        self.ui.show_left_panel
    }

    pub fn toggle_right_panel(&mut self) -> bool {
        self.ui.show_right_panel = !self.ui.show_right_panel;
        self.ui.show_right_panel
    }

    pub fn pan_camera(&mut self, dx: f64, dy: f64) {
        self.camera.pan(dx, dy);
    }

    pub fn zoom_camera(&mut self, delta: f64) {
        self.camera.zoom_by(delta);
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    /// Posts the current brief as an advisor message and returns its text.
    pub fn ask_advisor(&mut self, now: DateTime<Utc>) -> String {
        let text = advisor::brief(&self.stats, self.grid.tiles());
        self.messages
            .post(Sender::Advisor, Severity::Info, text.clone(), now);
        text
    }
}
