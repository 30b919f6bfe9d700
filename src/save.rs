use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    components::{Camera, Tile, UiFlags},
    grid::Grid,
    messages::{MessageLog, SavedMessage, Severity},
    rng::RngManager,
    stats::CityStats,
    store::{KeyValueStore, StoreError},
    territory::{ChunkId, Territory},
    world::GameState,
};

pub const SAVE_VERSION: u32 = 1;
pub const LOADED_TEXT: &str = "City loaded from local storage.";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 6;

fn save_version() -> u32 {
    SAVE_VERSION
}

/// Full snapshot of one game as written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySaveState {
    #[serde(default = "save_version")]
    pub version: u32,
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub stats: CityStats,
    #[serde(default)]
    pub unlocked_chunks: Vec<ChunkId>,
    #[serde(default)]
    pub messages: Vec<SavedMessage>,
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub ui: UiFlags,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEntry {
    pub id: String,
    pub name: String,
    pub saved_at: String,
    pub data: CitySaveState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { id: String, name: String },
    BlankName,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { name: String },
    NotFound,
    Rejected { reason: String },
}

/// Raw stored list. Text that is not a JSON array reads as an empty list;
/// a store that cannot be read at all is an error.
fn read_raw(store: &dyn KeyValueStore, key: &str) -> Result<Vec<Value>, StoreError> {
    let Some(text) = store.get(key)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => {
            tracing::warn!(key, "save store does not hold a list");
            Ok(Vec::new())
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "save store is not valid JSON");
            Ok(Vec::new())
        }
    }
}

/// Stored saves, most recent first. Entries that no longer parse are
/// skipped; the call itself never fails.
pub fn read_entries(store: &dyn KeyValueStore, key: &str) -> Vec<SaveEntry> {
    let items = match read_raw(store, key) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(key, error = %err, "save store unreadable");
            return Vec::new();
        }
    };
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(key, index, error = %err, "skipping unreadable save entry");
                None
            }
        })
        .collect()
}

pub fn snapshot(state: &GameState) -> CitySaveState {
    CitySaveState {
        version: SAVE_VERSION,
        tiles: state.grid.tiles().to_vec(),
        stats: state.stats.clone(),
        unlocked_chunks: state.territory.unlocked().collect(),
        messages: state.messages.to_saved(),
        camera: state.camera,
        ui: state.ui,
    }
}

fn save_id<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("{}-{suffix}", now.timestamp_millis())
}

fn write_entry(store: &mut dyn KeyValueStore, key: &str, entry: &SaveEntry) -> Result<()> {
    let value = serde_json::to_value(entry).context("failed to encode save entry")?;
    // An unreadable store is left alone rather than replaced by one entry.
    let mut items = read_raw(&*store, key).context("failed to read existing saves")?;
    items.insert(0, value);
    let text = serde_json::to_string(&items).context("failed to encode save list")?;
    store.set(key, &text)?;
    Ok(())
}

/// Prepends a snapshot of `state` to the stored list under `name`.
pub fn save_city(
    state: &mut GameState,
    store: &mut dyn KeyValueStore,
    key: &str,
    name: &str,
    rng: &mut RngManager,
    now: DateTime<Utc>,
) -> SaveOutcome {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return SaveOutcome::BlankName;
    }
    let entry = SaveEntry {
        id: save_id(now, &mut rng.stream("saves")),
        name: trimmed.to_string(),
        saved_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        data: snapshot(state),
    };

    let result = write_entry(store, key, &entry).map_err(|err| format!("{err:#}"));

    match result {
        Ok(()) => {
            tracing::info!(id = %entry.id, name = %entry.name, "city saved");
            state.messages.system(
                Severity::Success,
                format!("City saved as \u{201c}{trimmed}\u{201d}."),
                now,
            );
            SaveOutcome::Saved {
                id: entry.id,
                name: entry.name,
            }
        }
        Err(reason) => {
            tracing::error!(key, %reason, "city save failed");
            state
                .messages
                .system(Severity::Warning, format!("Save failed: {reason}"), now);
            SaveOutcome::Failed { reason }
        }
    }
}

/// Replaces the running game with `data`. A grid that does not fit the
/// current map size is rejected and the game is left untouched.
pub fn apply_entry(state: &mut GameState, data: CitySaveState, now: DateTime<Utc>) -> LoadOutcome {
    if data.version != SAVE_VERSION {
        tracing::warn!(version = data.version, "loading save with unexpected version");
    }
    let grid = match Grid::from_tiles(state.rules.grid_size, data.tiles) {
        Ok(grid) => grid,
        Err(err) => {
            let reason = err.to_string();
            tracing::warn!(%reason, "rejected save");
            state.messages.system(
                Severity::Warning,
                format!("Save could not be loaded: {reason}"),
                now,
            );
            return LoadOutcome::Rejected { reason };
        }
    };

    let restored = data
        .messages
        .into_iter()
        .map(|message| message.restore(now))
        .collect();
    let name = data.stats.name.clone();

    state.grid = grid;
    state.stats = data.stats;
    state.territory = Territory::restore(
        state.rules.chunk_size,
        state.rules.starting_chunk,
        data.unlocked_chunks,
    );
    state.camera = data.camera;
    state.ui = data.ui;
    state.messages = MessageLog::from_entries(restored);
    state.messages.system(Severity::Success, LOADED_TEXT, now);
    state.clear_transient();
    state.bump_epoch();
    tracing::info!(city = %name, epoch = state.epoch(), "city loaded");
    LoadOutcome::Loaded { name }
}

/// Loads the newest entry whose id or name matches `selector`.
pub fn load_city(
    state: &mut GameState,
    store: &dyn KeyValueStore,
    key: &str,
    selector: &str,
    now: DateTime<Utc>,
) -> LoadOutcome {
    let selector = selector.trim();
    let entry = read_entries(store, key)
        .into_iter()
        .find(|entry| entry.id == selector || entry.name == selector);
    match entry {
        Some(entry) => apply_entry(state, entry.data, now),
        None => LoadOutcome::NotFound,
    }
}
