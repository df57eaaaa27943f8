use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

/// Key holding the persisted genre-name list (a JSON array of `{"name"}`).
pub const GENRES_KEY: &str = "mp3-jukebox-genres";

/// Key holding the decimal play count for one file.
pub fn play_count_key(file_name: &str) -> String {
    format!("play_count_{file_name}")
}

/// External key/value persistence. Writes are best-effort: implementations
/// swallow failures, losing play-count durability is acceptable.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store. No durability; used in tests and by hosts that persist
/// elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GenreName {
    name: String,
}

/// Read the persisted genre-name list. A malformed entry is discarded and the
/// key removed so later loads fall back to an empty library instead of
/// failing again; nothing escapes to the caller.
pub fn load_genre_names(store: &mut dyn SettingsStore) -> Vec<String> {
    let Some(raw) = store.get(GENRES_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<GenreName>>(&raw) {
        Ok(names) => names.into_iter().map(|g| g.name).collect(),
        Err(err) => {
            warn!("discarding malformed genre list under {GENRES_KEY}: {err}");
            store.remove(GENRES_KEY);
            Vec::new()
        }
    }
}

/// Persist the genre-name list. Track sets are not persisted; file handles do
/// not survive a session.
pub fn save_genre_names(store: &mut dyn SettingsStore, names: &[String]) {
    let names: Vec<GenreName> = names
        .iter()
        .map(|name| GenreName { name: name.clone() })
        .collect();
    match serde_json::to_string(&names) {
        Ok(json) => store.set(GENRES_KEY, &json),
        Err(err) => warn!("failed to encode genre list: {err}"),
    }
}
