use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{env, fs};

use log::warn;

use super::kv::SettingsStore;

/// Single-JSON-file settings store.
///
/// The whole store is one flat `{key: value}` object, written through on
/// every mutation. A corrupt or unreadable file is discarded at open time and
/// the store starts empty; write failures are logged and swallowed.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(values) => values,
                Err(err) => {
                    warn!("discarding corrupt settings file {:?}: {err}", path);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, values }
    }

    /// Open the store at the default XDG data path.
    pub fn open_default() -> Self {
        Self::open(default_store_path().unwrap_or_else(|| PathBuf::from("mp3-jukebox-store.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let json = match serde_json::to_string_pretty(&self.values) {
            Ok(json) => json,
            Err(err) => {
                warn!("failed to encode settings store: {err}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(err) = fs::write(&self.path, json) {
            warn!("failed to write settings store {:?}: {err}", self.path);
        }
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.flush();
        }
    }
}

/// Default store path under `$XDG_DATA_HOME/mp3-jukebox/store.json` or
/// `~/.local/share/mp3-jukebox/store.json`.
pub fn default_store_path() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("share"))
    } else {
        None
    };

    data_home.map(|d| d.join("mp3-jukebox").join("store.json"))
}
