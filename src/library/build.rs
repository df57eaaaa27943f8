use std::path::{Path, PathBuf};

use lofty::prelude::*;
use log::debug;
use walkdir::WalkDir;

use crate::store::{SettingsStore, play_count_key};

use super::model::{Genre, Track, sort_by_display};

/// Probes a file for its duration. Implementations resolve to `0.0` on any
/// decode failure rather than erroring; an unknown duration is a valid state.
pub trait DurationProbe {
    fn probe(&self, path: &Path) -> f64;
}

/// Duration probe backed by lofty's metadata reader.
#[derive(Debug, Default)]
pub struct LoftyProbe;

impl DurationProbe for LoftyProbe {
    fn probe(&self, path: &Path) -> f64 {
        match lofty::read_from_path(path) {
            Ok(tagged) => tagged.properties().duration().as_secs_f64(),
            Err(err) => {
                debug!("duration probe failed for {:?}: {err}", path);
                0.0
            }
        }
    }
}

pub(crate) fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

/// Enumerate `.mp3` files (case-insensitive extension) under `dir`.
pub fn list_mp3_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.is_file() && is_mp3(path))
        .collect()
}

/// Build one track from a candidate file: display name from the stem,
/// duration from the probe, play count hydrated from the persisted store.
pub fn build_track(path: &Path, probe: &dyn DurationProbe, store: &dyn SettingsStore) -> Track {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let display = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let play_count = store
        .get(&play_count_key(&file_name))
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    Track {
        path: path.to_path_buf(),
        file_name,
        display,
        duration_secs: probe.probe(path),
        play_count,
    }
}

/// Build a genre from a list of candidate files. Non-mp3 candidates are
/// dropped and the result is sorted by display name, case-insensitive.
pub fn build_genre(
    name: &str,
    files: &[PathBuf],
    probe: &dyn DurationProbe,
    store: &dyn SettingsStore,
) -> Genre {
    let mut tracks: Vec<Track> = files
        .iter()
        .filter(|p| is_mp3(p))
        .map(|p| build_track(p, probe, store))
        .collect();
    sort_by_display(&mut tracks);
    Genre {
        name: name.trim().to_string(),
        tracks,
    }
}
