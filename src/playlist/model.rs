use crate::library::Track;

/// A display name plus an ordered sequence of tracks. Reordering a playlist
/// (e.g. by shuffle) never mutates the source genre's track order.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            tracks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn position_of(&self, file_name: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.file_name == file_name)
    }
}

/// The track after `current_name`, by identity match. No wraparound: `None`
/// at the last index, and `None` when the current track is not in the list
/// (e.g. playback started from a different view).
pub fn next_track<'a>(tracks: &'a [Track], current_name: &str) -> Option<&'a Track> {
    let pos = tracks.iter().position(|t| t.file_name == current_name)?;
    tracks.get(pos + 1)
}

/// The track before `current_name`. Symmetric with [`next_track`]: no
/// wraparound at index 0, `None` when the current track is absent.
pub fn prev_track<'a>(tracks: &'a [Track], current_name: &str) -> Option<&'a Track> {
    let pos = tracks.iter().position(|t| t.file_name == current_name)?;
    pos.checked_sub(1).and_then(|p| tracks.get(p))
}
