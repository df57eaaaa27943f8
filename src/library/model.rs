use std::path::PathBuf;

/// One playable audio item.
///
/// Identity is the underlying file name (`file_name`, case-sensitive). It is
/// the only key used for lookups, current-track comparison and persistence;
/// there are no synthetic ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Handle to the underlying content. The engine only borrows it to derive
    /// a playable stream.
    pub path: PathBuf,
    /// Base name with extension, e.g. `"song.mp3"`.
    pub file_name: String,
    /// Base name with the extension stripped; what the user sees.
    pub display: String,
    /// Probed duration in seconds. `0.0` means "unknown", not an error.
    pub duration_secs: f64,
    /// Times this track has been started, across sessions.
    pub play_count: u64,
}

impl Track {
    /// Two tracks are the same entity iff their file names match.
    pub fn same_identity(&self, other: &Track) -> bool {
        self.file_name == other.file_name
    }
}

/// A named collection of tracks, ordered by display name.
#[derive(Debug, Clone)]
pub struct Genre {
    pub name: String,
    pub tracks: Vec<Track>,
}

/// Every configured genre. Genre names are unique; re-adding a genre with an
/// existing name replaces its track set, it never merges.
#[derive(Debug, Clone, Default)]
pub struct Library {
    genres: Vec<Genre>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn genre(&self, name: &str) -> Option<&Genre> {
        self.genres.iter().find(|g| g.name == name)
    }

    /// Insert `genre`, replacing any existing genre with the same name while
    /// keeping its position. Genres configured in an earlier save survive.
    pub fn upsert_genre(&mut self, genre: Genre) {
        match self.genres.iter_mut().find(|g| g.name == genre.name) {
            Some(existing) => *existing = genre,
            None => self.genres.push(genre),
        }
    }

    pub fn has_tracks(&self) -> bool {
        self.genres.iter().any(|g| !g.tracks.is_empty())
    }

    /// All tracks across all genres, in genre order.
    pub fn all_tracks(&self) -> Vec<Track> {
        self.genres.iter().flat_map(|g| g.tracks.clone()).collect()
    }

    pub fn find_track(&self, file_name: &str) -> Option<&Track> {
        self.genres
            .iter()
            .flat_map(|g| g.tracks.iter())
            .find(|t| t.file_name == file_name)
    }

    pub fn play_count(&self, file_name: &str) -> Option<u64> {
        self.find_track(file_name).map(|t| t.play_count)
    }

    /// Update the play count on every in-memory copy of the track, so all
    /// views reflect the new value immediately.
    pub fn set_play_count(&mut self, file_name: &str, count: u64) {
        for genre in &mut self.genres {
            for track in &mut genre.tracks {
                if track.file_name == file_name {
                    track.play_count = count;
                }
            }
        }
    }

    /// Case-insensitive substring search over display names. A blank query
    /// yields nothing.
    pub fn search(&self, query: &str) -> Vec<Track> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.genres
            .iter()
            .flat_map(|g| g.tracks.iter())
            .filter(|t| t.display.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// Sort tracks by display name, case-insensitive. Genre views and combined
/// playlists share this order.
pub fn sort_by_display(tracks: &mut [Track]) {
    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
}
