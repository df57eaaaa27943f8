use std::sync::mpsc::Receiver;

use crate::engine::{PlaybackEvent, PlayerEngine, Transport, TransportEvent};
use crate::library::{Genre, Library, Track, sort_by_display};
use crate::playlist::{Playlist, next_track, prev_track, shuffled};
use crate::store::{SettingsStore, load_genre_names, save_genre_names};

/// Session-wide controller: library + store + engine + active playlist.
///
/// The active playlist is the navigator's frame of reference; replacing it
/// (selection, search, shuffle) resets navigation. Playback state changes
/// flow back in through [`on_transport_event`], which is also where the sole
/// auto-advance (end-of-track -> next) lives.
///
/// [`on_transport_event`]: Session::on_transport_event
pub struct Session<T> {
    library: Library,
    store: Box<dyn SettingsStore>,
    engine: PlayerEngine<T>,
    /// Genre names in selection order.
    selected: Vec<String>,
    current_playlist: Option<Playlist>,
}

impl<T: Transport> Session<T> {
    /// Create a session and restore the persisted genre-name list. Restored
    /// genres start with empty track sets; file handles do not survive a
    /// session, so folders must be re-attached through `save_genre_config`.
    pub fn new(
        transport: T,
        mut store: Box<dyn SettingsStore>,
    ) -> (Self, Receiver<PlaybackEvent>) {
        let (engine, events) = PlayerEngine::new(transport);

        let mut library = Library::new();
        for name in load_genre_names(store.as_mut()) {
            library.upsert_genre(Genre {
                name,
                tracks: Vec::new(),
            });
        }

        let session = Self {
            library,
            store,
            engine,
            selected: Vec::new(),
            current_playlist: None,
        };
        (session, events)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn engine(&self) -> &PlayerEngine<T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PlayerEngine<T> {
        &mut self.engine
    }

    pub fn current_playlist(&self) -> Option<&Playlist> {
        self.current_playlist.as_ref()
    }

    pub fn selected_genres(&self) -> &[String] {
        &self.selected
    }

    /// Merge newly configured genres into the library (replace-by-name;
    /// genres not re-configured this session survive) and persist the name
    /// list. Clears the current selection.
    pub fn save_genre_config(&mut self, genres: Vec<Genre>) {
        for genre in genres {
            self.library.upsert_genre(genre);
        }
        let names: Vec<String> = self
            .library
            .genres()
            .iter()
            .map(|g| g.name.clone())
            .collect();
        save_genre_names(self.store.as_mut(), &names);
        self.selected.clear();
    }

    /// Toggle a genre in or out of the selection. Unknown names are ignored.
    pub fn toggle_genre_selection(&mut self, name: &str) {
        if let Some(pos) = self.selected.iter().position(|n| n == name) {
            self.selected.remove(pos);
        } else if self.library.genre(name).is_some() {
            self.selected.push(name.to_string());
        }
    }

    fn selected_tracks(&self) -> Vec<Track> {
        self.selected
            .iter()
            .filter_map(|name| self.library.genre(name))
            .flat_map(|g| g.tracks.clone())
            .collect()
    }

    fn selection_name(&self) -> String {
        self.selected.join(" & ")
    }

    /// Materialize the union of the selected genres, sorted by display name,
    /// as the active playlist. No-op without a selection.
    pub fn show_selected(&mut self) -> Option<&Playlist> {
        if self.selected.is_empty() {
            return None;
        }
        let mut tracks = self.selected_tracks();
        sort_by_display(&mut tracks);
        self.current_playlist = Some(Playlist::new(self.selection_name(), tracks));
        self.current_playlist.as_ref()
    }

    /// Make a single genre the active playlist, in its own order.
    pub fn show_single_genre(&mut self, name: &str) -> Option<&Playlist> {
        let genre = self.library.genre(name)?;
        self.current_playlist = Some(Playlist::new(genre.name.clone(), genre.tracks.clone()));
        self.current_playlist.as_ref()
    }

    /// Shuffle the selected genres' tracks into a new playlist and start its
    /// first track. No-op without a selection.
    pub fn shuffle_selected_and_play(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        let tracks = shuffled(&self.selected_tracks());
        let name = format!("{} (shuffled)", self.selection_name());
        self.set_playlist_and_play_first(name, tracks);
    }

    /// Shuffle every track in the library and start the first one.
    pub fn global_shuffle_and_play(&mut self) {
        let tracks = shuffled(&self.library.all_tracks());
        self.set_playlist_and_play_first("Shuffle All".to_string(), tracks);
    }

    /// Replace the active playlist's order with a fresh shuffle and start its
    /// first track. The source genres keep their order.
    pub fn shuffle_current_and_play(&mut self) {
        let Some(playlist) = &self.current_playlist else {
            return;
        };
        let name = playlist.name.clone();
        let tracks = shuffled(&playlist.tracks);
        self.set_playlist_and_play_first(name, tracks);
    }

    fn set_playlist_and_play_first(&mut self, name: String, tracks: Vec<Track>) {
        self.current_playlist = Some(Playlist::new(name, tracks));
        let first = self
            .current_playlist
            .as_ref()
            .and_then(|p| p.tracks.first().cloned());
        if let Some(track) = first {
            self.play_track(&track);
        }
    }

    /// Case-insensitive substring search across all genres.
    pub fn search(&self, query: &str) -> Vec<Track> {
        self.library.search(query)
    }

    /// Pin the search results as the active playlist, then play `track`, so
    /// next/prev navigate within the results.
    pub fn play_from_search(&mut self, query: &str, track: &Track) {
        let results = self.library.search(query);
        let name = format!("Results for \"{}\"", query.trim());
        self.current_playlist = Some(Playlist::new(name, results));
        let track = track.clone();
        self.play_track(&track);
    }

    /// Load (or toggle) a track and refresh the active playlist's play-count
    /// copies from the library.
    pub fn play_track(&mut self, track: &Track) {
        self.engine
            .load(track, &mut self.library, self.store.as_mut());
        self.refresh_playlist_counts();
    }

    fn refresh_playlist_counts(&mut self) {
        let Some(playlist) = &mut self.current_playlist else {
            return;
        };
        for track in &mut playlist.tracks {
            if let Some(count) = self.library.play_count(&track.file_name) {
                track.play_count = count;
            }
        }
    }

    /// Advance to the track after the current one in the active playlist.
    /// No-op at the end, without a playlist, or when the current track is
    /// not in it.
    pub fn play_next(&mut self) {
        let Some(playlist) = &self.current_playlist else {
            return;
        };
        let Some(current) = self.engine.current() else {
            return;
        };
        let next = next_track(&playlist.tracks, &current.file_name).cloned();
        if let Some(track) = next {
            self.play_track(&track);
        }
    }

    /// Symmetric with [`play_next`]: no-op at index 0 or off-list.
    ///
    /// [`play_next`]: Session::play_next
    pub fn play_prev(&mut self) {
        let Some(playlist) = &self.current_playlist else {
            return;
        };
        let Some(current) = self.engine.current() else {
            return;
        };
        let prev = prev_track(&playlist.tracks, &current.file_name).cloned();
        if let Some(track) = prev {
            self.play_track(&track);
        }
    }

    /// Forward one transport boundary event to the engine. End-of-track
    /// additionally triggers the auto-advance; this is the only place a
    /// track starts without a user action.
    pub fn on_transport_event(&mut self, event: TransportEvent) {
        let ended = matches!(event, TransportEvent::Ended);
        self.engine.on_transport_event(event);
        if ended {
            self.play_next();
        }
    }
}
