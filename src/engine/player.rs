use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, error};

use crate::library::{Library, Track};
use crate::store::{SettingsStore, play_count_key};

use super::transport::Transport;
use super::types::{PlaybackError, PlaybackEvent, PlayerState, StartPlayback, TransportEvent};

/// The playback engine: owns the single audio session and the play-count
/// side effects of starting a new track.
///
/// All methods run on the caller's thread; the engine holds no locks and
/// spawns nothing. Events go out over the channel returned by [`new`].
///
/// [`new`]: PlayerEngine::new
pub struct PlayerEngine<T> {
    transport: T,
    /// Explicit one-time pipeline construction guard. The pipeline is never
    /// torn down afterwards, only suspended/resumed.
    pipeline_ready: bool,
    state: PlayerState,
    current: Option<Track>,
    /// Identity of the track whose start is still pending. Completions for
    /// anything else are stale and get discarded.
    loading: Option<String>,
    position_secs: f64,
    /// `0.0` means unknown; the transport reports the real value through
    /// `MetadataLoaded`.
    duration_secs: f64,
    events: Sender<PlaybackEvent>,
}

impl<T: Transport> PlayerEngine<T> {
    pub fn new(transport: T) -> (Self, Receiver<PlaybackEvent>) {
        let (tx, rx) = mpsc::channel();
        let engine = Self {
            transport,
            pipeline_ready: false,
            state: PlayerState::Idle,
            current: None,
            loading: None,
            position_secs: 0.0,
            duration_secs: 0.0,
            events: tx,
        };
        (engine, rx)
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn emit(&self, event: PlaybackEvent) {
        let _ = self.events.send(event);
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            self.state = state;
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    /// Non-fatal failure: report it, drop the session back to `Idle`.
    fn fail(&mut self, err: PlaybackError) {
        error!("playback failure: {err}");
        self.emit(PlaybackEvent::Error {
            message: err.to_string(),
        });
        self.loading = None;
        self.current = None;
        self.transport.release();
        self.set_state(PlayerState::Idle);
    }

    /// Load `track`, or toggle play/pause when it is already current.
    ///
    /// Loading a *new* track increments its play count, writes the count
    /// through `store` (fire-and-forget) and updates every copy in `library`.
    /// A same-identity call never re-loads the source and never touches the
    /// count.
    pub fn load(&mut self, track: &Track, library: &mut Library, store: &mut dyn SettingsStore) {
        if !self.pipeline_ready {
            if let Err(err) = self.transport.build_pipeline() {
                self.fail(err);
                return;
            }
            self.pipeline_ready = true;
        }
        // The output device may have been suspended by the platform since the
        // last play; resume it before anything audible.
        self.transport.resume_device();

        if self
            .current
            .as_ref()
            .is_some_and(|c| c.file_name == track.file_name)
        {
            match self.state {
                PlayerState::Playing => {
                    self.transport.pause();
                    self.set_state(PlayerState::Paused);
                }
                _ => {
                    self.transport.resume();
                    self.set_state(PlayerState::Playing);
                }
            }
            return;
        }

        let previous = self.current.as_ref().map(|c| c.file_name.clone());
        self.set_state(PlayerState::Loading);
        self.loading = Some(track.file_name.clone());
        self.position_secs = 0.0;
        self.duration_secs = 0.0;

        self.transport.release();
        if let Err(err) = self.transport.bind(track) {
            self.fail(err);
            return;
        }

        // Count the start now, like the time-update/metadata events, without
        // waiting for an asynchronous start to resolve. The library is the
        // authoritative count; the caller's copy may be stale.
        let count = library
            .play_count(&track.file_name)
            .unwrap_or(track.play_count)
            + 1;
        library.set_play_count(&track.file_name, count);
        store.set(&play_count_key(&track.file_name), &count.to_string());

        let mut current = track.clone();
        current.play_count = count;
        self.current = Some(current);
        self.emit(PlaybackEvent::TrackChanged {
            name: track.file_name.clone(),
            previous,
        });

        match self.transport.start() {
            Ok(StartPlayback::Started) => {
                self.loading = None;
                self.set_state(PlayerState::Playing);
            }
            Ok(StartPlayback::Pending) => {
                // Stays in Loading until complete_start.
            }
            Err(err) => self.fail(err),
        }
    }

    /// Resolve an asynchronous start. Completions for a track that is no
    /// longer pending are stale and ignored.
    pub fn complete_start(&mut self, file_name: &str, result: Result<(), PlaybackError>) {
        if self.loading.as_deref() != Some(file_name) {
            debug!("discarding stale start completion for {file_name}");
            return;
        }
        self.loading = None;
        match result {
            Ok(()) => self.set_state(PlayerState::Playing),
            Err(err) => self.fail(err),
        }
    }

    /// Pause the current track. No-op without one, or when not playing.
    pub fn pause(&mut self) {
        if self.current.is_none() || self.state != PlayerState::Playing {
            return;
        }
        self.transport.pause();
        self.set_state(PlayerState::Paused);
    }

    /// Resume the current track. No-op without one.
    pub fn resume(&mut self) {
        if self.current.is_none() || self.state == PlayerState::Playing {
            return;
        }
        self.transport.resume_device();
        self.transport.resume();
        self.set_state(PlayerState::Playing);
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            PlayerState::Playing => self.pause(),
            _ => self.resume(),
        }
    }

    /// Seek, clamped to `[0, duration]` when the duration is known and to
    /// `>= 0` otherwise. The reported position updates immediately without
    /// waiting for the transport to confirm.
    pub fn seek(&mut self, seconds: f64) {
        if self.current.is_none() {
            return;
        }
        let target = if self.duration_secs > 0.0 {
            seconds.clamp(0.0, self.duration_secs)
        } else {
            seconds.max(0.0)
        };
        self.transport.seek(target);
        self.position_secs = target;
        self.emit(PlaybackEvent::PositionUpdate {
            position_secs: self.position_secs,
            duration_secs: self.duration_secs,
        });
    }

    /// Apply one event from the transport boundary. End-of-track is terminal
    /// here: the engine reports it and leaves auto-advance to its subscriber.
    pub fn on_transport_event(&mut self, event: TransportEvent) {
        if self.current.is_none() {
            return;
        }
        match event {
            TransportEvent::TimeUpdate { position_secs } => {
                self.position_secs = if self.duration_secs > 0.0 {
                    position_secs.clamp(0.0, self.duration_secs)
                } else {
                    position_secs.max(0.0)
                };
                self.emit(PlaybackEvent::PositionUpdate {
                    position_secs: self.position_secs,
                    duration_secs: self.duration_secs,
                });
            }
            TransportEvent::MetadataLoaded { duration_secs } => {
                self.duration_secs = duration_secs.max(0.0);
                if self.duration_secs > 0.0 && self.position_secs > self.duration_secs {
                    self.position_secs = self.duration_secs;
                }
                self.emit(PlaybackEvent::DurationKnown {
                    duration_secs: self.duration_secs,
                });
            }
            TransportEvent::Ended => {
                if self.duration_secs > 0.0 {
                    self.position_secs = self.duration_secs;
                }
                self.set_state(PlayerState::Ended);
                if let Some(current) = &self.current {
                    self.emit(PlaybackEvent::TrackFinished {
                        name: current.file_name.clone(),
                    });
                }
            }
        }
    }
}
