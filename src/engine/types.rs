use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State of the single playback session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// No track loaded.
    Idle,
    /// A bind has been issued; waiting for the start to complete.
    Loading,
    Playing,
    Paused,
    /// The current track ran to its end; nothing restarts it automatically
    /// from inside the engine.
    Ended,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Events the engine emits for the navigator/UI to subscribe to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlaybackEvent {
    StateChanged {
        state: PlayerState,
    },
    /// A different track was loaded (never emitted for same-track toggles).
    TrackChanged {
        name: String,
        previous: Option<String>,
    },
    /// The current track reached its end naturally.
    TrackFinished {
        name: String,
    },
    PositionUpdate {
        position_secs: f64,
        duration_secs: f64,
    },
    /// Fired once per source, when the transport resolves metadata.
    DurationKnown {
        duration_secs: f64,
    },
    /// Non-fatal playback failure; the engine is back in `Idle`.
    Error {
        message: String,
    },
}

/// Events arriving from the transport boundary. The engine never polls for
/// these; the host forwards them as they occur.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    TimeUpdate { position_secs: f64 },
    MetadataLoaded { duration_secs: f64 },
    Ended,
}

/// Outcome of asking a transport to start playback. Asynchronous backends
/// return `Pending` and complete through `PlayerEngine::complete_start`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StartPlayback {
    Started,
    Pending,
}

/// Non-fatal playback failures. None of these tear down the session; the
/// engine reports them and returns to `Idle`.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device available: {0}")]
    Device(String),
    #[error("failed to open {path:?}: {reason}")]
    Open { path: PathBuf, reason: String },
    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("playback start failed: {0}")]
    Start(String),
}
