use crate::library::Track;

use super::types::{PlaybackError, StartPlayback};

/// Seam to the audio backend: one bound source at a time, play/pause/seek.
///
/// Time, duration and end-of-track travel the other way, as
/// [`super::TransportEvent`]s the host feeds into the engine.
pub trait Transport {
    /// Build the decode -> analysis -> output pipeline. The engine calls this
    /// at most once per session, before the first bind.
    fn build_pipeline(&mut self) -> Result<(), PlaybackError>;

    /// Resume a suspended output device. Issued before every play, since the
    /// platform may suspend the device behind the engine's back.
    fn resume_device(&mut self) {}

    /// Bind a new playable stream derived from the track's file reference,
    /// leaving it paused. Any previously bound stream is released first.
    fn bind(&mut self, track: &Track) -> Result<(), PlaybackError>;

    /// Start playing the bound stream.
    fn start(&mut self) -> Result<StartPlayback, PlaybackError>;

    fn pause(&mut self);

    fn resume(&mut self);

    fn seek(&mut self, seconds: f64);

    /// Release the bound stream, if any. The pipeline itself stays up.
    fn release(&mut self);
}
