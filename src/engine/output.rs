use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use log::debug;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::library::Track;
use crate::spectrum::{SpectrumTap, TapSource};

use super::transport::Transport;
use super::types::{PlaybackError, StartPlayback, TransportEvent};

/// Rodio-backed transport: decode -> spectrum tap -> default output device.
///
/// The `OutputStream` is the expensive, device-bound half of the pipeline; it
/// is built once (through [`Transport::build_pipeline`]) and lives for the
/// whole session. Each bound track gets a fresh `Sink`.
pub struct RodioTransport {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    tap: SpectrumTap,
    source_duration: Option<f64>,
    paused: bool,
    metadata_sent: bool,
    ended_sent: bool,
}

impl RodioTransport {
    pub fn new(tap: SpectrumTap) -> Self {
        Self {
            stream: None,
            sink: None,
            tap,
            source_duration: None,
            paused: true,
            metadata_sent: false,
            ended_sent: false,
        }
    }

    /// Drain the boundary events that accrued since the last call: a one-time
    /// `MetadataLoaded` per source, a `TimeUpdate` per poll, and a one-time
    /// `Ended` once the sink drains while unpaused. The host forwards these
    /// into the engine/session.
    pub fn take_events(&mut self) -> Vec<TransportEvent> {
        let mut events = Vec::new();
        let Some(sink) = &self.sink else {
            return events;
        };

        if !self.metadata_sent {
            if let Some(duration_secs) = self.source_duration {
                events.push(TransportEvent::MetadataLoaded { duration_secs });
                self.metadata_sent = true;
            }
        }

        events.push(TransportEvent::TimeUpdate {
            position_secs: sink.get_pos().as_secs_f64(),
        });

        if !self.ended_sent && !self.paused && sink.empty() {
            events.push(TransportEvent::Ended);
            self.ended_sent = true;
        }

        events
    }
}

impl Transport for RodioTransport {
    fn build_pipeline(&mut self) -> Result<(), PlaybackError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|err| PlaybackError::Device(err.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped; noisy for hosts.
        stream.log_on_drop(false);
        self.stream = Some(stream);
        Ok(())
    }

    fn resume_device(&mut self) {
        // The default-device stream has no suspended state to clear; sinks
        // resume through `resume`.
    }

    fn bind(&mut self, track: &Track) -> Result<(), PlaybackError> {
        let Some(stream) = &self.stream else {
            return Err(PlaybackError::Device("pipeline not built".to_string()));
        };

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let file = File::open(&track.path).map_err(|err| PlaybackError::Open {
            path: track.path.clone(),
            reason: err.to_string(),
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|err| PlaybackError::Decode {
            path: track.path.clone(),
            reason: err.to_string(),
        })?;

        self.source_duration = source.total_duration().map(|d| d.as_secs_f64());
        let source = TapSource::new(source, self.tap.clone());

        let sink = Sink::connect_new(stream.mixer());
        sink.append(source);
        sink.pause();

        self.sink = Some(sink);
        self.paused = true;
        self.metadata_sent = false;
        self.ended_sent = false;
        Ok(())
    }

    fn start(&mut self) -> Result<StartPlayback, PlaybackError> {
        match &self.sink {
            Some(sink) => {
                sink.play();
                self.paused = false;
                Ok(StartPlayback::Started)
            }
            None => Err(PlaybackError::Start("no bound source".to_string())),
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
            self.paused = true;
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
            self.paused = false;
        }
    }

    fn seek(&mut self, seconds: f64) {
        if let Some(sink) = &self.sink {
            if let Err(err) = sink.try_seek(Duration::from_secs_f64(seconds.max(0.0))) {
                debug!("seek to {seconds}s not applied: {err}");
            }
        }
    }

    fn release(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.source_duration = None;
    }
}
