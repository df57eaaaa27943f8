use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use super::player::PlayerEngine;
use super::transport::Transport;
use super::types::{PlaybackError, PlaybackEvent, PlayerState, StartPlayback, TransportEvent};
use crate::library::{Genre, Library, Track};
use crate::store::{MemoryStore, SettingsStore, play_count_key};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    BuildPipeline,
    ResumeDevice,
    Bind(String),
    Start,
    Pause,
    Resume,
    Seek(u64),
    Release,
}

/// Scriptable transport recording every call.
#[derive(Default)]
struct FakeTransport {
    calls: Vec<Call>,
    fail_bind: bool,
    fail_start: bool,
    start_pending: bool,
}

impl Transport for FakeTransport {
    fn build_pipeline(&mut self) -> Result<(), PlaybackError> {
        self.calls.push(Call::BuildPipeline);
        Ok(())
    }

    fn resume_device(&mut self) {
        self.calls.push(Call::ResumeDevice);
    }

    fn bind(&mut self, track: &Track) -> Result<(), PlaybackError> {
        self.calls.push(Call::Bind(track.file_name.clone()));
        if self.fail_bind {
            return Err(PlaybackError::Open {
                path: track.path.clone(),
                reason: "no such file".to_string(),
            });
        }
        Ok(())
    }

    fn start(&mut self) -> Result<StartPlayback, PlaybackError> {
        self.calls.push(Call::Start);
        if self.fail_start {
            return Err(PlaybackError::Start("device gone".to_string()));
        }
        if self.start_pending {
            Ok(StartPlayback::Pending)
        } else {
            Ok(StartPlayback::Started)
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn resume(&mut self) {
        self.calls.push(Call::Resume);
    }

    fn seek(&mut self, seconds: f64) {
        self.calls.push(Call::Seek(seconds as u64));
    }

    fn release(&mut self) {
        self.calls.push(Call::Release);
    }
}

fn track(file_name: &str, play_count: u64) -> Track {
    Track {
        path: PathBuf::from(format!("/music/{file_name}")),
        file_name: file_name.to_string(),
        display: file_name.trim_end_matches(".mp3").to_string(),
        duration_secs: 0.0,
        play_count,
    }
}

fn library_with(tracks: Vec<Track>) -> Library {
    let mut lib = Library::new();
    lib.upsert_genre(Genre {
        name: "Rock".to_string(),
        tracks,
    });
    lib
}

fn drain(rx: &Receiver<PlaybackEvent>) -> Vec<PlaybackEvent> {
    rx.try_iter().collect()
}

#[test]
fn load_builds_pipeline_once_and_starts_playing() {
    let (mut engine, rx) = PlayerEngine::new(FakeTransport::default());
    let mut lib = library_with(vec![track("a.mp3", 0), track("b.mp3", 0)]);
    let mut store = MemoryStore::new();

    let a = lib.find_track("a.mp3").unwrap().clone();
    engine.load(&a, &mut lib, &mut store);
    assert_eq!(engine.state(), PlayerState::Playing);
    assert_eq!(engine.current().unwrap().file_name, "a.mp3");

    let b = lib.find_track("b.mp3").unwrap().clone();
    engine.load(&b, &mut lib, &mut store);

    let pipelines = engine
        .transport_mut()
        .calls
        .iter()
        .filter(|c| **c == Call::BuildPipeline)
        .count();
    assert_eq!(pipelines, 1);

    let events = drain(&rx);
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::TrackChanged { name, previous: Some(p) }
            if name == "b.mp3" && p == "a.mp3"
    )));
}

#[test]
fn load_increments_count_in_library_and_store() {
    let (mut engine, _rx) = PlayerEngine::new(FakeTransport::default());
    let mut lib = library_with(vec![track("a.mp3", 4)]);
    let mut store = MemoryStore::new();

    let a = lib.find_track("a.mp3").unwrap().clone();
    engine.load(&a, &mut lib, &mut store);

    assert_eq!(lib.play_count("a.mp3"), Some(5));
    assert_eq!(store.get(&play_count_key("a.mp3")), Some("5".to_string()));
    assert_eq!(engine.current().unwrap().play_count, 5);
}

#[test]
fn same_track_load_toggles_without_rebind_or_count_change() {
    let (mut engine, rx) = PlayerEngine::new(FakeTransport::default());
    let mut lib = library_with(vec![track("a.mp3", 0)]);
    let mut store = MemoryStore::new();
    let a = lib.find_track("a.mp3").unwrap().clone();

    engine.load(&a, &mut lib, &mut store);
    engine.load(&a, &mut lib, &mut store);
    assert_eq!(engine.state(), PlayerState::Paused);
    engine.load(&a, &mut lib, &mut store);
    assert_eq!(engine.state(), PlayerState::Playing);

    assert_eq!(lib.play_count("a.mp3"), Some(1));
    let binds = engine
        .transport_mut()
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Bind(_)))
        .count();
    assert_eq!(binds, 1);

    let changed = drain(&rx)
        .iter()
        .filter(|e| matches!(e, PlaybackEvent::TrackChanged { .. }))
        .count();
    assert_eq!(changed, 1);
}

#[test]
fn ended_then_same_track_resumes_without_count_change() {
    let (mut engine, _rx) = PlayerEngine::new(FakeTransport::default());
    let mut lib = library_with(vec![track("a.mp3", 0)]);
    let mut store = MemoryStore::new();
    let a = lib.find_track("a.mp3").unwrap().clone();

    engine.load(&a, &mut lib, &mut store);
    engine.on_transport_event(TransportEvent::Ended);
    assert_eq!(engine.state(), PlayerState::Ended);

    engine.load(&a, &mut lib, &mut store);
    assert_eq!(engine.state(), PlayerState::Playing);
    assert_eq!(lib.play_count("a.mp3"), Some(1));
}

#[test]
fn bind_failure_reports_and_returns_to_idle() {
    let transport = FakeTransport {
        fail_bind: true,
        ..FakeTransport::default()
    };
    let (mut engine, rx) = PlayerEngine::new(transport);
    let mut lib = library_with(vec![track("a.mp3", 0)]);
    let mut store = MemoryStore::new();
    let a = lib.find_track("a.mp3").unwrap().clone();

    engine.load(&a, &mut lib, &mut store);

    assert_eq!(engine.state(), PlayerState::Idle);
    assert!(engine.current().is_none());
    // the count side effect never ran
    assert_eq!(lib.play_count("a.mp3"), Some(0));
    assert!(
        drain(&rx)
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Error { .. }))
    );
}

#[test]
fn start_failure_reports_and_returns_to_idle() {
    let transport = FakeTransport {
        fail_start: true,
        ..FakeTransport::default()
    };
    let (mut engine, rx) = PlayerEngine::new(transport);
    let mut lib = library_with(vec![track("a.mp3", 0)]);
    let mut store = MemoryStore::new();
    let a = lib.find_track("a.mp3").unwrap().clone();

    engine.load(&a, &mut lib, &mut store);

    assert_eq!(engine.state(), PlayerState::Idle);
    assert!(
        drain(&rx)
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Error { .. }))
    );
}

#[test]
fn pending_start_completes_for_matching_track_only() {
    let transport = FakeTransport {
        start_pending: true,
        ..FakeTransport::default()
    };
    let (mut engine, _rx) = PlayerEngine::new(transport);
    let mut lib = library_with(vec![track("a.mp3", 0)]);
    let mut store = MemoryStore::new();
    let a = lib.find_track("a.mp3").unwrap().clone();

    engine.load(&a, &mut lib, &mut store);
    assert_eq!(engine.state(), PlayerState::Loading);

    // stale completion for a track nobody is waiting on
    engine.complete_start("other.mp3", Ok(()));
    assert_eq!(engine.state(), PlayerState::Loading);

    engine.complete_start("a.mp3", Ok(()));
    assert_eq!(engine.state(), PlayerState::Playing);
}

#[test]
fn stale_failed_completion_does_not_disturb_current_track() {
    let transport = FakeTransport {
        start_pending: true,
        ..FakeTransport::default()
    };
    let (mut engine, _rx) = PlayerEngine::new(transport);
    let mut lib = library_with(vec![track("a.mp3", 0), track("b.mp3", 0)]);
    let mut store = MemoryStore::new();

    let a = lib.find_track("a.mp3").unwrap().clone();
    let b = lib.find_track("b.mp3").unwrap().clone();
    engine.load(&a, &mut lib, &mut store);
    engine.load(&b, &mut lib, &mut store);

    engine.complete_start("a.mp3", Err(PlaybackError::Start("aborted".to_string())));
    assert_eq!(engine.state(), PlayerState::Loading);
    assert_eq!(engine.current().unwrap().file_name, "b.mp3");

    engine.complete_start("b.mp3", Ok(()));
    assert_eq!(engine.state(), PlayerState::Playing);
}

#[test]
fn pause_resume_follow_state() {
    let (mut engine, _rx) = PlayerEngine::new(FakeTransport::default());
    let mut lib = library_with(vec![track("a.mp3", 0)]);
    let mut store = MemoryStore::new();

    // no current track: both are no-ops
    engine.pause();
    engine.resume();
    assert_eq!(engine.state(), PlayerState::Idle);
    assert!(engine.transport_mut().calls.is_empty());

    let a = lib.find_track("a.mp3").unwrap().clone();
    engine.load(&a, &mut lib, &mut store);
    engine.pause();
    assert_eq!(engine.state(), PlayerState::Paused);
    engine.pause();
    assert_eq!(engine.state(), PlayerState::Paused);
    engine.toggle_pause();
    assert_eq!(engine.state(), PlayerState::Playing);
}

#[test]
fn seek_clamps_to_known_duration() {
    let (mut engine, rx) = PlayerEngine::new(FakeTransport::default());
    let mut lib = library_with(vec![track("a.mp3", 0)]);
    let mut store = MemoryStore::new();
    let a = lib.find_track("a.mp3").unwrap().clone();
    engine.load(&a, &mut lib, &mut store);

    engine.on_transport_event(TransportEvent::MetadataLoaded { duration_secs: 180.0 });
    engine.seek(500.0);
    assert_eq!(engine.position_secs(), 180.0);
    engine.seek(-3.0);
    assert_eq!(engine.position_secs(), 0.0);

    let events = drain(&rx);
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::DurationKnown { duration_secs } if *duration_secs == 180.0
    )));
}

#[test]
fn seek_without_track_is_a_no_op() {
    let (mut engine, _rx) = PlayerEngine::new(FakeTransport::default());
    engine.seek(30.0);
    assert_eq!(engine.position_secs(), 0.0);
    assert!(engine.transport_mut().calls.is_empty());
}

#[test]
fn time_updates_clamp_and_emit_position() {
    let (mut engine, rx) = PlayerEngine::new(FakeTransport::default());
    let mut lib = library_with(vec![track("a.mp3", 0)]);
    let mut store = MemoryStore::new();
    let a = lib.find_track("a.mp3").unwrap().clone();
    engine.load(&a, &mut lib, &mut store);
    drain(&rx);

    engine.on_transport_event(TransportEvent::MetadataLoaded { duration_secs: 60.0 });
    engine.on_transport_event(TransportEvent::TimeUpdate { position_secs: 61.5 });
    assert_eq!(engine.position_secs(), 60.0);

    let events = drain(&rx);
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::PositionUpdate { position_secs, .. } if *position_secs == 60.0
    )));
}

#[test]
fn ended_pins_position_and_emits_track_finished() {
    let (mut engine, rx) = PlayerEngine::new(FakeTransport::default());
    let mut lib = library_with(vec![track("a.mp3", 0)]);
    let mut store = MemoryStore::new();
    let a = lib.find_track("a.mp3").unwrap().clone();
    engine.load(&a, &mut lib, &mut store);

    engine.on_transport_event(TransportEvent::MetadataLoaded { duration_secs: 120.0 });
    engine.on_transport_event(TransportEvent::Ended);

    assert_eq!(engine.state(), PlayerState::Ended);
    assert_eq!(engine.position_secs(), 120.0);
    // current stays set; a later same-track load resumes it
    assert_eq!(engine.current().unwrap().file_name, "a.mp3");
    assert!(drain(&rx).iter().any(|e| matches!(
        e,
        PlaybackEvent::TrackFinished { name } if name == "a.mp3"
    )));
}

#[test]
fn transport_events_without_current_are_ignored() {
    let (mut engine, rx) = PlayerEngine::new(FakeTransport::default());
    engine.on_transport_event(TransportEvent::TimeUpdate { position_secs: 5.0 });
    engine.on_transport_event(TransportEvent::Ended);
    assert_eq!(engine.state(), PlayerState::Idle);
    assert!(drain(&rx).is_empty());
}
