//! Session-local MP3 jukebox engine.
//!
//! The host hands this crate folders of `.mp3` files grouped by genre; the
//! crate builds an in-memory [`library::Library`], materializes ephemeral
//! [`playlist::Playlist`]s, owns the single audio pipeline
//! ([`engine::PlayerEngine`]) and feeds a frequency-spectrum visualizer
//! ([`spectrum`], [`visualizer`]) at animation-tick rate.
//!
//! Only genre names and per-track play counts survive a session, through the
//! [`store::SettingsStore`] seam. Everything else is rebuilt on startup.

pub mod config;
pub mod engine;
pub mod library;
pub mod playlist;
pub mod session;
pub mod spectrum;
pub mod store;
pub mod visualizer;
