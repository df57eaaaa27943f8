//! Top-level session controller.
//!
//! One `Session` per running application: it owns the library, the persisted
//! store, the playback engine and the active playlist, and wires the
//! engine's end-of-track event to the navigator's `play_next`.

mod controller;

pub use controller::*;
