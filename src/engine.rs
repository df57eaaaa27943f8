//! Playback engine: the single active audio session.
//!
//! `PlayerEngine` drives the load / toggle / seek state machine and owns the
//! play-count side effects; the `Transport` trait is the seam to the actual
//! audio backend, with `RodioTransport` as the bundled implementation
//! (decode -> spectrum tap -> output device).

mod output;
mod player;
mod transport;
mod types;

pub use output::*;
pub use player::*;
pub use transport::*;
pub use types::*;

#[cfg(test)]
mod tests;
