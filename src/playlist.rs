//! Ephemeral playlists and track navigation.
//!
//! A `Playlist` is a display name plus an ordered snapshot of tracks,
//! materialized on demand (genre union, single genre, search results,
//! shuffle result) and never persisted. Navigation is pure: given a track
//! list and the current track identity, compute the neighbor or nothing.

mod model;
mod shuffle;

pub use model::*;
pub use shuffle::*;
