//! Library module: genres, tracks and how they are built from disk.
//!
//! The `Library` holds every configured `Genre` and is the single source of
//! truth for per-track play counts. Construction helpers (file enumeration,
//! duration probing, play-count hydration) live in `library::build`.

mod build;
mod model;

pub use build::*;
pub use model::*;
