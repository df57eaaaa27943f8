//! Persisted-settings store: the small key/value surface that survives a
//! session (genre names, per-track play counts).
//!
//! Hosts with their own persistence implement `SettingsStore`; `FileStore`
//! is the bundled single-JSON-file implementation and `MemoryStore` backs
//! tests.

mod file;
mod kv;

pub use file::*;
pub use kv::*;
