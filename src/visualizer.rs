//! Spectrum-frame rendering.
//!
//! `render` turns one sampled frequency frame into draw calls against an
//! abstract `Surface`, in one of three interchangeable styles. `RenderLoop`
//! is the cancellable ticker that drives sampling + rendering at animation
//! rate while a pipeline exists.

mod animation;
mod styles;
mod surface;

pub use animation::*;
pub use styles::*;
pub use surface::*;
