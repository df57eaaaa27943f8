//! Frequency-spectrum analysis for the visualizer.
//!
//! A `TapSource` sits on the decode path and mirrors a mono mixdown of the
//! samples into a shared ring buffer; `FftAnalyzer` pulls the latest window
//! out of that buffer and turns it into per-bin byte magnitudes on demand;
//! `SpectrumSampler` owns the fixed-size frame the visualizer reads every
//! animation tick.

mod analyzer;
mod sampler;
mod tap;

pub use analyzer::*;
pub use sampler::*;
pub use tap::*;

/// Transform window size used when the host does not configure one.
/// 512 samples -> 256 frequency bins.
pub const DEFAULT_FFT_SIZE: usize = 512;
