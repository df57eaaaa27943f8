use rustfft::{FftPlanner, num_complex::Complex};

use super::tap::SpectrumTap;

/// Pull-based frequency analysis over a fixed transform window.
///
/// `byte_frequency_data` fills one magnitude per frequency bin; bin count is
/// half the window size, fixed at construction. Implementations never block
/// and never fail: sampling at an arbitrary tick rate returns the latest
/// available frame, stale data included.
pub trait AnalysisNode {
    fn fft_size(&self) -> usize;

    fn frequency_bin_count(&self) -> usize {
        self.fft_size() / 2
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]);
}

/// FFT analysis node over a [`SpectrumTap`].
///
/// Each pull snapshots the tap's latest window (keeping the previous snapshot
/// when the audio thread holds the lock), applies a Hann window, runs a
/// forward FFT and maps bin magnitudes into `0..=255`.
pub struct FftAnalyzer {
    tap: SpectrumTap,
    fft_size: usize,
    planner: FftPlanner<f32>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
}

impl FftAnalyzer {
    pub fn new(tap: SpectrumTap, fft_size: usize) -> Self {
        Self {
            tap,
            fft_size,
            planner: FftPlanner::new(),
            window: vec![0.0; fft_size],
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
        }
    }
}

impl AnalysisNode for FftAnalyzer {
    fn fft_size(&self) -> usize {
        self.fft_size
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        // Contended tap -> reuse the previous window; stale is acceptable.
        if let Ok(buf) = self.tap.try_lock() {
            buf.copy_ordered(&mut self.window);
        }

        let n = self.fft_size;
        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let hann = 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / n as f32).cos());
            *slot = Complex::new(self.window[i] * hann, 0.0);
        }

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut self.scratch);

        let norm = 1.0 / n as f32;
        let bins = self.frequency_bin_count();
        for (i, slot) in out.iter_mut().enumerate() {
            if i < bins {
                let mag = self.scratch[i].norm() * norm;
                let v = (mag * 8.0).sqrt().min(1.0);
                *slot = (v * 255.0) as u8;
            } else {
                *slot = 0;
            }
        }
    }
}
