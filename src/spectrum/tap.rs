use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::Source;

/// Frames accumulated locally before taking the tap lock, to keep the audio
/// thread from contending with the sampler on every sample.
const FLUSH_FRAMES: usize = 128;

/// Ring buffer holding the most recent mono samples from the decode path.
#[derive(Debug)]
pub struct TapBuffer {
    samples: Vec<f32>,
    next: usize,
}

impl TapBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0.0; capacity.max(1)],
            next: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    pub fn push(&mut self, sample: f32) {
        self.samples[self.next] = sample;
        self.next = (self.next + 1) % self.samples.len();
    }

    /// Copy the window into `out`, oldest sample first. `out` shorter than
    /// the capacity receives the most recent samples.
    pub fn copy_ordered(&self, out: &mut [f32]) {
        let cap = self.samples.len();
        let len = out.len().min(cap);
        // start so that the newest sample lands at out[len - 1]
        let start = (self.next + cap - len) % cap;
        for (i, slot) in out.iter_mut().take(len).enumerate() {
            *slot = self.samples[(start + i) % cap];
        }
    }
}

/// Shared handle between the audio thread (writer) and the analyzer (reader).
pub type SpectrumTap = Arc<Mutex<TapBuffer>>;

pub fn new_tap(capacity: usize) -> SpectrumTap {
    Arc::new(Mutex::new(TapBuffer::new(capacity)))
}

/// Wrapper source that mirrors a mono mixdown of the samples it passes
/// through into a [`SpectrumTap`]. Playback is unaffected.
pub struct TapSource<S> {
    inner: S,
    tap: SpectrumTap,
    channels: u16,
    sample_rate: u32,
    frame_acc: f32,
    frame_pos: u16,
    pending: Vec<f32>,
}

impl<S> TapSource<S>
where
    S: Source<Item = f32>,
{
    pub fn new(inner: S, tap: SpectrumTap) -> Self {
        let channels = inner.channels();
        let sample_rate = inner.sample_rate();
        Self {
            inner,
            tap,
            channels,
            sample_rate,
            frame_acc: 0.0,
            frame_pos: 0,
            pending: Vec::with_capacity(FLUSH_FRAMES),
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        if let Ok(mut buf) = self.tap.lock() {
            for &s in &self.pending {
                buf.push(s);
            }
        }
        self.pending.clear();
    }
}

impl<S> Iterator for TapSource<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(sample) = self.inner.next() else {
            self.flush();
            return None;
        };

        self.frame_acc += sample;
        self.frame_pos += 1;
        if self.frame_pos == self.channels {
            let mono = self.frame_acc / self.channels as f32;
            self.pending.push(mono);
            self.frame_acc = 0.0;
            self.frame_pos = 0;
            if self.pending.len() >= FLUSH_FRAMES {
                self.flush();
            }
        }

        Some(sample)
    }
}

impl<S> Source for TapSource<S>
where
    S: Source<Item = f32>,
{
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}
