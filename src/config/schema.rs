use std::time::Duration;

use serde::Deserialize;

use crate::visualizer::Style;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mp3-jukebox/config.toml` or
/// `~/.config/mp3-jukebox/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `JUKEBOX__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub visualizer: VisualizerSettings,
    pub analysis: AnalysisSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            visualizer: VisualizerSettings::default(),
            analysis: AnalysisSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualizerSettings {
    /// Render style the visualizer starts with.
    pub style: Style,
    /// Render loop frame rate.
    pub fps: u32,
}

impl VisualizerSettings {
    /// Time between render ticks for the configured frame rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            style: Style::default(),
            fps: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// FFT window size in samples. Must be a power of two; the analyzer
    /// exposes half this many frequency bins.
    pub fft_size: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            fft_size: crate::spectrum::DEFAULT_FFT_SIZE,
        }
    }
}
