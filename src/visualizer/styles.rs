use serde::Deserialize;

use super::surface::{Color, Surface};

/// The three interchangeable render styles, all pure functions of the frame
/// and the surface size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    Bars,
    Wave,
    Circle,
}

impl Default for Style {
    fn default() -> Self {
        Self::Bars
    }
}

/// Color at zero magnitude.
const LOW_COLOR: Color = Color::rgb(0, 120, 150);
/// Wave stroke, cyan.
const WAVE_COLOR: Color = Color::rgb(6, 182, 212);

const BAR_WIDTH_FACTOR: f32 = 1.5;
const BAR_GAP: f32 = 2.0;
const WAVE_STROKE: f32 = 3.0;
const CIRCLE_STROKE: f32 = 2.0;
/// Fraction of the base radius a full-magnitude circle segment reaches.
const CIRCLE_REACH: f32 = 0.8;

/// Per-bin color at full magnitude; actual bin color interpolates from
/// [`LOW_COLOR`] toward this by magnitude ratio.
fn high_color(ratio: f32) -> Color {
    Color::rgb(
        (25.0 + ratio * 100.0) as u8,
        (150.0 - ratio * 50.0) as u8,
        (200.0 + ratio * 55.0) as u8,
    )
}

fn bin_color(ratio: f32) -> Color {
    LOW_COLOR.lerp(high_color(ratio), ratio)
}

/// Draw one frequency frame. Clears the surface first; an empty frame leaves
/// it cleared.
pub fn render(frame: &[u8], style: Style, surface: &mut dyn Surface) {
    surface.clear();
    if frame.is_empty() {
        return;
    }
    match style {
        Style::Bars => draw_bars(frame, surface),
        Style::Wave => draw_wave(frame, surface),
        Style::Circle => draw_circle(frame, surface),
    }
}

fn draw_bars(frame: &[u8], surface: &mut dyn Surface) {
    let (w, h) = (surface.width(), surface.height());
    let bar_width = w / frame.len() as f32 * BAR_WIDTH_FACTOR;

    let mut x = 0.0;
    for &m in frame {
        let ratio = m as f32 / 255.0;
        let bar_height = ratio * h;
        surface.fill_rect(x, h - bar_height, bar_width, bar_height, bin_color(ratio));
        x += bar_width + BAR_GAP;
    }
}

fn draw_wave(frame: &[u8], surface: &mut dyn Surface) {
    let (w, h) = (surface.width(), surface.height());
    let slice_width = w / frame.len() as f32;

    let mut points: Vec<(f32, f32)> = Vec::with_capacity(frame.len() + 1);
    for (i, &m) in frame.iter().enumerate() {
        let y = m as f32 / 255.0 * h;
        points.push((i as f32 * slice_width, y));
    }
    points.push((w, h / 2.0));

    surface.stroke_polyline(&points, WAVE_STROKE, WAVE_COLOR);
}

fn draw_circle(frame: &[u8], surface: &mut dyn Surface) {
    let (w, h) = (surface.width(), surface.height());
    let (cx, cy) = (w / 2.0, h / 2.0);
    let radius = w.min(h) / 4.0;

    let bins = frame.len() as f32;
    for (i, &m) in frame.iter().enumerate() {
        let ratio = m as f32 / 255.0;
        let reach = ratio * radius * CIRCLE_REACH;
        let angle = i as f32 / bins * 2.0 * std::f32::consts::PI;
        let (sin, cos) = angle.sin_cos();

        let from = (cx + cos * radius, cy + sin * radius);
        let to = (cx + cos * (radius + reach), cy + sin * (radius + reach));
        surface.stroke_line(from, to, CIRCLE_STROKE, bin_color(ratio));
    }
}
