/// 24-bit color.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation toward `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// Pixel surface the renderer draws onto. Coordinates are in pixels with the
/// origin at the top-left, y growing downward.
pub trait Surface {
    fn width(&self) -> f32;

    fn height(&self) -> f32;

    fn clear(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color);

    fn stroke_polyline(&mut self, points: &[(f32, f32)], width: f32, color: Color);
}
