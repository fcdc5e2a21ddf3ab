/// Drawable area in logical pixels (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Logical viewport of a surface `physical` pixels large at `scale_factor`.
    pub fn from_physical(physical: (u32, u32), scale_factor: f64) -> Self {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self {
            width: (f64::from(physical.0) / scale) as f32,
            height: (f64::from(physical.1) / scale) as f32,
        }
    }

    /// Non-empty and finite. Minimized windows report an invalid viewport.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Extent uploaded to the shader; never below one pixel.
    #[inline]
    pub fn clamped_extent(self) -> [f32; 2] {
        [self.width.max(1.0), self.height.max(1.0)]
    }
}
