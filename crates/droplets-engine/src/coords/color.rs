/// Linear RGBA color.
///
/// Values are expected in linear space. sRGB conversion is handled by the
/// surface format.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Returns the same color with its alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Converts to a wgpu clear value with premultiplied alpha.
    #[inline]
    pub fn to_wgpu_premultiplied(self) -> wgpu::Color {
        let a = self.a as f64;
        wgpu::Color {
            r: self.r as f64 * a,
            g: self.g as f64 * a,
            b: self.b as f64 * a,
            a,
        }
    }
}
