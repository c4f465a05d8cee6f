/// Viewport size in logical pixels.
///
/// Zero-sized viewports are legal: they describe a missing or minimized
/// display surface.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `width / height`, or `None` when the height is zero.
    #[inline]
    pub fn aspect_ratio(self) -> Option<f32> {
        if self.height == 0 {
            return None;
        }
        Some(self.width as f32 / self.height as f32)
    }

    /// Viewport size as floats, in the layout the `u_resolution` uniform expects.
    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_of_landscape_viewport() {
        let a = Viewport::new(1920, 1080).aspect_ratio().unwrap();
        assert!((a - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn aspect_ratio_zero_height_is_none() {
        assert_eq!(Viewport::new(800, 0).aspect_ratio(), None);
        assert_eq!(Viewport::default().aspect_ratio(), None);
    }

    #[test]
    fn zero_width_is_a_valid_ratio() {
        assert_eq!(Viewport::new(0, 600).aspect_ratio(), Some(0.0));
    }
}
