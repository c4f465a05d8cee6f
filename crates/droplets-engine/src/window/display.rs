use winit::window::Window;

use crate::coords::Viewport;

/// Display metrics the render state reads.
pub trait Display {
    /// Physical pixels per logical pixel.
    fn pixel_density(&self) -> f64;

    /// Drawable area in logical pixels.
    fn viewport_size(&self) -> Viewport;
}

impl Display for Window {
    fn pixel_density(&self) -> f64 {
        self.scale_factor()
    }

    fn viewport_size(&self) -> Viewport {
        let logical = self.inner_size().to_logical::<f64>(self.scale_factor());
        Viewport::new(logical.width.round() as u32, logical.height.round() as u32)
    }
}
