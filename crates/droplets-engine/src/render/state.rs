use crate::config::{PIXEL_RATIO_CAP, RENDERER_PARAM, TIME_SCALE};
use crate::coords::Viewport;
use crate::time::{Clock, SystemClock};
use crate::window::Display;

use super::context::{RenderContext, RenderOutcome};
use super::surface::QuadSurface;
use super::uniforms::FrameUniforms;

/// Rendering capability, decided once at construction.
enum Surface<'w> {
    Attached {
        context: Box<dyn RenderContext + 'w>,
        clock: Box<dyn Clock + 'w>,
    },
    Headless,
}

/// Display metrics, scaled elapsed time and the rendering context.
///
/// One instance per process, owned by the driver and lent to the scene.
/// Without a display or a render context the state is headless: every
/// operation still succeeds, GPU work is skipped and `elapsed_time` stays 0.
pub struct RenderState<'w> {
    display: Option<&'w dyn Display>,
    surface: Surface<'w>,

    pixel_density: f64,
    viewport: Viewport,
    aspect_ratio: f32,

    elapsed_time: f32,
    time_scale: f32,
}

impl<'w> RenderState<'w> {
    /// Builds the state with a wall clock.
    ///
    /// `context` is only kept when a `display` is present as well.
    pub fn new(
        display: Option<&'w dyn Display>,
        context: Option<Box<dyn RenderContext + 'w>>,
    ) -> Self {
        Self::with_clock(display, context, Box::new(SystemClock::new()))
    }

    /// Builds a state with no display and no context.
    pub fn headless() -> Self {
        Self::new(None, None)
    }

    /// Builds the state with a caller-provided clock (dropped when headless).
    pub fn with_clock(
        display: Option<&'w dyn Display>,
        context: Option<Box<dyn RenderContext + 'w>>,
        clock: Box<dyn Clock + 'w>,
    ) -> Self {
        let (pixel_density, viewport) = match display {
            Some(d) => (d.pixel_density(), d.viewport_size()),
            None => (1.0, Viewport::default()),
        };

        let surface = match (display, context) {
            (Some(_), Some(context)) => Surface::Attached { context, clock },
            (None, Some(_)) => {
                log::warn!("render context supplied without a display; running headless");
                Surface::Headless
            }
            (_, None) => {
                log::warn!("no render context available; running headless");
                Surface::Headless
            }
        };

        Self {
            display,
            surface,
            pixel_density,
            viewport,
            aspect_ratio: viewport.aspect_ratio().unwrap_or(1.0),
            elapsed_time: 0.0,
            time_scale: TIME_SCALE,
        }
    }

    /// Applies the clear color and pixel ratio, then sizes the backing buffer.
    pub fn init(&mut self) {
        let Surface::Attached { context, .. } = &mut self.surface else {
            return;
        };

        context.set_clear_color(RENDERER_PARAM.clear_color, RENDERER_PARAM.alpha);
        self.refresh_pixel_ratio();
        self.resize();

        log::debug!(
            "render state ready: {}x{} @ {} (density {})",
            self.viewport.width,
            self.viewport.height,
            self.applied_pixel_ratio().unwrap_or(1.0),
            self.pixel_density
        );
    }

    /// Re-reads the device density and applies the capped pixel ratio.
    ///
    /// `init()` calls this; the runtime also calls it when the window moves to
    /// a display with a different scale factor.
    pub fn refresh_pixel_ratio(&mut self) {
        let Surface::Attached { context, .. } = &mut self.surface else {
            return;
        };
        if let Some(d) = self.display {
            self.pixel_density = d.pixel_density();
        }
        context.set_pixel_ratio(effective_pixel_ratio(self.pixel_density));
    }

    /// Re-reads the viewport and resizes the backing buffer.
    ///
    /// A zero height keeps the previous aspect ratio.
    pub fn resize(&mut self) {
        let Surface::Attached { context, .. } = &mut self.surface else {
            return;
        };
        let Some(display) = self.display else { return };

        self.viewport = display.viewport_size();
        if let Some(aspect) = self.viewport.aspect_ratio() {
            self.aspect_ratio = aspect;
        }

        context.set_size(self.viewport);
    }

    /// Advances `elapsed_time` from the clock.
    pub fn update(&mut self) {
        self.elapsed_time = match &self.surface {
            Surface::Attached { clock, .. } => clock.elapsed_secs() * self.time_scale,
            Surface::Headless => 0.0,
        };
    }

    /// Hands one frame to the context. Headless states report `NoContext`.
    pub fn draw(&mut self, surface: &QuadSurface, uniforms: &FrameUniforms) -> RenderOutcome {
        match &mut self.surface {
            Surface::Attached { context, .. } => context.draw(surface, uniforms),
            Surface::Headless => RenderOutcome::NoContext,
        }
    }

    pub fn has_surface(&self) -> bool {
        matches!(self.surface, Surface::Attached { .. })
    }

    pub fn pixel_density(&self) -> f64 {
        self.pixel_density
    }

    /// Pixel ratio applied to the context, or `None` when headless.
    pub fn applied_pixel_ratio(&self) -> Option<f32> {
        match &self.surface {
            Surface::Attached { context, .. } => Some(context.pixel_ratio()),
            Surface::Headless => None,
        }
    }

    /// Viewport size in logical pixels.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Scaled seconds since the clock started.
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

/// Clamps the device density into `[1, PIXEL_RATIO_CAP]`. Non-finite
/// densities fall back to 1.
pub fn effective_pixel_ratio(density: f64) -> f32 {
    if !density.is_finite() {
        return 1.0;
    }
    density.clamp(1.0, PIXEL_RATIO_CAP) as f32
}
