use crate::coords::{ColorRgba, Viewport};

use super::surface::QuadSurface;
use super::uniforms::FrameUniforms;

/// Result of one render attempt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderOutcome {
    /// The frame was drawn and presented.
    Presented,
    /// Frame governance rejected the tick; nothing was submitted.
    Throttled,
    /// No rendering context exists; bookkeeping ran, drawing was skipped.
    NoContext,
    /// The scene has not been initialized yet.
    Uninitialized,
    /// The surface was lost, outdated or timed out; try again next tick.
    SkippedFrame,
    /// The context cannot recover (commonly out of memory).
    Fatal,
}

/// Drawing backend owned by [`RenderState`](super::RenderState).
///
/// The wgpu implementation is [`GpuContext`](super::GpuContext). Sizes are
/// logical pixels; the backing buffer is `logical × pixel_ratio`.
pub trait RenderContext {
    /// Sets the color every frame is cleared to.
    fn set_clear_color(&mut self, color: ColorRgba, alpha: f32);

    /// Sets the physical-per-logical pixel ratio of the backing buffer.
    fn set_pixel_ratio(&mut self, ratio: f32);

    fn pixel_ratio(&self) -> f32;

    /// Resizes the backing buffer only. The presented element keeps its layout.
    fn set_size(&mut self, viewport: Viewport);

    /// Draws one frame of `surface` with `uniforms`.
    fn draw(&mut self, surface: &QuadSurface, uniforms: &FrameUniforms) -> RenderOutcome;
}
