//! GPU rendering subsystem.
//!
//! `RenderState` owns display metrics, scaled time and the [`RenderContext`].
//! The wgpu implementation of that context (`GpuContext`) drives a single
//! quad renderer: one full-screen quad, one shader pair, one uniform block.
//!
//! Convention:
//! - Viewport sizes and pointer coordinates are logical pixels.
//! - The backing buffer is `logical × pixel_ratio` physical pixels.

mod context;
mod gpu_context;
mod quad;
mod state;
mod surface;
mod uniforms;

pub use context::{RenderContext, RenderOutcome};
pub use gpu_context::{GpuContext, GpuInit};
pub use state::{RenderState, effective_pixel_ratio};
pub use surface::{BASE_VERT, OUTPUT_FRAG, QuadSurface};
pub use uniforms::FrameUniforms;

#[cfg(test)]
pub(crate) use state::test_support;
