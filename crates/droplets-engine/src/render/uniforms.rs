use bytemuck::{Pod, Zeroable};

use crate::config::TRAIL_LENGTH;
use crate::coords::{Vec2, Viewport};

/// Uniform values consumed by the fragment stage.
///
/// Values are copied in at read time; nothing here references live state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameUniforms {
    /// `u_time`: scaled elapsed seconds.
    pub time: f32,
    /// `u_resolution`: viewport size in logical pixels.
    pub resolution: Viewport,
    /// `u_pointer_trail`: index 0 newest.
    pub pointer_trail: [Vec2; TRAIL_LENGTH],
}

impl FrameUniforms {
    pub fn new(time: f32, resolution: Viewport) -> Self {
        Self {
            time,
            resolution,
            pointer_trail: [Vec2::zero(); TRAIL_LENGTH],
        }
    }

    /// Packs the values into the std140-compatible block the shader declares.
    pub(crate) fn to_block(&self) -> UniformBlock {
        let mut pointer_trail = [[0.0; 4]; TRAIL_LENGTH];
        for (slot, p) in pointer_trail.iter_mut().zip(self.pointer_trail.iter()) {
            slot[0] = p.x;
            slot[1] = p.y;
        }

        UniformBlock {
            time: self.time,
            _pad0: 0.0,
            resolution: self.resolution.to_array(),
            pointer_trail,
        }
    }
}

/// GPU layout of `Uniforms` in `output.frag.wgsl`.
///
/// `vec2` aligns to 8 bytes and uniform arrays need a 16-byte stride, so each
/// trail sample occupies a full `vec4` slot.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct UniformBlock {
    pub time: f32,
    pub _pad0: f32,
    pub resolution: [f32; 2],
    pub pointer_trail: [[f32; 4]; TRAIL_LENGTH],
}
