use bytemuck::{Pod, Zeroable};

/// Vertex stage source, embedded at build time.
pub const BASE_VERT: &str = include_str!("shaders/base.vert.wgsl");

/// Fragment stage source, embedded at build time.
///
/// Declares `u_time`, `u_resolution` and `u_pointer_trail` in one uniform
/// block at `@group(0) @binding(0)`.
pub const OUTPUT_FRAG: &str = include_str!("shaders/output.frag.wgsl");

/// The single renderable: a plane bound to one vertex and one fragment stage.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadSurface {
    /// Plane width in world units.
    pub width: f32,
    /// Plane height in world units.
    pub height: f32,
    pub vertex_shader: &'static str,
    pub fragment_shader: &'static str,
}

impl QuadSurface {
    /// 2×2 plane with the droplets shader pair. In clip space this covers the
    /// full viewport.
    pub fn droplets() -> Self {
        Self {
            width: 2.0,
            height: 2.0,
            vertex_shader: BASE_VERT,
            fragment_shader: OUTPUT_FRAG,
        }
    }

    /// Corner vertices, centered on the origin, counter-clockwise from bottom-left.
    pub(crate) fn vertices(&self) -> [QuadVertex; 4] {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        [
            QuadVertex { pos: [-hw, -hh] },
            QuadVertex { pos: [hw, -hh] },
            QuadVertex { pos: [hw, hh] },
            QuadVertex { pos: [-hw, hh] },
        ]
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct QuadVertex {
    pub pos: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(crate) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn droplets_quad_spans_clip_space() {
        let v = QuadSurface::droplets().vertices();
        assert_eq!(v[0].pos, [-1.0, -1.0]);
        assert_eq!(v[2].pos, [1.0, 1.0]);
    }

    #[test]
    fn fragment_stage_declares_the_three_uniforms() {
        let names = [
            "u_time: f32",
            "u_resolution: vec2<f32>",
            "u_pointer_trail: array<vec4<f32>, 15>",
        ];
        for name in names {
            assert!(OUTPUT_FRAG.contains(name), "missing `{name}`");
        }
        assert!(BASE_VERT.contains("fn vs_main"));
        assert!(OUTPUT_FRAG.contains("fn fs_main"));
    }

    #[test]
    fn indices_form_two_triangles() {
        assert_eq!(QUAD_INDICES.len(), 6);
        assert!(QUAD_INDICES.iter().all(|&i| i < 4));
    }
}
