//! Fixed configuration for the droplets effect.
//!
//! These values are compile-time constants. They are not exposed as runtime
//! settings; platform knobs (window title/size, GPU init, logging) live in
//! [`crate::window::RuntimeConfig`], [`crate::render::GpuInit`] and
//! [`crate::logging::LoggingConfig`].

use glam::Vec3;

use crate::coords::ColorRgba;

/// Clear parameters applied to the render context on `init()`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RendererParam {
    pub clear_color: ColorRgba,
    pub alpha: f32,
}

pub const RENDERER_PARAM: RendererParam = RendererParam {
    clear_color: ColorRgba::white(),
    alpha: 0.0,
};

/// Upper bound for the applied pixel ratio. Device densities above this are
/// rendered at the cap.
pub const PIXEL_RATIO_CAP: f64 = 1.5;

/// Multiplier applied to clock seconds before they reach the shader.
pub const TIME_SCALE: f32 = 2.0;

/// Perspective camera parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraParam {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Aspect used until a usable viewport aspect is known.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub look_at: Vec3,
}

pub const CAMERA_PARAM: CameraParam = CameraParam {
    fovy: 60.0,
    aspect: 1.0,
    near: 0.1,
    far: 50.0,
    position: Vec3::new(0.0, 0.0, 10.0),
    look_at: Vec3::ZERO,
};

/// Number of pointer samples kept in the trail (and declared by the shader).
pub const TRAIL_LENGTH: usize = 15;

/// Render rate ceiling. Ticks arriving faster than this skip the draw.
pub const MAX_FPS: u32 = 30;
