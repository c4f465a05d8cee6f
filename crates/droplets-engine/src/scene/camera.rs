use glam::{Mat4, Vec3};

use crate::config::CameraParam;

/// Perspective camera with a cached projection matrix.
///
/// The projection is only recomputed by [`update_projection_matrix`](Self::update_projection_matrix),
/// so changing `aspect` alone leaves the matrix stale until the next resize.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    target: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fovy,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn from_param(param: &CameraParam) -> Self {
        Self::new(param.fovy, param.aspect, param.near, param.far)
    }

    /// Orients the camera toward `target`.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fovy.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}
