//! The droplets scene.
//!
//! One perspective camera, one full-screen quad, one uniform set. The scene
//! samples the pointer every tick into a fixed-length trail and renders at
//! most `MAX_FPS` times per second.

mod camera;
mod output;
mod trail;

pub use camera::PerspectiveCamera;
pub use output::Scene;
pub use trail::PointerTrail;
