//! Droplets engine crate.
//!
//! Real-time render pipeline for a full-screen shader effect driven by
//! pointer motion and time. `RenderState` owns display metrics, time and the
//! GPU context; `Scene` owns the camera, the quad, its uniforms, the pointer
//! trail and frame-rate governance. `window::Runtime` is the windowed driver.

pub mod config;
pub mod coords;
pub mod input;
pub mod logging;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
