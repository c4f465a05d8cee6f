//! Drivers.
//!
//! `Runtime` owns the winit event loop and window and wires them to the
//! render state and scene. `HeadlessDriver` runs the same lifecycle with no
//! display at all.

mod display;
mod headless;
mod runtime;

pub use display::Display;
pub use headless::{HeadlessConfig, HeadlessDriver, HeadlessReport};
pub use runtime::{Runtime, RuntimeConfig};
