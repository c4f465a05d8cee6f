//! Coordinate types shared by the render state, scene and input.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod color;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use vec2::Vec2;
pub use viewport::Viewport;
