//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into `InputEvent`s.

mod state;
mod types;

pub use state::{PointerSource, PointerState};
pub use types::{InputEvent, PointerMoveEvent};
