use crate::coords::Vec2;

use super::types::{InputEvent, PointerMoveEvent};

/// Read access to the current pointer coordinate.
///
/// Implementations must be cheap and non-blocking; the scene samples this
/// once per tick.
pub trait PointerSource {
    /// Last known pointer position in logical viewport pixels, or `(0, 0)`
    /// before any pointer event has been seen.
    fn current_coordinate(&self) -> Vec2;
}

/// Pointer state for a single window.
///
/// Holds the last known pointer position. Leaving the window keeps the last
/// position so the trail settles where the pointer exited.
#[derive(Debug, Default)]
pub struct PointerState {
    /// Pointer position in logical pixels.
    pub position: Vec2,
}

impl PointerState {
    /// Applies a platform-agnostic input event.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                let pos = Vec2::new(*x, *y);
                // Non-finite coordinates would poison the shader uniforms.
                if pos.is_finite() {
                    self.position = pos;
                }
            }

            InputEvent::PointerLeft => {}
        }
    }
}

impl PointerSource for PointerState {
    fn current_coordinate(&self) -> Vec2 {
        self.position
    }
}

impl PointerSource for Vec2 {
    fn current_coordinate(&self) -> Vec2 {
        *self
    }
}
