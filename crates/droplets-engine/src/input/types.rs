/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
///
/// Runtime translates window system events into these. Only the events the
/// pointer trail depends on are represented.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(PointerMoveEvent),

    /// Pointer left the window surface. The last position is kept.
    PointerLeft,
}
