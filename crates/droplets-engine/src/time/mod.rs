//! Time subsystem.
//!
//! Provides testable time sources and frame-rate governance without coupling
//! to the runtime:
//! - `Clock` is the seam; `SystemClock` for real runs, `ManualClock` for tests
//!   and scripted headless runs
//! - `FrameGovernor` decides whether a tick may render

mod clock;
mod governor;

pub use clock::{Clock, ManualClock, SystemClock};
pub use governor::FrameGovernor;
