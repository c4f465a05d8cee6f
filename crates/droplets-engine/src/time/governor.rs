use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Caps how often a render may be submitted, independent of how often the
/// driver ticks.
///
/// Invariant: two accepted frames are never closer together than
/// `1000 / max_fps` milliseconds. The first frame is always accepted.
#[derive(Debug, Clone)]
pub struct FrameGovernor {
    max_fps: u32,
    last_frame: Option<Duration>,
}

impl FrameGovernor {
    /// Creates a governor for the given rate. A rate of zero is treated as one.
    pub fn new(max_fps: u32) -> Self {
        Self {
            max_fps: max_fps.max(1),
            last_frame: None,
        }
    }

    pub fn max_fps(&self) -> u32 {
        self.max_fps
    }

    /// Minimum spacing between accepted frames, rounded up to the next
    /// nanosecond so it never undershoots `1 / max_fps`.
    pub fn min_interval(&self) -> Duration {
        let nanos = NANOS_PER_SEC.div_ceil(self.max_fps as u128);
        Duration::from_nanos(nanos as u64)
    }

    /// Timestamp of the last accepted frame, if any.
    pub fn last_frame(&self) -> Option<Duration> {
        self.last_frame
    }

    /// Earliest timestamp at which the next frame is accepted. `None` until a
    /// frame has been accepted, since the first one always goes through.
    pub fn next_allowed(&self) -> Option<Duration> {
        self.last_frame.map(|last| last + self.min_interval())
    }

    /// Returns `true` and records `now` if a frame may be rendered at `now`.
    pub fn try_acquire(&mut self, now: Duration) -> bool {
        if let Some(last) = self.last_frame {
            let gap = now.saturating_sub(last).as_nanos();
            if gap * (self.max_fps as u128) < NANOS_PER_SEC {
                return false;
            }
        }
        self.last_frame = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn first_frame_is_accepted_at_time_zero() {
        let mut g = FrameGovernor::new(30);
        assert!(g.try_acquire(Duration::ZERO));
        assert_eq!(g.last_frame(), Some(Duration::ZERO));
    }

    #[test]
    fn frames_inside_interval_are_rejected() {
        let mut g = FrameGovernor::new(30);
        assert!(g.try_acquire(ms(0)));
        assert!(!g.try_acquire(ms(10)));
        assert!(!g.try_acquire(ms(33)));
        assert!(g.try_acquire(ms(40)));
    }

    #[test]
    fn rejected_frame_does_not_move_the_baseline() {
        let mut g = FrameGovernor::new(30);
        assert!(g.try_acquire(ms(100)));
        assert!(!g.try_acquire(ms(120)));
        assert_eq!(g.last_frame(), Some(ms(100)));
        assert!(g.try_acquire(ms(134)));
    }

    #[test]
    fn accepted_frames_respect_min_interval() {
        let mut g = FrameGovernor::new(30);
        let mut accepted = Vec::new();
        for t in (0..1000).step_by(7) {
            if g.try_acquire(ms(t)) {
                accepted.push(ms(t));
            }
        }
        assert!(accepted.len() > 1);
        for pair in accepted.windows(2) {
            assert!(pair[1] - pair[0] >= g.min_interval());
        }
    }

    #[test]
    fn gap_below_exact_interval_is_rejected() {
        let mut g = FrameGovernor::new(30);
        assert!(g.try_acquire(Duration::ZERO));
        assert!(!g.try_acquire(Duration::from_nanos(33_333_333)));
        assert!(g.try_acquire(Duration::from_nanos(33_333_334)));
    }

    #[test]
    fn min_interval_is_accepted_exactly() {
        let mut g = FrameGovernor::new(30);
        assert_eq!(g.min_interval(), Duration::from_nanos(33_333_334));
        assert!(g.try_acquire(ms(0)));
        assert!(g.try_acquire(g.min_interval()));
    }

    #[test]
    fn next_allowed_tracks_the_last_accepted_frame() {
        let mut g = FrameGovernor::new(30);
        assert_eq!(g.next_allowed(), None);

        assert!(g.try_acquire(ms(100)));
        let next = g.next_allowed().unwrap();
        assert_eq!(next, ms(100) + g.min_interval());

        assert!(!g.try_acquire(ms(120)));
        assert_eq!(g.next_allowed(), Some(next));
        assert!(!g.try_acquire(next - Duration::from_nanos(1)));
        assert!(g.try_acquire(next));
    }

    #[test]
    fn zero_rate_is_clamped() {
        let g = FrameGovernor::new(0);
        assert_eq!(g.max_fps(), 1);
        assert_eq!(g.min_interval(), Duration::from_secs(1));
    }
}
