use crate::config::TRAIL_LENGTH;
use crate::coords::Vec2;

/// Fixed-length, recency-ordered pointer history.
///
/// Index 0 is the newest sample and index `TRAIL_LENGTH - 1` the oldest. The
/// length never changes; each push drops the oldest sample.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTrail {
    samples: [Vec2; TRAIL_LENGTH],
}

impl PointerTrail {
    /// A trail with every sample at the origin.
    pub fn new() -> Self {
        Self {
            samples: [Vec2::zero(); TRAIL_LENGTH],
        }
    }

    /// Shifts every sample one slot older and stores `sample` as the newest.
    ///
    /// This is a plain O(N) copy; N is small and fixed.
    pub fn push(&mut self, sample: Vec2) {
        for i in (1..TRAIL_LENGTH).rev() {
            self.samples[i] = self.samples[i - 1];
        }
        self.samples[0] = sample;
    }

    pub const fn len(&self) -> usize {
        TRAIL_LENGTH
    }

    pub fn newest(&self) -> Vec2 {
        self.samples[0]
    }

    pub fn oldest(&self) -> Vec2 {
        self.samples[TRAIL_LENGTH - 1]
    }

    pub fn samples(&self) -> &[Vec2; TRAIL_LENGTH] {
        &self.samples
    }
}

impl Default for PointerTrail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: usize) -> Vec2 {
        Vec2::new(i as f32, (i * 10) as f32)
    }

    #[test]
    fn starts_at_origin() {
        let trail = PointerTrail::new();
        assert_eq!(trail.len(), 15);
        assert!(trail.samples().iter().all(|s| *s == Vec2::zero()));
    }

    #[test]
    fn push_is_a_pure_shift() {
        let mut trail = PointerTrail::new();
        for i in 0..7 {
            trail.push(p(i));
        }
        let before = *trail.samples();

        trail.push(Vec2::new(-3.0, 4.0));

        assert_eq!(trail.newest(), Vec2::new(-3.0, 4.0));
        for i in 1..TRAIL_LENGTH {
            assert_eq!(trail.samples()[i], before[i - 1], "slot {i}");
        }
        assert_eq!(trail.len(), TRAIL_LENGTH);
    }

    #[test]
    fn sixteen_pushes_drop_the_first_sample() {
        let mut trail = PointerTrail::new();
        for i in 0..=15 {
            trail.push(p(i));
        }

        let expected: Vec<Vec2> = (1..=15).rev().map(p).collect();
        assert_eq!(trail.samples().as_slice(), expected.as_slice());
        assert_eq!(trail.newest(), p(15));
        assert_eq!(trail.oldest(), p(1));
    }

    #[test]
    fn partially_filled_trail_keeps_origin_tail() {
        let mut trail = PointerTrail::new();
        trail.push(p(1));
        trail.push(p(2));
        assert_eq!(trail.samples()[0], p(2));
        assert_eq!(trail.samples()[1], p(1));
        assert_eq!(trail.oldest(), Vec2::zero());
    }
}
