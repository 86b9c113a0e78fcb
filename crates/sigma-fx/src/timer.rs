//! Fixed-duration progress timer shared by the loading animations.

/// Tracks elapsed time against a fixed duration.
///
/// Progress is monotonic non-decreasing; once complete it stays complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    elapsed_ms: u32,
    duration_ms: u32,
}

impl Timer {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            elapsed_ms: 0,
            duration_ms,
        }
    }

    /// Advance by `dt_ms`. Returns true once the duration is reached.
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
        self.is_complete()
    }

    /// Jump straight to completion.
    pub fn finish(&mut self) {
        self.elapsed_ms = self.duration_ms;
    }

    /// Completion fraction in `[0, 1]`. A zero-duration timer is complete.
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            1.0
        } else {
            self.elapsed_ms as f32 / self.duration_ms as f32
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_monotonic() {
        let mut t = Timer::new(1000);
        let mut last = 0.0;
        for _ in 0..100 {
            t.advance(17);
            assert!(t.progress() >= last);
            last = t.progress();
        }
        assert!(t.is_complete());
    }

    #[test]
    fn complete_stays_complete() {
        let mut t = Timer::new(100);
        assert!(t.advance(100));
        assert!(t.advance(0));
        assert!(t.advance(50));
        assert!((t.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn exact_elapsed_completes() {
        let mut t = Timer::new(4000);
        assert!(!t.advance(3999));
        assert!(t.advance(1));
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        let t = Timer::new(0);
        assert!(t.is_complete());
        assert!((t.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn finish_jumps_to_complete() {
        let mut t = Timer::new(3500);
        t.advance(10);
        t.finish();
        assert!(t.is_complete());
    }
}
