//! Trailing-edge throttle
//!
//! The first sample of a burst opens a window; samples arriving inside the
//! window replace the pending one instead of queueing. Once the window has
//! elapsed the latest sample is released exactly once, either by the next
//! [`Throttle::push`] or by a [`Throttle::poll`] from the frame loop.
//!
//! The next window is anchored at the release, so a steady stream at the
//! interval's cadence is released sample for sample. A window that lapses
//! without any new sample ends the burst; the next sample opens a fresh one.

/// Coalesces samples to at most one per interval
#[derive(Clone, Debug)]
pub struct Throttle<T> {
    interval_ms: u64,
    window_start: Option<u64>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    /// A zero interval releases every sample immediately
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            window_start: None,
            pending: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Offer a sample; returns the sample to apply if the window is due
    pub fn push(&mut self, sample: T, now: u64) -> Option<T> {
        if self.interval_ms == 0 {
            return Some(sample);
        }

        let burst_ended = self.pending.is_none()
            && self.window_start.map_or(true, |start| {
                now.saturating_sub(start) >= self.interval_ms.saturating_mul(2)
            });
        self.pending = Some(sample);

        if burst_ended {
            self.window_start = Some(now);
            return None;
        }
        self.poll(now)
    }

    /// Release the pending sample if its window has elapsed
    pub fn poll(&mut self, now: u64) -> Option<T> {
        let start = self.window_start?;
        if self.pending.is_some() && now.saturating_sub(start) >= self.interval_ms {
            self.window_start = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// Whether a sample is waiting for its window to close
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending sample
    pub fn clear(&mut self) {
        self.window_start = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_in_one_window_coalesce_to_latest() {
        let mut throttle = Throttle::new(16);
        assert_eq!(throttle.push((10, 10), 0), None);
        assert_eq!(throttle.push((50, 50), 5), None);
        assert_eq!(throttle.poll(10), None);
        assert_eq!(throttle.poll(16), Some((50, 50)));
        assert_eq!(throttle.poll(40), None);
    }

    #[test]
    fn test_late_push_releases_itself() {
        let mut throttle = Throttle::new(16);
        throttle.push(1, 0);
        assert_eq!(throttle.push(2, 20), Some(2));
        assert!(!throttle.has_pending());
        // Window now runs from the release at 20
        assert_eq!(throttle.push(3, 21), None);
        assert!(throttle.has_pending());
        assert_eq!(throttle.poll(35), None);
        assert_eq!(throttle.poll(36), Some(3));
    }

    #[test]
    fn test_steady_stream_releases_every_sample() {
        let mut throttle = Throttle::new(16);
        assert_eq!(throttle.push(0u64, 0), None);
        for i in 1..64u64 {
            assert_eq!(throttle.push(i, i * 16), Some(i), "sample {i} was held");
        }
        assert!(!throttle.has_pending());
    }

    #[test]
    fn test_idle_gap_starts_new_burst() {
        let mut throttle = Throttle::new(16);
        throttle.push(1, 0);
        assert_eq!(throttle.poll(16), Some(1));

        // Nothing for a while: the next sample waits out a fresh window
        assert_eq!(throttle.push(2, 500), None);
        assert_eq!(throttle.push(3, 505), None);
        assert_eq!(throttle.poll(516), Some(3));
    }

    #[test]
    fn test_zero_interval_passes_through() {
        let mut throttle = Throttle::new(0);
        assert_eq!(throttle.push(1, 0), Some(1));
        assert_eq!(throttle.push(2, 0), Some(2));
    }
}
