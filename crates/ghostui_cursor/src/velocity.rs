//! Pointer velocity from consecutive applied samples

use ghostui_core::Point;

/// Duration of one frame at 60 fps; velocities are expressed per frame
pub const FRAME_MS: f32 = 1000.0 / 60.0;

/// Pointer velocity in pixels per frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    pub magnitude: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity {
        x: 0.0,
        y: 0.0,
        magnitude: 0.0,
    };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            magnitude: (x * x + y * y).sqrt(),
        }
    }
}

/// Derives velocity from the previous sample
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    last: Option<(Point, u64)>,
    velocity: Velocity,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample. The first sample, and samples sharing the previous
    /// timestamp, leave the velocity unchanged.
    pub fn sample(&mut self, position: Point, timestamp: u64) -> Velocity {
        if let Some((last, last_ts)) = self.last {
            let dt = timestamp.saturating_sub(last_ts);
            if dt > 0 {
                let per_frame = FRAME_MS / dt as f32;
                self.velocity = Velocity::new(
                    (position.x - last.x) * per_frame,
                    (position.y - last.y) * per_frame,
                );
            }
        }
        self.last = Some((position, timestamp));
        self.velocity
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Zero the velocity, keeping the last position as the new baseline
    pub fn settle(&mut self) {
        self.velocity = Velocity::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_is_stationary() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.sample(Point::new(10.0, 10.0), 0), Velocity::ZERO);
    }

    #[test]
    fn test_velocity_scaled_per_frame() {
        let mut tracker = VelocityTracker::new();
        tracker.sample(Point::new(0.0, 0.0), 0);
        // 30px over two frames' worth of time -> ~15px per frame
        let v = tracker.sample(Point::new(30.0, 0.0), (2.0 * FRAME_MS) as u64);
        assert!((v.x - 15.0).abs() < 0.6, "vx = {}", v.x);
        assert_eq!(v.y, 0.0);
        assert!((v.magnitude - v.x).abs() < 1e-6);
    }

    #[test]
    fn test_same_timestamp_keeps_velocity() {
        let mut tracker = VelocityTracker::new();
        tracker.sample(Point::new(0.0, 0.0), 0);
        let v = tracker.sample(Point::new(16.0, 0.0), 16);
        assert_eq!(tracker.sample(Point::new(99.0, 0.0), 16), v);
    }
}
