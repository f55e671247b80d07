#![forbid(unsafe_code)]

//! Release-velocity estimation for fling detection.
//!
//! Keeps the pointer samples of a short trailing window and reports the
//! average velocity across it. Only the most recent motion matters for a
//! fling, so older samples are discarded as new ones arrive.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::geometry::Point;

/// Default trailing window for velocity estimation.
pub const DEFAULT_VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Velocity in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Tracks recent pointer samples.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    window: Duration,
    samples: VecDeque<(Point, Instant)>,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY_WINDOW)
    }
}

impl VelocityTracker {
    /// Create a tracker with a custom trailing window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            samples: VecDeque::new(),
        }
    }

    /// Forget every sample.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Record a pointer sample.
    pub fn record(&mut self, position: Point, at: Instant) {
        // Out-of-order timestamps restart the estimate.
        if let Some((_, last)) = self.samples.back()
            && at < *last
        {
            self.samples.clear();
        }
        self.samples.push_back((position, at));
        while let Some((_, first)) = self.samples.front() {
            if at.duration_since(*first) > self.window && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Average velocity across the retained samples (zero with fewer than
    /// two samples or no elapsed time).
    #[must_use]
    pub fn velocity(&self) -> Velocity {
        let (Some((from, t0)), Some((to, t1))) = (self.samples.front(), self.samples.back())
        else {
            return Velocity::default();
        };
        let dt = t1.duration_since(*t0).as_secs_f32();
        if dt <= f32::EPSILON {
            return Velocity::default();
        }
        Velocity {
            x: (to.x - from.x) as f32 / dt,
            y: (to.y - from.y) as f32 / dt,
        }
    }
}
