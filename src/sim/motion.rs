//! Black hole sweep
//!
//! Each black hole moves to x = 0, then to x = scene width, forever. Every leg
//! takes the same duration regardless of distance, so the opening leg (from the
//! placement x) is slower than the full-width legs.

use serde::{Deserialize, Serialize};

use crate::lerp;

/// Direction of the current leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepLeg {
    ToLeft,
    ToRight,
}

impl SweepLeg {
    fn target(self, scene_width: f32) -> f32 {
        match self {
            SweepLeg::ToLeft => 0.0,
            SweepLeg::ToRight => scene_width,
        }
    }

    fn next(self) -> Self {
        match self {
            SweepLeg::ToLeft => SweepLeg::ToRight,
            SweepLeg::ToRight => SweepLeg::ToLeft,
        }
    }
}

/// Phase of one black hole's repeating sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepMotion {
    pub leg: SweepLeg,
    /// x at the start of the current leg
    pub from_x: f32,
    /// Seconds spent in the current leg
    pub elapsed: f32,
}

impl SweepMotion {
    /// Start a sweep from the placement position, heading left first
    pub fn new(start_x: f32) -> Self {
        Self {
            leg: SweepLeg::ToLeft,
            from_x: start_x,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the new x.
    ///
    /// Large steps roll over as many leg boundaries as needed.
    pub fn advance(&mut self, dt: f32, scene_width: f32, leg_duration: f32) -> f32 {
        let mut remaining = dt.max(0.0);
        loop {
            let left_in_leg = leg_duration - self.elapsed;
            if remaining < left_in_leg {
                self.elapsed += remaining;
                let t = self.elapsed / leg_duration;
                return lerp(self.from_x, self.leg.target(scene_width), t);
            }
            remaining -= left_in_leg;
            self.from_x = self.leg.target(scene_width);
            self.leg = self.leg.next();
            self.elapsed = 0.0;
        }
    }
}
