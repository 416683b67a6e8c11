//! Moving platforms
//!
//! A platform shuttles back and forth along a fixed axis-aligned direction:
//! `distance` pixels out, then the same leg back. Riders inherit the
//! platform's velocity each tick so they track it without sliding off.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::body::Aabb;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub start: Vec2,
    pub size: (i32, i32),
    /// Unit direction of the outbound leg, e.g. (1, 0) or (0, -1)
    pub move_dir: (i32, i32),
    /// Length of one leg in px
    pub distance: f32,
    /// Speed in px/tick
    pub speed: f32,
    /// Progress along the round trip, in [0, 2 * distance)
    pub offset: f32,
    pub position: Vec2,
}

impl MovingPlatform {
    pub fn new(start: Vec2, size: (i32, i32), move_dir: (i32, i32), distance: f32, speed: f32) -> Self {
        Self { start, size, move_dir, distance, speed, offset: 0.0, position: start }
    }

    /// True while on the return leg
    #[inline]
    fn returning(&self) -> bool {
        self.offset >= self.distance
    }

    /// Velocity applied to riders this tick
    pub fn velocity(&self) -> Vec2 {
        let sign = if self.returning() { -1.0 } else { 1.0 };
        Vec2::new(self.move_dir.0 as f32, self.move_dir.1 as f32) * self.speed * sign
    }

    pub fn update(&mut self) {
        self.offset += self.speed;
        if self.offset >= 2.0 * self.distance {
            self.offset = 0.0;
        }
        let leg = if self.returning() {
            2.0 * self.distance - self.offset
        } else {
            self.offset
        };
        self.position = self.start
            + Vec2::new(self.move_dir.0 as f32, self.move_dir.1 as f32) * leg;
    }

    #[inline]
    pub fn rect(&self) -> Aabb {
        Aabb::new(
            self.position.x.round() as i32,
            self.position.y.round() as i32,
            self.size.0,
            self.size.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_pong_returns_to_start() {
        let mut platform =
            MovingPlatform::new(Vec2::new(100.0, 200.0), (90, 20), (1, 0), 60.0, 2.0);
        let ticks_per_round_trip = (2.0 * 60.0 / 2.0) as usize;
        for _ in 0..ticks_per_round_trip {
            platform.update();
            assert!(platform.position.x >= 100.0 - 0.01);
            assert!(platform.position.x <= 160.0 + 0.01);
        }
        assert!((platform.position.x - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_velocity_flips_on_return_leg() {
        let mut platform =
            MovingPlatform::new(Vec2::new(0.0, 0.0), (90, 20), (0, 1), 40.0, 4.0);
        assert_eq!(platform.velocity(), Vec2::new(0.0, 4.0));
        for _ in 0..10 {
            platform.update();
        }
        assert_eq!(platform.velocity(), Vec2::new(0.0, -4.0));
    }
}
