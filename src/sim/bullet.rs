//! Projectiles and firing patterns
//!
//! Every projectile is a point-ish AABB carrying an explicit velocity vector.
//! The pattern constructors here are pure: weapons and the boss both build
//! their shots from the same small set of spread/fan/radial helpers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BULLET_H, BULLET_W};
use crate::sim::body::Aabb;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Center position, sub-pixel
    pub position: Vec2,
    /// Velocity in px/tick
    pub velocity: Vec2,
    pub damage: i32,
    /// Enemy- and boss-owned shots hurt the player; player shots hurt hostiles
    pub from_enemy: bool,
    /// Heavy player shots detonate against level geometry
    pub heavy: bool,
}

impl Projectile {
    pub fn with_velocity(position: Vec2, velocity: Vec2, damage: i32, from_enemy: bool) -> Self {
        Self { position, velocity, damage, from_enemy, heavy: false }
    }

    /// Straight horizontal shot; `facing` is -1 or 1
    pub fn horizontal(position: Vec2, facing: i32, speed: f32, damage: i32, from_enemy: bool) -> Self {
        Self::with_velocity(position, Vec2::new(facing.signum() as f32 * speed, 0.0), damage, from_enemy)
    }

    pub fn heavy(mut self) -> Self {
        self.heavy = true;
        self
    }

    #[inline]
    pub fn rect(&self) -> Aabb {
        Aabb::from_center(
            self.position.x.round() as i32,
            self.position.y.round() as i32,
            BULLET_W,
            BULLET_H,
        )
    }

    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Culled once fully outside the level on any side
    pub fn out_of_bounds(&self, width: i32, height: i32) -> bool {
        let r = self.rect();
        r.right() < 0 || r.left() > width || r.bottom() < 0 || r.top() > height
    }
}

/// Horizontal shot aimed by the sign of the target's x offset from origin
pub fn aimed_horizontal(
    origin: Vec2,
    target: Vec2,
    speed: f32,
    damage: i32,
    from_enemy: bool,
) -> Projectile {
    let dir = if target.x >= origin.x { 1 } else { -1 };
    Projectile::horizontal(origin, dir, speed, damage, from_enemy)
}

/// `count` shots aimed at the target, fanned around the aim angle in
/// `step_deg` increments centered on the true aim direction
pub fn aimed_spread(
    origin: Vec2,
    target: Vec2,
    count: usize,
    step_deg: f32,
    speed: f32,
    damage: i32,
    from_enemy: bool,
) -> Vec<Projectile> {
    let aim = (target - origin).normalize_or(Vec2::X);
    let base = aim.y.atan2(aim.x);
    (0..count)
        .map(|i| {
            let offset = (i as f32 - count as f32 / 2.0) * step_deg.to_radians();
            let angle = base + offset;
            Projectile::with_velocity(
                origin,
                Vec2::new(angle.cos(), angle.sin()) * speed,
                damage,
                from_enemy,
            )
        })
        .collect()
}

/// `count` shots fanned across `total_spread_deg`, centered on the facing
/// direction (0 degrees facing right, 180 facing left)
pub fn fan(
    origin: Vec2,
    facing: i32,
    count: usize,
    total_spread_deg: f32,
    speed: f32,
    damage: i32,
    from_enemy: bool,
) -> Vec<Projectile> {
    let base: f32 = if facing >= 0 { 0.0 } else { 180.0_f32.to_radians() };
    (0..count)
        .map(|i| {
            let offset =
                (i as f32 - count as f32 / 2.0) * (total_spread_deg / count as f32).to_radians();
            let angle = base + offset;
            Projectile::with_velocity(
                origin,
                Vec2::new(angle.cos(), angle.sin()) * speed,
                damage,
                from_enemy,
            )
        })
        .collect()
}

/// `count` shots evenly spaced around a full circle
pub fn radial_volley(
    origin: Vec2,
    count: usize,
    speed: f32,
    damage: i32,
    from_enemy: bool,
) -> Vec<Projectile> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            Projectile::with_velocity(
                origin,
                Vec2::new(angle.cos(), angle.sin()) * speed,
                damage,
                from_enemy,
            )
        })
        .collect()
}

/// Sinusoidally perturbed half-circle volley with a slight upward bias
pub fn wave_volley(
    origin: Vec2,
    count: usize,
    speed: f32,
    damage: i32,
    from_enemy: bool,
) -> Vec<Projectile> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::PI
                + (i as f32 * 0.5).sin() * 0.3;
            Projectile::with_velocity(
                origin,
                Vec2::new(angle.cos() * speed, angle.sin() * speed - 2.0),
                damage,
                from_enemy,
            )
        })
        .collect()
}
