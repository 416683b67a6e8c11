//! Kinematic bodies and axis-separated collision resolution
//!
//! Every mobile entity (player, enemies, boss, platforms, bullets) shares the
//! same primitive: a sub-pixel `position`/`velocity` pair plus an integer
//! collision box derived by rounding. Movement resolves one axis at a time
//! against a set of solid rectangles: integrate X, push out of any overlap,
//! then integrate Y and do the same. Landing on top of a solid grounds the
//! body and zeroes vertical velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Integer axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Aabb {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self { x: cx - w / 2, y: cy - h / 2, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x() as f32, self.center_y() as f32)
    }

    /// Strict overlap test; boxes merely touching along an edge do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Constants describing how a body accelerates and falls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Base horizontal speed from input
    pub move_speed: f32,
    /// Initial vertical velocity of a jump (negative = up)
    pub jump_velocity: f32,
    /// Terminal fall velocity
    pub max_fall_speed: f32,
    /// Per-tick horizontal velocity retention while grounded
    pub friction: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            jump_velocity: JUMP_VELOCITY,
            max_fall_speed: MAX_FALL_SPEED,
            friction: FRICTION,
        }
    }
}

/// What happens to horizontal velocity when a body runs into a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallPolicy {
    /// Zero it (player)
    Stop,
    /// Invert it (patrolling enemies bounce off walls)
    Bounce,
}

/// Position/velocity/collision-box primitive shared by all mobile entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Sub-pixel top-left position; the collision rect derives from this
    pub position: Vec2,
    /// Velocity in px/tick
    pub velocity: Vec2,
    /// Collision box width/height
    pub size: (i32, i32),
    pub on_ground: bool,
}

impl KinematicBody {
    pub fn new(x: f32, y: f32, w: i32, h: i32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            size: (w, h),
            on_ground: false,
        }
    }

    /// Integer collision rect: always `round(position)` sized by `size`
    #[inline]
    pub fn rect(&self) -> Aabb {
        Aabb::new(
            self.position.x.round() as i32,
            self.position.y.round() as i32,
            self.size.0,
            self.size.1,
        )
    }

    /// Apply gravity, clamped at terminal velocity
    pub fn apply_gravity(&mut self, params: &PhysicsParams) {
        self.velocity.y = (self.velocity.y + params.gravity).min(params.max_fall_speed);
    }

    /// Integrate X and push out of any overlapping solid.
    ///
    /// Solids are corrected in list order, each independently; a body
    /// penetrating two tiles at once resolves against whichever comes first.
    pub fn step_x(&mut self, solids: &[Aabb], policy: WallPolicy) {
        self.position.x += self.velocity.x;
        let mut rect = self.rect();
        for tile in solids {
            if !rect.overlaps(tile) {
                continue;
            }
            if self.velocity.x > 0.0 {
                rect.x = tile.left() - rect.w;
            } else if self.velocity.x < 0.0 {
                rect.x = tile.right();
            }
            self.position.x = rect.x as f32;
            match policy {
                WallPolicy::Stop => self.velocity.x = 0.0,
                WallPolicy::Bounce => self.velocity.x = -self.velocity.x,
            }
        }
    }

    /// Integrate Y and push out of any overlapping solid; landing on top of
    /// a solid sets `on_ground` and zeroes vertical velocity.
    pub fn step_y(&mut self, solids: &[Aabb]) {
        self.position.y += self.velocity.y;
        let mut rect = self.rect();
        for tile in solids {
            if !rect.overlaps(tile) {
                continue;
            }
            if self.velocity.y > 0.0 {
                rect.y = tile.top() - rect.h;
                self.on_ground = true;
            } else if self.velocity.y < 0.0 {
                rect.y = tile.bottom();
            }
            self.position.y = rect.y as f32;
            self.velocity.y = 0.0;
        }
    }

    /// Flat-floor policy when a level supplies no solids at all: clamp the
    /// body to a fixed world-bottom band.
    pub fn fallback_floor(&mut self, floor_top: f32) {
        if self.rect().bottom() as f32 >= floor_top {
            self.position.y = floor_top - self.size.1 as f32;
            self.velocity.y = 0.0;
            self.on_ground = true;
        }
    }
}
