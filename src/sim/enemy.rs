//! Enemy kinds and per-tick AI
//!
//! Four enemy archetypes share one struct parameterized by a const stat
//! table. AI is a stateless priority chain re-evaluated every tick:
//! shoot if the player is in range, else chase if detected, else patrol
//! between bounds. Flying enemies ignore gravity and bob around an anchor
//! height instead.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::body::{Aabb, KinematicBody, PhysicsParams, WallPolicy};
use crate::sim::bullet::{self, Projectile};
use crate::sim::player::Player;

const ENEMY_BULLET_SPEED: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Walker,
    Flying,
    Tank,
    Fast,
}

/// Stat block for one enemy archetype
pub struct EnemyParams {
    pub hp: i32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub detect_range: f32,
    pub shoot_range: f32,
    pub shoot_cooldown: u32,
    pub size: (i32, i32),
    pub ignores_gravity: bool,
}

impl EnemyKind {
    pub const fn params(&self) -> EnemyParams {
        match self {
            EnemyKind::Walker => EnemyParams {
                hp: 2,
                patrol_speed: 2.0,
                chase_speed: 3.0,
                detect_range: 200.0,
                shoot_range: 150.0,
                shoot_cooldown: 60,
                size: (32, 40),
                ignores_gravity: false,
            },
            EnemyKind::Flying => EnemyParams {
                hp: 1,
                patrol_speed: 2.0,
                chase_speed: 3.0,
                detect_range: 200.0,
                shoot_range: 150.0,
                shoot_cooldown: 60,
                size: (32, 40),
                ignores_gravity: true,
            },
            EnemyKind::Tank => EnemyParams {
                hp: 5,
                patrol_speed: 1.0,
                chase_speed: 1.5,
                detect_range: 200.0,
                shoot_range: 150.0,
                shoot_cooldown: 90,
                size: (32, 40),
                ignores_gravity: false,
            },
            EnemyKind::Fast => EnemyParams {
                hp: 1,
                patrol_speed: 4.0,
                chase_speed: 5.0,
                detect_range: 250.0,
                shoot_range: 150.0,
                shoot_cooldown: 40,
                size: (32, 40),
                ignores_gravity: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: KinematicBody,
    pub hp: i32,
    pub max_hp: i32,
    /// Patrol extent in world x; the enemy turns around at these edges
    pub patrol_left: f32,
    pub patrol_right: f32,
    pub facing: i32,
    pub shoot_timer: u32,
    /// Speed scaling from difficulty
    pub speed_multiplier: f32,
    /// Flying only: anchor height and bob phase
    pub hover_anchor_y: f32,
    pub hover_phase: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, patrol_extent: f32) -> Self {
        let params = kind.params();
        Self {
            kind,
            body: KinematicBody::new(x, y, params.size.0, params.size.1),
            hp: params.hp,
            max_hp: params.hp,
            patrol_left: x - patrol_extent,
            patrol_right: x + patrol_extent,
            facing: 1,
            shoot_timer: 0,
            speed_multiplier: 1.0,
            hover_anchor_y: y,
            hover_phase: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Aabb {
        self.body.rect()
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.hp > 0
    }

    /// True if health dropped; enemies have no invulnerability window
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if amount <= 0 {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        true
    }

    fn distance_to(&self, player: &Player) -> f32 {
        self.rect().center().distance(player.rect().center())
    }

    fn face_toward(&mut self, player: &Player) {
        self.facing = if player.rect().center_x() >= self.rect().center_x() { 1 } else { -1 };
    }

    fn patrol(&mut self, speed: f32) {
        let x = self.body.position.x;
        if x <= self.patrol_left {
            self.facing = 1;
        } else if x + self.body.size.0 as f32 >= self.patrol_right {
            self.facing = -1;
        } else if self.body.velocity.x > 0.0 {
            self.facing = 1;
        } else if self.body.velocity.x < 0.0 {
            self.facing = -1;
        }
        self.body.velocity.x = self.facing as f32 * speed;
    }

    /// AI and physics for one tick. Returns any projectiles fired.
    pub fn update(&mut self, player: Option<&Player>, solids: &[Aabb], floor_y: f32) -> Vec<Projectile> {
        let params = self.kind.params();
        let patrol_speed = params.patrol_speed * self.speed_multiplier;
        let chase_speed = params.chase_speed * self.speed_multiplier;
        self.shoot_timer = self.shoot_timer.saturating_sub(1);

        let mut shots = Vec::new();
        let target = player.filter(|p| p.alive());

        match target {
            Some(p) if self.distance_to(p) <= params.shoot_range => {
                self.face_toward(p);
                self.body.velocity.x = 0.0;
                if self.shoot_timer == 0 {
                    self.shoot_timer = params.shoot_cooldown;
                    shots.push(bullet::aimed_horizontal(
                        self.rect().center(),
                        p.rect().center(),
                        ENEMY_BULLET_SPEED,
                        CONTACT_DAMAGE,
                        true,
                    ));
                }
            }
            Some(p) if self.distance_to(p) <= params.detect_range => {
                self.face_toward(p);
                self.body.velocity.x = self.facing as f32 * chase_speed;
            }
            _ => self.patrol(patrol_speed),
        }

        if params.ignores_gravity {
            self.hover_phase += 0.1;
            self.body.step_x(solids, WallPolicy::Bounce);
            self.body.position.y = self.hover_anchor_y + self.hover_phase.sin() * 5.0;
        } else {
            let physics = PhysicsParams::default();
            self.body.apply_gravity(&physics);
            self.body.on_ground = false;
            self.body.step_x(solids, WallPolicy::Bounce);
            self.body.step_y(solids);
            if solids.is_empty() {
                self.body.fallback_floor(floor_y);
            }
        }

        // Bounce updates facing so patrol does not fight the wall
        if self.body.velocity.x > 0.0 {
            self.facing = 1;
        } else if self.body.velocity.x < 0.0 {
            self.facing = -1;
        }

        shots
    }
}
