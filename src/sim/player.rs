//! Player state, input handling, weapons, and damage
//!
//! The player owns a kinematic body plus all the run state the HUD and tick
//! pipeline care about: health and invulnerability frames, a weapon roster
//! with a shared magazine, timed boost effects, and collected keys.

use glam::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::body::{Aabb, KinematicBody, PhysicsParams, WallPolicy};
use crate::sim::bullet::Projectile;
use crate::sim::state::TickInput;
use crate::sim::weapon::Weapon;

/// Animation-facing pose, derived purely from physical state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Idle,
    Walk,
    Run,
    Jump,
    Attack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: KinematicBody,
    pub physics: PhysicsParams,
    pub hp: i32,
    pub max_hp: i32,
    /// Ticks of post-hit invulnerability remaining
    pub iframes: u32,
    /// -1 or 1; last nonzero horizontal input direction
    pub facing: i32,
    pub weapons: Vec<Weapon>,
    pub current_weapon: usize,
    pub weapon_switch_cooldown: u32,
    pub ammo_in_mag: i32,
    pub mag_capacity: i32,
    pub reserve_ammo: i32,
    pub shoot_cooldown: u32,
    /// Difficulty/boost scaling on base move speed
    pub speed_multiplier: f32,
    pub jump_multiplier: f32,
    pub shield_ticks: u32,
    pub speed_boost_ticks: u32,
    pub damage_boost_ticks: u32,
    pub keys: Vec<u32>,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: KinematicBody::new(x, y, PLAYER_W, PLAYER_H),
            physics: PhysicsParams::default(),
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            iframes: 0,
            facing: 1,
            weapons: vec![Weapon::Pistol],
            current_weapon: 0,
            weapon_switch_cooldown: 0,
            ammo_in_mag: MAG_CAPACITY,
            mag_capacity: MAG_CAPACITY,
            reserve_ammo: RESERVE_AMMO,
            shoot_cooldown: 0,
            speed_multiplier: 1.0,
            jump_multiplier: 1.0,
            shield_ticks: 0,
            speed_boost_ticks: 0,
            damage_boost_ticks: 0,
            keys: Vec::new(),
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

    pub fn weapon(&self) -> Weapon {
        debug_assert!(self.current_weapon < self.weapons.len());
        match self.weapons.get(self.current_weapon) {
            Some(weapon) => *weapon,
            None => {
                warn!("weapon index {} out of range, falling back to pistol", self.current_weapon);
                Weapon::Pistol
            }
        }
    }

    fn effective_move_speed(&self) -> f32 {
        let boost = if self.speed_boost_ticks > 0 { SPEED_BOOST_FACTOR } else { 1.0 };
        self.physics.move_speed * self.speed_multiplier * boost
    }

    /// Damage scaling from the active damage boost, applied to bullet damage
    pub fn damage_multiplier(&self) -> f32 {
        if self.damage_boost_ticks > 0 { DAMAGE_BOOST_FACTOR } else { 1.0 }
    }

    /// Translate held input into velocity and facing
    pub fn handle_input(&mut self, input: &TickInput) {
        let dir = input.move_dir();
        if dir != 0 {
            self.body.velocity.x = dir as f32 * self.effective_move_speed();
            self.facing = dir;
        }
        if input.jump && self.body.on_ground {
            self.body.velocity.y = self.physics.jump_velocity * self.jump_multiplier;
            self.body.on_ground = false;
        }
    }

    /// Ground friction; snaps tiny residual velocity to zero
    pub fn apply_friction(&mut self) {
        if self.body.on_ground {
            self.body.velocity.x *= self.physics.friction;
            if self.body.velocity.x.abs() < STOP_EPSILON {
                self.body.velocity.x = 0.0;
            }
        }
    }

    /// True if the player loses health this tick. Shield and iframes absorb
    /// the hit entirely; nonpositive amounts are ignored.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if amount <= 0 || self.iframes > 0 || self.shield_ticks > 0 {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        self.iframes = IFRAME_TICKS;
        true
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown == 0 && self.ammo_in_mag >= self.weapon().ammo_cost()
    }

    /// Fire the current weapon; empty when on cooldown or out of ammo
    pub fn shoot(&mut self) -> Vec<Projectile> {
        if !self.can_shoot() {
            return Vec::new();
        }
        let weapon = self.weapon();
        self.ammo_in_mag -= weapon.ammo_cost();
        self.shoot_cooldown = weapon.fire_rate();
        let rect = self.rect();
        let muzzle = Vec2::new(
            rect.center_x() as f32 + self.facing as f32 * MUZZLE_OFFSET,
            rect.center_y() as f32,
        );
        weapon.fire(muzzle, self.facing)
    }

    /// Cycle the roster; no-op with fewer than two weapons or on cooldown
    pub fn switch_weapon(&mut self, direction: i32) {
        if self.weapons.len() < 2 || self.weapon_switch_cooldown > 0 {
            return;
        }
        let len = self.weapons.len() as i32;
        let next = (self.current_weapon as i32 + direction).rem_euclid(len);
        self.current_weapon = next as usize;
        self.weapon_switch_cooldown = WEAPON_SWITCH_COOLDOWN;
    }

    /// Add a weapon to the roster and select it; duplicates only re-select
    pub fn add_weapon(&mut self, weapon: Weapon) {
        if let Some(idx) = self.weapons.iter().position(|w| *w == weapon) {
            self.current_weapon = idx;
        } else {
            self.weapons.push(weapon);
            self.current_weapon = self.weapons.len() - 1;
        }
    }

    /// Move rounds from reserve into the magazine up to capacity
    pub fn reload(&mut self) {
        let need = self.mag_capacity - self.ammo_in_mag;
        let moved = need.min(self.reserve_ammo).max(0);
        self.ammo_in_mag += moved;
        self.reserve_ammo -= moved;
    }

    /// Per-tick physics and timer update. `carry_velocity` is the velocity of
    /// the moving platform the player stands on, if any.
    pub fn update(&mut self, solids: &[Aabb], carry_velocity: Vec2, floor_y: f32) {
        self.apply_friction();
        self.body.apply_gravity(&self.physics);
        self.body.on_ground = false;

        self.body.position.x += carry_velocity.x;
        self.body.step_x(solids, WallPolicy::Stop);
        self.body.step_y(solids);
        if solids.is_empty() {
            self.body.fallback_floor(floor_y);
        }

        self.iframes = self.iframes.saturating_sub(1);
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.weapon_switch_cooldown = self.weapon_switch_cooldown.saturating_sub(1);
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.speed_boost_ticks = self.speed_boost_ticks.saturating_sub(1);
        self.damage_boost_ticks = self.damage_boost_ticks.saturating_sub(1);
    }

    /// Reset after death: full health, full magazine, placed at `spawn`
    pub fn respawn(&mut self, spawn: Vec2) {
        self.body.position = spawn;
        self.body.velocity = Vec2::ZERO;
        self.body.on_ground = false;
        self.hp = self.max_hp;
        self.iframes = 0;
        self.ammo_in_mag = self.mag_capacity;
        self.shoot_cooldown = 0;
    }

    /// Animation pose derived from physical state, in priority order
    pub fn pose(&self) -> Pose {
        if !self.body.on_ground {
            Pose::Jump
        } else if self.shoot_cooldown > 0 {
            Pose::Attack
        } else if self.body.velocity.x.abs() > self.physics.move_speed * 0.75 {
            Pose::Run
        } else if self.body.velocity.x.abs() > self.physics.move_speed * 0.5 {
            Pose::Walk
        } else {
            Pose::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(left: bool, right: bool, jump: bool) -> TickInput {
        TickInput { move_left: left, move_right: right, jump, ..TickInput::default() }
    }

    #[test]
    fn test_opposed_input_cancels() {
        let mut player = Player::new(100.0, 100.0);
        player.body.velocity.x = 3.0;
        player.handle_input(&input(true, true, false));
        // Neither direction wins; velocity untouched, facing unchanged
        assert_eq!(player.body.velocity.x, 3.0);
        assert_eq!(player.facing, 1);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut player = Player::new(100.0, 100.0);
        player.handle_input(&input(false, false, true));
        assert_eq!(player.body.velocity.y, 0.0);

        player.body.on_ground = true;
        player.handle_input(&input(false, false, true));
        assert_eq!(player.body.velocity.y, JUMP_VELOCITY);
        assert!(!player.body.on_ground);
    }

    #[test]
    fn test_iframes_absorb_followup_hits() {
        let mut player = Player::new(0.0, 0.0);
        assert!(player.take_damage(1));
        assert_eq!(player.hp, PLAYER_MAX_HP - 1);
        assert_eq!(player.iframes, IFRAME_TICKS);
        assert!(!player.take_damage(3));
        assert_eq!(player.hp, PLAYER_MAX_HP - 1);
    }

    #[test]
    fn test_shield_blocks_without_iframes() {
        let mut player = Player::new(0.0, 0.0);
        player.shield_ticks = 10;
        assert!(!player.take_damage(2));
        assert_eq!(player.hp, PLAYER_MAX_HP);
        assert_eq!(player.iframes, 0);
    }

    #[test]
    fn test_shoot_spends_ammo_and_sets_cooldown() {
        let mut player = Player::new(100.0, 100.0);
        let shots = player.shoot();
        assert_eq!(shots.len(), 1);
        assert_eq!(player.ammo_in_mag, MAG_CAPACITY - 1);
        assert_eq!(player.shoot_cooldown, Weapon::Pistol.fire_rate());
        assert!(player.shoot().is_empty());
    }

    #[test]
    fn test_muzzle_offset_follows_facing() {
        let mut player = Player::new(100.0, 100.0);
        player.facing = -1;
        let shots = player.shoot();
        let cx = player.rect().center_x() as f32;
        assert_eq!(shots[0].position.x, cx - MUZZLE_OFFSET);
    }

    #[test]
    fn test_reload_conserves_total_ammo() {
        let mut player = Player::new(0.0, 0.0);
        player.ammo_in_mag = 2;
        player.reserve_ammo = 5;
        let before = player.ammo_in_mag + player.reserve_ammo;
        player.reload();
        assert_eq!(player.ammo_in_mag, 7);
        assert_eq!(player.reserve_ammo, 0);
        assert_eq!(player.ammo_in_mag + player.reserve_ammo, before);
    }

    #[test]
    fn test_switch_weapon_noop_with_single_weapon() {
        let mut player = Player::new(0.0, 0.0);
        player.switch_weapon(1);
        assert_eq!(player.current_weapon, 0);
        assert_eq!(player.weapon_switch_cooldown, 0);
    }

    #[test]
    fn test_switch_weapon_cycles_and_cools_down() {
        let mut player = Player::new(0.0, 0.0);
        player.add_weapon(Weapon::Shotgun);
        player.current_weapon = 0;
        player.switch_weapon(-1);
        assert_eq!(player.weapon(), Weapon::Shotgun);
        // Cooldown swallows the second switch
        player.switch_weapon(-1);
        assert_eq!(player.weapon(), Weapon::Shotgun);
    }

    #[test]
    fn test_add_weapon_dedupes() {
        let mut player = Player::new(0.0, 0.0);
        player.add_weapon(Weapon::Laser);
        player.add_weapon(Weapon::Laser);
        assert_eq!(player.weapons.len(), 2);
        assert_eq!(player.weapon(), Weapon::Laser);
    }

    #[test]
    fn test_pose_priority() {
        let mut player = Player::new(0.0, 0.0);
        assert_eq!(player.pose(), Pose::Jump);

        player.body.on_ground = true;
        assert_eq!(player.pose(), Pose::Idle);

        player.body.velocity.x = MOVE_SPEED * 0.6;
        assert_eq!(player.pose(), Pose::Walk);

        player.body.velocity.x = MOVE_SPEED;
        assert_eq!(player.pose(), Pose::Run);

        player.shoot_cooldown = 5;
        assert_eq!(player.pose(), Pose::Attack);
    }

    #[test]
    fn test_respawn_restores_health_and_mag() {
        let mut player = Player::new(0.0, 0.0);
        player.hp = 0;
        player.ammo_in_mag = 0;
        player.body.velocity = Vec2::new(4.0, 9.0);
        player.respawn(Vec2::new(200.0, 400.0));
        assert_eq!(player.hp, player.max_hp);
        assert_eq!(player.ammo_in_mag, player.mag_capacity);
        assert_eq!(player.body.position, Vec2::new(200.0, 400.0));
        assert_eq!(player.body.velocity, Vec2::ZERO);
    }
}
