//! Ore Rush - side-scrolling mining platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, entities, game state, tick)
//! - `difficulty`: Data-driven difficulty presets
//!
//! Rendering, menus, audio, and save files are external layers: they consume
//! the state the sim exposes (positions, hp, boss phase) and the events each
//! tick emits (kills, pickups, level cleared). Nothing in here touches a
//! clock, a file, or a screen.

pub mod difficulty;
pub mod sim;

pub use difficulty::Difficulty;
pub use sim::{Event, GameWorld, Outcome, TickInput, tick};

/// Game tuning constants
pub mod consts {
    /// Fixed simulation rate (ticks per second); all velocities are px/tick
    pub const SIM_HZ: u32 = 60;

    /// Side of one square level tile, in pixels
    pub const TILE_SIZE: i32 = 30;
    /// Height of the flat-floor band at the bottom of the level, used when a
    /// level supplies no solid tiles at all
    pub const FALLBACK_FLOOR_INSET: i32 = 32;

    /// Default body physics (px/tick, px/tick^2)
    pub const GRAVITY: f32 = 0.6;
    pub const MOVE_SPEED: f32 = 4.0;
    pub const JUMP_VELOCITY: f32 = -12.0;
    pub const MAX_FALL_SPEED: f32 = 18.0;
    pub const FRICTION: f32 = 0.8;
    /// Horizontal speed below which friction snaps velocity to zero
    pub const STOP_EPSILON: f32 = 0.05;

    /// Player collision box
    pub const PLAYER_W: i32 = 32;
    pub const PLAYER_H: i32 = 48;
    pub const PLAYER_MAX_HP: i32 = 5;
    /// Invulnerability window after taking damage, in ticks
    pub const IFRAME_TICKS: u32 = 30;
    /// Ticks between weapon switches
    pub const WEAPON_SWITCH_COOLDOWN: u32 = 10;
    pub const MAG_CAPACITY: i32 = 12;
    pub const RESERVE_AMMO: i32 = 48;
    /// Horizontal muzzle offset from the player's center
    pub const MUZZLE_OFFSET: f32 = 20.0;

    /// Projectile collision box
    pub const BULLET_W: i32 = 8;
    pub const BULLET_H: i32 = 4;

    /// Speed multiplier while a speed-boost pickup is active
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    /// Damage multiplier while a damage-boost pickup is active
    pub const DAMAGE_BOOST_FACTOR: f32 = 2.0;

    /// Contact damage dealt by enemies and enemy bullets
    pub const CONTACT_DAMAGE: i32 = 1;

    /// Score awards
    pub const SCORE_ENEMY_KILL: u64 = 100;
    pub const SCORE_BOSS_KILL: u64 = 500;
    pub const SCORE_LEVEL_BONUS: u64 = 500;
    pub const SCORE_BOSS_BONUS: u64 = 1000;
    pub const CURRENCY_LEVEL_BONUS: u64 = 50;
    pub const CURRENCY_BOSS_BONUS: u64 = 200;
}
