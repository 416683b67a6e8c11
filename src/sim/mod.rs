//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (60 Hz, velocities in px/tick)
//! - Seeded RNG only
//! - Stable iteration order (entity vectors, removals deferred to end of pass)
//! - No rendering or platform dependencies

pub mod body;
pub mod boss;
pub mod bullet;
pub mod enemy;
pub mod items;
pub mod level;
pub mod platform;
pub mod player;
pub mod state;
pub mod tick;
pub mod weapon;

pub use body::{Aabb, KinematicBody, PhysicsParams, WallPolicy};
pub use boss::Boss;
pub use bullet::Projectile;
pub use enemy::{Enemy, EnemyKind};
pub use items::{
    BonusRoom, Checkpoint, Collectible, CollectibleKind, Pickup, PickupKind, SecretArea, Trap,
    TrapKind, WeaponPickup,
};
pub use level::Level;
pub use platform::MovingPlatform;
pub use player::{Player, Pose};
pub use state::{Event, GameWorld, Outcome, TickInput};
pub use tick::tick;
pub use weapon::Weapon;
