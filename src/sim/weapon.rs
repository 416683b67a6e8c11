//! Player weapon definitions
//!
//! Weapons are a fixed enum with a stat table; firing produces one or more
//! projectiles via the shared pattern helpers. Ammo, cooldowns, and ownership
//! live on the player, not here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::bullet::{self, Projectile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    Pistol,
    Shotgun,
    Laser,
    Rocket,
}

impl Weapon {
    pub fn name(&self) -> &'static str {
        match self {
            Weapon::Pistol => "pistol",
            Weapon::Shotgun => "shotgun",
            Weapon::Laser => "laser",
            Weapon::Rocket => "rocket",
        }
    }

    /// Ticks between shots
    pub fn fire_rate(&self) -> u32 {
        match self {
            Weapon::Pistol => 10,
            Weapon::Shotgun => 30,
            Weapon::Laser => 5,
            Weapon::Rocket => 60,
        }
    }

    /// Rounds consumed per trigger pull
    pub fn ammo_cost(&self) -> i32 {
        match self {
            Weapon::Pistol => 1,
            Weapon::Shotgun => 2,
            Weapon::Laser => 1,
            Weapon::Rocket => 3,
        }
    }

    /// Damage per projectile
    pub fn damage(&self) -> i32 {
        match self {
            Weapon::Pistol => 1,
            Weapon::Shotgun => 1,
            Weapon::Laser => 1,
            Weapon::Rocket => 2,
        }
    }

    pub fn bullet_speed(&self) -> f32 {
        match self {
            Weapon::Pistol => 10.0,
            Weapon::Shotgun => 8.0,
            Weapon::Laser => 20.0,
            Weapon::Rocket => 6.0,
        }
    }

    /// Heavy shots detonate against level geometry instead of passing over it
    pub fn is_heavy(&self) -> bool {
        matches!(self, Weapon::Rocket)
    }

    /// Build this weapon's projectiles from a muzzle position and facing
    pub fn fire(&self, origin: Vec2, facing: i32) -> Vec<Projectile> {
        match self {
            Weapon::Shotgun => {
                bullet::fan(origin, facing, 5, 30.0, self.bullet_speed(), self.damage(), false)
            }
            _ => {
                let mut shot =
                    Projectile::horizontal(origin, facing, self.bullet_speed(), self.damage(), false);
                if self.is_heavy() {
                    shot = shot.heavy();
                }
                vec![shot]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shotgun_fires_five_pellets() {
        let shots = Weapon::Shotgun.fire(Vec2::new(50.0, 50.0), 1);
        assert_eq!(shots.len(), 5);
        assert!(shots.iter().all(|p| !p.from_enemy && !p.heavy));
    }

    #[test]
    fn test_rocket_is_heavy_and_hits_harder() {
        let shots = Weapon::Rocket.fire(Vec2::ZERO, -1);
        assert_eq!(shots.len(), 1);
        assert!(shots[0].heavy);
        assert_eq!(shots[0].damage, 2);
        assert!(shots[0].velocity.x < 0.0);
    }

    #[test]
    fn test_laser_outpaces_pistol() {
        assert!(Weapon::Laser.bullet_speed() > Weapon::Pistol.bullet_speed());
        assert!(Weapon::Laser.fire_rate() < Weapon::Pistol.fire_rate());
    }
}
