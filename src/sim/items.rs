//! Static interactables: pickups, collectibles, checkpoints, traps,
//! secrets, and bonus rooms
//!
//! These are all positional triggers the tick pipeline tests the player's
//! rect against. They carry no per-tick behavior of their own except trap
//! re-arm timers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::body::Aabb;
use crate::sim::weapon::Weapon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Adds rounds directly to the magazine, uncapped
    Ammo,
    /// Restores health, clamped at max
    Health,
    /// Grants damage immunity for `value` ticks
    Shield,
    /// Scales move speed for `value` ticks
    SpeedBoost,
    /// Scales bullet damage for `value` ticks
    DamageBoost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub rect: Aabb,
    pub kind: PickupKind,
    /// Rounds, health points, or effect duration in ticks depending on kind
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin { value: i32 },
    Key { id: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub rect: Aabb,
    pub kind: CollectibleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponPickup {
    pub rect: Aabb,
    pub weapon: Weapon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub rect: Aabb,
    /// Respawn position granted once activated
    pub spawn: Vec2,
    pub activated: bool,
}

impl Checkpoint {
    pub fn new(rect: Aabb, spawn: Vec2) -> Self {
        Self { rect, spawn, activated: false }
    }

    /// One-shot: true only on the activating touch
    pub fn activate(&mut self) -> bool {
        if self.activated {
            return false;
        }
        self.activated = true;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrapKind {
    Spike,
    Lava,
}

impl TrapKind {
    /// Ticks before the trap can hurt the same player again
    pub fn rearm_ticks(&self) -> u32 {
        match self {
            TrapKind::Spike => 30,
            TrapKind::Lava => 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trap {
    pub rect: Aabb,
    pub kind: TrapKind,
    pub damage: i32,
    /// Ticks until armed again
    pub cooldown: u32,
}

impl Trap {
    pub fn new(rect: Aabb, kind: TrapKind) -> Self {
        Self { rect, kind, damage: 1, cooldown: 0 }
    }

    /// Spikes only hurt a player landing on them from above; lava hurts on
    /// any overlap.
    pub fn triggers_on(&self, player_rect: &Aabb) -> bool {
        if self.cooldown > 0 || !self.rect.overlaps(player_rect) {
            return false;
        }
        match self.kind {
            TrapKind::Spike => player_rect.bottom() <= self.rect.top() + 5,
            TrapKind::Lava => true,
        }
    }

    pub fn fire(&mut self) {
        self.cooldown = self.kind.rearm_ticks();
    }

    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }
}

/// Hidden region that pays out coins the first time the player enters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretArea {
    pub rect: Aabb,
    pub reward_coins: i32,
    pub activated: bool,
}

impl SecretArea {
    pub fn new(rect: Aabb, reward_coins: i32) -> Self {
        Self { rect, reward_coins, activated: false }
    }
}

/// Region that spawns a grid of high-value coins on first entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusRoom {
    pub rect: Aabb,
    pub entered: bool,
}

impl BonusRoom {
    pub fn new(rect: Aabb) -> Self {
        Self { rect, entered: false }
    }

    /// Coin placements for this room: two rows of four
    pub fn coin_layout(&self) -> Vec<Collectible> {
        let mut coins = Vec::with_capacity(8);
        for row in 0..2 {
            for col in 0..4 {
                coins.push(Collectible {
                    rect: Aabb::new(
                        self.rect.x + 20 + col * 40,
                        self.rect.y + 20 + row * 40,
                        16,
                        16,
                    ),
                    kind: CollectibleKind::Coin { value: 20 },
                });
            }
        }
        coins
    }
}
