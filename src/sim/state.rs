//! World state, per-tick input, and the event stream
//!
//! `GameWorld` is the full serializable simulation state for one level run.
//! Everything that affects the outcome lives here so a saved world plus the
//! same input sequence replays identically. Events are transient
//! notifications accumulated during a tick and drained by the caller; they
//! do not participate in serialization.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::boss::Boss;
use crate::sim::bullet::Projectile;
use crate::sim::enemy::{Enemy, EnemyKind};
use crate::sim::items::{
    BonusRoom, Checkpoint, Collectible, Pickup, PickupKind, SecretArea, Trap, WeaponPickup,
};
use crate::sim::level::Level;
use crate::sim::platform::MovingPlatform;
use crate::sim::player::Player;
use crate::sim::weapon::Weapon;

/// Held-input snapshot for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub shoot: bool,
    pub reload: bool,
    pub weapon_next: bool,
    pub weapon_prev: bool,
}

impl TickInput {
    /// -1, 0, or 1; opposing inputs cancel
    #[inline]
    pub fn move_dir(&self) -> i32 {
        self.move_right as i32 - self.move_left as i32
    }
}

/// Things that happened during a tick, for the caller to render or score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    EnemyKilled { kind: EnemyKind },
    BossKilled,
    BossPhaseChanged { phase: u8 },
    PlayerDamaged { amount: i32 },
    PlayerRespawned,
    CheckpointActivated,
    PickupCollected { kind: PickupKind, value: i32 },
    CoinCollected { value: i32 },
    KeyCollected { id: u32 },
    WeaponCollected { weapon: Weapon },
    SecretFound,
    BonusRoomEntered,
    LevelCleared { boss_defeated: bool },
    GameOver,
}

/// Terminal status of a level run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Playing,
    LevelCleared { boss_defeated: bool },
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameWorld {
    pub seed: u64,
    pub rng: Pcg32,
    pub tick_count: u64,
    pub level: Level,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub bullets: Vec<Projectile>,
    pub platforms: Vec<MovingPlatform>,
    pub pickups: Vec<Pickup>,
    pub collectibles: Vec<Collectible>,
    pub weapon_pickups: Vec<WeaponPickup>,
    pub checkpoints: Vec<Checkpoint>,
    pub traps: Vec<Trap>,
    pub secrets: Vec<SecretArea>,
    pub bonus_rooms: Vec<BonusRoom>,
    /// Index of the most recently activated checkpoint
    pub last_checkpoint: Option<usize>,
    pub score: u64,
    pub score_multiplier: f32,
    pub currency: u64,
    pub kill_count: u32,
    /// Set when the level's boss dies; folded into the clear bonus
    pub boss_defeated: bool,
    pub outcome: Outcome,
    /// Drained by the caller after each tick; never serialized
    #[serde(skip)]
    pub events: Vec<Event>,
}

impl GameWorld {
    pub fn new(seed: u64, level: Level, spawn: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tick_count: 0,
            level,
            player: Player::new(spawn.x, spawn.y),
            enemies: Vec::new(),
            boss: None,
            bullets: Vec::new(),
            platforms: Vec::new(),
            pickups: Vec::new(),
            collectibles: Vec::new(),
            weapon_pickups: Vec::new(),
            checkpoints: Vec::new(),
            traps: Vec::new(),
            secrets: Vec::new(),
            bonus_rooms: Vec::new(),
            last_checkpoint: None,
            score: 0,
            score_multiplier: 1.0,
            currency: 0,
            kill_count: 0,
            boss_defeated: false,
            outcome: Outcome::Playing,
            events: Vec::new(),
        }
    }

    /// Position the player returns to after dying. A stale index (e.g. from
    /// a hand-edited save) yields no respawn rather than a panic.
    pub fn respawn_point(&self) -> Option<Vec2> {
        self.last_checkpoint
            .and_then(|i| self.checkpoints.get(i))
            .map(|c| c.spawn)
    }

    /// Take this tick's events, leaving the buffer empty
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_dir_cancels_opposing_input() {
        let both = TickInput { move_left: true, move_right: true, ..TickInput::default() };
        let left = TickInput { move_left: true, ..TickInput::default() };
        assert_eq!(both.move_dir(), 0);
        assert_eq!(left.move_dir(), -1);
        assert_eq!(TickInput::default().move_dir(), 0);
    }

    #[test]
    fn test_drain_events_empties_buffer() {
        let mut world = GameWorld::new(1, Level::empty(10, 10), Vec2::new(50.0, 50.0));
        world.events.push(Event::SecretFound);
        world.events.push(Event::GameOver);
        let drained = world.drain_events();
        assert_eq!(drained.len(), 2);
        assert!(world.events.is_empty());
    }

    #[test]
    fn test_stale_checkpoint_index_yields_no_respawn() {
        let mut world = GameWorld::new(1, Level::empty(10, 10), Vec2::new(50.0, 50.0));
        world.last_checkpoint = Some(3);
        assert_eq!(world.respawn_point(), None);
    }

    #[test]
    fn test_world_serde_round_trip_preserves_rng() {
        let world = GameWorld::new(42, Level::empty(10, 10), Vec2::new(50.0, 50.0));
        let json = serde_json::to_string(&world).unwrap();
        let restored: GameWorld = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed, 42);
        assert_eq!(restored.rng, world.rng);
        assert_eq!(restored.player.hp, world.player.hp);
    }
}
