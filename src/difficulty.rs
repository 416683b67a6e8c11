//! Data-driven difficulty presets
//!
//! A preset is a small table of multipliers and offsets applied once to a
//! freshly built world. Enemy and boss stats scale up or down, the player
//! gets a health and ammo adjustment, and the end-of-level score bonus is
//! weighted so harder runs are worth more.

use serde::{Deserialize, Serialize};

use crate::sim::GameWorld;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Resolved tuning values for one preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    pub enemy_hp_mult: f32,
    pub enemy_speed_mult: f32,
    /// Added to the player's max health (may be negative)
    pub player_hp_bonus: i32,
    /// Added to the player's reserve ammo (may be negative)
    pub reserve_ammo_bonus: i32,
    pub score_mult: f32,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn settings(&self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                enemy_hp_mult: 0.7,
                enemy_speed_mult: 0.8,
                player_hp_bonus: 2,
                reserve_ammo_bonus: 20,
                score_mult: 0.8,
            },
            Difficulty::Normal => DifficultySettings {
                enemy_hp_mult: 1.0,
                enemy_speed_mult: 1.0,
                player_hp_bonus: 0,
                reserve_ammo_bonus: 0,
                score_mult: 1.0,
            },
            Difficulty::Hard => DifficultySettings {
                enemy_hp_mult: 1.5,
                enemy_speed_mult: 1.3,
                player_hp_bonus: -1,
                reserve_ammo_bonus: -10,
                score_mult: 1.5,
            },
        }
    }

    /// Rescale a freshly built world. Applied once, before the first tick.
    pub fn apply(&self, world: &mut GameWorld) {
        let s = self.settings();

        world.player.max_hp = (world.player.max_hp + s.player_hp_bonus).max(1);
        world.player.hp = world.player.max_hp;
        world.player.reserve_ammo = (world.player.reserve_ammo + s.reserve_ammo_bonus).max(0);

        for enemy in world.enemies.iter_mut() {
            enemy.max_hp = ((enemy.max_hp as f32 * s.enemy_hp_mult).round() as i32).max(1);
            enemy.hp = enemy.max_hp;
            enemy.speed_multiplier = s.enemy_speed_mult;
        }
        if let Some(boss) = world.boss.as_mut() {
            boss.max_hp = ((boss.max_hp as f32 * s.enemy_hp_mult).round() as i32).max(1);
            boss.hp = boss.max_hp;
            boss.hp_multiplier = s.enemy_hp_mult;
            boss.speed_multiplier = s.enemy_speed_mult;
        }

        world.score_multiplier = s.score_mult;
    }
}
