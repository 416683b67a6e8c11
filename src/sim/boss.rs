//! Boss state machine and attack patterns
//!
//! The boss is a large grounded patroller with three health-driven phases.
//! Each phase has its own speed, pattern roster, and cooldowns; pattern
//! selection is the only randomized decision in the simulation, drawn from
//! the world's seeded RNG so runs stay reproducible.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::body::{Aabb, KinematicBody};
use crate::sim::bullet::{self, Projectile};
use crate::sim::player::Player;

const BOSS_W: i32 = 80;
const BOSS_H: i32 = 100;
const BOSS_MAX_HP: i32 = 20;
const PATROL_EXTENT: f32 = 200.0;
/// Health fractions below which phases 2 and 3 begin
const PHASE_THRESHOLDS: [f32; 2] = [0.66, 0.33];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub body: KinematicBody,
    pub hp: i32,
    pub max_hp: i32,
    /// 1, 2, or 3; only ever increases
    pub phase: u8,
    pub patrol_left: f32,
    pub patrol_right: f32,
    pub facing: i32,
    /// Ticks until the next shot
    pub attack_cooldown: u32,
    /// Ticks until the signature pattern may repeat
    pub pattern_cooldown: u32,
    pub speed_multiplier: f32,
    pub hp_multiplier: f32,
}

impl Boss {
    /// Spawn centered at (`cx`, `cy`), patrolling `PATROL_EXTENT` either side
    pub fn new(cx: f32, cy: f32) -> Self {
        Self {
            body: KinematicBody::new(cx - BOSS_W as f32 / 2.0, cy - BOSS_H as f32 / 2.0, BOSS_W, BOSS_H),
            hp: BOSS_MAX_HP,
            max_hp: BOSS_MAX_HP,
            phase: 1,
            patrol_left: cx - PATROL_EXTENT,
            patrol_right: cx + PATROL_EXTENT,
            facing: 1,
            attack_cooldown: 0,
            pattern_cooldown: 0,
            speed_multiplier: 1.0,
            hp_multiplier: 1.0,
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

    fn phase_speed(&self) -> f32 {
        let base = match self.phase {
            1 => 1.5,
            2 => 2.0,
            _ => 2.5,
        };
        base * self.speed_multiplier
    }

    /// Apply damage; returns the new phase if one or more thresholds were
    /// crossed by this hit. A single large hit can skip straight from
    /// phase 1 to phase 3.
    pub fn take_damage(&mut self, amount: i32) -> Option<u8> {
        if amount <= 0 || !self.alive() {
            return None;
        }
        self.hp = (self.hp - amount).max(0);
        let fraction = self.hp as f32 / self.max_hp as f32;
        let before = self.phase;
        if fraction <= PHASE_THRESHOLDS[0] && self.phase < 2 {
            self.phase = 2;
        }
        if fraction <= PHASE_THRESHOLDS[1] && self.phase < 3 {
            self.phase = 3;
        }
        if self.phase != before {
            self.attack_cooldown = 0;
            self.pattern_cooldown = 0;
            Some(self.phase)
        } else {
            None
        }
    }

    fn patrol(&mut self) {
        let x = self.body.position.x;
        if x <= self.patrol_left {
            self.facing = 1;
        } else if x + self.body.size.0 as f32 >= self.patrol_right {
            self.facing = -1;
        }
        self.body.velocity.x = self.facing as f32 * self.phase_speed();
        self.body.position.x += self.body.velocity.x;
    }

    /// Patrol and attack for one tick. The boss rides a fixed height; it
    /// never falls or jumps.
    pub fn update(&mut self, player: Option<&Player>, rng: &mut Pcg32) -> Vec<Projectile> {
        self.patrol();
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        self.pattern_cooldown = self.pattern_cooldown.saturating_sub(1);

        let Some(target) = player.filter(|p| p.alive()) else {
            return Vec::new();
        };
        if self.attack_cooldown > 0 {
            return Vec::new();
        }

        let origin = self.rect().center();
        let aim = target.rect().center();
        let roll = rng.random_range(0..3);

        match self.phase {
            1 => {
                if self.pattern_cooldown == 0 && roll == 0 {
                    self.attack_cooldown = 50;
                    self.pattern_cooldown = 180;
                    bullet::aimed_spread(origin, aim, 3, 8.0, 8.0, 1, true)
                } else {
                    self.attack_cooldown = 60;
                    vec![bullet::aimed_horizontal(origin, aim, 8.0, 1, true)]
                }
            }
            2 => {
                if self.pattern_cooldown == 0 && roll == 0 {
                    self.attack_cooldown = 45;
                    self.pattern_cooldown = 120;
                    bullet::aimed_spread(origin, aim, 5, 15.0, 7.0, 1, true)
                } else if roll == 1 {
                    self.attack_cooldown = 50;
                    bullet::aimed_spread(origin, aim, 5, 8.0, 8.0, 1, true)
                } else {
                    self.attack_cooldown = 35;
                    vec![bullet::aimed_horizontal(origin, aim, 8.0, 1, true)]
                }
            }
            _ => {
                if self.pattern_cooldown == 0 && roll == 0 {
                    self.attack_cooldown = 30;
                    self.pattern_cooldown = 90;
                    bullet::radial_volley(origin, 8, 6.0, 1, true)
                } else if roll == 1 {
                    self.attack_cooldown = 40;
                    bullet::wave_volley(origin, 12, 7.0, 1, true)
                } else {
                    self.attack_cooldown = 25;
                    bullet::aimed_spread(origin, aim, 7, 8.0, 8.0, 1, true)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_phase_advances_at_thresholds() {
        let mut boss = Boss::new(400.0, 300.0);
        // 20 -> 14: 0.7 of max, still phase 1
        assert_eq!(boss.take_damage(6), None);
        assert_eq!(boss.phase, 1);
        // 14 -> 13: crosses 0.66
        assert_eq!(boss.take_damage(1), Some(2));
        // 13 -> 6: crosses 0.33
        assert_eq!(boss.take_damage(7), Some(3));
        assert_eq!(boss.phase, 3);
    }

    #[test]
    fn test_single_large_hit_skips_phase_two() {
        let mut boss = Boss::new(400.0, 300.0);
        assert_eq!(boss.take_damage(15), Some(3));
        assert_eq!(boss.phase, 3);
    }

    #[test]
    fn test_phase_never_regresses() {
        let mut boss = Boss::new(400.0, 300.0);
        boss.take_damage(14);
        assert_eq!(boss.phase, 3);
        boss.take_damage(0);
        boss.take_damage(-5);
        assert_eq!(boss.phase, 3);
    }

    #[test]
    fn test_patrol_stays_in_bounds() {
        let mut boss = Boss::new(400.0, 300.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let player = Player::new(1200.0, 300.0);
        for _ in 0..2000 {
            boss.update(Some(&player), &mut rng);
            assert!(boss.body.position.x >= boss.patrol_left - 3.0);
            assert!(boss.body.position.x + BOSS_W as f32 <= boss.patrol_right + 3.0);
        }
    }

    #[test]
    fn test_attacks_respect_cooldown() {
        let mut boss = Boss::new(400.0, 300.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let player = Player::new(600.0, 300.0);
        let first = boss.update(Some(&player), &mut rng);
        assert!(!first.is_empty());
        assert!(first.iter().all(|p| p.from_enemy));
        let second = boss.update(Some(&player), &mut rng);
        assert!(second.is_empty());
    }

    #[test]
    fn test_phase_three_radial_fires_eight() {
        let mut boss = Boss::new(400.0, 300.0);
        boss.take_damage(14);
        let player = Player::new(600.0, 300.0);
        // Scan seeds until the radial roll comes up
        for seed in 0..64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut probe = boss.clone();
            let shots = probe.update(Some(&player), &mut rng);
            if shots.len() == 8 {
                assert_eq!(probe.attack_cooldown, 30);
                assert_eq!(probe.pattern_cooldown, 90);
                return;
            }
        }
        panic!("no seed produced the radial volley");
    }
}
