//! Property tests for the simulation's core invariants

use glam::Vec2;
use proptest::prelude::*;

use ore_rush::consts::*;
use ore_rush::sim::{
    Boss, KinematicBody, PhysicsParams, Player, Projectile, TickInput, Weapon, bullet,
};

proptest! {
    #[test]
    fn fall_speed_never_exceeds_terminal(start_vy in -20.0f32..20.0, ticks in 1usize..500) {
        let params = PhysicsParams::default();
        let mut body = KinematicBody::new(0.0, 0.0, PLAYER_W, PLAYER_H);
        body.velocity.y = start_vy;
        for _ in 0..ticks {
            body.apply_gravity(&params);
            prop_assert!(body.velocity.y <= params.max_fall_speed);
        }
    }

    #[test]
    fn reload_conserves_total_ammo(mag in 0i32..=MAG_CAPACITY, reserve in 0i32..200) {
        let mut player = Player::new(0.0, 0.0);
        player.ammo_in_mag = mag;
        player.reserve_ammo = reserve;
        player.reload();
        prop_assert_eq!(player.ammo_in_mag + player.reserve_ammo, mag + reserve);
        prop_assert!(player.ammo_in_mag <= player.mag_capacity);
        prop_assert!(player.reserve_ammo >= 0);
    }

    #[test]
    fn firing_spends_exact_ammo(shots in 1usize..12) {
        let mut player = Player::new(0.0, 0.0);
        let cost = player.weapon().ammo_cost();
        let start = player.ammo_in_mag;
        let mut fired = 0;
        for _ in 0..shots {
            // Clear the cooldown so every trigger pull lands
            player.shoot_cooldown = 0;
            if !player.shoot().is_empty() {
                fired += 1;
            }
        }
        prop_assert_eq!(player.ammo_in_mag, start - fired * cost);
    }

    #[test]
    fn damage_inside_iframe_window_is_absorbed(
        first_hit in 1i32..4,
        followups in prop::collection::vec(1i32..4, 1..10),
    ) {
        let mut player = Player::new(0.0, 0.0);
        prop_assert!(player.take_damage(first_hit));
        let hp_after_first = player.hp;
        for hit in followups {
            prop_assert!(!player.take_damage(hit));
        }
        prop_assert_eq!(player.hp, hp_after_first);
    }

    #[test]
    fn nonpositive_damage_is_ignored(amount in -10i32..=0) {
        let mut player = Player::new(0.0, 0.0);
        prop_assert!(!player.take_damage(amount));
        prop_assert_eq!(player.hp, PLAYER_MAX_HP);
        prop_assert_eq!(player.iframes, 0);
    }

    #[test]
    fn boss_phase_only_increases(hits in prop::collection::vec(1i32..8, 1..30)) {
        let mut boss = Boss::new(400.0, 300.0);
        let mut last_phase = boss.phase;
        for hit in hits {
            boss.take_damage(hit);
            prop_assert!(boss.phase >= last_phase);
            prop_assert!(boss.hp >= 0);
            last_phase = boss.phase;
        }
    }

    #[test]
    fn boss_phase_matches_health_fraction(damage in 1i32..40) {
        let mut boss = Boss::new(400.0, 300.0);
        boss.take_damage(damage);
        let fraction = boss.hp as f32 / boss.max_hp as f32;
        let expected = if fraction <= 0.33 {
            3
        } else if fraction <= 0.66 {
            2
        } else {
            1
        };
        prop_assert_eq!(boss.phase, expected);
    }

    #[test]
    fn friction_brings_player_to_rest(start_vx in -10.0f32..10.0) {
        let mut player = Player::new(0.0, 0.0);
        player.body.on_ground = true;
        player.body.velocity.x = start_vx;
        for _ in 0..200 {
            player.apply_friction();
        }
        prop_assert_eq!(player.body.velocity.x, 0.0);
    }

    #[test]
    fn radial_volley_preserves_speed(count in 1usize..32, speed in 1.0f32..20.0) {
        let shots = bullet::radial_volley(Vec2::ZERO, count, speed, 1, true);
        prop_assert_eq!(shots.len(), count);
        for shot in shots {
            prop_assert!((shot.velocity.length() - speed).abs() < 1e-3);
        }
    }

    #[test]
    fn move_dir_is_sign_of_input(left: bool, right: bool) {
        let input = TickInput { move_left: left, move_right: right, ..TickInput::default() };
        let expected = match (left, right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        };
        prop_assert_eq!(input.move_dir(), expected);
    }

    #[test]
    fn bullets_fly_straight(facing in prop_oneof![Just(-1), Just(1)], ticks in 1usize..100) {
        let speed = Weapon::Pistol.bullet_speed();
        let mut shot = Projectile::horizontal(Vec2::new(0.0, 50.0), facing, speed, 1, false);
        for _ in 0..ticks {
            shot.advance();
        }
        prop_assert_eq!(shot.position.y, 50.0);
        prop_assert_eq!(shot.position.x, facing as f32 * speed * ticks as f32);
    }
}
