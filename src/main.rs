//! Headless demo run
//!
//! Builds a small level, scripts a few seconds of input, and logs every
//! event the sim emits. Useful for eyeballing pipeline behavior without a
//! renderer attached. `RUST_LOG=debug` shows the per-tick diagnostics.

use glam::Vec2;
use log::info;

use ore_rush::consts::SIM_HZ;
use ore_rush::sim::{
    Aabb, Boss, Checkpoint, Enemy, EnemyKind, GameWorld, Level, MovingPlatform, Outcome, Pickup,
    PickupKind, TickInput, WeaponPickup, tick,
};
use ore_rush::{Difficulty, Event};

fn demo_world(seed: u64) -> GameWorld {
    // 60x15 tiles: a floor strip with a few raised ledges
    let mut grid = vec![vec![0u8; 60]; 15];
    for col in 0..60 {
        grid[14][col] = 1;
    }
    for col in 14..18 {
        grid[11][col] = 1;
    }
    for col in 30..34 {
        grid[10][col] = 1;
    }
    let level = Level::new(grid);

    let mut world = GameWorld::new(seed, level, Vec2::new(60.0, 300.0));
    world.enemies.push(Enemy::new(EnemyKind::Walker, 500.0, 370.0, 90.0));
    world.enemies.push(Enemy::new(EnemyKind::Flying, 800.0, 250.0, 120.0));
    world.enemies.push(Enemy::new(EnemyKind::Tank, 1100.0, 370.0, 60.0));
    world.boss = Some(Boss::new(1500.0, 360.0));
    world.platforms.push(MovingPlatform::new(
        Vec2::new(600.0, 330.0),
        (90, 20),
        (1, 0),
        120.0,
        2.0,
    ));
    world.pickups.push(Pickup {
        rect: Aabb::new(400, 380, 24, 24),
        kind: PickupKind::Health,
        value: 2,
    });
    world.weapon_pickups.push(WeaponPickup {
        rect: Aabb::new(700, 380, 24, 24),
        weapon: ore_rush::sim::Weapon::Shotgun,
    });
    world.checkpoints.push(Checkpoint::new(
        Aabb::new(900, 340, 30, 80),
        Vec2::new(900.0, 340.0),
    ));
    world
}

/// Scripted input: run right, hop periodically, fire continuously
fn scripted_input(tick_count: u64) -> TickInput {
    TickInput {
        move_right: true,
        jump: tick_count % 90 == 0,
        shoot: true,
        reload: tick_count % 240 == 0,
        ..TickInput::default()
    }
}

fn main() {
    env_logger::init();

    let seed = 0xC0FFEE;
    let mut world = demo_world(seed);
    Difficulty::Normal.apply(&mut world);
    info!("demo run starting (seed {seed:#x})");

    let max_ticks = 60 * SIM_HZ as u64;
    while world.outcome == Outcome::Playing && world.tick_count < max_ticks {
        let input = scripted_input(world.tick_count);
        tick(&mut world, &input);
        for event in world.drain_events() {
            match event {
                Event::LevelCleared { boss_defeated } => {
                    info!("level cleared (boss defeated: {boss_defeated})");
                }
                Event::GameOver => info!("game over"),
                other => info!("event: {other:?}"),
            }
        }
    }

    info!(
        "finished after {} ticks: outcome {:?}, score {}, currency {}, kills {}",
        world.tick_count, world.outcome, world.score, world.currency, world.kill_count
    );
}
