//! The per-tick pipeline
//!
//! One call to [`tick`] advances the world by exactly one simulation step.
//! Stage order is fixed and load-bearing: input, hostile AI, platforms,
//! player physics, projectiles, combat resolution, the level-clear check,
//! then pickups, hazards, and death handling. The clear check runs before
//! pickups so collecting the last coin on the winning tick cannot reorder
//! the outcome.

use glam::Vec2;
use log::debug;

use crate::consts::*;
use crate::sim::body::Aabb;
use crate::sim::bullet::Projectile;
use crate::sim::items::{Collectible, CollectibleKind, PickupKind};
use crate::sim::state::{Event, GameWorld, Outcome, TickInput};

/// Advance the world by one fixed step. No-op once the run has ended.
pub fn tick(world: &mut GameWorld, input: &TickInput) {
    if world.outcome != Outcome::Playing {
        return;
    }
    world.tick_count += 1;

    apply_input(world, input);
    update_hostiles(world);
    for platform in world.platforms.iter_mut() {
        platform.update();
    }
    update_player_physics(world);
    advance_bullets(world);
    resolve_bullet_hits(world);
    world.enemies.retain(|e| e.alive());
    if world.boss.as_ref().is_some_and(|b| !b.alive()) {
        world.boss = None;
    }

    if check_level_clear(world) {
        return;
    }

    collect_pickups(world);
    collect_collectibles(world);
    collect_weapons(world);
    touch_checkpoints(world);
    discover_secrets(world);
    enter_bonus_rooms(world);
    apply_traps(world);
    apply_contact_damage(world);
    handle_death(world);
}

fn apply_input(world: &mut GameWorld, input: &TickInput) {
    if input.weapon_next {
        world.player.switch_weapon(1);
    }
    if input.weapon_prev {
        world.player.switch_weapon(-1);
    }
    if input.reload {
        world.player.reload();
    }
    world.player.handle_input(input);
    if input.shoot {
        let shots = world.player.shoot();
        world.bullets.extend(shots);
    }
}

fn update_hostiles(world: &mut GameWorld) {
    let floor_y = world.level.floor_y();
    let GameWorld { player, enemies, boss, bullets, rng, level, .. } = world;
    for enemy in enemies.iter_mut() {
        bullets.extend(enemy.update(Some(&*player), &level.solids, floor_y));
    }
    if let Some(boss) = boss {
        bullets.extend(boss.update(Some(&*player), rng));
    }
}

/// Velocity of the platform the player is standing on, if any
fn carry_velocity(world: &GameWorld) -> Vec2 {
    if world.player.body.velocity.y < 0.0 {
        return Vec2::ZERO;
    }
    let rect = world.player.rect();
    for platform in &world.platforms {
        let top = platform.rect();
        let riding = (rect.bottom() - top.top()).abs() <= 2
            && rect.right() > top.left()
            && rect.left() < top.right();
        if riding {
            return platform.velocity();
        }
    }
    Vec2::ZERO
}

fn update_player_physics(world: &mut GameWorld) {
    let carry = carry_velocity(world);
    let floor_y = world.level.floor_y();
    let mut solids = world.level.solids.clone();
    solids.extend(world.platforms.iter().map(|p| p.rect()));
    world.player.update(&solids, carry, floor_y);
    if !world.level.has_solids() {
        world.player.body.fallback_floor(floor_y);
    }
}

fn advance_bullets(world: &mut GameWorld) {
    let (width, height) = (world.level.pixel_width(), world.level.pixel_height());
    for bullet in world.bullets.iter_mut() {
        bullet.advance();
    }
    world.bullets.retain(|b| !b.out_of_bounds(width, height));
}

fn resolve_bullet_hits(world: &mut GameWorld) {
    let damage_mult = world.player.damage_multiplier();
    let mut bullets = std::mem::take(&mut world.bullets);
    bullets.retain(|bullet| {
        let hit = if bullet.from_enemy {
            resolve_enemy_bullet(bullet, world)
        } else {
            resolve_player_bullet(bullet, damage_mult, world)
        };
        !hit
    });
    world.bullets = bullets;
}

fn resolve_enemy_bullet(bullet: &Projectile, world: &mut GameWorld) -> bool {
    if !bullet.rect().overlaps(&world.player.rect()) {
        return false;
    }
    // The bullet is spent even when iframes or a shield absorb it
    if world.player.take_damage(bullet.damage) {
        world.events.push(Event::PlayerDamaged { amount: bullet.damage });
    }
    true
}

fn resolve_player_bullet(bullet: &Projectile, damage_mult: f32, world: &mut GameWorld) -> bool {
    let brect = bullet.rect();
    let damage = (bullet.damage as f32 * damage_mult) as i32;

    for enemy in world.enemies.iter_mut() {
        if !enemy.alive() || !brect.overlaps(&enemy.rect()) {
            continue;
        }
        enemy.take_damage(damage);
        if !enemy.alive() {
            world.score += SCORE_ENEMY_KILL;
            world.kill_count += 1;
            world.events.push(Event::EnemyKilled { kind: enemy.kind });
        }
        return true;
    }

    if let Some(boss) = world.boss.as_mut() {
        if boss.alive() && brect.overlaps(&boss.rect()) {
            if let Some(phase) = boss.take_damage(damage) {
                debug!("boss entered phase {phase}");
                world.events.push(Event::BossPhaseChanged { phase });
            }
            if !boss.alive() {
                world.score += SCORE_BOSS_KILL;
                world.kill_count += 1;
                world.boss_defeated = true;
                world.events.push(Event::BossKilled);
            }
            return true;
        }
    }

    // Heavy shots detonate against level geometry
    bullet.heavy && world.level.solids.iter().any(|s| brect.overlaps(s))
}

/// True if the run just ended in a clear; awards bonuses and stops the tick
fn check_level_clear(world: &mut GameWorld) -> bool {
    if !world.enemies.is_empty() || world.boss.is_some() {
        return false;
    }
    let boss_defeated = world.boss_defeated;
    world.score = (world.score as f32 * world.score_multiplier) as u64;
    // Boss clears pay the larger bonus instead of the plain one, not on top
    if boss_defeated {
        world.score += SCORE_BOSS_BONUS;
        world.currency += CURRENCY_BOSS_BONUS;
    } else {
        world.score += SCORE_LEVEL_BONUS;
        world.currency += CURRENCY_LEVEL_BONUS;
    }
    world.outcome = Outcome::LevelCleared { boss_defeated };
    world.events.push(Event::LevelCleared { boss_defeated });
    debug!(
        "level cleared on tick {} (boss defeated: {boss_defeated})",
        world.tick_count
    );
    true
}

fn collect_pickups(world: &mut GameWorld) {
    let rect = world.player.rect();
    let player = &mut world.player;
    let events = &mut world.events;
    world.pickups.retain(|pickup| {
        if !pickup.rect.overlaps(&rect) {
            return true;
        }
        match pickup.kind {
            PickupKind::Ammo => player.ammo_in_mag += pickup.value,
            PickupKind::Health => player.hp = (player.hp + pickup.value).min(player.max_hp),
            PickupKind::Shield => player.shield_ticks = pickup.value.max(0) as u32,
            PickupKind::SpeedBoost => player.speed_boost_ticks = pickup.value.max(0) as u32,
            PickupKind::DamageBoost => player.damage_boost_ticks = pickup.value.max(0) as u32,
        }
        events.push(Event::PickupCollected { kind: pickup.kind, value: pickup.value });
        false
    });
}

fn collect_collectibles(world: &mut GameWorld) {
    let rect = world.player.rect();
    let GameWorld { player, collectibles, events, currency, score, .. } = world;
    collectibles.retain(|c| {
        if !c.rect.overlaps(&rect) {
            return true;
        }
        match c.kind {
            CollectibleKind::Coin { value } => {
                *currency += value.max(0) as u64;
                *score += value.max(0) as u64;
                events.push(Event::CoinCollected { value });
            }
            CollectibleKind::Key { id } => {
                if !player.keys.contains(&id) {
                    player.keys.push(id);
                }
                events.push(Event::KeyCollected { id });
            }
        }
        false
    });
}

fn collect_weapons(world: &mut GameWorld) {
    let rect = world.player.rect();
    let GameWorld { player, weapon_pickups, events, .. } = world;
    weapon_pickups.retain(|wp| {
        if !wp.rect.overlaps(&rect) {
            return true;
        }
        player.add_weapon(wp.weapon);
        events.push(Event::WeaponCollected { weapon: wp.weapon });
        false
    });
}

fn touch_checkpoints(world: &mut GameWorld) {
    let rect = world.player.rect();
    for (i, checkpoint) in world.checkpoints.iter_mut().enumerate() {
        if checkpoint.rect.overlaps(&rect) && checkpoint.activate() {
            world.last_checkpoint = Some(i);
            world.events.push(Event::CheckpointActivated);
        }
    }
}

fn discover_secrets(world: &mut GameWorld) {
    let rect = world.player.rect();
    let mut spawned: Vec<Collectible> = Vec::new();
    for secret in world.secrets.iter_mut() {
        if secret.activated || !secret.rect.overlaps(&rect) {
            continue;
        }
        secret.activated = true;
        // Scatter the reward as coins around the secret's center
        let coin_value = 15;
        let count = (secret.reward_coins / coin_value).max(1);
        let center = secret.rect.center();
        for _ in 0..count {
            use rand::Rng;
            let dx = world.rng.random_range(-30..=30);
            let dy = world.rng.random_range(-20..=20);
            spawned.push(Collectible {
                rect: Aabb::from_center(
                    center.x as i32 + dx,
                    center.y as i32 + dy,
                    16,
                    16,
                ),
                kind: CollectibleKind::Coin { value: coin_value },
            });
        }
        world.events.push(Event::SecretFound);
    }
    world.collectibles.extend(spawned);
}

fn enter_bonus_rooms(world: &mut GameWorld) {
    let rect = world.player.rect();
    let mut spawned: Vec<Collectible> = Vec::new();
    for room in world.bonus_rooms.iter_mut() {
        if room.entered || !room.rect.overlaps(&rect) {
            continue;
        }
        room.entered = true;
        spawned.extend(room.coin_layout());
        world.events.push(Event::BonusRoomEntered);
    }
    world.collectibles.extend(spawned);
}

fn apply_traps(world: &mut GameWorld) {
    let rect = world.player.rect();
    let GameWorld { player, traps, events, .. } = world;
    for trap in traps.iter_mut() {
        trap.tick();
        if trap.triggers_on(&rect) {
            trap.fire();
            if player.take_damage(trap.damage) {
                events.push(Event::PlayerDamaged { amount: trap.damage });
            }
        }
    }
}

fn apply_contact_damage(world: &mut GameWorld) {
    let rect = world.player.rect();
    let GameWorld { player, enemies, boss, events, .. } = world;
    let touching_hostile = enemies.iter().any(|e| e.rect().overlaps(&rect))
        || boss.as_ref().is_some_and(|b| b.rect().overlaps(&rect));
    if touching_hostile && player.take_damage(CONTACT_DAMAGE) {
        events.push(Event::PlayerDamaged { amount: CONTACT_DAMAGE });
    }
}

fn handle_death(world: &mut GameWorld) {
    if world.player.alive() {
        return;
    }
    if let Some(spawn) = world.respawn_point() {
        world.player.respawn(spawn);
        world.events.push(Event::PlayerRespawned);
        debug!("player respawned on tick {}", world.tick_count);
    } else {
        world.outcome = Outcome::GameOver;
        world.events.push(Event::GameOver);
        debug!("game over on tick {}", world.tick_count);
    }
}
