//! Collision and combat resolution
//!
//! Circle-circle overlap drives everything here: bullets against enemies,
//! enemies against the player, and the player against pickups. Entities are
//! only flagged dead; compaction happens afterwards in the tick.

use glam::Vec2;
use rand::Rng;

use super::abilities;
use super::shake::SHAKE_KILL;
use super::state::{EnemyKind, GameEvent, GameState, Particle};
use crate::consts::*;

/// A radial particle burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: u32,
    pub speed: f32,
    pub radius: f32,
}

pub const HIT_BURST: Burst = Burst {
    count: 8,
    speed: 3.0,
    radius: 2.0,
};
pub const KILL_BURST: Burst = Burst {
    count: 20,
    speed: 4.0,
    radius: 3.0,
};
pub const AMMO_BURST: Burst = Burst {
    count: 15,
    speed: 3.0,
    radius: 2.0,
};
pub const POWERUP_BURST: Burst = Burst {
    count: 20,
    speed: 4.0,
    radius: 3.0,
};
pub const SHIELD_BURST: Burst = Burst {
    count: 30,
    speed: 5.0,
    radius: 3.0,
};
pub const NUKE_BURST: Burst = Burst {
    count: 150,
    speed: 10.0,
    radius: 6.0,
};
pub const NUKE_KILL_BURST: Burst = Burst {
    count: 15,
    speed: 5.0,
    radius: 4.0,
};

/// Strict overlap: touching circles do not collide
#[inline]
pub fn overlaps(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Emit particles in uniformly random directions from `origin`
pub fn burst<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, origin: Vec2, burst: Burst) {
    let cap = state.feedback.max_particles;
    for _ in 0..burst.count {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        state.particles.spawn_capped(
            Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * burst.speed,
                radius: burst.radius,
                alive: true,
            },
            cap,
        );
    }
}

/// Score a kill at the current combo multiplier and extend the combo
pub fn award_kill(state: &mut GameState, kind: EnemyKind) -> u64 {
    let points = KILL_SCORE * state.combo_multiplier();
    state.score += points;
    state.combo += 1;
    state.timers.combo.set(COMBO_WINDOW);
    state.emit(GameEvent::EnemyKilled { kind, points });
    points
}

/// Reset the combo once its window lapses, otherwise run the window down
pub fn decay_combo(state: &mut GameState, dt: f32) {
    if state.timers.combo.is_running() {
        state.timers.combo.tick(dt);
    } else {
        state.combo = 0;
    }
}

enum Impact {
    Hit(Vec2),
    Kill(Vec2, EnemyKind),
}

/// Every living enemy against every living bullet.
///
/// There is no early exit once an enemy is hit: every overlapping bullet in
/// the same tick is consumed and bursts a hit, even after the enemy's health
/// runs out. Only the kill is deduplicated. It is scored, shaken and burst
/// once, when the enemy first drops to zero, so a volley cannot pay out (or
/// advance the combo) more than once for a single enemy.
pub fn resolve_bullet_hits<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let mut impacts = Vec::new();

    for enemy in state.enemies.iter_mut() {
        if !enemy.alive {
            continue;
        }
        for bullet in state.bullets.iter_mut() {
            if !bullet.alive || !overlaps(enemy.pos, enemy.radius, bullet.pos, bullet.radius) {
                continue;
            }
            bullet.alive = false;
            enemy.health = enemy.health.saturating_sub(1);
            impacts.push(Impact::Hit(enemy.pos));

            if enemy.health == 0 && enemy.alive {
                enemy.alive = false;
                impacts.push(Impact::Kill(enemy.pos, enemy.kind));
            }
        }
    }

    for impact in impacts {
        match impact {
            Impact::Hit(pos) => burst(state, rng, pos, HIT_BURST),
            Impact::Kill(pos, kind) => {
                award_kill(state, kind);
                state.add_shake(SHAKE_KILL);
                burst(state, rng, pos, KILL_BURST);
            }
        }
    }
}

/// Enemies that reach the living player die and hurt the player
pub fn resolve_enemy_contacts<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    for index in 0..state.enemies.len() {
        let player = &state.player;
        let touching = state.enemies.as_slice().get(index).is_some_and(|e| {
            e.alive && player.alive && overlaps(e.pos, e.radius, player.pos, player.radius)
        });
        if !touching {
            continue;
        }
        if let Some(enemy) = state.enemies.get_mut(index) {
            enemy.alive = false;
        }
        abilities::damage_player(state, rng);
    }
}

/// Player walks over ammo crates
pub fn collect_ammo<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if !state.player.alive {
        return;
    }
    let (player_pos, player_radius) = (state.player.pos, state.player.radius);
    let mut collected = Vec::new();
    for ammo in state.ammo_pickups.iter_mut() {
        if ammo.alive && overlaps(ammo.pos, ammo.radius, player_pos, player_radius) {
            ammo.alive = false;
            collected.push(ammo.pos);
        }
    }

    for pos in collected {
        state.ammo += AMMO_PICKUP_AMOUNT;
        state.emit(GameEvent::AmmoCollected);
        burst(state, rng, pos, AMMO_BURST);
    }
}

/// Player walks over power-ups
pub fn collect_powerups<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if !state.player.alive {
        return;
    }
    let (player_pos, player_radius) = (state.player.pos, state.player.radius);
    let mut collected = Vec::new();
    for powerup in state.powerups.iter_mut() {
        if powerup.alive && overlaps(powerup.pos, powerup.radius, player_pos, player_radius) {
            powerup.alive = false;
            collected.push((powerup.kind, powerup.pos));
        }
    }

    for (kind, pos) in collected {
        kind.apply(state);
        burst(state, rng, pos, POWERUP_BURST);
    }
}
