//! Movement and bounds: integrates velocities and keeps the player in the arena

use super::state::{GameState, Trail};
use super::tick::TickInput;
use crate::consts::*;
use crate::{clamp_to_play_area, direction, in_arena};

/// Afterimages laid by moving entities
const PLAYER_TRAIL: (f32, f32) = (6.0, 0.5);
const BULLET_TRAIL: (f32, f32) = (3.0, 0.3);

/// Per-tick decay of decorative entities
const TRAIL_FADE: f32 = 0.92;
const TRAIL_SHRINK: f32 = 0.95;
const PARTICLE_DRAG: f32 = 0.97;
const PARTICLE_SHRINK: f32 = 0.96;

/// Step the player along its input intent and clamp to the play area
pub fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    player.vel = direction(input.intent()) * PLAYER_SPEED;
    player.pos = clamp_to_play_area(player.pos + player.vel);

    if player.vel.length_squared() > 0.0 {
        state.trails.spawn(Trail {
            pos: player.pos,
            radius: PLAYER_TRAIL.0,
            alpha: PLAYER_TRAIL.1,
        });
    }
}

/// Integrate bullets; any bullet leaving the arena dies
pub fn move_bullets(state: &mut GameState) {
    for bullet in state.bullets.iter_mut().filter(|b| b.alive) {
        state.trails.spawn(Trail {
            pos: bullet.pos,
            radius: BULLET_TRAIL.0,
            alpha: BULLET_TRAIL.1,
        });
        bullet.pos += bullet.vel;
        if !in_arena(bullet.pos) {
            bullet.alive = false;
        }
    }
}

/// Speed multiplier applied to every enemy this tick
pub fn enemy_speed_multiplier(state: &GameState) -> f32 {
    if state.timers.slow_mo.is_running() {
        SLOW_MO_FACTOR
    } else {
        1.0
    }
}

/// Point every enemy straight at the player and advance it.
/// No inertia: velocity is recomputed from scratch each tick.
pub fn steer_enemies(state: &mut GameState) {
    let slow = enemy_speed_multiplier(state);
    let target = state.player.pos;
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        enemy.vel = direction(target - enemy.pos) * enemy.kind.speed() * slow;
        enemy.pos += enemy.vel;
    }
}

/// Cosmetic spin on pickups
pub fn spin_pickups(state: &mut GameState) {
    for ammo in state.ammo_pickups.iter_mut() {
        ammo.rotation += 1.0;
    }
    for powerup in state.powerups.iter_mut() {
        powerup.rotation += 2.0;
        powerup.pulse += 0.1;
    }
}

/// Fade trails and drop the faint ones
pub fn decay_trails(state: &mut GameState) {
    state.trails.advance_and_reap(|t| {
        t.alpha *= TRAIL_FADE;
        t.radius *= TRAIL_SHRINK;
    });
}

/// Drift, slow and shrink particles, dropping the spent ones
pub fn decay_particles(state: &mut GameState) {
    state.particles.advance_and_reap(|p| {
        p.pos += p.vel;
        p.vel *= PARTICLE_DRAG;
        p.radius *= PARTICLE_SHRINK;
        if p.radius < super::state::PARTICLE_MIN_RADIUS {
            p.alive = false;
        }
    });
}
