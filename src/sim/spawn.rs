//! Spawn director: enemy waves, ammo crates and power-ups

use glam::Vec2;
use rand::Rng;

use super::state::{
    AmmoPickup, Enemy, EnemyKind, GameEvent, GamePhase, GameState, PowerUp, PowerUpKind,
};
use crate::consts::*;
use crate::ellipse_point;

/// Seconds between enemy spawns for a wave
pub fn spawn_interval(wave: u32) -> f32 {
    (1.0 - wave as f32 * 0.05).max(0.3)
}

/// Pick an enemy spawn point on the ring around the arena centre, at least
/// [`ENEMY_SAFE_DISTANCE`] from the player.
///
/// Every attempt draws a fresh angle and fresh ring radii. After
/// [`MAX_SPAWN_ATTEMPTS`] rejections the candidate farthest from the player
/// is used; that only happens when the safe distance no longer fits the ring.
pub fn sample_spawn_point<R: Rng + ?Sized>(rng: &mut R, player_pos: Vec2) -> Vec2 {
    let mut farthest = (f32::NEG_INFINITY, ARENA_CENTER);

    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let theta = rng.random_range(0.0..std::f32::consts::TAU);
        let radius_x = rng.random_range(SPAWN_RING_X.0..SPAWN_RING_X.1);
        let radius_y = rng.random_range(SPAWN_RING_Y.0..SPAWN_RING_Y.1);
        let candidate = ellipse_point(ARENA_CENTER, radius_x, radius_y, theta);
        let dist = candidate.distance(player_pos);
        if dist >= ENEMY_SAFE_DISTANCE {
            return candidate;
        }
        if dist > farthest.0 {
            farthest = (dist, candidate);
        }
    }

    log::warn!(
        "Enemy spawn sampling exhausted {} attempts, using farthest candidate ({:.1} from player)",
        MAX_SPAWN_ATTEMPTS,
        farthest.0
    );
    farthest.1
}

/// Roll an enemy kind and starting health for a wave
pub fn roll_enemy<R: Rng + ?Sized>(rng: &mut R, wave: u32) -> (EnemyKind, u8) {
    let roll = rng.random_range(0..100);
    let (kind, mut health) = if wave >= 3 {
        match roll {
            0..40 => (EnemyKind::Normal, 1),
            40..70 => (EnemyKind::Fast, 1),
            _ => (EnemyKind::Tank, 2),
        }
    } else {
        (EnemyKind::Normal, 1)
    };

    if wave >= 5 {
        if kind == EnemyKind::Tank {
            health = 3;
        } else if rng.random_range(0..100) < 30 {
            health = 2;
        }
    }

    (kind, health)
}

/// Feed the wave's remaining quota into the arena on the spawn clock
pub fn spawn_enemies<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if state.enemies_left_in_wave == 0 {
        return;
    }
    if !state.timers.enemy_spawn.advance(SIM_DT, spawn_interval(state.wave)) {
        return;
    }

    let pos = sample_spawn_point(rng, state.player.pos);
    let (kind, health) = roll_enemy(rng, state.wave);
    state.enemies.spawn(Enemy::new(kind, pos, health));
    state.enemies_left_in_wave -= 1;
}

fn random_pickup_point<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(PICKUP_SPAWN_MIN.x..PICKUP_SPAWN_MAX.x).floor(),
        rng.random_range(PICKUP_SPAWN_MIN.y..PICKUP_SPAWN_MAX.y).floor(),
    )
}

/// Drop an ammo crate every [`AMMO_SPAWN_INTERVAL`] seconds of play
pub fn spawn_ammo<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if state.timers.ammo_spawn.advance(SIM_DT, AMMO_SPAWN_INTERVAL) {
        let pos = random_pickup_point(rng);
        state.ammo_pickups.spawn(AmmoPickup::new(pos));
    }
}

/// Drop a random power-up every [`POWERUP_SPAWN_INTERVAL`] seconds of play
pub fn spawn_powerup<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if state.timers.powerup_spawn.advance(SIM_DT, POWERUP_SPAWN_INTERVAL) {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let pos = random_pickup_point(rng);
        state.powerups.spawn(PowerUp::new(kind, pos));
    }
}

/// The wave is over once its quota is spawned and nothing is left alive
pub fn wave_cleared(state: &GameState) -> bool {
    state.enemies_left_in_wave == 0 && state.enemies.alive_count() == 0
}

/// Escalate to the next wave and enter the transition rest
pub fn start_next_wave(state: &mut GameState) {
    state.wave += 1;
    state.enemies_left_in_wave = FIRST_WAVE_QUOTA + state.wave * 2;
    state.timers.wave_transition.set(WAVE_TRANSITION_DURATION);
    state.phase = GamePhase::WaveTransition;
    state.ammo += WAVE_AMMO_BONUS;
    if state.wave % 3 == 0 {
        state.nukes += 1;
    }
    log::info!(
        "Wave {}: {} enemies, spawn every {:.2}s",
        state.wave,
        state.enemies_left_in_wave,
        spawn_interval(state.wave)
    );
    state.emit(GameEvent::WaveStarted { wave: state.wave });
}
