//! Player abilities: firing, dash, nuke, power-up effects and taking damage

use glam::Vec2;
use rand::Rng;

use super::combat::{NUKE_BURST, NUKE_KILL_BURST, SHIELD_BURST, award_kill, burst};
use super::shake::{SHAKE_DASH, SHAKE_NUKE, SHAKE_PLAYER_HIT, SHAKE_SHIELD_BREAK};
use super::state::{Bullet, GameEvent, GamePhase, GameState, Particle, PowerUpKind};
use super::tick::TickInput;
use crate::consts::*;
use crate::{clamp_to_play_area, direction};

/// Particles thrown off by a dash
const DASH_PARTICLES: u32 = 20;
const DASH_JITTER: f32 = 5.0;
const DASH_PARTICLE_RADIUS: f32 = 3.0;

impl PowerUpKind {
    /// Apply this power-up's effect to the run
    pub fn apply(self, state: &mut GameState) {
        match self {
            PowerUpKind::Nuke => state.nukes += 1,
            PowerUpKind::Shield => state.player.shield = true,
            PowerUpKind::RapidFire => state.timers.rapid_fire.set(RAPID_FIRE_DURATION),
            PowerUpKind::SlowMo => state.timers.slow_mo.set(SLOW_MO_DURATION),
        }
        log::debug!("Power-up collected: {:?}", self);
        state.emit(GameEvent::PowerUpCollected(self));
    }
}

/// Cooldown applied after each shot, shortened while rapid fire runs
pub fn fire_cooldown(state: &GameState) -> f32 {
    if state.timers.rapid_fire.is_running() {
        RAPID_FIRE_COOLDOWN
    } else {
        FIRE_COOLDOWN
    }
}

/// Shoot toward the pointer if the trigger is held and the gun is ready.
/// Returns whether a bullet was fired.
pub fn fire(state: &mut GameState, input: &TickInput) -> bool {
    if !input.fire || !state.player.alive {
        return false;
    }
    if state.ammo == 0 || state.timers.fire_cooldown.is_running() {
        return false;
    }

    let aim = direction(input.pointer - state.player.pos);
    state.bullets.spawn(Bullet::new(state.player.pos, aim * BULLET_SPEED));
    state.ammo -= 1;
    let cooldown = fire_cooldown(state);
    state.timers.fire_cooldown.set(cooldown);
    true
}

/// Take one hit. A shield soaks it; otherwise health drops and the combo
/// breaks. Running out of health ends the run.
pub fn damage_player<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if state.player.shield {
        state.player.shield = false;
        state.add_shake(SHAKE_SHIELD_BREAK);
        let pos = state.player.pos;
        burst(state, rng, pos, SHIELD_BURST);
        state.emit(GameEvent::ShieldBroken);
        return;
    }

    state.player.health = state.player.health.saturating_sub(1);
    state.add_shake(SHAKE_PLAYER_HIT);
    state.combo = 0;
    state.emit(GameEvent::PlayerHit {
        health: state.player.health,
    });

    if state.player.health == 0 {
        state.player.alive = false;
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} on wave {} after {:.1}s",
            state.score,
            state.wave,
            state.survival_time
        );
        state.emit(GameEvent::GameOver {
            score: state.score,
            wave: state.wave,
        });
        if state.score > state.high_score {
            state.high_score = state.score;
            log::info!("New high score: {}", state.score);
            state.emit(GameEvent::NewHighScore(state.score));
        }
    }
}

/// Blink along the movement intent. Does nothing, and keeps the cooldown
/// ready, when there is no intent. Returns whether the dash happened.
pub fn dash<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) -> bool {
    if state.timers.dash_cooldown.is_running() {
        return false;
    }
    let dir = direction(input.intent());
    if dir == Vec2::ZERO {
        return false;
    }

    state.player.pos = clamp_to_play_area(state.player.pos + dir * DASH_DISTANCE);
    state.timers.dash_cooldown.set(DASH_COOLDOWN);
    state.add_shake(SHAKE_DASH);

    let cap = state.feedback.max_particles;
    for _ in 0..DASH_PARTICLES {
        let vel = Vec2::new(
            rng.random_range(-DASH_JITTER..DASH_JITTER),
            rng.random_range(-DASH_JITTER..DASH_JITTER),
        );
        state.particles.spawn_capped(
            Particle {
                pos: state.player.pos,
                vel,
                radius: DASH_PARTICLE_RADIUS,
                alive: true,
            },
            cap,
        );
    }
    log::debug!("Dash to ({:.0}, {:.0})", state.player.pos.x, state.player.pos.y);
    state.emit(GameEvent::Dashed);
    true
}

/// Spend a nuke: every living enemy is scored as a kill in pool order and
/// removed, and the rest of the wave's quota is cancelled.
/// Returns the number of enemies destroyed, or `None` with no stock.
pub fn nuke<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Option<u32> {
    if state.nukes == 0 {
        return None;
    }
    state.nukes -= 1;
    state.add_shake(SHAKE_NUKE);
    let pos = state.player.pos;
    burst(state, rng, pos, NUKE_BURST);

    let victims: Vec<_> = state.enemies.alive().map(|e| (e.pos, e.kind)).collect();
    for &(pos, kind) in &victims {
        award_kill(state, kind);
        burst(state, rng, pos, NUKE_KILL_BURST);
    }
    state.enemies.clear();
    state.enemies_left_in_wave = 0;

    let kills = victims.len() as u32;
    log::debug!("Nuke detonated, {} enemies destroyed", kills);
    state.emit(GameEvent::NukeDetonated { kills });
    Some(kills)
}
