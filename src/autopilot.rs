//! Demo autopilot: synthesizes input from the current state
//!
//! Used by the headless binary for attract-mode runs and smoke testing.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GamePhase, GameState, TickInput};

/// Enemies closer than this make the pilot back off
const PANIC_DISTANCE: f32 = 120.0;
/// Enemies closer than this trigger a dash
const DASH_DISTANCE_TRIGGER: f32 = 45.0;
/// Crowd size that justifies a nuke
const NUKE_CROWD: usize = 6;
/// Ammo level below which the pilot goes shopping
const LOW_AMMO: u32 = 20;

fn steer(input: &mut TickInput, toward: Vec2) {
    const DEADZONE: f32 = 5.0;
    input.right = toward.x > DEADZONE;
    input.left = toward.x < -DEADZONE;
    input.up = toward.y > DEADZONE;
    input.down = toward.y < -DEADZONE;
}

/// Pick the input for the next tick. Starts a run from the menu or game-over
/// screen when `restart` is true.
pub fn drive(state: &GameState, restart: bool) -> TickInput {
    let mut input = TickInput::default();

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            input.restart = restart;
            return input;
        }
        GamePhase::Playing => {}
        _ => return input,
    }

    let me = state.player.pos;
    let nearest = state
        .enemies
        .alive()
        .min_by(|a, b| a.pos.distance(me).total_cmp(&b.pos.distance(me)));

    if let Some(enemy) = nearest {
        // lead the target by its travel during the bullet's flight
        let flight = enemy.pos.distance(me) / BULLET_SPEED;
        input.pointer = enemy.pos + enemy.vel * flight;
        input.fire = state.ammo > 0;

        let dist = enemy.pos.distance(me);
        if dist < PANIC_DISTANCE {
            steer(&mut input, me - enemy.pos);
            input.dash = dist < DASH_DISTANCE_TRIGGER && !state.timers.dash_cooldown.is_running();
        }
    }

    let idle = input.intent() == Vec2::ZERO;
    if idle {
        let pickup = state
            .powerups
            .alive()
            .map(|p| p.pos)
            .chain(
                state
                    .ammo_pickups
                    .alive()
                    .filter(|_| state.ammo < LOW_AMMO)
                    .map(|a| a.pos),
            )
            .min_by(|a, b| a.distance(me).total_cmp(&b.distance(me)));
        steer(&mut input, pickup.unwrap_or(ARENA_CENTER) - me);
    }

    input.nuke = state.nukes > 0 && state.enemies.alive_count() >= NUKE_CROWD;
    input
}
