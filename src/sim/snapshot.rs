//! Read-only view of the simulation for the presentation layer

use glam::Vec2;
use serde::Serialize;

use super::state::{
    AmmoPickup, Bullet, Enemy, GamePhase, GameState, Particle, Player, PowerUp, Trail,
};

/// HUD scalars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub ammo: u32,
    pub nukes: u32,
    pub wave: u32,
    pub health: u8,
    pub max_health: u8,
    pub survival_time: f32,
    pub combo: u32,
    pub combo_multiplier: u64,
    /// Seconds until dash is ready (0 when ready)
    pub dash_cooldown: f32,
    pub rapid_fire: f32,
    pub slow_mo: f32,
    pub shield: bool,
    pub wave_transition: f32,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let t = &state.timers;
        Self {
            score: state.score,
            high_score: state.high_score,
            ammo: state.ammo,
            nukes: state.nukes,
            wave: state.wave,
            health: state.player.health,
            max_health: state.player.max_health,
            survival_time: state.survival_time,
            combo: state.combo,
            combo_multiplier: state.combo_multiplier(),
            dash_cooldown: t.dash_cooldown.remaining().max(0.0),
            rapid_fire: t.rapid_fire.remaining().max(0.0),
            slow_mo: t.slow_mo.remaining().max(0.0),
            shield: state.player.shield,
            wave_transition: t.wave_transition.remaining().max(0.0),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderView<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub ammo_pickups: &'a [AmmoPickup],
    pub powerups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub trails: &'a [Trail],
    /// Camera offset from screen shake
    pub shake_offset: Vec2,
    pub hud: Hud,
}

impl<'a> RenderView<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            phase: state.phase,
            player: &state.player,
            bullets: state.bullets.as_slice(),
            enemies: state.enemies.as_slice(),
            ammo_pickups: state.ammo_pickups.as_slice(),
            powerups: state.powerups.as_slice(),
            particles: state.particles.as_slice(),
            trails: state.trails.as_slice(),
            shake_offset: state.shake.offset,
            hud: Hud::from_state(state),
        }
    }
}
