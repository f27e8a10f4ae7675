//! Timer bank: cooldowns, buff durations and spawn accumulators

use serde::{Deserialize, Serialize};

/// Countdown in seconds. Considered running while strictly positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown(f32);

impl Countdown {
    pub fn set(&mut self, secs: f32) {
        self.0 = secs;
    }

    pub fn is_running(&self) -> bool {
        self.0 > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.0
    }

    /// Decrement by `dt` if running. May overshoot below zero.
    pub fn tick(&mut self, dt: f32) {
        if self.0 > 0.0 {
            self.0 -= dt;
        }
    }
}

/// Elapsed-time accumulator that fires once it exceeds a period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Accumulator(f32);

impl Accumulator {
    /// Add `dt`; returns true (and resets) once the total exceeds `period`
    pub fn advance(&mut self, dt: f32, period: f32) -> bool {
        self.0 += dt;
        if self.0 > period {
            self.0 = 0.0;
            true
        } else {
            false
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.0
    }
}

/// Every timer the simulation decrements once per playing tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    pub fire_cooldown: Countdown,
    pub dash_cooldown: Countdown,
    pub rapid_fire: Countdown,
    pub slow_mo: Countdown,
    /// Combo expiry; decayed by the combat resolver, not by [`Timers::tick`]
    pub combo: Countdown,
    pub wave_transition: Countdown,
    pub enemy_spawn: Accumulator,
    pub ammo_spawn: Accumulator,
    pub powerup_spawn: Accumulator,
}

impl Timers {
    /// Count down cooldowns and buffs
    pub fn tick(&mut self, dt: f32) {
        self.fire_cooldown.tick(dt);
        self.dash_cooldown.tick(dt);
        self.rapid_fire.tick(dt);
        self.slow_mo.tick(dt);
    }
}
