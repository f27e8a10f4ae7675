//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - Stable iteration order (pool insertion order)
//! - No rendering or platform dependencies

pub mod abilities;
pub mod combat;
pub mod movement;
pub mod pool;
pub mod shake;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use pool::{Mortal, Pool};
pub use shake::ScreenShake;
pub use snapshot::{Hud, RenderView};
pub use state::{
    AmmoPickup, Bullet, Enemy, EnemyKind, FeedbackConfig, GameEvent, GamePhase, GameState,
    Particle, Player, PowerUp, PowerUpKind, Trail,
};
pub use tick::{TickInput, tick};
pub use timers::{Accumulator, Countdown, Timers};
