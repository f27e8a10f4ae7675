//! Geometry Shooter - simulation core of a top-down wave shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, combat, abilities, waves)
//! - `session`: Fixed-timestep host driver (RNG ownership, high-score persistence)
//! - `highscores`: High-score storage
//! - `settings`: Player-facing configuration
//! - `autopilot`: Scripted input for demo runs

pub mod autopilot;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{FileStore, HighScoreStore, MemoryStore, StoreError};
pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Distances are arena units, speeds are units per tick and durations are
/// seconds of simulated time.
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the host will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    pub const ARENA_CENTER: Vec2 = Vec2::new(400.0, 300.0);
    /// Player is kept this far from every arena edge
    pub const PLAYER_MARGIN: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_START: Vec2 = Vec2::new(400.0, 300.0);
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 4.5;
    pub const PLAYER_MAX_HEALTH: u8 = 3;

    /// Weapons
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 12.0;
    pub const FIRE_COOLDOWN: f32 = 0.15;
    pub const RAPID_FIRE_COOLDOWN: f32 = 0.08;
    pub const STARTING_AMMO: u32 = 50;

    /// Pickups
    pub const AMMO_PICKUP_RADIUS: f32 = 15.0;
    pub const AMMO_PICKUP_AMOUNT: u32 = 25;
    pub const AMMO_SPAWN_INTERVAL: f32 = 8.0;
    pub const POWERUP_RADIUS: f32 = 18.0;
    pub const POWERUP_SPAWN_INTERVAL: f32 = 20.0;
    /// Pickup spawn rectangle (min inclusive, max exclusive)
    pub const PICKUP_SPAWN_MIN: Vec2 = Vec2::new(50.0, 50.0);
    pub const PICKUP_SPAWN_MAX: Vec2 = Vec2::new(750.0, 550.0);

    /// Enemy spawning
    pub const ENEMY_SAFE_DISTANCE: f32 = 200.0;
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;
    pub const SPAWN_RING_X: (f32, f32) = (350.0, 500.0);
    pub const SPAWN_RING_Y: (f32, f32) = (250.0, 400.0);

    /// Scoring
    pub const KILL_SCORE: u64 = 10;
    /// Kills per combo multiplier step
    pub const COMBO_STEP: u32 = 5;
    pub const COMBO_WINDOW: f32 = 3.0;

    /// Abilities
    pub const DASH_DISTANCE: f32 = 80.0;
    pub const DASH_COOLDOWN: f32 = 1.5;
    pub const RAPID_FIRE_DURATION: f32 = 10.0;
    pub const SLOW_MO_DURATION: f32 = 8.0;
    pub const SLOW_MO_FACTOR: f32 = 0.3;

    /// Waves
    pub const FIRST_WAVE_QUOTA: u32 = 5;
    pub const WAVE_AMMO_BONUS: u32 = 20;
    pub const WAVE_TRANSITION_DURATION: f32 = 3.0;
}

/// Clamp a position to the rectangle the player may occupy
#[inline]
pub fn clamp_to_play_area(pos: Vec2) -> Vec2 {
    use consts::*;
    pos.clamp(
        Vec2::splat(PLAYER_MARGIN),
        Vec2::new(ARENA_WIDTH - PLAYER_MARGIN, ARENA_HEIGHT - PLAYER_MARGIN),
    )
}

/// Whether a point lies inside the full arena (edges inclusive)
#[inline]
pub fn in_arena(pos: Vec2) -> bool {
    use consts::*;
    (0.0..=ARENA_WIDTH).contains(&pos.x) && (0.0..=ARENA_HEIGHT).contains(&pos.y)
}

/// Point on an axis-aligned ellipse around `center`
#[inline]
pub fn ellipse_point(center: Vec2, radius_x: f32, radius_y: f32, theta: f32) -> Vec2 {
    center + Vec2::new(radius_x * theta.cos(), radius_y * theta.sin())
}

/// Unit vector along `dir`, or zero for a zero-length input
#[inline]
pub fn direction(dir: Vec2) -> Vec2 {
    dir.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_play_area() {
        assert_eq!(clamp_to_play_area(Vec2::new(-50.0, 900.0)), Vec2::new(20.0, 580.0));
        assert_eq!(clamp_to_play_area(Vec2::new(400.0, 300.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_in_arena() {
        assert!(in_arena(Vec2::new(0.0, 600.0)));
        assert!(!in_arena(Vec2::new(-0.1, 300.0)));
        assert!(!in_arena(Vec2::new(400.0, 600.5)));
    }

    #[test]
    fn test_direction_zero_is_zero() {
        assert_eq!(direction(Vec2::ZERO), Vec2::ZERO);
        let d = direction(Vec2::new(3.0, 4.0));
        assert!((d.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ellipse_point() {
        let p = ellipse_point(Vec2::new(400.0, 300.0), 350.0, 250.0, 0.0);
        assert!((p - Vec2::new(750.0, 300.0)).length() < 1e-4);
        let p = ellipse_point(Vec2::new(400.0, 300.0), 350.0, 250.0, std::f32::consts::FRAC_PI_2);
        assert!((p - Vec2::new(400.0, 550.0)).length() < 1e-3);
    }
}
