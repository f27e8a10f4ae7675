//! Game state and core simulation types
//!
//! One owned [`GameState`] aggregate holds every pool, counter and timer.
//! Systems receive it by `&mut` for the duration of their phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::{Mortal, Pool};
use super::shake::ScreenShake;
use super::timers::Timers;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulates
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen until resumed
    Paused,
    /// Player died, waiting for restart or menu
    GameOver,
    /// Rest between waves; only the transition timer runs
    WaveTransition,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
    pub health: u8,
    pub max_health: u8,
    pub shield: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: PLAYER_START,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            alive: true,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            shield: false,
        }
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BULLET_RADIUS,
            alive: true,
        }
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
}

impl EnemyKind {
    /// Chase speed in units per tick
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Normal => 2.0,
            EnemyKind::Fast => 2.8,
            EnemyKind::Tank => 1.2,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            EnemyKind::Normal => 12.0,
            EnemyKind::Fast => 10.0,
            EnemyKind::Tank => 15.0,
        }
    }
}

/// A chasing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
    pub health: u8,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, health: u8) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: kind.radius(),
            alive: true,
            health,
            kind,
        }
    }
}

/// Ammo crate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoPickup {
    pub pos: Vec2,
    pub radius: f32,
    pub alive: bool,
    /// Degrees, cosmetic
    pub rotation: f32,
}

impl AmmoPickup {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: AMMO_PICKUP_RADIUS,
            alive: true,
            rotation: 0.0,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Nuke,
    Shield,
    RapidFire,
    SlowMo,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Nuke,
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::SlowMo,
    ];
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub radius: f32,
    pub alive: bool,
    /// Degrees, cosmetic
    pub rotation: f32,
    /// Pulse phase, cosmetic
    pub pulse: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            pos,
            radius: POWERUP_RADIUS,
            alive: true,
            rotation: 0.0,
            pulse: 0.0,
            kind,
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
}

/// Fading afterimage behind the player and bullets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// Trails below this opacity are dropped
pub const TRAIL_MIN_ALPHA: f32 = 0.05;
/// Particles below this radius die
pub const PARTICLE_MIN_RADIUS: f32 = 0.3;

impl Mortal for Bullet {
    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Mortal for Enemy {
    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Mortal for AmmoPickup {
    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Mortal for PowerUp {
    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Mortal for Particle {
    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Mortal for Trail {
    fn is_alive(&self) -> bool {
        self.alpha >= TRAIL_MIN_ALPHA
    }
}

/// Notable things that happened during a tick, for audio/presentation hooks
/// and for the session to act on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    WaveStarted { wave: u32 },
    EnemyKilled { kind: EnemyKind, points: u64 },
    ShieldBroken,
    PlayerHit { health: u8 },
    AmmoCollected,
    PowerUpCollected(PowerUpKind),
    Dashed,
    NukeDetonated { kills: u32 },
    GameOver { score: u64, wave: u32 },
    NewHighScore(u64),
    ReturnedToMenu,
    QuitRequested,
}

/// Presentation feedback limits applied by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    pub screen_shake: bool,
    pub max_particles: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            screen_shake: true,
            max_particles: 1024,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    pub bullets: Pool<Bullet>,
    pub enemies: Pool<Enemy>,
    pub ammo_pickups: Pool<AmmoPickup>,
    pub powerups: Pool<PowerUp>,
    pub particles: Pool<Particle>,
    pub trails: Pool<Trail>,
    pub score: u64,
    /// Best score seen so far, seeded from persistence
    pub high_score: u64,
    pub ammo: u32,
    pub nukes: u32,
    /// Current wave (1-based)
    pub wave: u32,
    /// Enemies still to be spawned this wave
    pub enemies_left_in_wave: u32,
    /// Consecutive kills inside the combo window
    pub combo: u32,
    /// Seconds survived in the current run
    pub survival_time: f32,
    /// Playing ticks simulated in the current run
    pub time_ticks: u64,
    pub timers: Timers,
    pub shake: ScreenShake,
    pub feedback: FeedbackConfig,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state sitting on the menu
    pub fn new(high_score: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            player: Player::default(),
            bullets: Pool::new(),
            enemies: Pool::new(),
            ammo_pickups: Pool::new(),
            powerups: Pool::new(),
            particles: Pool::new(),
            trails: Pool::new(),
            score: 0,
            high_score,
            ammo: STARTING_AMMO,
            nukes: 0,
            wave: 1,
            enemies_left_in_wave: FIRST_WAVE_QUOTA,
            combo: 0,
            survival_time: 0.0,
            time_ticks: 0,
            timers: Timers::default(),
            shake: ScreenShake::default(),
            feedback: FeedbackConfig::default(),
            events: Vec::new(),
        }
    }

    /// Create a state already in the first wave
    pub fn new_run(high_score: u64) -> Self {
        let mut state = Self::new(high_score);
        state.phase = GamePhase::Playing;
        state
    }

    /// Start a fresh run, keeping the high score, feedback settings and any
    /// events already raised this tick
    pub fn reset_run(&mut self) {
        let high_score = self.high_score;
        let feedback = self.feedback;
        let events = std::mem::take(&mut self.events);
        *self = Self::new_run(high_score);
        self.feedback = feedback;
        self.events = events;
        log::info!("New run started (high score {})", high_score);
        self.emit(GameEvent::GameStarted);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Current score multiplier from the combo count
    pub fn combo_multiplier(&self) -> u64 {
        u64::from(self.combo / COMBO_STEP + 1)
    }

    /// Kick the screen shake, honoring feedback settings
    pub fn add_shake(&mut self, intensity: f32) {
        if self.feedback.screen_shake {
            self.shake.trigger(intensity);
        }
    }

    /// Compact the pools the combat phase kills entities in
    pub fn reap_combat_pools(&mut self) {
        self.bullets.reap();
        self.enemies.reap();
        self.ammo_pickups.reap();
        self.powerups.reap();
    }
}
