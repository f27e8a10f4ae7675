//! Host-side driver
//!
//! Owns the simulation state, the seeded RNG and the high-score store, runs
//! fixed-size ticks from variable frame times, and persists new high scores.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, RenderView, TickInput, tick};

/// One running game
pub struct Session<S: HighScoreStore> {
    state: GameState,
    rng: Pcg32,
    store: S,
    seed: u64,
    accumulator: f32,
    quit_requested: bool,
}

impl<S: HighScoreStore> Session<S> {
    /// Load the high score (0 on any failure) and open on the menu
    pub fn new(settings: &Settings, mut store: S) -> Self {
        let high_score = store.load().unwrap_or_else(|e| {
            log::warn!("Could not load high score, starting from 0: {}", e);
            0
        });
        let seed = settings.seed.unwrap_or_else(time_seed);
        log::info!("Session seed: {}", seed);

        let mut state = GameState::new(high_score);
        state.feedback = settings.feedback();

        Self {
            state,
            rng: Pcg32::seed_from_u64(seed),
            store,
            seed,
            accumulator: 0.0,
            quit_requested: false,
        }
    }

    /// Run exactly one tick and react to its events
    pub fn step(&mut self, input: &TickInput) -> &[GameEvent] {
        tick(&mut self.state, input, &mut self.rng);

        for event in &self.state.events {
            match event {
                GameEvent::NewHighScore(score) => {
                    if let Err(e) = self.store.save(*score) {
                        log::warn!("Could not save high score {}: {}", score, e);
                    }
                }
                GameEvent::QuitRequested => self.quit_requested = true,
                _ => {}
            }
        }
        &self.state.events
    }

    /// Feed wall-clock frame time and run as many fixed ticks as it covers.
    /// One-shot actions in `input` are cleared once a tick has consumed them.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, frame_dt: f32, input: &mut TickInput) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(input);
            input.clear_actions();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    pub fn view(&self) -> RenderView<'_> {
        RenderView::new(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for embedders and scenario tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::{MemoryStore, StoreError};
    use crate::sim::{Enemy, EnemyKind, GamePhase};

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&mut self) -> Result<u64, StoreError> {
            Err(std::io::Error::other("disk gone").into())
        }

        fn save(&mut self, _score: u64) -> Result<(), StoreError> {
            Err(std::io::Error::other("disk gone").into())
        }
    }

    fn seeded() -> Settings {
        Settings {
            seed: Some(5),
            ..Default::default()
        }
    }

    #[test]
    fn test_failed_load_defaults_to_zero() {
        let session = Session::new(&seeded(), BrokenStore);
        assert_eq!(session.state().high_score, 0);
        assert_eq!(session.state().phase, GamePhase::Menu);
    }

    #[test]
    fn test_high_score_saved_once_on_game_over() {
        let mut session = Session::new(&seeded(), MemoryStore::new(30));
        session.step(&TickInput {
            restart: true,
            ..Default::default()
        });

        let state = session.state_mut();
        state.score = 50;
        state.player.health = 1;
        let pos = state.player.pos;
        state.enemies.spawn(Enemy::new(EnemyKind::Normal, pos, 1));

        session.step(&TickInput::default());
        assert_eq!(session.state().phase, GamePhase::GameOver);

        for _ in 0..10 {
            session.step(&TickInput::default());
        }
        assert_eq!(session.store().saves, 1);
        assert_eq!(session.store().high_score, 50);
    }

    #[test]
    fn test_no_save_when_score_not_beaten() {
        let mut session = Session::new(&seeded(), MemoryStore::new(500));
        session.step(&TickInput {
            restart: true,
            ..Default::default()
        });
        let state = session.state_mut();
        state.score = 50;
        state.player.health = 1;
        let pos = state.player.pos;
        state.enemies.spawn(Enemy::new(EnemyKind::Normal, pos, 1));

        session.step(&TickInput::default());
        assert_eq!(session.state().phase, GamePhase::GameOver);
        assert_eq!(session.store().saves, 0);
    }

    #[test]
    fn test_failed_save_is_silent() {
        let mut session = Session::new(&seeded(), BrokenStore);
        session.step(&TickInput {
            restart: true,
            ..Default::default()
        });
        let state = session.state_mut();
        state.score = 10;
        state.player.health = 1;
        let pos = state.player.pos;
        state.enemies.spawn(Enemy::new(EnemyKind::Normal, pos, 1));
        session.step(&TickInput::default());
        assert_eq!(session.state().phase, GamePhase::GameOver);
        assert_eq!(session.state().high_score, 10);
    }

    #[test]
    fn test_advance_runs_fixed_substeps_and_clears_actions() {
        let mut session = Session::new(&seeded(), MemoryStore::default());
        let mut input = TickInput {
            restart: true,
            fire: true,
            ..Default::default()
        };
        // a huge hitch is clamped and capped
        let ran = session.advance(5.0, &mut input);
        assert!((5..=6).contains(&ran), "ran {ran}");
        assert!(!input.restart);
        assert!(input.fire);
        assert_eq!(session.state().phase, GamePhase::Playing);

        let ran = session.advance(SIM_DT * 0.5, &mut input);
        assert!(ran <= 1);
    }

    #[test]
    fn test_quit_request() {
        let mut session = Session::new(&seeded(), MemoryStore::default());
        assert!(!session.quit_requested());
        session.step(&TickInput {
            quit: true,
            ..Default::default()
        });
        assert!(session.quit_requested());
    }

    #[test]
    fn test_quit_survives_restart_in_same_tick() {
        let mut session = Session::new(&seeded(), MemoryStore::default());
        let events = session
            .step(&TickInput {
                quit: true,
                restart: true,
                ..Default::default()
            })
            .to_vec();
        assert!(events.contains(&GameEvent::QuitRequested));
        assert!(events.contains(&GameEvent::GameStarted));
        assert_eq!(session.state().phase, GamePhase::Playing);
        assert!(session.quit_requested());
    }
}
