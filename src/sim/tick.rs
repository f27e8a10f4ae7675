//! Fixed timestep simulation tick
//!
//! Runs the progression state machine and, while playing, the systems in a
//! fixed order: timers, firing, movement, spawning, combat, compaction and
//! decorative decay.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState};
use super::{abilities, combat, movement, spawn};
use crate::consts::*;

/// Input commands for a single tick
///
/// Direction flags are independent: opposing keys cancel and diagonals are
/// normalized after combining. The pointer is in arena coordinates (y up).
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Aim target
    pub pointer: Vec2,
    /// Trigger held
    pub fire: bool,
    pub dash: bool,
    pub nuke: bool,
    /// Pause/resume toggle
    pub pause: bool,
    /// Start a new run (from the menu, mid-run or after game over)
    pub restart: bool,
    /// Return to the menu from game over
    pub menu: bool,
    pub quit: bool,
}

impl TickInput {
    /// Raw combined direction, not normalized
    pub fn intent(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y += 1.0;
        }
        if self.down {
            dir.y -= 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }

    /// Clear one-shot actions after they have been consumed by a tick
    pub fn clear_actions(&mut self) {
        self.dash = false;
        self.nuke = false;
        self.pause = false;
        self.restart = false;
        self.menu = false;
        self.quit = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    state.events.clear();

    handle_actions(state, input, rng);

    // Shake keeps settling on every screen
    state.shake.decay(rng);

    match state.phase {
        GamePhase::Menu | GamePhase::Paused | GamePhase::GameOver => {}
        GamePhase::WaveTransition => {
            state.timers.wave_transition.tick(SIM_DT);
            if !state.timers.wave_transition.is_running() {
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::Playing => step_playing(state, input, rng),
    }
}

/// Discrete input events, interpreted against the phase at the start of the tick
fn handle_actions<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    if input.quit {
        state.emit(GameEvent::QuitRequested);
    }

    match state.phase {
        GamePhase::Menu => {
            if input.restart {
                state.reset_run();
            }
        }
        GamePhase::Playing => {
            if input.restart {
                state.reset_run();
                return;
            }
            if input.nuke {
                abilities::nuke(state, rng);
            }
            if input.pause {
                state.phase = GamePhase::Paused;
                return;
            }
            if input.dash {
                abilities::dash(state, input, rng);
            }
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::GameOver => {
            if input.restart {
                state.reset_run();
            } else if input.menu {
                state.phase = GamePhase::Menu;
                state.emit(GameEvent::ReturnedToMenu);
            }
        }
        GamePhase::WaveTransition => {}
    }
}

fn step_playing<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    state.time_ticks += 1;
    state.survival_time += SIM_DT;
    state.timers.tick(SIM_DT);
    combat::decay_combo(state, SIM_DT);

    abilities::fire(state, input);

    movement::move_player(state, input);
    movement::move_bullets(state);

    spawn::spawn_enemies(state, rng);
    if spawn::wave_cleared(state) {
        spawn::start_next_wave(state);
    }

    movement::steer_enemies(state);
    movement::spin_pickups(state);

    spawn::spawn_ammo(state, rng);
    combat::collect_ammo(state, rng);
    spawn::spawn_powerup(state, rng);
    combat::collect_powerups(state, rng);

    combat::resolve_bullet_hits(state, rng);
    combat::resolve_enemy_contacts(state, rng);

    state.reap_combat_pools();

    movement::decay_trails(state);
    movement::decay_particles(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Enemy, EnemyKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_menu_to_playing() {
        let mut rng = rng();
        let mut state = GameState::new(0);

        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &press(|i| i.restart = true), &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
        assert!(state.events.contains(&GameEvent::GameStarted));
    }

    #[test]
    fn test_restart_keeps_quit_from_game_over() {
        let mut rng = rng();
        let mut state = GameState::new_run(0);
        state.phase = GamePhase::GameOver;
        let input = press(|i| {
            i.quit = true;
            i.restart = true;
        });
        tick(&mut state, &input, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(
            state.events[..2],
            [GameEvent::QuitRequested, GameEvent::GameStarted]
        );
    }

    #[test]
    fn test_tick_pause() {
        let mut rng = rng();
        let mut state = GameState::new_run(0);
        state.enemies.spawn(Enemy::new(EnemyKind::Normal, Vec2::new(100.0, 100.0), 1));

        let pause = press(|i| i.pause = true);
        tick(&mut state, &pause, &mut rng);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.enemies.as_slice()[0].pos;

        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.enemies.as_slice()[0].pos, frozen);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &pause, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_ne!(state.enemies.as_slice()[0].pos, frozen);
    }

    #[test]
    fn test_paused_still_settles_shake() {
        let mut rng = rng();
        let mut state = GameState::new_run(0);
        state.phase = GamePhase::Paused;
        state.add_shake(10.0);
        tick(&mut state, &TickInput::default(), &mut rng);
        assert!((state.shake.intensity - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_wave_advance() {
        let mut rng = rng();
        let mut state = GameState::new_run(0);
        state.enemies_left_in_wave = 0;
        let ammo = state.ammo;

        tick(&mut state, &TickInput::default(), &mut rng);

        assert_eq!(state.wave, 2);
        assert_eq!(state.enemies_left_in_wave, 9);
        assert_eq!(state.ammo, ammo + 20);
        assert_eq!(state.phase, GamePhase::WaveTransition);
        assert_eq!(state.nukes, 0);
    }

    #[test]
    fn test_wave_transition_freezes_then_resumes() {
        let mut rng = rng();
        let mut state = GameState::new_run(0);
        state.enemies_left_in_wave = 0;
        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.phase, GamePhase::WaveTransition);

        let ticks = state.time_ticks;
        let moving = press(|i| i.right = true);
        let start = state.player.pos;
        let mut transition_ticks = 0;
        while state.phase == GamePhase::WaveTransition {
            tick(&mut state, &moving, &mut rng);
            transition_ticks += 1;
            assert!(transition_ticks < 1000);
        }
        assert!((179..=182).contains(&transition_ticks));
        assert_eq!(state.player.pos, start);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_no_dead_entities_survive_a_tick() {
        let mut rng = rng();
        let mut state = GameState::new_run(0);
        let at = Vec2::new(200.0, 200.0);
        state.enemies.spawn(Enemy::new(EnemyKind::Normal, at, 1));
        state.bullets.spawn(Bullet::new(at, Vec2::ZERO));
        state.bullets.spawn(Bullet::new(Vec2::new(799.0, 300.0), Vec2::new(12.0, 0.0)));

        tick(&mut state, &TickInput::default(), &mut rng);

        assert!(state.bullets.iter().all(|b| b.alive));
        assert!(state.enemies.iter().all(|e| e.alive));
        assert!(state.particles.iter().all(|p| p.alive));
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_nuke_action_completes_wave() {
        let mut rng = rng();
        let mut state = GameState::new_run(0);
        state.nukes = 1;
        for x in [100.0, 150.0, 700.0] {
            state.enemies.spawn(Enemy::new(EnemyKind::Normal, Vec2::new(x, 80.0), 1));
        }

        tick(&mut state, &press(|i| i.nuke = true), &mut rng);

        assert_eq!(state.nukes, 0);
        assert_eq!(state.score, 30);
        assert_eq!(state.wave, 2);
        assert_eq!(state.phase, GamePhase::WaveTransition);
    }

    #[test]
    fn test_game_over_and_menu() {
        let mut rng = rng();
        let mut state = GameState::new_run(0);
        state.player.health = 1;
        state.score = 40;
        state.enemies.spawn(Enemy::new(EnemyKind::Normal, state.player.pos, 1));

        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.player.alive);
        assert_eq!(state.high_score, 40);

        // game over ignores gameplay actions
        tick(&mut state, &press(|i| i.nuke = true), &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &press(|i| i.menu = true), &mut rng);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &press(|i| i.restart = true), &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 40);
    }

    #[test]
    fn test_firing_over_ticks_respects_cooldown() {
        let mut rng = rng();
        let mut state = GameState::new_run(0);
        let input = press(|i| {
            i.fire = true;
            i.pointer = Vec2::new(400.0, 600.0);
        });
        for _ in 0..60 {
            tick(&mut state, &input, &mut rng);
        }
        // 0.15s cooldown at 60 Hz allows a shot every 10 ticks
        let fired = STARTING_AMMO - state.ammo;
        assert!((6..=7).contains(&fired), "fired {fired}");
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);
        let mut state1 = GameState::new_run(0);
        let mut state2 = GameState::new_run(0);

        let inputs = [
            press(|i| i.up = true),
            press(|i| {
                i.fire = true;
                i.pointer = Vec2::new(700.0, 100.0);
            }),
            press(|i| i.left = true),
            TickInput::default(),
        ];

        for n in 0..1200 {
            let input = &inputs[n % inputs.len()];
            tick(&mut state1, input, &mut rng1);
            tick(&mut state2, input, &mut rng2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}
