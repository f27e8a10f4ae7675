//! Screen shake: decaying random offset for the presentation layer

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fraction of intensity kept each tick
const SHAKE_DECAY: f32 = 0.9;
/// Below this the shake snaps to rest
const SHAKE_CUTOFF: f32 = 0.1;

/// Shake strengths for combat events
pub const SHAKE_KILL: f32 = 3.0;
pub const SHAKE_DASH: f32 = 5.0;
pub const SHAKE_SHIELD_BREAK: f32 = 8.0;
pub const SHAKE_PLAYER_HIT: f32 = 15.0;
pub const SHAKE_NUKE: f32 = 20.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    pub intensity: f32,
    pub offset: Vec2,
}

impl ScreenShake {
    /// Replace the current intensity. The newest impact wins.
    pub fn trigger(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    /// Roll a new offset from the current intensity, then decay it
    pub fn decay<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.intensity <= 0.0 {
            return;
        }
        self.offset = Vec2::new(
            rng.random_range(-1.0f32..1.0) * self.intensity,
            rng.random_range(-1.0f32..1.0) * self.intensity,
        );
        self.intensity *= SHAKE_DECAY;
        if self.intensity < SHAKE_CUTOFF {
            *self = Self::default();
        }
    }

    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_shake_offset_bounded_by_intensity() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut shake = ScreenShake::default();
        shake.trigger(SHAKE_PLAYER_HIT);
        shake.decay(&mut rng);
        assert!(shake.offset.x.abs() <= SHAKE_PLAYER_HIT);
        assert!(shake.offset.y.abs() <= SHAKE_PLAYER_HIT);
        assert!((shake.intensity - SHAKE_PLAYER_HIT * 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_shake_settles_to_rest() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut shake = ScreenShake::default();
        shake.trigger(SHAKE_NUKE);
        for _ in 0..200 {
            shake.decay(&mut rng);
        }
        assert!(!shake.is_active());
        assert_eq!(shake.offset, Vec2::ZERO);
    }

    #[test]
    fn test_trigger_replaces_intensity() {
        let mut shake = ScreenShake::default();
        shake.trigger(SHAKE_NUKE);
        shake.trigger(SHAKE_KILL);
        assert_eq!(shake.intensity, SHAKE_KILL);
    }
}
