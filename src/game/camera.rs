//! Camera shake
//!
//! Shake is a single scalar that decays linearly with real time. The render
//! offset is a random direction scaled by the current shake, re-rolled every
//! frame.

use macroquad::math::Vec2;
use rand::Rng;

use crate::config::CameraTuning;

#[derive(Debug, Clone)]
pub struct CameraRig {
    shake: f32,
    decay: f32,
    max_shake: f32,
    offset_scale: f32,
}

impl CameraRig {
    pub fn new(settings: &CameraTuning) -> Self {
        Self {
            shake: 0.0,
            decay: settings.shake_decay,
            max_shake: settings.max_shake,
            offset_scale: settings.offset_scale,
        }
    }

    pub fn shake(&self) -> f32 {
        self.shake
    }

    /// Add shake, capped at the configured maximum.
    pub fn add_shake(&mut self, amount: f32) {
        self.shake = (self.shake + amount).min(self.max_shake);
    }

    /// Decay shake by one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.shake = (self.shake - self.decay * dt).max(0.0);
    }

    /// Render offset for this frame.
    pub fn offset<R: Rng>(&self, rng: &mut R) -> Vec2 {
        if self.shake <= 0.0 {
            return Vec2::ZERO;
        }
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        Vec2::new(angle.cos(), angle.sin()) * self.shake * self.offset_scale
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(&CameraTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shake_caps_at_max() {
        let mut cam = CameraRig::default();
        cam.add_shake(1.5);
        cam.add_shake(1.5);
        assert_eq!(cam.shake(), 2.0);
    }

    #[test]
    fn test_shake_decays_linearly_to_zero() {
        let mut cam = CameraRig::default();
        cam.add_shake(1.0);
        cam.update(0.1);
        assert_relative_eq!(cam.shake(), 0.5, epsilon = 1e-6);
        cam.update(1.0);
        assert_eq!(cam.shake(), 0.0);
    }

    #[test]
    fn test_offset_zero_without_shake() {
        let cam = CameraRig::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(cam.offset(&mut rng), Vec2::ZERO);
    }

    #[test]
    fn test_offset_length_follows_shake() {
        let mut cam = CameraRig::default();
        cam.add_shake(0.5);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            assert_relative_eq!(cam.offset(&mut rng).length(), 5.0, epsilon = 1e-4);
        }
    }
}
