use crate::domain::state::{Playfield, Target};

#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    pub field: Playfield,
    pub wrap_margin: f32,
    pub bob_amplitude: f32, // units per frame
    pub bob_frequency: f32, // rad/s of session time
}

/// Applies one frame of motion to a target.
///
/// The vertical bob is a function of session time `now` (seconds), not of the
/// frame count, so its phase is the same at any frame rate. It is a cosmetic
/// wobble, not integrated physics.
pub fn tick_target(t: &mut Target, now: f64, cfg: MovementConfig) {
    let bob = cfg.bob_amplitude * (now * f64::from(cfg.bob_frequency)).sin() as f32;

    t.x += t.vx;
    t.y += t.vy + bob;

    confine_target(t, cfg);
}

/// Wraps a target that left the right edge and clamps it vertically.
pub fn confine_target(t: &mut Target, cfg: MovementConfig) {
    if !t.x.is_finite() || t.x > cfg.field.width + cfg.wrap_margin {
        t.x = -cfg.wrap_margin;
    } else if t.x < -cfg.wrap_margin {
        t.x = -cfg.wrap_margin;
    }

    if !t.y.is_finite() {
        t.y = cfg.field.height / 2.0;
    }
    t.y = t.y.clamp(0.0, cfg.field.height);
}
