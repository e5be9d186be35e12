/// Gameplay tuning for moving targets.
///
/// Keep this separate from runtime configuration (frame rate, channel sizes, etc.).

#[derive(Debug, Clone, Copy)]
pub struct TargetTuning {
    /// Visual width and height of a target in field units.
    pub size: f32,

    /// Lower bound of the horizontal spawn speed, in units per frame.
    pub min_speed: f32,

    /// Exclusive upper bound of the horizontal spawn speed, in units per frame.
    pub max_speed: f32,

    /// Distance past the right edge at which a target wraps, and the x it re-enters at (negated).
    pub wrap_margin: f32,

    /// Vertical displacement per frame at the oscillation peak.
    pub bob_amplitude: f32,

    /// Oscillation phase speed in radians per second of session time.
    pub bob_frequency: f32,
}

impl Default for TargetTuning {
    fn default() -> Self {
        Self {
            size: 40.0,
            min_speed: 0.5,
            max_speed: 2.5,
            wrap_margin: 50.0,
            bob_amplitude: 0.5,
            bob_frequency: 10.0,
        }
    }
}
