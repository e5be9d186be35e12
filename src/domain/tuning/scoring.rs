/// Hit testing and scoring rules.

#[derive(Debug, Clone, Copy)]
pub struct ScoringTuning {
    /// Extra reach added to a target's radius so imprecise aim still connects.
    pub hit_tolerance: f32,

    /// Points awarded per target hit.
    pub points_per_hit: u32,

    /// Shot marker opacity lost per second.
    pub marker_fade_per_second: f32,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            hit_tolerance: 25.0,
            points_per_hit: 10,
            marker_fade_per_second: 1.2,
        }
    }
}
