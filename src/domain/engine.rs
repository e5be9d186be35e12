// Owns the live targets, the aim point and the session counters. No I/O.

use crate::domain::state::{AimPosition, Playfield, SessionStats, ShotMarker, Target};
use crate::domain::systems::collision;
use crate::domain::systems::movement::{self, MovementConfig};
use crate::domain::tuning::{ScoringTuning, TargetTuning};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

/// Configuration for starting a new engine.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub target_count: usize,
    pub field: Playfield,
    pub target: TargetTuning,
    pub scoring: ScoringTuning,
    /// RNG seed for reproducible spawns. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl EngineSettings {
    pub fn new(target_count: usize, field: Playfield) -> Self {
        Self {
            target_count,
            field,
            target: TargetTuning::default(),
            scoring: ScoringTuning::default(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A slot whose target was destroyed by a hit and respawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replacement {
    pub slot: usize,
    pub old_id: u64,
    pub new_id: u64,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShotResult {
    pub aim: AimPosition,
    pub replaced: Vec<Replacement>,
    pub points_awarded: u32,
}

impl ShotResult {
    pub fn is_hit(&self) -> bool {
        !self.replaced.is_empty()
    }
}

pub struct EngineState {
    targets: Vec<Target>,
    aim: AimPosition,
    stats: SessionStats,
    field: Playfield,
    marker: Option<ShotMarker>,
    next_target_id: u64,
    rng: ChaCha8Rng,
    target_tuning: TargetTuning,
    scoring: ScoringTuning,
}

impl EngineState {
    /// Populates `target_count` targets at random positions inside `field`.
    pub fn init(target_count: usize, field: Playfield) -> Self {
        Self::with_settings(EngineSettings::new(target_count, field))
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut engine = Self {
            targets: Vec::with_capacity(settings.target_count),
            aim: settings.field.center(),
            stats: SessionStats::default(),
            field: settings.field,
            marker: None,
            next_target_id: 1,
            rng,
            target_tuning: settings.target,
            scoring: settings.scoring,
        };

        for _ in 0..settings.target_count {
            let target = engine.spawn_target();
            engine.targets.push(target);
        }
        engine
    }

    /// Moves every target one frame and fades the shot marker by `dt`.
    ///
    /// `now` is session time in seconds and should strictly increase between calls.
    pub fn advance(&mut self, dt: Duration, now: f64) {
        let cfg = self.movement_config();
        for t in &mut self.targets {
            movement::tick_target(t, now, cfg);
        }

        if let Some(marker) = &mut self.marker {
            marker.opacity -= self.scoring.marker_fade_per_second * dt.as_secs_f32();
            if marker.opacity <= 0.0 {
                self.marker = None;
            }
        }
    }

    /// Last writer wins; no history is kept.
    pub fn set_aim(&mut self, x: f32, y: f32) {
        self.aim = AimPosition { x, y };
    }

    /// Counts a shot, resolves it against the current aim and respawns every target hit.
    pub fn apply_shot(&mut self) -> ShotResult {
        self.stats.shots += 1;

        let aim = self.aim;
        self.marker = Some(ShotMarker {
            x: aim.x,
            y: aim.y,
            opacity: 1.0,
        });

        let resolution = collision::resolve(aim, &self.targets, self.scoring.hit_tolerance);

        let mut replaced = Vec::with_capacity(resolution.hits.len());
        let mut points_awarded = 0;
        for hit in &resolution.hits {
            let fresh = self.spawn_target();
            let new_id = fresh.id;
            self.targets[hit.slot] = fresh;

            self.stats.hits += 1;
            self.stats.points += self.scoring.points_per_hit;
            points_awarded += self.scoring.points_per_hit;

            replaced.push(Replacement {
                slot: hit.slot,
                old_id: hit.id,
                new_id,
                points: self.scoring.points_per_hit,
            });
        }

        ShotResult {
            aim,
            replaced,
            points_awarded,
        }
    }

    /// Replaces the playfield and pulls live targets back inside it.
    pub fn resize(&mut self, field: Playfield) {
        self.field = field;
        let cfg = self.movement_config();
        for t in &mut self.targets {
            movement::confine_target(t, cfg);
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn aim(&self) -> AimPosition {
        self.aim
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn field(&self) -> Playfield {
        self.field
    }

    pub fn marker(&self) -> Option<ShotMarker> {
        self.marker
    }

    pub fn wrap_margin(&self) -> f32 {
        self.target_tuning.wrap_margin
    }

    fn movement_config(&self) -> MovementConfig {
        MovementConfig {
            field: self.field,
            wrap_margin: self.target_tuning.wrap_margin,
            bob_amplitude: self.target_tuning.bob_amplitude,
            bob_frequency: self.target_tuning.bob_frequency,
        }
    }

    fn spawn_target(&mut self) -> Target {
        let size = self.target_tuning.size;
        let half = size / 2.0;
        let x = self.uniform(half, self.field.width - half);
        let y = self.uniform(half, self.field.height - half);
        let vx = self.uniform_exclusive(self.target_tuning.min_speed, self.target_tuning.max_speed);

        let id = self.next_target_id;
        self.next_target_id += 1;

        Target {
            id,
            x,
            y,
            width: size,
            height: size,
            vx,
            vy: 0.0,
        }
    }

    // Fields narrower than a target collapse the range to its midpoint.
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo {
            self.rng.gen_range(lo..=hi)
        } else {
            (lo + hi) / 2.0
        }
    }

    fn uniform_exclusive(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo { self.rng.gen_range(lo..hi) } else { lo }
    }
}
