// Domain-level session entities and snapshot types.

/// Visible play area. Targets live in `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> AimPosition {
        AimPosition {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Target {
    /// Hit-test radius before tolerance is applied.
    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimPosition {
    pub x: f32,
    pub y: f32,
}

/// Per-session counters. Only ever grow within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub points: u32,
    pub shots: u32,
    pub hits: u32,
}

impl SessionStats {
    /// Hit ratio as a percentage; zero before the first shot.
    pub fn accuracy_percent(&self) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        f64::from(self.hits) / f64::from(self.shots) * 100.0
    }
}

/// Fading indicator left where the last shot landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotMarker {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

/// Ranked row read from the external score store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub username: String,
    pub points: u32,
    pub hits: u32,
}
