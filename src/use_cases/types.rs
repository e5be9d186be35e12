// Use-case level inputs/outputs for the session loop.

use crate::domain::{AimPosition, EngineState, SessionStats, ShotMarker, Target};

/// Which producer pulled the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotSource {
    /// Pointer click or tap on this device.
    Local,
    /// Trigger pushed over the external channel.
    External,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Aim { x: f32, y: f32 },
    Shoot { source: ShotSource },
    Resize { width: f32, height: f32 },
}

/// Emitted once per target hit; the trigger channel relays it upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitNotice {
    pub points: u32,
}

/// Read-only view of the engine handed to the draw callback each frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub now: f64,
    pub targets: Vec<Target>,
    pub aim: AimPosition,
    pub stats: SessionStats,
    pub marker: Option<ShotMarker>,
}

impl FrameSnapshot {
    pub fn capture(engine: &EngineState, frame: u64, now: f64) -> Self {
        Self {
            frame,
            now,
            targets: engine.targets().to_vec(),
            aim: engine.aim(),
            stats: engine.stats(),
            marker: engine.marker(),
        }
    }
}
