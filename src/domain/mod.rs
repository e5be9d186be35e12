// Domain layer: target simulation, hit resolution and scoring rules.

pub mod engine;
pub mod ports;
pub mod state;
pub mod systems;
pub mod tuning;

pub use engine::{EngineSettings, EngineState, Replacement, ShotResult};
pub use state::{AimPosition, LeaderboardEntry, Playfield, SessionStats, ShotMarker, Target};
