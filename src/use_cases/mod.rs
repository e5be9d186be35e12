// Use cases layer: session orchestration and score workflows.

pub mod render_loop;
pub mod scores;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use render_loop::{CancelToken, FrameClock, FrameTime};
pub use scores::{
    LeaderboardRow, LeaderboardView, LoadLeaderboardUseCase, SaveOutcome, SaveScoreUseCase,
};
pub use session::{Session, SessionClosed, SessionInput, SessionSettings};
pub use types::{FrameSnapshot, HitNotice, SessionCommand, ShotSource};
