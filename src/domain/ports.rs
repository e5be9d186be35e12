use async_trait::async_trait;

use crate::domain::state::{LeaderboardEntry, SessionStats};

// Port for the shot sound. Stateless from the engine's point of view.
pub trait SoundEffect: Send + Sync {
    fn play_shot(&self);
}

// No-op sound for headless runs and tests that do not care.
pub struct Silent;

impl SoundEffect for Silent {
    fn play_shot(&self) {}
}

// Score payload submitted at the end of (or during) a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    pub username: String,
    pub stats: SessionStats,
}

// Port for the external score store. The use cases depend on this trait, not the
// concrete HTTP client.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn submit(
        &self,
        token: &str,
        submission: &ScoreSubmission,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn leaderboard(
        &self,
    ) -> Result<Vec<LeaderboardEntry>, Box<dyn std::error::Error + Send + Sync>>;
}
