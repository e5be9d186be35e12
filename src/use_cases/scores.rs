// Score submission and leaderboard workflows.
//
// Failures here are never fatal: they become a notice for the player and leave
// session and view state exactly as they were.

use crate::domain::ports::{ScoreStore, ScoreSubmission};
use crate::domain::{LeaderboardEntry, SessionStats};
use tracing::{info, warn};

/// Number of rows the leaderboard shows.
pub const LEADERBOARD_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// No bearer token available, nothing was sent.
    NotSignedIn,
    Failed(String),
}

impl SaveOutcome {
    /// One-shot message for the player.
    pub fn notice(&self) -> String {
        match self {
            SaveOutcome::Saved => "score saved".to_string(),
            SaveOutcome::NotSignedIn => "sign in to save your score".to_string(),
            SaveOutcome::Failed(reason) => format!("could not save score: {reason}"),
        }
    }
}

// Score submission use case with injected store.
pub struct SaveScoreUseCase<S> {
    pub store: S,
}

impl<S> SaveScoreUseCase<S>
where
    S: ScoreStore,
{
    pub async fn execute(
        &self,
        token: Option<&str>,
        username: &str,
        stats: SessionStats,
    ) -> SaveOutcome {
        let Some(token) = token else {
            return SaveOutcome::NotSignedIn;
        };

        let submission = ScoreSubmission {
            username: username.to_string(),
            stats,
        };
        match self.store.submit(token, &submission).await {
            Ok(()) => {
                info!(username, points = stats.points, "score saved");
                SaveOutcome::Saved
            }
            Err(e) => {
                warn!(username, error = %e, "score submission failed");
                SaveOutcome::Failed(e.to_string())
            }
        }
    }
}

/// One rendered leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub username: String,
    pub points: u32,
    pub hits: u32,
    /// Row belongs to the current player.
    pub is_own: bool,
}

/// Last fetched leaderboard and whether it is shown.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardView {
    entries: Vec<LeaderboardEntry>,
    visible: bool,
}

impl LeaderboardView {
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Rows in the order the store returned them.
    pub fn rows(&self, username: &str) -> Vec<LeaderboardRow> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| LeaderboardRow {
                rank: i + 1,
                username: e.username.clone(),
                points: e.points,
                hits: e.hits,
                is_own: e.username == username,
            })
            .collect()
    }
}

// Leaderboard fetch use case with injected store.
pub struct LoadLeaderboardUseCase<S> {
    pub store: S,
}

impl<S> LoadLeaderboardUseCase<S>
where
    S: ScoreStore,
{
    /// Refreshes and toggles the view. On failure the view is left untouched.
    pub async fn execute(&self, view: &mut LeaderboardView) -> bool {
        match self.store.leaderboard().await {
            Ok(mut entries) => {
                entries.truncate(LEADERBOARD_LIMIT);
                view.entries = entries;
                view.visible = !view.visible;
                true
            }
            Err(e) => {
                warn!(error = %e, "leaderboard fetch failed");
                false
            }
        }
    }
}
