use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::LeaderboardEntry;
use crate::domain::ports::{ScoreStore, ScoreSubmission, SoundEffect};

// Sound port that only counts how often it was played.
#[derive(Default)]
pub(crate) struct CountingSound(AtomicUsize);

impl CountingSound {
    pub(crate) fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl SoundEffect for CountingSound {
    fn play_shot(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub submit: bool,
    pub leaderboard: bool,
}

// In-memory score store that records submissions and serves a fixed board.
#[derive(Clone, Default)]
pub(crate) struct RecordingStore {
    submissions: Arc<Mutex<Vec<(String, ScoreSubmission)>>>,
    board: Vec<LeaderboardEntry>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_board(mut self, board: Vec<LeaderboardEntry>) -> Self {
        self.board = board;
        self
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn submissions(&self) -> Vec<(String, ScoreSubmission)> {
        self.submissions
            .lock()
            .expect("submissions mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl ScoreStore for RecordingStore {
    async fn submit(
        &self,
        token: &str,
        submission: &ScoreSubmission,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.failures.submit {
            return Err("submit failed".into());
        }

        let mut guard = self.submissions.lock().expect("submissions mutex poisoned");
        guard.push((token.to_string(), submission.clone()));
        Ok(())
    }

    async fn leaderboard(
        &self,
    ) -> Result<Vec<LeaderboardEntry>, Box<dyn std::error::Error + Send + Sync>> {
        if self.failures.leaderboard {
            return Err("leaderboard failed".into());
        }
        Ok(self.board.clone())
    }
}
