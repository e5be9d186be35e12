use crate::domain::LeaderboardEntry;
use crate::domain::ports::{ScoreStore, ScoreSubmission};
use crate::interface_adapters::protocol::{ErrorResponse, LeaderboardEntryDto, ScoreRecordRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum ScoreClientError {
    Transport(reqwest::Error),
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },
    Decode(reqwest::Error),
}

impl fmt::Display for ScoreClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreClientError::Transport(err) => write!(f, "score service unreachable: {err}"),
            ScoreClientError::Upstream { status, message } => {
                if let Some(message) = message {
                    write!(f, "score service error {status}: {message}")
                } else {
                    write!(f, "score service error {status}")
                }
            }
            ScoreClientError::Decode(err) => write!(f, "score response decode error: {err}"),
        }
    }
}

impl std::error::Error for ScoreClientError {}

// Thin reqwest client for the score record and leaderboard endpoints.
#[derive(Clone)]
pub struct ScoreClient {
    http: Client,
    base_url: String,
}

impl ScoreClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn record_score(
        &self,
        token: &str,
        submission: &ScoreSubmission,
    ) -> Result<(), ScoreClientError> {
        let url = format!("{}/api/score/record", self.base_url);
        let res = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&ScoreRecordRequest::from(submission))
            .send()
            .await
            .map_err(ScoreClientError::Transport)?;

        // Any 2xx counts; the body is not inspected.
        check_status(res).await.map(|_| ())
    }

    pub async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ScoreClientError> {
        let url = format!("{}/api/leaderboard", self.base_url);
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ScoreClientError::Transport)?;
        let res = check_status(res).await?;

        let entries = res
            .json::<Vec<LeaderboardEntryDto>>()
            .await
            .map_err(ScoreClientError::Decode)?;
        Ok(entries.into_iter().map(LeaderboardEntry::from).collect())
    }
}

// Keep upstream status/message so callers can show why it failed.
async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, ScoreClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = res
        .json::<ErrorResponse>()
        .await
        .ok()
        .map(|payload| payload.error);
    Err(ScoreClientError::Upstream { status, message })
}

#[async_trait]
impl ScoreStore for ScoreClient {
    async fn submit(
        &self,
        token: &str,
        submission: &ScoreSubmission,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.record_score(token, submission).await?)
    }

    async fn leaderboard(
        &self,
    ) -> Result<Vec<LeaderboardEntry>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.fetch_leaderboard().await?)
    }
}
