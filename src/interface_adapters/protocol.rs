// Wire protocol DTOs and conversions for the trigger channel and the score API.

use crate::domain::LeaderboardEntry;
use crate::domain::ports::ScoreSubmission;
use crate::use_cases::HitNotice;
use serde::{Deserialize, Serialize};

/// Messages pushed to the client over the trigger channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ChannelInbound {
    // Fire once at the current aim point. Carries no coordinate.
    Shoot,
    // Informational message from the backend (sent on connect).
    Status { msg: String },
}

/// Messages the client sends over the trigger channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ChannelOutbound {
    // One per confirmed hit. Fire-and-forget.
    Hit { points: u32 },
}

impl From<HitNotice> for ChannelOutbound {
    fn from(notice: HitNotice) -> Self {
        ChannelOutbound::Hit {
            points: notice.points,
        }
    }
}

/// Body of `POST /api/score/record`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRecordRequest<'a> {
    pub username: &'a str,
    pub points: u32,
    pub shots: u32,
    pub hits: u32,
}

impl<'a> From<&'a ScoreSubmission> for ScoreRecordRequest<'a> {
    fn from(submission: &'a ScoreSubmission) -> Self {
        Self {
            username: &submission.username,
            points: submission.stats.points,
            shots: submission.stats.shots,
            hits: submission.stats.hits,
        }
    }
}

/// One element of the `GET /api/leaderboard` array.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardEntryDto {
    // Older records may have no username.
    #[serde(default)]
    pub username: Option<String>,
    pub points: u32,
    #[serde(default)]
    pub hits: u32,
}

impl From<LeaderboardEntryDto> for LeaderboardEntry {
    fn from(dto: LeaderboardEntryDto) -> Self {
        Self {
            username: dto.username.unwrap_or_else(|| "unknown".to_string()),
            points: dto.points,
            hits: dto.hits,
        }
    }
}

/// Error payload returned by the backend on failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionStats;

    #[test]
    fn shoot_parses_without_payload() {
        let msg: ChannelInbound = serde_json::from_str(r#"{"type":"shoot"}"#).expect("shoot");
        assert_eq!(msg, ChannelInbound::Shoot);
    }

    #[test]
    fn status_parses_with_message() {
        let msg: ChannelInbound =
            serde_json::from_str(r#"{"type":"status","data":{"msg":"connected"}}"#)
                .expect("status");
        assert_eq!(
            msg,
            ChannelInbound::Status {
                msg: "connected".to_string()
            }
        );
    }

    #[test]
    fn unknown_inbound_type_is_rejected() {
        assert!(serde_json::from_str::<ChannelInbound>(r#"{"type":"reload"}"#).is_err());
    }

    #[test]
    fn hit_serializes_with_points_payload() {
        let msg = ChannelOutbound::from(HitNotice { points: 10 });
        let json = serde_json::to_value(&msg).expect("serialize hit");
        assert_eq!(json, serde_json::json!({"type": "hit", "data": {"points": 10}}));
    }

    #[test]
    fn score_record_flattens_stats() {
        let submission = ScoreSubmission {
            username: "ana".to_string(),
            stats: SessionStats {
                points: 20,
                shots: 3,
                hits: 2,
            },
        };
        let json = serde_json::to_value(ScoreRecordRequest::from(&submission)).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"username": "ana", "points": 20, "shots": 3, "hits": 2})
        );
    }

    #[test]
    fn leaderboard_entry_without_username_gets_placeholder() {
        let dto: LeaderboardEntryDto =
            serde_json::from_str(r#"{"username":null,"points":5,"hits":1}"#).expect("entry");
        let entry = LeaderboardEntry::from(dto);
        assert_eq!(entry.username, "unknown");
        assert_eq!(entry.points, 5);
    }
}
