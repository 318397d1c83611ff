//! Request and response bodies of the remote game API.
//!
//! Instants travel as RFC 3339 strings and are decoded into
//! [`DateTime<Utc>`]. Scores and tap counts are non-negative integers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{Role, RoundId};

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Identity of the signed-in user, as returned by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Login name, also used as the display name.
    pub username: String,
    /// Account role; `ADMIN` may create rounds.
    pub role: Role,
}

/// Credentials submitted to `POST /auth/login`.
///
/// Both fields are required. Unknown users are registered by the server on
/// first login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Plain-text password, only ever sent over the wire.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl LoginRequest {
    /// Build a login request from borrowed credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login: a bearer token plus the minimal identity.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for all authenticated endpoints.
    pub token: String,
    /// Login name of the authenticated user.
    pub username: String,
    /// Account role.
    pub role: Role,
}

impl LoginResponse {
    /// The identity part of the response, without the token.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            username: self.username.clone(),
            role: self.role.clone(),
        }
    }
}

impl core::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Rounds
// ---------------------------------------------------------------------------

/// A time-boxed game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Server-issued identifier.
    pub id: RoundId,
    /// First instant at which taps count.
    pub start_time: DateTime<Utc>,
    /// First instant at which taps no longer count.
    pub end_time: DateTime<Utc>,
    /// Sum of all players' scores as of the last fetch.
    #[serde(default)]
    pub total_score: u64,
}

/// Body of `GET /rounds`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundList {
    /// Rounds in server order.
    pub data: Vec<Round>,
}

/// The caller's own progress in a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyStats {
    /// Number of accepted taps.
    pub taps: u64,
    /// Score earned by those taps.
    pub score: u64,
}

/// User reference inside a leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopStatUser {
    /// Login name of the player.
    pub username: String,
}

/// One leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopStat {
    /// The scoring player.
    pub user: TopStatUser,
    /// Score in this round.
    pub score: u64,
}

/// Body of `GET /rounds/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundDetail {
    /// Round metadata.
    pub round: Round,
    /// The caller's stats; refreshed in place after each tap.
    #[serde(default)]
    pub my_stats: MyStats,
    /// Leaderboard subset, in server order.
    #[serde(default)]
    pub top_stats: Vec<TopStat>,
}

impl RoundDetail {
    /// Replace the caller's stats with a tap result, leaving the round and
    /// the leaderboard untouched.
    #[must_use]
    pub fn with_my_stats(self, tap: TapResult) -> Self {
        Self {
            my_stats: MyStats {
                taps: tap.taps,
                score: tap.score,
            },
            ..self
        }
    }
}

/// Body of `POST /rounds/{id}/tap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapResult {
    /// Total taps by the caller in this round after the submission.
    pub taps: u64,
    /// Total score of the caller in this round after the submission.
    pub score: u64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn round_detail_decodes_camel_case_body() {
        let json = serde_json::json!({
            "round": {
                "id": "r1",
                "startTime": "2026-10-19T12:00:00Z",
                "endTime": "2026-10-19T12:01:00Z",
                "totalScore": 17
            },
            "myStats": { "taps": 3, "score": 3 },
            "topStats": [
                { "user": { "username": "alice" }, "score": 14 },
                { "user": { "username": "bob" }, "score": 3 }
            ]
        });
        let detail: RoundDetail = serde_json::from_value(json).unwrap();
        assert_eq!(detail.round.id.as_str(), "r1");
        assert_eq!(detail.round.total_score, 17);
        assert_eq!(detail.my_stats, MyStats { taps: 3, score: 3 });
        assert_eq!(detail.top_stats.len(), 2);
        assert_eq!(detail.top_stats[0].user.username, "alice");
    }

    #[test]
    fn with_my_stats_keeps_round_and_leaderboard() {
        let json = serde_json::json!({
            "round": {
                "id": "r1",
                "startTime": "2026-10-19T12:00:00Z",
                "endTime": "2026-10-19T12:01:00Z",
                "totalScore": 5
            },
            "myStats": { "taps": 0, "score": 0 },
            "topStats": [{ "user": { "username": "alice" }, "score": 5 }]
        });
        let before: RoundDetail = serde_json::from_value(json).unwrap();
        let after = before.clone().with_my_stats(TapResult { taps: 1, score: 1 });
        assert_eq!(after.round, before.round);
        assert_eq!(after.top_stats, before.top_stats);
        assert_eq!(after.my_stats, MyStats { taps: 1, score: 1 });
    }

    #[test]
    fn login_request_requires_both_fields() {
        assert!(LoginRequest::new("alice", "x").validate().is_ok());
        assert!(LoginRequest::new("", "x").validate().is_err());
        assert!(LoginRequest::new("alice", "").validate().is_err());
    }

    #[test]
    fn credentials_are_redacted_in_debug_output() {
        let request = format!("{:?}", LoginRequest::new("alice", "hunter2"));
        assert!(!request.contains("hunter2"));
        let response = LoginResponse {
            token: "t1".to_owned(),
            username: "alice".to_owned(),
            role: Role::from("ADMIN"),
        };
        assert!(!format!("{response:?}").contains("t1"));
        assert_eq!(response.identity().username, "alice");
    }
}
