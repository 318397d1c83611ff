//! Detail state of the round currently on screen.
//!
//! Holds at most one [`RoundDetail`]. Opening a different round discards the
//! held detail before the request goes out, so a screen never shows one
//! round's numbers under another round's id. A tap refreshes only the
//! caller's stats; the round metadata and the leaderboard wait for the next
//! full fetch.
//!
//! [`RoundDetailStore::tap_if_active`] and [`RoundDetailStore::follow_phase`]
//! are what an interactive screen calls: taps outside the active phase are
//! dropped without a request, and a round that just finished is fetched
//! once more for its final standings.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use goose_core::{RoundPhase, RoundScreen};
use goose_types::{RoundDetail, RoundId, TapResult};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::api::GooseApi;
use crate::error::{ClientError, extract_message};
use crate::session::SessionStore;

/// Observable round detail fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundDetailState {
    /// Detail of the open round.
    pub detail: Option<RoundDetail>,
    /// A detail request is in flight.
    pub loading: bool,
    /// A tap request is in flight.
    pub tap_loading: bool,
    /// Message of the most recent failure.
    pub error: Option<String>,
}

impl RoundDetailState {
    /// Drop the held detail unless it belongs to round `id`.
    fn discard_other_round(&mut self, id: &RoundId) {
        if self.detail.as_ref().is_some_and(|d| d.round.id != *id) {
            self.detail = None;
        }
    }

    /// Replace the caller's stats with a tap result, if detail is held.
    fn apply_tap(&mut self, tap: TapResult) {
        self.detail = self.detail.take().map(|detail| detail.with_my_stats(tap));
    }
}

/// Outcome of a guarded tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAttempt {
    /// The round was active and the server counted the tap.
    Sent(TapResult),
    /// The held round was not active; nothing was sent.
    Ignored(RoundPhase),
}

/// Shared round detail container.
#[derive(Debug)]
pub struct RoundDetailStore {
    api: GooseApi,
    session: Arc<SessionStore>,
    state: RwLock<RoundDetailState>,
}

impl RoundDetailStore {
    /// Build an empty container that authenticates through `session`.
    pub fn new(api: GooseApi, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            state: RwLock::new(RoundDetailState::default()),
        }
    }

    /// Copy of the current detail fields.
    pub async fn snapshot(&self) -> RoundDetailState {
        self.state.read().await.clone()
    }

    /// Load the full detail of round `id`.
    ///
    /// On failure the detail is cleared, the message recorded and the error
    /// returned.
    pub async fn fetch_round(&self, id: &RoundId) -> Result<RoundDetail, ClientError> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
            state.discard_other_round(id);
        }

        let token = self.session.token().await;
        let result = self.api.round(token.as_deref(), id).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(detail) => {
                debug!(round_id = %id, score = detail.my_stats.score, "round loaded");
                state.detail = Some(detail.clone());
                Ok(detail)
            }
            Err(e) => {
                warn!(round_id = %id, error = %e, "failed to load round");
                state.error = Some(extract_message(&e));
                state.detail = None;
                Err(e)
            }
        }
    }

    /// Submit one tap in round `id`.
    ///
    /// On success only the held stats of the caller change. On failure the
    /// message is recorded, the error returned, and the stats stay as they
    /// were.
    pub async fn tap(&self, id: &RoundId) -> Result<TapResult, ClientError> {
        {
            let mut state = self.state.write().await;
            state.tap_loading = true;
            state.error = None;
        }

        let token = self.session.token().await;
        let result = self.api.tap(token.as_deref(), id).await;

        let mut state = self.state.write().await;
        state.tap_loading = false;
        match result {
            Ok(tap) => {
                debug!(round_id = %id, taps = tap.taps, score = tap.score, "tap accepted");
                state.apply_tap(tap);
                Ok(tap)
            }
            Err(e) => {
                warn!(round_id = %id, error = %e, "tap rejected");
                state.error = Some(extract_message(&e));
                Err(e)
            }
        }
    }

    /// Phase of round `id` at `now`, judged from the held detail.
    ///
    /// Without held detail for `id` the round counts as pending.
    pub async fn phase_at(&self, id: &RoundId, now: DateTime<Utc>) -> RoundPhase {
        self.screen_at(id, now).await.phase
    }

    async fn screen_at(&self, id: &RoundId, now: DateTime<Utc>) -> RoundScreen {
        let state = self.state.read().await;
        let detail = state.detail.as_ref().filter(|d| d.round.id == *id);
        RoundScreen::derive(detail, now)
    }

    /// Submit one tap in round `id` only if it is active at `now`.
    pub async fn tap_if_active(
        &self,
        id: &RoundId,
        now: DateTime<Utc>,
    ) -> Result<TapAttempt, ClientError> {
        let screen = self.screen_at(id, now).await;
        if !screen.guard_tap() {
            debug!(round_id = %id, phase = %screen.phase, "tap ignored");
            return Ok(TapAttempt::Ignored(screen.phase));
        }
        self.tap(id).await.map(TapAttempt::Sent)
    }

    /// Track the phase of round `id` from one clock tick to the next.
    ///
    /// `previous` is the phase returned for the last tick. When the round
    /// has just finished, its detail is fetched once more. Returns the
    /// phase at `now`; a failed refresh is returned as the error and leaves
    /// the detail cleared, as with [`Self::fetch_round`].
    pub async fn follow_phase(
        &self,
        id: &RoundId,
        previous: RoundPhase,
        now: DateTime<Utc>,
    ) -> Result<RoundPhase, ClientError> {
        let phase = self.phase_at(id, now).await;
        if phase == RoundPhase::Finished && previous != RoundPhase::Finished {
            debug!(round_id = %id, "round finished, refreshing standings");
            self.fetch_round(id).await?;
        }
        Ok(phase)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::{TimeZone, Utc};
    use goose_types::{MyStats, Round, TopStat, TopStatUser};

    use super::*;

    fn detail(id: &str) -> RoundDetail {
        RoundDetail {
            round: Round {
                id: RoundId::from(id),
                start_time: Utc.timestamp_opt(1_000, 0).single().unwrap_or_default(),
                end_time: Utc.timestamp_opt(2_000, 0).single().unwrap_or_default(),
                total_score: 9,
            },
            my_stats: MyStats { taps: 1, score: 1 },
            top_stats: vec![TopStat {
                user: TopStatUser {
                    username: "bob".to_owned(),
                },
                score: 8,
            }],
        }
    }

    #[test]
    fn opening_another_round_discards_detail() {
        let mut state = RoundDetailState {
            detail: Some(detail("r1")),
            ..RoundDetailState::default()
        };
        state.discard_other_round(&RoundId::from("r1"));
        assert!(state.detail.is_some());
        state.discard_other_round(&RoundId::from("r2"));
        assert!(state.detail.is_none());
    }

    #[test]
    fn tap_without_detail_changes_nothing() {
        let mut state = RoundDetailState::default();
        state.apply_tap(TapResult { taps: 5, score: 5 });
        assert_eq!(state, RoundDetailState::default());
    }

    #[test]
    fn tap_replaces_only_my_stats() {
        let before = detail("r1");
        let mut state = RoundDetailState {
            detail: Some(before.clone()),
            ..RoundDetailState::default()
        };
        state.apply_tap(TapResult { taps: 2, score: 11 });
        let after = state.detail.unwrap();
        assert_eq!(after.round, before.round);
        assert_eq!(after.top_stats, before.top_stats);
        assert_eq!(after.my_stats, MyStats { taps: 2, score: 11 });
    }
}
