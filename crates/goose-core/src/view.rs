//! View derivations for the round list and the round screen.
//!
//! Both derivations are pure snapshots: the front-end re-derives them on
//! every clock tick and after every state change, and renders whatever it
//! gets back.

use chrono::{DateTime, Utc};
use goose_types::{Round, RoundDetail, RoundId, TopStat};

use crate::format::{format_duration, format_timestamp};
use crate::phase::RoundPhase;

/// Highest-scoring leaderboard entry.
///
/// Ties resolve to the earliest entry in server order.
pub fn winner(top_stats: &[TopStat]) -> Option<&TopStat> {
    top_stats
        .iter()
        .fold(None, |best: Option<&TopStat>, entry| match best {
            Some(current) if current.score >= entry.score => Some(current),
            _ => Some(entry),
        })
}

// ---------------------------------------------------------------------------
// Round screen
// ---------------------------------------------------------------------------

/// Everything the round screen shows at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundScreen {
    /// Current phase. `Pending` while no detail is held.
    pub phase: RoundPhase,
    /// Heading for the current phase.
    pub status_title: &'static str,
    /// `Until start: MM:SS` or `Time left: MM:SS`; absent once finished.
    pub countdown: Option<String>,
    /// Whether the tap control is enabled.
    pub tap_enabled: bool,
    /// Whether the "back to the list" affordance is offered.
    pub show_go_back: bool,
    /// The caller's score, zero when unknown.
    pub my_score: u64,
    /// The caller's tap count, zero when unknown.
    pub my_taps: u64,
    /// Round total as of the last full fetch.
    pub total_score: u64,
    /// Winner, only derived once the round is finished.
    pub winner: Option<TopStat>,
}

impl RoundScreen {
    /// Derive the round screen from the held detail at instant `now`.
    pub fn derive(detail: Option<&RoundDetail>, now: DateTime<Utc>) -> Self {
        let phase = detail.map_or(RoundPhase::Pending, |d| RoundPhase::of(&d.round, now));

        let countdown = detail.and_then(|d| match phase {
            RoundPhase::Pending => Some(format!(
                "Until start: {}",
                format_duration(d.round.start_time.signed_duration_since(now).num_milliseconds())
            )),
            RoundPhase::Active => Some(format!(
                "Time left: {}",
                format_duration(d.round.end_time.signed_duration_since(now).num_milliseconds())
            )),
            RoundPhase::Finished => None,
        });

        let winner = match (phase, detail) {
            (RoundPhase::Finished, Some(d)) => winner(&d.top_stats).cloned(),
            _ => None,
        };

        Self {
            phase,
            status_title: phase.status_title(),
            countdown,
            tap_enabled: phase.accepts_taps(),
            show_go_back: matches!(phase, RoundPhase::Pending | RoundPhase::Finished),
            my_score: detail.map_or(0, |d| d.my_stats.score),
            my_taps: detail.map_or(0, |d| d.my_stats.taps),
            total_score: detail.map_or(0, |d| d.round.total_score),
            winner,
        }
    }

    /// Client-side tap guard.
    ///
    /// A tap attempted outside the active phase is dropped without a
    /// network call.
    pub const fn guard_tap(&self) -> bool {
        self.tap_enabled
    }
}

// ---------------------------------------------------------------------------
// Round list
// ---------------------------------------------------------------------------

/// One row of the round list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRow {
    /// Round identifier, used to open the round.
    pub id: RoundId,
    /// Start instant, formatted in the local zone.
    pub start: String,
    /// End instant, formatted in the local zone.
    pub end: String,
    /// Phase at derivation time.
    pub phase: RoundPhase,
}

impl RoundRow {
    /// Derive a list row for `round` at instant `now`.
    pub fn derive(round: &Round, now: DateTime<Utc>) -> Self {
        Self {
            id: round.id.clone(),
            start: format_timestamp(&round.start_time),
            end: format_timestamp(&round.end_time),
            phase: RoundPhase::of(round, now),
        }
    }

    /// Status label of the row.
    pub const fn status(&self) -> &'static str {
        self.phase.list_label()
    }
}
