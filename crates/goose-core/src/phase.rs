//! Round lifecycle phase.
//!
//! A round's phase is never stored. It is recomputed from the current
//! instant and the round's bounds every time a view is derived:
//!
//! ```text
//!   now < start         -> Pending
//!   start <= now < end  -> Active
//!   end <= now          -> Finished
//! ```

use chrono::{DateTime, Utc};
use goose_types::Round;

/// Lifecycle stage of a round relative to a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    /// The round has not started yet.
    Pending,
    /// Taps are accepted.
    Active,
    /// The round is over; standings are final.
    Finished,
}

impl RoundPhase {
    /// Phase of a round bounded by `start` (inclusive) and `end` (exclusive)
    /// at instant `now`.
    pub fn at(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if now < start {
            Self::Pending
        } else if now < end {
            Self::Active
        } else {
            Self::Finished
        }
    }

    /// Phase of `round` at instant `now`.
    pub fn of(round: &Round, now: DateTime<Utc>) -> Self {
        Self::at(now, round.start_time, round.end_time)
    }

    /// Heading shown on the round screen.
    pub const fn status_title(self) -> &'static str {
        match self {
            Self::Pending => "Cooldown",
            Self::Active => "Round active",
            Self::Finished => "Round finished",
        }
    }

    /// Status shown next to a round in the round list.
    pub const fn list_label(self) -> &'static str {
        match self {
            Self::Pending => "Scheduled",
            Self::Active => "Active",
            Self::Finished => "Finished",
        }
    }

    /// Whether taps may be submitted in this phase.
    pub const fn accepts_taps(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl core::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Finished => "finished",
        };
        f.write_str(name)
    }
}
