//! Plain-text rendering of the derived views.

use std::fmt::Write as _;

use goose_client::SessionState;
use goose_core::{RoundRow, RoundScreen};
use goose_types::{RoundId, UserIdentity};

/// Shown when the list holds no rounds.
pub const EMPTY_LIST: &str = "No active or scheduled rounds";

/// Shown to players who may not create rounds.
pub const ADMIN_ONLY_HINT: &str = "Only admins can create rounds";

/// Shown when a command needs a session and none is held.
pub const SIGN_IN_HINT: &str =
    "Sign in to see rounds: goose login --username <name> --password <password>";

/// ANSI sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Greeting after a successful identity check.
pub fn greeting(user: &UserIdentity) -> String {
    format!("Hello, {}!\nRole: {}", user.username, user.role)
}

/// The round list, headed by the player's name.
pub fn round_list(session: &SessionState, rows: &[RoundRow]) -> String {
    let mut out = format!("ROUNDS{:>40}\n", session.display_name());
    if !session.is_admin() {
        let _ = writeln!(out, "({ADMIN_ONLY_HINT})");
    }
    if rows.is_empty() {
        let _ = writeln!(out, "\n{EMPTY_LIST}");
        return out;
    }
    for row in rows {
        let _ = write!(
            out,
            "\n* Round ID: {}\n  Start: {}\n  End:   {}\n  Status: {}\n",
            row.id,
            row.start,
            row.end,
            row.status()
        );
    }
    out
}

/// The round screen for the player `player`.
pub fn round_screen(id: &RoundId, player: &str, screen: &RoundScreen) -> String {
    let mut out = format!("{:<30}{player}\n", screen.status_title);
    let _ = writeln!(out, "Round {id}");
    let _ = writeln!(out, "{}", "-".repeat(40));

    if let Some(countdown) = &screen.countdown {
        let _ = writeln!(out, "{countdown}");
    }
    if screen.tap_enabled {
        let _ = writeln!(out, "My score: {}", screen.my_score);
        let _ = writeln!(out, "\n[ Tap the goose! Press Enter ]");
    } else {
        let _ = writeln!(out, "\n[ Round is not active ]");
    }
    if screen.phase == goose_core::RoundPhase::Finished {
        let _ = writeln!(out, "\nTotal       {}", screen.total_score);
        if let Some(winner) = &screen.winner {
            let _ = writeln!(out, "Winner: {}  {}", winner.user.username, winner.score);
        }
        let _ = writeln!(out, "My score    {}", screen.my_score);
    }
    if screen.show_go_back {
        let _ = writeln!(out, "\n<- back to rounds: goose rounds");
    }
    out
}
