//! Command-line interface definition.

use clap::{Parser, Subcommand};

/// Tap the goose while the round is live.
#[derive(Debug, Parser)]
#[command(
    name = "goose",
    version,
    about = "Terminal client for the goose-tap game",
    long_about = "Sign in, browse rounds, and tap the goose while a round is active.\n\n\
                  The session token is kept in the state directory (GOOSE_STATE_DIR)\n\
                  so later commands stay signed in until `logout`."
)]
pub struct Cli {
    /// API base URL (overrides `GOOSE_API_URL`)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in; unknown users are registered by the server
    Login {
        /// Login name
        #[arg(long, short)]
        username: String,
        /// Password
        #[arg(long, short, env = "GOOSE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the signed-in user
    Whoami,
    /// Sign out and forget the stored token
    Logout,
    /// List rounds with their status
    Rounds {
        /// Keep the list on screen, refreshing statuses every tick
        #[arg(long)]
        watch: bool,
    },
    /// Create a new round (administrators only)
    Create,
    /// Show one round
    Round {
        /// Round identifier
        id: String,
    },
    /// Tap once, if the round is active
    Tap {
        /// Round identifier
        id: String,
    },
    /// Open a round interactively: Enter taps, `q` leaves
    Play {
        /// Round identifier
        id: String,
    },
}
