//! Client for the goose-tap game API.
//!
//! The crate has two layers:
//!
//! - **Transport**: [`GooseApi`] performs one HTTP call per endpoint and
//!   maps every failure into a [`ClientError`]; [`extract_message`] turns a
//!   failure into the text shown to the player.
//! - **State**: [`SessionStore`], [`RoundListStore`] and [`RoundDetailStore`]
//!   own the observable client state. Each is constructed once and shared;
//!   [`GooseClient`] wires the three together around one session.
//!
//! # Architecture
//!
//! ```text
//! front-end --> stores (RwLock<state>) --> GooseApi --> remote API
//!                  |
//!                  +--> TokenStore (durable bearer token)
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod round;
pub mod rounds;
pub mod session;
pub mod token_store;

use std::sync::Arc;

use tracing::debug;

pub use api::GooseApi;
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, UNKNOWN_ERROR, extract_message};
pub use round::{RoundDetailState, RoundDetailStore, TapAttempt};
pub use rounds::{RoundListState, RoundListStore};
pub use session::{SessionState, SessionStore};
pub use token_store::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore};

/// The client's services, built once per process.
#[derive(Debug, Clone)]
pub struct GooseClient {
    /// Session shared by every other store.
    pub session: Arc<SessionStore>,
    /// Round list state.
    pub rounds: Arc<RoundListStore>,
    /// State of the open round.
    pub round: Arc<RoundDetailStore>,
}

impl GooseClient {
    /// Wire the services for `config`, persisting the token on disk.
    pub fn from_config(config: &ClientConfig) -> Self {
        let tokens = FileTokenStore::in_dir(&config.state_dir);
        debug!(path = %tokens.path().display(), "session token file");
        let tokens = Arc::new(tokens);
        Self::new(GooseApi::new(config.api_url.clone()), tokens)
    }

    /// Wire the services around an explicit API client and token store.
    pub fn new(api: GooseApi, tokens: Arc<dyn TokenStore>) -> Self {
        let session = Arc::new(SessionStore::new(api.clone(), tokens));
        let rounds = Arc::new(RoundListStore::new(api.clone(), Arc::clone(&session)));
        let round = Arc::new(RoundDetailStore::new(api, Arc::clone(&session)));
        Self {
            session,
            rounds,
            round,
        }
    }
}
