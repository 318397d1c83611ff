//! Round list state.

use std::sync::Arc;

use goose_types::Round;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::GooseApi;
use crate::error::{ClientError, extract_message};
use crate::session::SessionStore;

/// Observable round list fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundListState {
    /// Rounds in display order; newly created rounds come first.
    pub rounds: Vec<Round>,
    /// A list request is in flight.
    pub loading: bool,
    /// A create request is in flight.
    pub create_loading: bool,
    /// Message of the most recent failure.
    pub error: Option<String>,
}

/// Shared round list container.
#[derive(Debug)]
pub struct RoundListStore {
    api: GooseApi,
    session: Arc<SessionStore>,
    state: RwLock<RoundListState>,
}

impl RoundListStore {
    /// Build an empty list that authenticates through `session`.
    pub fn new(api: GooseApi, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            state: RwLock::new(RoundListState::default()),
        }
    }

    /// Copy of the current list fields.
    pub async fn snapshot(&self) -> RoundListState {
        self.state.read().await.clone()
    }

    /// Replace the list with the server's.
    ///
    /// On failure the list is emptied, the message recorded and the error
    /// returned.
    pub async fn fetch_rounds(&self) -> Result<Vec<Round>, ClientError> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let token = self.session.token().await;
        let result = self.api.rounds(token.as_deref()).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(list) => {
                info!(count = list.data.len(), "rounds loaded");
                state.rounds.clone_from(&list.data);
                Ok(list.data)
            }
            Err(e) => {
                warn!(error = %e, "failed to load rounds");
                state.error = Some(extract_message(&e));
                state.rounds.clear();
                Err(e)
            }
        }
    }

    /// Ask the server for a new round and put it at the head of the list.
    ///
    /// On failure the list is left as it was; the message is recorded and
    /// the error returned.
    pub async fn create_round(&self) -> Result<Round, ClientError> {
        {
            let mut state = self.state.write().await;
            state.create_loading = true;
            state.error = None;
        }

        let token = self.session.token().await;
        let result = self.api.create_round(token.as_deref()).await;

        let mut state = self.state.write().await;
        state.create_loading = false;
        match result {
            Ok(round) => {
                info!(round_id = %round.id, "round created");
                state.rounds.insert(0, round.clone());
                Ok(round)
            }
            Err(e) => {
                warn!(error = %e, "failed to create round");
                state.error = Some(extract_message(&e));
                Err(e)
            }
        }
    }
}
