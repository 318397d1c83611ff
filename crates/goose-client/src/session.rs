//! Session state: who is signed in and with which bearer token.
//!
//! The session is authenticated exactly when both a user and a token are
//! held. The token is loaded from the [`TokenStore`] when the store is built
//! and persisted or erased on every transition. A failed identity check is
//! treated as an invalid session and recovered locally by signing out.
//!
//! Each operation follows the same shape: one critical section marks the
//! operation busy, the single network call is awaited without holding the
//! lock, and one critical section commits the outcome and clears the busy
//! flag. Readers never observe a half-applied transition.

use std::sync::Arc;

use goose_types::{LoginRequest, LoginResponse, UserIdentity};
use tokio::sync::RwLock;
use tracing::{info, warn};
use validator::Validate;

use crate::api::GooseApi;
use crate::error::{ClientError, extract_message};
use crate::token_store::TokenStore;

/// Observable session fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Signed-in user, once confirmed by the server.
    pub user: Option<UserIdentity>,
    /// Bearer token attached to authenticated requests.
    pub token: Option<String>,
    /// A login request is in flight.
    pub login_loading: bool,
    /// An identity request is in flight.
    pub me_loading: bool,
    /// A logout request is in flight.
    pub logout_loading: bool,
    /// Message of the most recent failure.
    pub error: Option<String>,
}

impl SessionState {
    /// Both a user and a token are held.
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// The signed-in user has the administrator role.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.role.is_admin())
    }

    /// Name to greet the player with; empty when nobody is signed in.
    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or("", |user| user.username.as_str())
    }

    fn commit_login(&mut self, response: &LoginResponse) {
        self.token = Some(response.token.clone());
        self.user = Some(response.identity());
    }

    /// A failed login forgets the user but keeps whatever token was held.
    fn fail_login(&mut self, message: String) {
        self.error = Some(message);
        self.user = None;
    }

    fn sign_out(&mut self) {
        self.user = None;
        self.token = None;
    }
}

/// Shared session container.
#[derive(Debug)]
pub struct SessionStore {
    api: GooseApi,
    tokens: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Build the session, restoring a persisted token if there is one.
    ///
    /// An unreadable token store is logged and treated as empty.
    pub fn new(api: GooseApi, tokens: Arc<dyn TokenStore>) -> Self {
        let token = tokens.load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to read persisted session token");
            None
        });
        Self {
            api,
            tokens,
            state: RwLock::new(SessionState {
                token,
                ..SessionState::default()
            }),
        }
    }

    /// Copy of the current session fields.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// The bearer token currently held.
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    /// Sign in with `credentials`.
    ///
    /// Credentials missing a field are rejected without a request. On
    /// success the token and identity are stored and the token persisted.
    /// On failure the user is forgotten (the token is left alone), the
    /// message recorded, and the error returned.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ClientError> {
        if let Err(errors) = credentials.validate() {
            let error = ClientError::from(errors);
            self.state.write().await.error = Some(extract_message(&error));
            return Err(error);
        }

        {
            let mut state = self.state.write().await;
            state.login_loading = true;
            state.error = None;
        }

        let result = self.api.login(credentials).await;

        let mut state = self.state.write().await;
        state.login_loading = false;
        match result {
            Ok(response) => {
                state.commit_login(&response);
                drop(state);
                self.persist(Some(&response.token));
                info!(username = %response.username, role = %response.role, "signed in");
                Ok(response)
            }
            Err(e) => {
                warn!(username = %credentials.username, error = %e, "login failed");
                state.fail_login(extract_message(&e));
                Err(e)
            }
        }
    }

    /// Confirm the held token with the server and load its identity.
    ///
    /// Without a token this only clears the user and returns `None`. A
    /// rejected token signs the session out and erases the persisted token;
    /// that failure is recovered here and not returned.
    pub async fn fetch_identity(&self) -> Option<UserIdentity> {
        let token = {
            let mut state = self.state.write().await;
            let Some(token) = state.token.clone() else {
                state.user = None;
                return None;
            };
            state.me_loading = true;
            state.error = None;
            token
        };

        let result = self.api.me(Some(&token)).await;

        let mut state = self.state.write().await;
        state.me_loading = false;
        if state.token.as_deref() != Some(token.as_str()) {
            // The session moved on (login or logout) while this check was in
            // flight; its outcome no longer describes the held token.
            return state.user.clone();
        }
        match result {
            Ok(user) => {
                state.user = Some(user.clone());
                Some(user)
            }
            Err(e) => {
                warn!(error = %e, "session token rejected, signing out");
                state.error = Some(extract_message(&e));
                state.sign_out();
                drop(state);
                self.persist(None);
                None
            }
        }
    }

    /// Sign out.
    ///
    /// Without a token this only clears the user. Otherwise the server is
    /// asked to invalidate the token; a failure there is recorded but local
    /// state, including the persisted token, is cleared regardless.
    pub async fn logout(&self) {
        let token = {
            let mut state = self.state.write().await;
            let Some(token) = state.token.clone() else {
                state.user = None;
                return;
            };
            state.logout_loading = true;
            token
        };

        let result = self.api.logout(Some(&token)).await;

        {
            let mut state = self.state.write().await;
            if let Err(e) = result {
                warn!(error = %e, "server-side logout failed");
                state.error = Some(extract_message(&e));
            }
            state.sign_out();
            state.logout_loading = false;
        }
        self.persist(None);
        info!("signed out");
    }

    /// Write or erase the durable token. Storage failures are logged only.
    ///
    /// Called after the state lock is released; file I/O never runs under it.
    fn persist(&self, token: Option<&str>) {
        let result = match token {
            Some(token) => self.tokens.save(token),
            None => self.tokens.clear(),
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to persist session token");
        }
    }
}
