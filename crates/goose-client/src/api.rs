//! Typed access to the remote game API.
//!
//! One method per endpoint. Authenticated endpoints take the bearer token
//! explicitly; the state containers supply whatever token the session
//! currently holds.
//!
//! ```text
//! POST /auth/login        -> LoginResponse
//! GET  /auth/me           -> UserIdentity
//! POST /auth/logout       -> (ignored body)
//! GET  /rounds            -> RoundList
//! POST /rounds            -> Round
//! GET  /rounds/{id}       -> RoundDetail
//! POST /rounds/{id}/tap   -> TapResult
//! ```

use goose_types::{
    LoginRequest, LoginResponse, Round, RoundDetail, RoundId, RoundList, TapResult, UserIdentity,
};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;

/// HTTP client bound to one API base URL.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GooseApi {
    client: reqwest::Client,
    base_url: String,
}

impl GooseApi {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let request = self.client.post(self.endpoint(&["auth", "login"])?).json(credentials);
        decode(execute(request).await?).await
    }

    /// Identity behind `token`.
    pub async fn me(&self, token: Option<&str>) -> Result<UserIdentity, ClientError> {
        let request = authorize(self.client.get(self.endpoint(&["auth", "me"])?), token);
        decode(execute(request).await?).await
    }

    /// Invalidate `token` server-side.
    pub async fn logout(&self, token: Option<&str>) -> Result<(), ClientError> {
        let request = authorize(self.client.post(self.endpoint(&["auth", "logout"])?), token);
        execute(request).await.map(drop)
    }

    /// All rounds visible to the caller.
    pub async fn rounds(&self, token: Option<&str>) -> Result<RoundList, ClientError> {
        let request = authorize(self.client.get(self.endpoint(&["rounds"])?), token);
        decode(execute(request).await?).await
    }

    /// Create a new round. Only administrators are allowed by the server.
    pub async fn create_round(&self, token: Option<&str>) -> Result<Round, ClientError> {
        let request = authorize(self.client.post(self.endpoint(&["rounds"])?), token);
        decode(execute(request).await?).await
    }

    /// Full detail of one round, including the caller's stats.
    pub async fn round(&self, token: Option<&str>, id: &RoundId) -> Result<RoundDetail, ClientError> {
        let url = self.endpoint(&["rounds", id.as_str()])?;
        let request = authorize(self.client.get(url), token);
        decode(execute(request).await?).await
    }

    /// Submit one tap in round `id`.
    pub async fn tap(&self, token: Option<&str>, id: &RoundId) -> Result<TapResult, ClientError> {
        let url = self.endpoint(&["rounds", id.as_str(), "tap"])?;
        let request = authorize(self.client.post(url), token);
        decode(execute(request).await?).await
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    ///
    /// A segment never spans more than one path component, so a round id
    /// holding `/`, `?` or `#` cannot address another resource.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let invalid = |reason: String| {
            ClientError::Transport(format!("invalid API URL {}: {reason}", self.base_url))
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot carry a path".to_owned()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Send a request and turn non-2xx statuses into [`ClientError::Http`].
async fn execute(request: RequestBuilder) -> Result<Response, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    let status = response.status();
    debug!(url = %response.url(), status = status.as_u16(), "api response");

    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

/// Attach the bearer token, if one is held.
fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Decode a successful response body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn endpoints_hang_off_the_base_path() {
        let api = GooseApi::new("http://localhost:3000/api/v1//");
        assert_eq!(
            api.endpoint(&["rounds"]).unwrap().as_str(),
            "http://localhost:3000/api/v1/rounds"
        );

        let bare = GooseApi::new("http://localhost:3000");
        assert_eq!(
            bare.endpoint(&["auth", "me"]).unwrap().as_str(),
            "http://localhost:3000/auth/me"
        );
    }

    #[test]
    fn reserved_characters_stay_inside_one_segment() {
        let api = GooseApi::new("http://localhost:3000/api/v1");
        let url = api.endpoint(&["rounds", "a/../b?x#y", "tap"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/v1/rounds/a%2F..%2Fb%3Fx%23y/tap"
        );
    }

    #[test]
    fn unusable_base_url_is_a_transport_error() {
        let api = GooseApi::new("not a url");
        assert!(matches!(
            api.endpoint(&["rounds"]),
            Err(ClientError::Transport(_))
        ));
    }
}
