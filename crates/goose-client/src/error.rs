//! Error types for the game client and display-message extraction.
//!
//! Every failed network call ends up as a [`ClientError`]. The front-end
//! never shows the error's `Display` form; it shows [`extract_message`],
//! which prefers the server's own wording.

/// Fallback shown when a failure carries no usable message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors that can occur while talking to the game API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("server returned status {status}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for message extraction.
        body: String,
    },

    /// The request never produced a response (DNS, connect, I/O).
    #[error("request failed: {0}")]
    Transport(String),

    /// A 2xx response body did not match the expected shape.
    #[error("response decode error: {0}")]
    Decode(String),

    /// Input rejected before any request was made.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The durable token store could not be read or written.
    #[error("token storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// HTTP status of the failure, if the server answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|field| field.iter())
            .filter_map(|error| error.message.as_ref().map(ToString::to_string))
            .collect();
        messages.sort();
        Self::Validation(messages.join(", "))
    }
}

/// Produce the human-readable message for a failure.
///
/// For an HTTP failure the body is parsed as JSON and its string `message`
/// field is returned, else its string `detail` field; an unparseable body or
/// a body with neither field yields `Error <status>`. Other failures return
/// their own message, or [`UNKNOWN_ERROR`] when that message is empty.
pub fn extract_message(error: &ClientError) -> String {
    match error {
        ClientError::Http { status, body } => {
            message_from_body(body).unwrap_or_else(|| format!("Error {status}"))
        }
        ClientError::Transport(message)
        | ClientError::Decode(message)
        | ClientError::Validation(message)
        | ClientError::Storage(message) => {
            if message.trim().is_empty() {
                UNKNOWN_ERROR.to_owned()
            } else {
                message.clone()
            }
        }
    }
}

/// Pull `message` or `detail` out of a JSON error body.
fn message_from_body(body: &str) -> Option<String> {
    let payload: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail"]
        .iter()
        .find_map(|key| payload.get(key).and_then(serde_json::Value::as_str))
        .map(ToOwned::to_owned)
}
