//! Configuration for the game client.
//!
//! All configuration is loaded from environment variables. Command-line
//! flags in the front-end override individual values afterwards.

use std::path::PathBuf;
use std::time::Duration;

use goose_core::DEFAULT_TICK;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";

/// Name of the directory holding the durable session token. It lives under
/// `$HOME`, or under the working directory when `HOME` is unset.
pub const STATE_DIR_NAME: &str = ".goose";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is present but its value cannot be used.
    #[error("invalid {name}: {reason}")]
    Invalid {
        /// Name of the offending variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Complete client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub api_url: String,
    /// Directory of the durable token file.
    pub state_dir: PathBuf,
    /// Period of the view clock.
    pub tick: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            state_dir: PathBuf::from(STATE_DIR_NAME),
            tick: DEFAULT_TICK,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `GOOSE_API_URL` -- API base URL (default `http://localhost:3000/api/v1`)
    /// - `GOOSE_STATE_DIR` -- directory of the token file (default `$HOME/.goose`)
    /// - `GOOSE_TICK_MS` -- view clock period in milliseconds (default 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = match lookup("GOOSE_API_URL") {
            Some(url) => parse_api_url(&url)?,
            None => defaults.api_url,
        };

        let state_dir = match lookup("GOOSE_STATE_DIR").filter(|dir| !dir.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => lookup("HOME")
                .filter(|home| !home.trim().is_empty())
                .map_or(defaults.state_dir, |home| {
                    PathBuf::from(home).join(STATE_DIR_NAME)
                }),
        };

        let tick = match lookup("GOOSE_TICK_MS") {
            Some(raw) => parse_tick(&raw)?,
            None => defaults.tick,
        };

        Ok(Self {
            api_url,
            state_dir,
            tick,
        })
    }

    /// Override the API base URL.
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(url)?;
        Ok(self)
    }

}

/// Validate a base URL and strip its trailing slashes.
fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::Invalid {
            name: "GOOSE_API_URL",
            reason: format!("expected an http(s) URL, got {raw:?}"),
        })
    }
}

/// Parse a positive tick period in milliseconds.
fn parse_tick(raw: &str) -> Result<Duration, ConfigError> {
    let ms: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
        name: "GOOSE_TICK_MS",
        reason: format!("{e}"),
    })?;
    if ms == 0 {
        return Err(ConfigError::Invalid {
            name: "GOOSE_TICK_MS",
            reason: "must be at least 1".to_owned(),
        });
    }
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).ok();
        assert_eq!(config, Some(ClientConfig::default()));
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("GOOSE_API_URL", "https://goose.example/api/v1/"),
            ("GOOSE_STATE_DIR", "/tmp/goose"),
            ("GOOSE_TICK_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://goose.example/api/v1");
        assert_eq!(config.state_dir, PathBuf::from("/tmp/goose"));
        assert_eq!(config.tick, Duration::from_millis(250));
    }

    #[test]
    fn state_dir_defaults_under_home() {
        let config = ClientConfig::from_lookup(lookup(&[("HOME", "/home/bob")])).unwrap();
        assert_eq!(config.state_dir, PathBuf::from("/home/bob/.goose"));

        let config = ClientConfig::from_lookup(lookup(&[
            ("HOME", "/home/bob"),
            ("GOOSE_STATE_DIR", "/srv/goose"),
        ]))
        .unwrap();
        assert_eq!(config.state_dir, PathBuf::from("/srv/goose"));
    }

    #[test]
    fn default_tick_is_the_view_clock_default() {
        assert_eq!(ClientConfig::default().tick, DEFAULT_TICK);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ClientConfig::from_lookup(lookup(&[("GOOSE_API_URL", "localhost:3000")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[("GOOSE_TICK_MS", "0")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[("GOOSE_TICK_MS", "soon")])).is_err());
    }

    #[test]
    fn flag_override_is_validated() {
        let config = ClientConfig::default().with_api_url("http://127.0.0.1:9000/");
        assert_eq!(
            config.ok().map(|c| c.api_url),
            Some("http://127.0.0.1:9000".to_owned())
        );
        assert!(ClientConfig::default().with_api_url("ftp://x").is_err());
    }
}
