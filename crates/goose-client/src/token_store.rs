//! Durable storage of the session's bearer token.
//!
//! Exactly one value is persisted: the token, under the fixed key
//! [`TOKEN_KEY`]. It is read once when the session store is built and
//! written or erased on every session transition.

use std::fmt::Debug;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ClientError;

/// Storage key of the bearer token (the file name for [`FileTokenStore`]).
pub const TOKEN_KEY: &str = "auth_token";

/// Durable home of the bearer token.
pub trait TokenStore: Debug + Send + Sync {
    /// Read the persisted token, if any.
    fn load(&self) -> Result<Option<String>, ClientError>;

    /// Persist `token`, replacing any previous value.
    fn save(&self, token: &str) -> Result<(), ClientError>;

    /// Erase the persisted token. Erasing an absent token succeeds.
    fn clear(&self) -> Result<(), ClientError>;
}

/// Permission bits of the token file: readable by its owner only.
#[cfg(unix)]
const TOKEN_FILE_MODE: u32 = 0o600;

/// Token persisted as a single file.
///
/// On unix the file is created owner-only, and an existing file is
/// narrowed to owner-only before the token is written into it.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the token at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the token as [`TOKEN_KEY`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(TOKEN_KEY))
    }

    /// Location of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_owned()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Storage(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClientError::Storage(format!("create {}: {e}", parent.display()))
            })?;
        }
        let failed = |e: std::io::Error| {
            ClientError::Storage(format!("write {}: {e}", self.path.display()))
        };

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(TOKEN_FILE_MODE);

        let mut file = options.open(&self.path).map_err(failed)?;
        #[cfg(unix)]
        file.set_permissions(std::fs::Permissions::from_mode(TOKEN_FILE_MODE))
            .map_err(failed)?;
        file.write_all(token.as_bytes()).map_err(failed)
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(format!(
                "remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// A store that already holds `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut Option<String>) -> T) -> Result<T, ClientError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| ClientError::Storage(format!("token slot poisoned: {e}")))?;
        Ok(f(&mut slot))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        self.with_slot(|slot| slot.clone())
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        self.with_slot(|slot| *slot = Some(token.to_owned()))
    }

    fn clear(&self) -> Result<(), ClientError> {
        self.with_slot(|slot| *slot = None)
    }
}
