//! Durable storage for serialized sessions, keyed by account username.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::StoreError;

/// Bytes escaped in a store key. `%` is escaped too, so the encoding is
/// injective and never yields a path separator.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'_');

/// Keyed storage of serialized session blobs.
///
/// Blobs are opaque here; parsing and validation happen in the session
/// manager. Keys are compared case-insensitively.
pub trait SessionStore: Send + Sync {
    /// Returns `Ok(None)` when no blob is stored for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the key is invalid or storage cannot be read.
    fn load(&self, username: &str) -> Result<Option<String>, StoreError>;

    /// Stores `blob` for `username`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the key is invalid or storage cannot be written.
    fn save(&self, username: &str, blob: &str) -> Result<(), StoreError>;

    /// Returns whether a blob was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the key is invalid or storage cannot be modified.
    fn remove(&self, username: &str) -> Result<bool, StoreError>;
}

/// One file per account under a directory: `<dir>/session-<username>`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the session file for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] if `username` is blank or all dots.
    /// Any other login identifier (account name, email, phone number) is
    /// lowercased and percent-encoded into a single file name component.
    pub fn session_path(&self, username: &str) -> Result<PathBuf, StoreError> {
        let key = store_key(username)?;
        Ok(self.dir.join(format!("session-{key}")))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, username: &str) -> Result<Option<String>, StoreError> {
        let path = self.session_path(username)?;
        match std::fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn save(&self, username: &str, blob: &str) -> Result<(), StoreError> {
        let path = self.session_path(username)?;

        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        // Write-then-rename so a crash never leaves a truncated session file.
        let tmp = tmp_path(&path);
        std::fs::write(&tmp, blob)
            .and_then(|()| restrict_permissions(&tmp))
            .map_err(|source| StoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "session file written");
        Ok(())
    }

    fn remove(&self, username: &str) -> Result<bool, StoreError> {
        let path = self.session_path(username)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// In-process store, for tests and for callers that do not want sessions on disk.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, username: &str) -> Result<Option<String>, StoreError> {
        let key = store_key(username)?;
        Ok(self.lock().get(&key).cloned())
    }

    fn save(&self, username: &str, blob: &str) -> Result<(), StoreError> {
        let key = store_key(username)?;
        self.lock().insert(key, blob.to_owned());
        Ok(())
    }

    fn remove(&self, username: &str) -> Result<bool, StoreError> {
        let key = store_key(username)?;
        Ok(self.lock().remove(&key).is_some())
    }
}

/// Lowercased, percent-encoded login identifier.
fn store_key(username: &str) -> Result<String, StoreError> {
    let trimmed = username.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        return Err(StoreError::InvalidKey(username.to_owned()));
    }
    Ok(utf8_percent_encode(&trimmed.to_ascii_lowercase(), KEY_ENCODE_SET).to_string())
}
