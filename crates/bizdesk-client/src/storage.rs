//! # Durable Session Storage
//!
//! Keeps the session across restarts under two keys, `token` and `role`.
//!
//! ## Store Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Durable Session Keys                               │
//! │                                                                         │
//! │   startup ──► load()   both keys non-empty? ──► Some(Session)          │
//! │                                        else ──► None                    │
//! │                                                                         │
//! │   login   ──► save()   {"token": "...", "role": "..."}                 │
//! │                                                                         │
//! │   logout  ──► clear()  keys removed (idempotent)                       │
//! │   401     ──► clear()                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A corrupt or half-written file is treated as "no session" with a
//! warning, so the user lands on the login view instead of an error.
//! The file is written owner-only (`0600` on Unix).

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use bizdesk_core::Session;

use crate::error::{ClientError, ClientResult};

/// Storage backend for the session keys.
pub trait SessionStore: Send + Sync {
    /// Reads the stored session, if both keys are present.
    fn load(&self) -> ClientResult<Option<Session>>;

    /// Writes both keys.
    fn save(&self, session: &Session) -> ClientResult<()>;

    /// Removes both keys. No-op when nothing is stored.
    fn clear(&self) -> ClientResult<()>;
}

/// On-disk shape. Keys may be missing in a hand-edited file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

impl StoredKeys {
    fn into_session(self) -> Option<Session> {
        let session = Session::new(self.token?, self.role?);
        session.is_complete().then_some(session)
    }
}

// =============================================================================
// File Store
// =============================================================================

/// JSON file holding the session keys.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "No stored session");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<StoredKeys>(&contents) {
            Ok(keys) => Ok(keys.into_session()),
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let keys = StoredKeys {
            token: Some(session.token.clone()),
            role: Some(session.role.clone()),
        };
        let contents = serde_json::to_string_pretty(&keys)?;
        write_private(&self.path, contents.as_bytes())?;

        debug!(path = ?self.path, role = %session.role, "Session stored");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = ?self.path, "Stored session removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::StorageFailed(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// Writes `contents` readable by the owner only, replacing `path` atomically.
///
/// The file holds a bearer token. On Unix it is created with mode `0600`
/// and the mode is reset even when a stale temp file already exists.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(&tmp)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    std::fs::rename(&tmp, path)
}

// =============================================================================
// Memory Store
// =============================================================================

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a session already stored, as if saved by an earlier run.
    pub fn with_session(session: Session) -> Self {
        MemorySessionStore {
            slot: Mutex::new(Some(session)),
        }
    }

    fn lock(&self) -> ClientResult<std::sync::MutexGuard<'_, Option<Session>>> {
        self.slot
            .lock()
            .map_err(|_| ClientError::StorageFailed("session store lock poisoned".into()))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        Ok(self.lock()?.clone().filter(Session::is_complete))
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.lock()? = None;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
