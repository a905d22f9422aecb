//! Credential persistence port.
//!
//! The browser build of the console kept its two session entries in
//! cookies; here they live behind a small key-value trait so the file
//! layout is swappable (and so tests can run fully in memory).

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{SessionError, SessionResult};

/// Key-value persistence for session entries
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read an entry
    async fn get(&self, key: &str) -> SessionResult<Option<String>>;

    /// Write an entry
    async fn set(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Delete an entry; deleting a missing entry is not an error
    async fn remove(&self, key: &str) -> SessionResult<()>;
}

/// Default location of the on-disk credential file
pub fn default_credentials_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".zehnly").join("credentials.json"))
        .unwrap_or_else(|| PathBuf::from("./zehnly_credentials.json"))
}

/// In-memory credential store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, handy for rehydration tests
    pub fn with_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> SessionResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Credential store backed by a JSON file under the user's home directory.
///
/// The whole map is rewritten on every mutation; entries are tiny and the
/// file doubles as a human-inspectable record of the last session.
pub struct FileCredentialStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
    // Serializes snapshot-then-write so a slow write cannot clobber a
    // newer one.
    write_lock: tokio::sync::Mutex<()>,
}

impl FileCredentialStore {
    /// Open (or create) the store at the given path
    pub async fn open(path: impl Into<PathBuf>) -> SessionResult<Self> {
        let path = path.into();
        let entries = {
            let path = path.clone();
            tokio::task::spawn_blocking(move || read_entries(&path))
                .await
                .map_err(|e| SessionError::storage(format!("credential load task failed: {e}")))??
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
            write_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Open the store at [`default_credentials_path`]
    pub async fn open_default() -> SessionResult<Self> {
        Self::open(default_credentials_path()).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self) -> SessionResult<()> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.entries.read().clone();
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_entries(&path, &snapshot))
            .await
            .map_err(|e| SessionError::storage(format!("credential save task failed: {e}")))?
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        self.persist().await
    }

    async fn remove(&self, key: &str) -> SessionResult<()> {
        let existed = self.entries.write().remove(key).is_some();
        if existed {
            self.persist().await?;
        }
        Ok(())
    }
}

fn read_entries(path: &Path) -> SessionResult<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_entries(path: &Path, entries: &HashMap<String, String>) -> SessionResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, content)?;

    // Credentials file: keep it private (Unix only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        let _ = std::fs::set_permissions(path, perms);
    }

    Ok(())
}
