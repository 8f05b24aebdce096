//! Credential persistence for the authenticated client.
//!
//! The transport only ever talks to credentials through the async
//! [`CredentialStore`] trait; the file-backed implementation here is what
//! production builds use, and tests substitute an in-memory one.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors surfaced by credential stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(error: toml::de::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(error: toml::ser::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// The credential slots the SDK persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
    UserId,
    UserRole,
}

impl CredentialKey {
    /// Stable storage name for this key.
    pub fn name(self) -> &'static str {
        match self {
            Self::AccessToken => "access-token",
            Self::RefreshToken => "refresh-token",
            Self::UserId => "user-id",
            Self::UserRole => "user-role",
        }
    }
}

/// Storage abstraction for persisted credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: CredentialKey) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Configuration for file-backed credential storage.
#[derive(Debug, Clone)]
pub struct CredentialStoreConfig {
    pub base_dir: PathBuf,
}

impl CredentialStoreConfig {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn default_dir() -> PathBuf {
        default_flotilla_dir()
    }
}

/// File-backed credential store using a single TOML file.
///
/// Reads of a missing file behave as an empty store. Writes go through an
/// internal lock so a `set` is never interleaved with another mutation.
pub struct FileCredentialStore {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(config: CredentialStoreConfig) -> Self {
        Self {
            path: config.base_dir.join("credentials.toml"),
            io_lock: Mutex::new(()),
        }
    }

    pub fn new_default() -> Self {
        Self::new(CredentialStoreConfig::new(default_flotilla_dir()))
    }

    async fn read_values(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(StoreError::Io(err.to_string())),
        };
        let file: CredentialFile = toml::from_str(&raw)?;
        Ok(file.values)
    }

    async fn write_values(&self, values: BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let file = CredentialFile {
            version: 1,
            saved_at: DateTime::<Utc>::from(std::time::SystemTime::now()),
            values,
        };
        let serialized = toml::to_string(&file)?;
        tokio::fs::write(&self.path, serialized).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
        let _guard = self.io_lock.lock().await;
        Ok(self.read_values().await?.remove(key.name()))
    }

    async fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
        let _guard = self.io_lock.lock().await;
        let mut values = self.read_values().await?;
        values.insert(key.name().to_string(), value.to_string());
        self.write_values(values).await
    }

    async fn remove(&self, key: CredentialKey) -> Result<(), StoreError> {
        let _guard = self.io_lock.lock().await;
        let mut values = self.read_values().await?;
        if values.remove(key.name()).is_some() {
            self.write_values(values).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.io_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CredentialFile {
    version: u32,
    saved_at: DateTime<Utc>,
    values: BTreeMap<String, String>,
}

fn default_flotilla_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".flotilla"))
        .unwrap_or_else(|| PathBuf::from(".flotilla"))
}
