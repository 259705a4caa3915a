//! Persisted session credentials.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use miniblog_shared::SessionUser;

use super::AuthError;

/// Token plus the user it belongs to, persisted across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub user: SessionUser,
}

/// Where session credentials are kept between runs.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load persisted credentials, if any. Corrupt data is discarded,
    /// not an error.
    async fn load(&self) -> Option<Credentials>;

    async fn save(&self, credentials: &Credentials) -> Result<(), AuthError>;

    async fn clear(&self) -> Result<(), AuthError>;
}

/// Credentials in a JSON file on disk.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Option<Credentials> {
        let raw = tokio::fs::read_to_string(&self.path).await.ok()?;
        match serde_json::from_str(&raw) {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding corrupt stored credentials");
                let _ = tokio::fs::remove_file(&self.path).await;
                None
            }
        }
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let raw =
            serde_json::to_string_pretty(credentials).map_err(|e| AuthError::Storage(e.to_string()))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))
    }

    async fn clear(&self) -> Result<(), AuthError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Storage(e.to_string())),
        }
    }
}

/// Credentials held in memory only - used in tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with credentials already present, as if a previous run had
    /// saved them.
    pub fn with(credentials: Credentials) -> Self {
        Self {
            slot: RwLock::new(Some(credentials)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Option<Credentials> {
        self.slot.read().await.clone()
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        *self.slot.write().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AuthError> {
        *self.slot.write().await = None;
        Ok(())
    }
}
