//! Application state - the session, the remote collection, and the store.

use std::sync::Arc;

use anyhow::Context;

use miniblog_core::PostStore;
use miniblog_core::domain::Post;
use miniblog_core::ports::PostCollection;
use miniblog_infra::auth::{AuthSession, FileCredentialStore};
use miniblog_infra::remote::{HttpPostCollection, InMemoryPostCollection};

use crate::config::AppConfig;

pub struct AppState {
    pub session: Arc<AuthSession>,
    pub remote: Arc<dyn PostCollection>,
    pub store: PostStore,
}

impl AppState {
    /// Wire up the application: restore the session, pick the remote
    /// (HTTP, or in-memory when offline), build the store around it.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let credentials = Arc::new(FileCredentialStore::new(&config.credentials_path));
        let session = Arc::new(AuthSession::new(&config.base_url, credentials));
        session.restore().await;

        let remote: Arc<dyn PostCollection> = if config.offline {
            tracing::info!("running offline against the in-memory collection");
            let seed = match &config.seed_path {
                Some(path) => load_seed(path).await?,
                None => Vec::new(),
            };
            Arc::new(InMemoryPostCollection::with_seed(seed))
        } else {
            Arc::new(HttpPostCollection::new(&config.base_url, session.clone()))
        };

        let store = PostStore::new(remote.clone());
        Ok(Self {
            session,
            remote,
            store,
        })
    }
}

async fn load_seed(path: &std::path::Path) -> anyhow::Result<Vec<Post>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading seed file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
}
