//! Auth session against the mock server's `/login` and `/register`
//! endpoints.
//!
//! Holds the current user and bearer token, persists them through a
//! [`CredentialStore`], and hands the token to the HTTP adapter via
//! [`TokenSource`]. Ownership checks (who may edit or delete what) are
//! the caller's to perform with [`AuthSession::is_owner`]; the store
//! layer never consults the session.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use miniblog_shared::{AuthResponse, LoginRequest, RegisterRequest, SessionUser};

use super::{AuthError, CredentialStore, Credentials, TokenSource};

pub struct AuthSession {
    client: reqwest::Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    current: RwLock<Option<Credentials>>,
}

impl AuthSession {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            current: RwLock::new(None),
        }
    }

    /// Restore a persisted session, if one exists. Called once at
    /// application start.
    pub async fn restore(&self) {
        if let Some(credentials) = self.store.load().await {
            tracing::debug!(email = %credentials.user.email, "restored stored session");
            *self.current.write().await = Some(credentials);
        }
    }

    /// Log in with email and password; on success the session is set and
    /// persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.authenticate("/login", &body).await
    }

    /// Register a new account; the mock server logs the account in as
    /// part of registration, so on success the session is set too.
    pub async fn register(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.authenticate("/register", &body).await
    }

    /// Clear the session and the persisted credentials.
    pub async fn logout(&self) -> Result<(), AuthError> {
        *self.current.write().await = None;
        self.store.clear().await?;
        tracing::info!("session cleared");
        Ok(())
    }

    pub async fn current_user(&self) -> Option<SessionUser> {
        self.current.read().await.as_ref().map(|c| c.user.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Whether the current user owns a resource with the given user id.
    /// Anonymous resources (`None`) belong to nobody.
    pub async fn is_owner(&self, resource_user_id: Option<i64>) -> bool {
        match (self.current_user().await, resource_user_id) {
            (Some(user), Some(owner)) => user.id == owner,
            _ => false,
        }
    }

    async fn authenticate<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<SessionUser, AuthError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "sending auth request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // json-server-auth answers rejections with a quoted message body
            let message = response.text().await.unwrap_or_default();
            let message = message.trim_matches('"').to_string();
            tracing::warn!(status = %status, message = %message, "auth request rejected");
            return if status.as_u16() < 500 {
                Err(AuthError::InvalidCredentials(message))
            } else {
                Err(AuthError::Server {
                    status: status.as_u16(),
                })
            };
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;

        let credentials = Credentials {
            token: auth.access_token,
            user: auth.user.clone(),
        };
        self.store.save(&credentials).await?;
        *self.current.write().await = Some(credentials);
        tracing::info!(email = %auth.user.email, "session established");
        Ok(auth.user)
    }
}

#[async_trait]
impl TokenSource for AuthSession {
    async fn bearer_token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|c| c.token.clone())
    }
}
