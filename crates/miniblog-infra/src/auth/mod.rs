//! Session and credential handling for the mock auth endpoints.

mod credentials;
mod session;

use async_trait::async_trait;
use thiserror::Error;

pub use credentials::{CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore};
pub use session::AuthSession;

/// Supplies the bearer credential attached to authenticated requests.
///
/// The HTTP adapter reads the token per request, so a login that happens
/// after the adapter was constructed is picked up immediately.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn bearer_token(&self) -> Option<String>;
}

/// Token source that never authenticates. Requests sent with it against
/// the protected prefix come back as authorization failures.
pub struct NoToken;

#[async_trait]
impl TokenSource for NoToken {
    async fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the email/password pair.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("auth endpoint returned status {status}")]
    Server { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode auth response: {0}")]
    Decode(String),

    #[error("credential storage error: {0}")]
    Storage(String),
}
