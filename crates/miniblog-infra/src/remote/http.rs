//! HTTP implementation of the remote collection port.
//!
//! Talks to a `json-server-auth` instance. The post collection lives
//! under the `/660/posts` rewrite rule ("authenticated users only"), so
//! every request carries the session's bearer token when one is present.
//! Requests, responses, and failures are traced with a per-request
//! correlation id.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use uuid::Uuid;

use miniblog_core::domain::{NewPost, Post};
use miniblog_core::error::RemoteError;
use miniblog_core::ports::PostCollection;

use crate::auth::TokenSource;

/// Path prefix the mock server's access rule maps to authenticated-only.
const COLLECTION_PREFIX: &str = "/660/posts";

/// Remote collection over HTTP.
pub struct HttpPostCollection {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl HttpPostCollection {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, COLLECTION_PREFIX)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}{}/{}", self.base_url, COLLECTION_PREFIX, id)
    }

    async fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.tokens.bearer_token().await {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send a request, logging it and mapping transport failures.
    async fn send(
        &self,
        method: &'static str,
        url: &str,
        req: RequestBuilder,
    ) -> Result<Response, RemoteError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, method, url, "sending request");

        let response = self.authorize(req).await.send().await.map_err(|e| {
            tracing::error!(%request_id, method, url, error = %e, "transport error");
            RemoteError::Transport(e.to_string())
        })?;

        tracing::debug!(%request_id, method, url, status = %response.status(), "response received");
        Ok(response)
    }

    fn check_status(response: Response) -> Result<Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RemoteError::Status {
                status: status.as_u16(),
            })
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PostCollection for HttpPostCollection {
    async fn list(&self) -> Result<Vec<Post>, RemoteError> {
        let url = self.collection_url();
        let response = self.send("GET", &url, self.client.get(&url)).await?;
        Self::decode(Self::check_status(response)?).await
    }

    async fn fetch(&self, id: i64) -> Result<Option<Post>, RemoteError> {
        let url = self.item_url(id);
        let response = self.send("GET", &url, self.client.get(&url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::decode(Self::check_status(response)?).await?))
    }

    async fn create(&self, post: NewPost) -> Result<Post, RemoteError> {
        let url = self.collection_url();
        let response = self
            .send("POST", &url, self.client.post(&url).json(&post))
            .await?;
        Self::decode(Self::check_status(response)?).await
    }

    async fn replace(&self, post: &Post) -> Result<Post, RemoteError> {
        let url = self.item_url(post.id);
        let response = self
            .send("PUT", &url, self.client.put(&url).json(post))
            .await?;
        Self::decode(Self::check_status(response)?).await
    }

    async fn remove(&self, id: i64) -> Result<(), RemoteError> {
        let url = self.item_url(id);
        let response = self.send("DELETE", &url, self.client.delete(&url)).await?;
        Self::check_status(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NoToken;

    #[test]
    fn urls_use_the_authenticated_prefix() {
        let remote = HttpPostCollection::new("http://localhost:8000/", Arc::new(NoToken));
        assert_eq!(remote.collection_url(), "http://localhost:8000/660/posts");
        assert_eq!(remote.item_url(7), "http://localhost:8000/660/posts/7");
    }
}
