//! In-memory collection implementation - used for tests and for offline
//! runs when no mock server is reachable.
//!
//! Behaves like the mock server it stands in for: creates are appended
//! with incrementing ids, replace is an unconditional overwrite.
//! Note: Data is lost on process exit.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use miniblog_core::domain::{NewPost, Post};
use miniblog_core::error::RemoteError;
use miniblog_core::ports::PostCollection;

/// In-memory post collection.
pub struct InMemoryPostCollection {
    posts: RwLock<Vec<Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostCollection {
    pub fn new() -> Self {
        Self::with_seed(Vec::new())
    }

    /// Start from an existing post list; new ids continue after the
    /// highest seeded one.
    pub fn with_seed(seed: Vec<Post>) -> Self {
        let next_id = seed.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            posts: RwLock::new(seed),
            next_id: AtomicI64::new(next_id),
        }
    }
}

impl Default for InMemoryPostCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostCollection for InMemoryPostCollection {
    async fn list(&self) -> Result<Vec<Post>, RemoteError> {
        Ok(self.posts.read().await.clone())
    }

    async fn fetch(&self, id: i64) -> Result<Option<Post>, RemoteError> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, post: NewPost) -> Result<Post, RemoteError> {
        let created = Post {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: post.title,
            content: post.content,
            author: post.author,
            user_id: post.user_id,
            created_at: post.created_at,
            updated_at: None,
            comments: post.comments,
        };
        self.posts.write().await.push(created.clone());
        Ok(created)
    }

    async fn replace(&self, post: &Post) -> Result<Post, RemoteError> {
        let mut posts = self.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RemoteError::NotFound(post.id))?;
        *slot = post.clone();
        Ok(post.clone())
    }

    async fn remove(&self, id: i64) -> Result<(), RemoteError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RemoteError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_incrementing_ids() {
        let collection = InMemoryPostCollection::new();
        let a = collection
            .create(NewPost::new("A", "a", "alice", None))
            .await
            .unwrap();
        let b = collection
            .create(NewPost::new("B", "b", "alice", None))
            .await
            .unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(collection.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn seeded_ids_are_not_reused() {
        let seed = vec![Post {
            id: 5,
            title: "seeded".into(),
            content: "seeded".into(),
            author: "alice".into(),
            user_id: None,
            created_at: chrono::Utc::now(),
            updated_at: None,
            comments: Vec::new(),
        }];
        let collection = InMemoryPostCollection::with_seed(seed);
        let created = collection
            .create(NewPost::new("next", "n", "bob", None))
            .await
            .unwrap();
        assert_eq!(created.id, 6);
    }

    #[tokio::test]
    async fn replace_of_unknown_post_is_not_found() {
        let collection = InMemoryPostCollection::new();
        let ghost = Post {
            id: 9,
            title: "ghost".into(),
            content: "".into(),
            author: "".into(),
            user_id: None,
            created_at: chrono::Utc::now(),
            updated_at: None,
            comments: Vec::new(),
        };
        let err = collection.replace(&ghost).await.unwrap_err();
        assert!(matches!(err, RemoteError::NotFound(9)));
    }

    #[tokio::test]
    async fn remove_deletes_and_reports_missing() {
        let collection = InMemoryPostCollection::new();
        let created = collection
            .create(NewPost::new("A", "a", "alice", None))
            .await
            .unwrap();
        collection.remove(created.id).await.unwrap();
        assert!(collection.list().await.unwrap().is_empty());
        assert!(matches!(
            collection.remove(created.id).await,
            Err(RemoteError::NotFound(_))
        ));
    }
}
