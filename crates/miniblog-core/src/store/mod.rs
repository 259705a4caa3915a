//! The synchronizing post store.
//!
//! `PostStore` owns the in-memory post list and keeps it aligned with the
//! remote collection: creates go to the server and are followed by a full
//! reload, comment mutations replace the whole post object and apply
//! locally only after the server confirms. Local state is never left
//! partially applied; a failed call leaves the post list exactly as it
//! was and records the error kind.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{Comment, NewPost, Post};
use crate::error::{ErrorKind, StoreError};
use crate::ports::PostCollection;

#[cfg(test)]
mod tests;

#[derive(Default)]
struct State {
    posts: Vec<Post>,
    loading: bool,
    last_error: Option<ErrorKind>,
}

/// In-memory post store synchronized against a [`PostCollection`].
///
/// All operations take `&self`; state lives behind an async `RwLock`.
/// The lock is never held across a network await, so overlapping comment
/// mutations on the same post are not serialized against each other and
/// resolve last-write-wins.
pub struct PostStore {
    remote: Arc<dyn PostCollection>,
    state: RwLock<State>,
}

impl PostStore {
    pub fn new(remote: Arc<dyn PostCollection>) -> Self {
        Self {
            remote,
            state: RwLock::new(State::default()),
        }
    }

    /// Current snapshot of the post list, in server order.
    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.posts.clone()
    }

    /// Whether a collection load is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Kind of the most recent failed operation, if any.
    pub async fn last_error(&self) -> Option<ErrorKind> {
        self.state.read().await.last_error
    }

    /// Fetch the full collection and replace local state with it.
    ///
    /// On failure the previous post list is retained and `FetchFailed`
    /// is recorded. No automatic retry; the caller re-invokes.
    pub async fn load_all(&self) -> Result<(), StoreError> {
        self.state.write().await.loading = true;

        let result = self.remote.list().await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(posts) => {
                tracing::debug!(count = posts.len(), "post collection loaded");
                state.posts = posts;
                state.last_error = None;
                Ok(())
            }
            Err(err) => {
                let err = StoreError::FetchFailed(err);
                tracing::warn!(kind = err.kind().as_str(), error = %err, "post collection load failed");
                state.last_error = Some(err.kind());
                Err(err)
            }
        }
    }

    /// Create a post on the remote collection, then reload.
    ///
    /// Precondition (caller-enforced): `title` and `content` are
    /// non-empty after trimming. The store does not re-validate.
    ///
    /// There is no client-side id minting for posts; the full reload
    /// makes the server-assigned id authoritative. The returned post is
    /// the last entry of the reloaded list - a best-effort immediate
    /// result, correct as long as the mock collection appends creates.
    pub async fn create(&self, post: NewPost) -> Result<Option<Post>, StoreError> {
        let created = match self.remote.create(post).await {
            Ok(created) => created,
            Err(err) => {
                let err = StoreError::RemoteWriteFailed(err);
                tracing::warn!(kind = err.kind().as_str(), error = %err, "post create failed");
                self.state.write().await.last_error = Some(err.kind());
                return Err(err);
            }
        };
        tracing::info!(post_id = created.id, "post created, resynchronizing");

        self.load_all().await?;
        Ok(self.state.read().await.posts.last().cloned())
    }

    /// Remove a post from local state only.
    ///
    /// The caller is responsible for having already performed the
    /// authoritative remote delete. Returns whether a post was removed;
    /// an unknown id is a no-op.
    pub async fn delete_local(&self, post_id: i64) -> bool {
        let mut state = self.state.write().await;
        let before = state.posts.len();
        state.posts.retain(|p| p.id != post_id);
        let removed = state.posts.len() != before;
        if removed {
            tracing::debug!(post_id, "post removed from local state");
        }
        removed
    }

    /// Append a comment to a post and push the whole post to the remote.
    ///
    /// Precondition (caller-enforced): `content` is non-empty after
    /// trimming. The comment is not applied optimistically - the replace
    /// request must succeed first; on failure local state is untouched
    /// and `CommentWriteFailed` is recorded. An unknown `post_id` is
    /// reported the same way, without any network call.
    pub async fn add_comment(
        &self,
        post_id: i64,
        content: impl Into<String>,
        author: impl Into<String>,
        user_id: Option<i64>,
    ) -> Result<Comment, StoreError> {
        let mut updated = match self.find(post_id).await {
            Some(post) => post,
            None => {
                return self
                    .fail_comment_write(post_id, "post not found in local state")
                    .await;
            }
        };

        let comment = Comment::new(
            Self::mint_comment_id(&updated.comments),
            content,
            author,
            user_id,
        );
        updated.comments.push(comment.clone());

        match self.remote.replace(&updated).await {
            Ok(confirmed) => {
                tracing::debug!(post_id, comment_id = comment.id, "comment written");
                self.apply_replaced(confirmed).await;
                Ok(comment)
            }
            Err(err) => self.fail_comment_write(post_id, &err.to_string()).await,
        }
    }

    /// Remove a comment from a post and push the whole post to the remote.
    ///
    /// Both ids must reference existing entities; otherwise, and on any
    /// remote failure, state is left unchanged and `CommentDeleteFailed`
    /// is recorded. Deleting an already-deleted comment therefore
    /// reports a failure rather than silently succeeding.
    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<(), StoreError> {
        let mut updated = match self.find(post_id).await {
            Some(post) => post,
            None => {
                return self
                    .fail_comment_delete(post_id, comment_id, "post not found in local state")
                    .await;
            }
        };

        let before = updated.comments.len();
        updated.comments.retain(|c| c.id != comment_id);
        if updated.comments.len() == before {
            return self
                .fail_comment_delete(post_id, comment_id, "comment not found on post")
                .await;
        }

        match self.remote.replace(&updated).await {
            Ok(confirmed) => {
                tracing::debug!(post_id, comment_id, "comment deleted");
                self.apply_replaced(confirmed).await;
                Ok(())
            }
            Err(err) => {
                self.fail_comment_delete(post_id, comment_id, &err.to_string())
                    .await
            }
        }
    }

    /// Pure lookup by id. No side effects, no network access.
    pub async fn get_post(&self, post_id: i64) -> Option<Post> {
        self.find(post_id).await
    }

    async fn find(&self, post_id: i64) -> Option<Post> {
        self.state
            .read()
            .await
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
    }

    /// Swap the confirmed post into local state, clearing the error flag.
    async fn apply_replaced(&self, confirmed: Post) {
        let mut state = self.state.write().await;
        if let Some(slot) = state.posts.iter_mut().find(|p| p.id == confirmed.id) {
            *slot = confirmed;
        }
        state.last_error = None;
    }

    /// Mint a comment id: wall-clock milliseconds, bumped until unique
    /// within the parent post's comment list (the only scope the
    /// uniqueness invariant covers).
    fn mint_comment_id(existing: &[Comment]) -> i64 {
        let mut candidate = Utc::now().timestamp_millis();
        while existing.iter().any(|c| c.id == candidate) {
            candidate += 1;
        }
        candidate
    }

    async fn fail_comment_write<T>(&self, post_id: i64, reason: &str) -> Result<T, StoreError> {
        let err = StoreError::CommentWriteFailed {
            post_id,
            reason: reason.to_string(),
        };
        tracing::warn!(kind = err.kind().as_str(), error = %err, "comment write failed");
        self.state.write().await.last_error = Some(err.kind());
        Err(err)
    }

    async fn fail_comment_delete<T>(
        &self,
        post_id: i64,
        comment_id: i64,
        reason: &str,
    ) -> Result<T, StoreError> {
        let err = StoreError::CommentDeleteFailed {
            post_id,
            comment_id,
            reason: reason.to_string(),
        };
        tracing::warn!(kind = err.kind().as_str(), error = %err, "comment delete failed");
        self.state.write().await.last_error = Some(err.kind());
        Err(err)
    }
}
