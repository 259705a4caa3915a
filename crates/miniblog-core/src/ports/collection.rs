use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RemoteError;

/// The remote collection endpoint the store synchronizes against.
///
/// Maps one-to-one onto the mock server's REST surface: list, single
/// fetch, create with server-assigned id, full-object replace, delete.
/// Implementations attach credentials themselves; callers never pass
/// tokens through this trait.
#[async_trait]
pub trait PostCollection: Send + Sync {
    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<Post>, RemoteError>;

    /// Fetch a single post by id.
    async fn fetch(&self, id: i64) -> Result<Option<Post>, RemoteError>;

    /// Create a post; the returned post carries the server-assigned id.
    async fn create(&self, post: NewPost) -> Result<Post, RemoteError>;

    /// Replace a post wholesale (unconditional put, not compare-and-swap).
    async fn replace(&self, post: &Post) -> Result<Post, RemoteError>;

    /// Delete a post by id.
    async fn remove(&self, id: i64) -> Result<(), RemoteError>;
}
