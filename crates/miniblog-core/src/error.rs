//! Error types for the store and the remote-collection port.

use thiserror::Error;

/// Store-level errors - one variant per failing operation.
///
/// These are the values surfaced through [`crate::PostStore::last_error`]
/// after a failed call. None of them is fatal; the caller is expected to
/// show a message and retry by re-invoking the operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Initial or refresh load of the collection failed.
    #[error("failed to fetch posts: {0}")]
    FetchFailed(#[source] RemoteError),

    /// Creating a post on the remote collection failed.
    #[error("failed to create post: {0}")]
    RemoteWriteFailed(#[source] RemoteError),

    /// Writing a comment (full-post replace) failed, or the target post
    /// does not exist locally.
    #[error("failed to write comment on post {post_id}: {reason}")]
    CommentWriteFailed { post_id: i64, reason: String },

    /// Deleting a comment failed, or the target post/comment does not
    /// exist locally.
    #[error("failed to delete comment {comment_id} on post {post_id}: {reason}")]
    CommentDeleteFailed {
        post_id: i64,
        comment_id: i64,
        reason: String,
    },
}

impl StoreError {
    /// The kind recorded in the store's observable `last_error` state.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FetchFailed(_) => ErrorKind::FetchFailed,
            Self::RemoteWriteFailed(_) => ErrorKind::RemoteWriteFailed,
            Self::CommentWriteFailed { .. } => ErrorKind::CommentWriteFailed,
            Self::CommentDeleteFailed { .. } => ErrorKind::CommentDeleteFailed,
        }
    }
}

/// Kind of the last failed store operation, kept as observable state so
/// the caller can render it without holding the error value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FetchFailed,
    RemoteWriteFailed,
    CommentWriteFailed,
    CommentDeleteFailed,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FetchFailed => "FetchFailed",
            Self::RemoteWriteFailed => "RemoteWriteFailed",
            Self::CommentWriteFailed => "CommentWriteFailed",
            Self::CommentDeleteFailed => "CommentDeleteFailed",
        }
    }
}

/// Errors from the remote collection adapter.
///
/// The store does not interpret individual HTTP statuses; an auth failure
/// (401/403) surfaces through the same `Status` variant as any other
/// non-success response.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server returned status {status}")]
    Status { status: u16 },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("post {0} not found")]
    NotFound(i64),
}
