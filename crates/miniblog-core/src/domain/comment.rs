use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - lives inside its parent post's comment list.
///
/// Ids are integers unique within the parent post only, not globally.
/// `user_id` is `None` for anonymous comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment with the given id and `created_at` set to now.
    pub fn new(
        id: i64,
        content: impl Into<String>,
        author: impl Into<String>,
        user_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            author: author.into(),
            user_id,
            created_at: Utc::now(),
        }
    }
}
