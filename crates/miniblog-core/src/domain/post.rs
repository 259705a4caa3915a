use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Comment;

/// Post entity - a blog post with its nested comments.
///
/// Mirrors the wire shape of the mock collection endpoint (camelCase,
/// server-assigned integer `id`). `user_id` is absent on legacy posts
/// created before the auth layer existed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Payload for creating a post - everything but the server-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

impl NewPost {
    /// Build a create payload with `created_at` set to now and no comments.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
        user_id: Option<i64>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
            user_id,
            created_at: Utc::now(),
            comments: Vec::new(),
        }
    }
}

/// Coerce a route-style id parameter to a numeric post id.
///
/// Matches the permissive coercion the routes use: leading whitespace is
/// ignored and parsing stops at the first non-digit, so `"12"` and
/// `"12/edit"` both yield `Some(12)`. Returns `None` when no leading
/// integer is present.
pub fn parse_route_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i + 1)?;
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_id_accepts_plain_and_suffixed_forms() {
        assert_eq!(parse_route_id("42"), Some(42));
        assert_eq!(parse_route_id("  42"), Some(42));
        assert_eq!(parse_route_id("42abc"), Some(42));
        assert_eq!(parse_route_id("-3"), Some(-3));
    }

    #[test]
    fn route_id_rejects_non_numeric() {
        assert_eq!(parse_route_id("abc"), None);
        assert_eq!(parse_route_id(""), None);
        assert_eq!(parse_route_id("-"), None);
    }
}
