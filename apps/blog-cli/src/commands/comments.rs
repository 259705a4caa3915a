//! Comment commands.

use super::{parse_id, required_text};
use crate::state::AppState;

/// Display name used when commenting without a session.
const ANONYMOUS_AUTHOR: &str = "visitor";

pub async fn add(state: &AppState, raw_post_id: &str, content: &str) -> anyhow::Result<()> {
    let post_id = parse_id(raw_post_id)?;
    let content = required_text("comment", content)?;

    state.store.load_all().await?;

    let (author, user_id) = match state.session.current_user().await {
        Some(user) => (user.email, Some(user.id)),
        None => (ANONYMOUS_AUTHOR.to_string(), None),
    };

    let comment = state
        .store
        .add_comment(post_id, content, author, user_id)
        .await?;
    println!("added comment {} to post {post_id}", comment.id);
    Ok(())
}

pub async fn remove(state: &AppState, raw_post_id: &str, comment_id: i64) -> anyhow::Result<()> {
    let post_id = parse_id(raw_post_id)?;
    state.store.load_all().await?;

    let post = state
        .store
        .get_post(post_id)
        .await
        .ok_or_else(|| anyhow::anyhow!("post {post_id} not found"))?;
    let comment = post
        .comments
        .iter()
        .find(|c| c.id == comment_id)
        .ok_or_else(|| anyhow::anyhow!("comment {comment_id} not found on post {post_id}"))?;
    if !state.session.is_owner(comment.user_id).await {
        anyhow::bail!("only the comment's author may delete it");
    }

    state.store.delete_comment(post_id, comment_id).await?;
    println!("deleted comment {comment_id} from post {post_id}");
    Ok(())
}
