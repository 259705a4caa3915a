//! Post commands - the UI-layer side of the post lifecycle.
//!
//! Validation and ownership checks happen here, before the store or the
//! remote is touched. Deleting goes remote-first: the authoritative
//! DELETE is issued here and only then is the local copy dropped.

use chrono::Utc;

use miniblog_core::domain::{NewPost, Post};

use super::{parse_id, required_text};
use crate::state::AppState;

pub async fn list(state: &AppState) -> anyhow::Result<()> {
    state.store.load_all().await?;
    let posts = state.store.posts().await;
    if posts.is_empty() {
        println!("no posts yet");
        return Ok(());
    }
    for post in posts {
        println!(
            "{:>4}  {}  by {}  ({} comments)",
            post.id,
            post.title,
            post.author,
            post.comments.len()
        );
    }
    Ok(())
}

pub async fn show(state: &AppState, raw_id: &str) -> anyhow::Result<()> {
    let id = parse_id(raw_id)?;
    state.store.load_all().await?;

    let post = state
        .store
        .get_post(id)
        .await
        .ok_or_else(|| anyhow::anyhow!("post {id} not found"))?;
    print_post(&post);
    Ok(())
}

pub async fn create(state: &AppState, title: &str, content: &str) -> anyhow::Result<()> {
    let title = required_text("title", title)?;
    let content = required_text("content", content)?;
    let user = state
        .session
        .current_user()
        .await
        .ok_or_else(|| anyhow::anyhow!("log in before creating posts"))?;

    state.store.load_all().await?;
    let created = state
        .store
        .create(NewPost::new(title, content, user.email, Some(user.id)))
        .await?;

    match created {
        Some(post) => println!("created post {} \"{}\"", post.id, post.title),
        None => println!("post created"),
    }
    Ok(())
}

pub async fn edit(
    state: &AppState,
    raw_id: &str,
    title: Option<&str>,
    content: Option<&str>,
) -> anyhow::Result<()> {
    if title.is_none() && content.is_none() {
        anyhow::bail!("nothing to change: pass --title and/or --content");
    }
    let id = parse_id(raw_id)?;
    state.store.load_all().await?;

    let mut post = state
        .store
        .get_post(id)
        .await
        .ok_or_else(|| anyhow::anyhow!("post {id} not found"))?;
    if !state.session.is_owner(post.user_id).await {
        anyhow::bail!("only the author may edit this post");
    }

    if let Some(title) = title {
        post.title = required_text("title", title)?;
    }
    if let Some(content) = content {
        post.content = required_text("content", content)?;
    }
    post.updated_at = Some(Utc::now());

    state.remote.replace(&post).await?;
    state.store.load_all().await?;
    println!("updated post {id}");
    Ok(())
}

pub async fn delete(state: &AppState, raw_id: &str) -> anyhow::Result<()> {
    let id = parse_id(raw_id)?;
    state.store.load_all().await?;

    let post = state
        .store
        .get_post(id)
        .await
        .ok_or_else(|| anyhow::anyhow!("post {id} not found"))?;
    if !state.session.is_owner(post.user_id).await {
        anyhow::bail!("only the author may delete this post");
    }

    state.remote.remove(id).await?;
    state.store.delete_local(id).await;
    println!("deleted post {id}");
    Ok(())
}

fn print_post(post: &Post) {
    println!("# {} (id {})", post.title, post.id);
    println!(
        "by {} on {}",
        post.author,
        post.created_at.format("%Y-%m-%d %H:%M")
    );
    if let Some(updated) = post.updated_at {
        println!("edited {}", updated.format("%Y-%m-%d %H:%M"));
    }
    println!("\n{}\n", post.content);

    if post.comments.is_empty() {
        println!("(no comments)");
    } else {
        println!("comments:");
        for comment in &post.comments {
            println!(
                "  [{}] {}: {}",
                comment.id, comment.author, comment.content
            );
        }
    }
}
