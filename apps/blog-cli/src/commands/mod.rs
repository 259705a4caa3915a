//! Command definitions and dispatch.

mod auth;
mod comments;
mod posts;

use clap::{Parser, Subcommand};

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "blog", about = "Client for the miniblog mock server", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in with email and password
    Login { email: String, password: String },
    /// Register a new account (logs you in on success)
    Register { email: String, password: String },
    /// Clear the stored session
    Logout,
    /// Show the current session user
    Whoami,
    /// List all posts
    List,
    /// Show a post with its comments
    Show { id: String },
    /// Create a post (requires login)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Edit a post you own
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a post you own
    Delete { id: String },
    /// Comment operations
    #[command(subcommand)]
    Comment(CommentCommand),
}

#[derive(Subcommand)]
pub enum CommentCommand {
    /// Add a comment to a post
    Add { post_id: String, content: String },
    /// Remove a comment you own
    Rm { post_id: String, comment_id: i64 },
}

pub async fn run(cli: Cli, state: &AppState) -> anyhow::Result<()> {
    match cli.command {
        Command::Login { email, password } => auth::login(state, &email, &password).await,
        Command::Register { email, password } => auth::register(state, &email, &password).await,
        Command::Logout => auth::logout(state).await,
        Command::Whoami => auth::whoami(state).await,
        Command::List => posts::list(state).await,
        Command::Show { id } => posts::show(state, &id).await,
        Command::Create { title, content } => posts::create(state, &title, &content).await,
        Command::Edit { id, title, content } => {
            posts::edit(state, &id, title.as_deref(), content.as_deref()).await
        }
        Command::Delete { id } => posts::delete(state, &id).await,
        Command::Comment(CommentCommand::Add { post_id, content }) => {
            comments::add(state, &post_id, &content).await
        }
        Command::Comment(CommentCommand::Rm {
            post_id,
            comment_id,
        }) => comments::remove(state, &post_id, comment_id).await,
    }
}

/// Trim a required text field, rejecting empty input. The store itself
/// does not re-validate; this boundary is where non-empty is enforced.
pub(crate) fn required_text(label: &str, value: &str) -> anyhow::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        anyhow::bail!("{label} must not be empty");
    }
    Ok(trimmed.to_string())
}

/// Coerce a route-style id argument, rejecting non-numeric input.
pub(crate) fn parse_id(raw: &str) -> anyhow::Result<i64> {
    miniblog_core::domain::parse_route_id(raw)
        .ok_or_else(|| anyhow::anyhow!("'{raw}' is not a valid post id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_rejects_empty() {
        assert_eq!(required_text("title", "  hello  ").unwrap(), "hello");
        assert!(required_text("title", "   ").is_err());
        assert!(required_text("title", "").is_err());
    }

    #[test]
    fn parse_id_reports_bad_input() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert!(parse_id("seven").is_err());
    }
}
