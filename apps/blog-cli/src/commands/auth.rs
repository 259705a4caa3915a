//! Session commands: login, register, logout, whoami.

use miniblog_shared::SessionUser;

use crate::state::AppState;

pub async fn login(state: &AppState, email: &str, password: &str) -> anyhow::Result<()> {
    validate_email(email)?;
    let user = state.session.login(email, password).await?;
    println!("logged in as {}", describe(&user));
    Ok(())
}

pub async fn register(state: &AppState, email: &str, password: &str) -> anyhow::Result<()> {
    validate_email(email)?;
    // the mock server rejects passwords shorter than 6 characters
    if password.len() < 6 {
        anyhow::bail!("password must be at least 6 characters");
    }
    let user = state.session.register(email, password).await?;
    println!("registered and logged in as {}", describe(&user));
    Ok(())
}

pub async fn logout(state: &AppState) -> anyhow::Result<()> {
    state.session.logout().await?;
    println!("logged out");
    Ok(())
}

pub async fn whoami(state: &AppState) -> anyhow::Result<()> {
    match state.session.current_user().await {
        Some(user) => println!("{}", describe(&user)),
        None => println!("not logged in"),
    }
    Ok(())
}

fn describe(user: &SessionUser) -> String {
    format!("{} (user id {})", user.email, user.id)
}

fn validate_email(email: &str) -> anyhow::Result<()> {
    if email.is_empty() || !email.contains('@') {
        anyhow::bail!("'{email}' is not a valid email address");
    }
    Ok(())
}
