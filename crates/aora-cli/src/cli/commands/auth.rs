//! Account command handlers.

use anyhow::{Context, Result};
use aora_core::config::paths;
use aora_core::{Aora, BackendError, credentials};

fn not_signed_in(err: BackendError) -> anyhow::Error {
    if err.is_unauthorized() {
        anyhow::anyhow!("Not signed in. Run `aora sign-in` first.")
    } else {
        anyhow::Error::new(err)
    }
}

pub async fn sign_up(aora: &Aora, email: &str, password: &str, username: &str) -> Result<()> {
    let result = aora.create_user(email, password, username).await;
    // A session may exist even when the profile write failed.
    super::persist(aora)?;
    let user = result.context("sign up")?;
    println!("Signed up as {} <{}>", user.username, user.email);
    Ok(())
}

pub async fn sign_in(aora: &Aora, email: &str, password: &str) -> Result<()> {
    aora.sign_in(email, password).await.context("sign in")?;
    super::persist(aora)?;
    let user = aora
        .get_current_user()
        .await
        .context("load profile after sign in")?;
    println!("Signed in as {} <{}>", user.username, user.email);
    Ok(())
}

pub async fn sign_out(aora: &Aora) -> Result<()> {
    if aora.client().fallback_cookies().is_none() {
        println!("Not signed in.");
        return Ok(());
    }
    match aora.sign_out().await {
        Ok(()) => {}
        // Already expired server-side; only the local copy is left.
        Err(err) if err.is_unauthorized() => {
            tracing::debug!("session already gone: {err}");
            aora.client().set_fallback_cookies(None);
        }
        Err(err) => return Err(err).context("sign out"),
    }
    credentials::clear(&paths::session_path())?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(aora: &Aora, json: bool) -> Result<()> {
    let user = aora.get_current_user().await.map_err(not_signed_in)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!("{} <{}>", user.username, user.email);
        println!("user id:    {}", user.id);
        println!("account id: {}", user.account_id);
        println!("avatar:     {}", user.avatar);
    }
    Ok(())
}
