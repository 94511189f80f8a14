use std::sync::Arc;

use gistdeck::context::AppContext;
use gistdeck::session::{CredentialSource, SessionMode, TOKEN_ENV};
use gistdeck::store::MemoryCredentials;

use super::*;

pub(super) fn handle_login_command(opts: &GlobalOpts, token: Option<String>) -> Result<()> {
    let token = token
        .or_else(|| opts.token.clone())
        .context("a token is required (gistdeck login <TOKEN>)")?;
    let mut state = CollectionState::new(opts.ctx.store.clone());
    state
        .submit_credential(opts.ctx.gateway.as_ref(), &token)
        .context("login")?;

    println!("Logged in ({} gists)", state.records().len());
    match opts.ctx.store.root() {
        Some(root) => println!("Token stored in {}", root.display()),
        None => println!("Ephemeral session: token not stored"),
    }
    Ok(())
}

pub(super) fn handle_logout_command(opts: &GlobalOpts) -> Result<()> {
    let mut state = CollectionState::new(opts.ctx.store.clone());
    state.logout();
    println!("Logged out");
    Ok(())
}

fn source_label(source: Option<CredentialSource>) -> Option<&'static str> {
    source.map(|s| match s {
        CredentialSource::Stored => "stored",
        CredentialSource::Environment => "environment",
        CredentialSource::Submitted => "flag",
    })
}

pub(super) fn handle_status_command(opts: &GlobalOpts, json: bool) -> Result<()> {
    let stored = opts
        .ctx
        .store
        .read_token_cookie()
        .context("read stored token")?;
    let env_set = AppContext::env_token().is_some_and(|t| !t.trim().is_empty());

    let (mode, source, count, error) = match opts.token.as_deref() {
        Some(token) => {
            let mut state = CollectionState::new(Arc::new(MemoryCredentials::new()));
            match state.submit_credential(opts.ctx.gateway.as_ref(), token) {
                Ok(()) => (
                    state.mode(),
                    Some(CredentialSource::Submitted),
                    state.records().len(),
                    None,
                ),
                Err(err) => (SessionMode::CredentialInvalid, None, 0, Some(err.to_string())),
            }
        }
        None => {
            let outcome = opts.ctx.bootstrap(false);
            (
                outcome.mode,
                outcome.source,
                outcome.records.len(),
                outcome.error,
            )
        }
    };
    let source = source_label(source);

    if json {
        let v = serde_json::json!({
            "state_dir": opts.ctx.store.root().map(|p| p.display().to_string()),
            "api_base_url": opts.ctx.gateway.base_url(),
            "stored_token": stored.is_some(),
            "stored_token_expires_at": stored.as_ref().map(|c| c.expires_at),
            "env_token": env_set,
            "mode": mode.label(),
            "source": source,
            "gists": count,
            "error": error,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&v).context("serialize status json")?
        );
        return Ok(());
    }

    match opts.ctx.store.root() {
        Some(root) => println!("state_dir: {}", root.display()),
        None => println!("state_dir: (ephemeral)"),
    }
    println!("api: {}", opts.ctx.gateway.base_url());
    println!(
        "stored_token: {}",
        if stored.is_some() { "yes" } else { "no" }
    );
    println!("{}: {}", TOKEN_ENV, if env_set { "set" } else { "unset" });
    println!("mode: {}", mode.label());
    if let Some(source) = source {
        println!("source: {}", source);
        println!("gists: {}", count);
    }
    if let Some(err) = error {
        println!("error: {}", err);
    }
    Ok(())
}
