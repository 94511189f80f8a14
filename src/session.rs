//! Startup credential resolution.

use std::time::Duration;

use crate::error::GistError;
use crate::model::Gist;
use crate::remote::GistGateway;
use crate::store::CredentialStore;

pub const TOKEN_ENV: &str = "GISTDECK_TOKEN";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    Initializing,
    AwaitingCredential,
    CredentialInvalid,
    Authenticated,
}

impl SessionMode {
    pub fn label(self) -> &'static str {
        match self {
            SessionMode::Initializing => "initializing",
            SessionMode::AwaitingCredential => "awaiting-credential",
            SessionMode::CredentialInvalid => "credential-invalid",
            SessionMode::Authenticated => "authenticated",
        }
    }

    /// The landing screen shows for both of these.
    pub fn needs_credential(self) -> bool {
        matches!(
            self,
            SessionMode::AwaitingCredential | SessionMode::CredentialInvalid
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialSource {
    Stored,
    Environment,
    Submitted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub mode: SessionMode,
    /// Empty unless the mode is `Authenticated`.
    pub token: String,
    pub records: Vec<Gist>,
    pub error: Option<String>,
    pub source: Option<CredentialSource>,
}

impl BootstrapOutcome {
    fn unauthenticated(mode: SessionMode, error: Option<String>) -> Self {
        Self {
            mode,
            token: String::new(),
            records: Vec::new(),
            error,
            source: None,
        }
    }
}

pub struct Bootstrap<'a> {
    pub gateway: &'a dyn GistGateway,
    pub store: &'a dyn CredentialStore,
    /// Value of the environment fallback, if one was injected.
    pub env_token: Option<String>,
    pub settle_delay: Duration,
}

impl Bootstrap<'_> {
    /// Runs the startup sequence once. A stored token always wins over the
    /// environment fallback, even when the stored one turns out invalid.
    pub fn run(&self) -> BootstrapOutcome {
        if !self.settle_delay.is_zero() {
            std::thread::sleep(self.settle_delay);
        }

        if !self.store.is_available() {
            tracing::info!("no credential store available; waiting for a token");
            return BootstrapOutcome::unauthenticated(SessionMode::AwaitingCredential, None);
        }

        let stored = self.store.read();
        if !stored.is_empty() {
            return match self.gateway.list(&stored) {
                Ok(records) => {
                    tracing::info!(count = records.len(), "stored token accepted");
                    authenticated(stored, records, CredentialSource::Stored)
                }
                Err(err) => {
                    tracing::warn!("stored token rejected: {}", err);
                    self.store.clear();
                    BootstrapOutcome::unauthenticated(
                        SessionMode::CredentialInvalid,
                        Some(GistError::CredentialInvalid.to_string()),
                    )
                }
            };
        }

        let env_token = self
            .env_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if let Some(token) = env_token {
            return match self.gateway.list(token) {
                Ok(records) => {
                    tracing::info!(count = records.len(), "environment token accepted");
                    self.store.save(token);
                    authenticated(token.to_string(), records, CredentialSource::Environment)
                }
                Err(err) => {
                    tracing::warn!("environment token rejected: {}", err);
                    BootstrapOutcome::unauthenticated(
                        SessionMode::CredentialInvalid,
                        Some(format!(
                            "The token from {} was rejected. Enter a token to continue.",
                            TOKEN_ENV
                        )),
                    )
                }
            };
        }

        BootstrapOutcome::unauthenticated(SessionMode::AwaitingCredential, None)
    }
}

fn authenticated(token: String, records: Vec<Gist>, source: CredentialSource) -> BootstrapOutcome {
    BootstrapOutcome {
        mode: SessionMode::Authenticated,
        token,
        records,
        error: None,
        source: Some(source),
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
