use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::model::AppConfig;
use crate::remote::RemoteClient;
use crate::session::{Bootstrap, BootstrapOutcome, TOKEN_ENV};
use crate::store::LocalStore;

/// Everything a front end needs before it can talk to the gist API: the
/// state directory, its config and a configured client.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<LocalStore>,
    pub config: AppConfig,
    pub gateway: Arc<RemoteClient>,
}

impl AppContext {
    /// An ephemeral context keeps nothing on disk: no config is read and no
    /// credential survives the process.
    pub fn open(
        state_dir: Option<PathBuf>,
        api_url: Option<&str>,
        ephemeral: bool,
    ) -> Result<Self> {
        let store = if ephemeral {
            LocalStore::detached()
        } else {
            let root = LocalStore::resolve_root(state_dir)?;
            LocalStore::open(&root)?
        };
        let mut config = store.read_config()?;
        if let Some(url) = api_url {
            config.api_base_url = url.to_string();
        }
        let gateway = RemoteClient::new(&config).context("create gist API client")?;
        tracing::debug!(
            api = gateway.base_url(),
            state_dir = ?store.root(),
            "context ready"
        );
        Ok(Self {
            store: Arc::new(store),
            config,
            gateway: Arc::new(gateway),
        })
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.config.settle_delay_ms)
    }

    pub fn env_token() -> Option<String> {
        std::env::var(TOKEN_ENV).ok()
    }

    /// Runs startup credential resolution against this context.
    pub fn bootstrap(&self, settle: bool) -> BootstrapOutcome {
        Bootstrap {
            gateway: self.gateway.as_ref(),
            store: self.store.as_ref(),
            env_token: Self::env_token(),
            settle_delay: if settle {
                self.settle_delay()
            } else {
                Duration::ZERO
            },
        }
        .run()
    }
}
