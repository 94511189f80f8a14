use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::AppConfig;

mod credentials;
mod memory;

pub use self::memory::MemoryCredentials;

const STATE_DIR_ENV: &str = "GISTDECK_HOME";
const CONFIG_FILE: &str = "config.json";
const COOKIE_FILE: &str = "cookies.json";
const LOG_FILE: &str = "gistdeck.log";

/// Where the access token lives between runs.
///
/// Implementations never fail: persistence problems are logged and the
/// operation degrades to a no-op (or an empty read).
pub trait CredentialStore: Send + Sync {
    /// False outside a browsing context, i.e. when nothing can be persisted.
    fn is_available(&self) -> bool;

    fn save(&self, token: &str);

    /// The stored token, or an empty string when there is none.
    fn read(&self) -> String;

    fn clear(&self);

    fn has_token(&self) -> bool {
        !self.read().is_empty()
    }
}

/// On-disk state directory holding the config and the credential cookie.
///
/// A detached store has no directory: reads come back empty and writes are
/// dropped.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: Option<PathBuf>,
}

impl LocalStore {
    /// `--state-dir`, then `$GISTDECK_HOME`, then the platform config dir.
    pub fn resolve_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(p) = explicit {
            return Ok(p);
        }
        if let Some(p) = std::env::var_os(STATE_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(p));
        }
        let base = dirs::config_dir().context("no config directory on this platform")?;
        Ok(base.join("gistdeck"))
    }

    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create state dir {}", root.display()))?;
        Ok(Self {
            root: Some(root.to_path_buf()),
        })
    }

    pub fn detached() -> Self {
        Self { root: None }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.root.as_ref().map(|r| r.join(LOG_FILE))
    }

    pub fn read_config(&self) -> Result<AppConfig> {
        let Some(root) = &self.root else {
            return Ok(AppConfig::default());
        };
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let cfg: AppConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &AppConfig) -> Result<()> {
        let Some(root) = &self.root else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&root.join(CONFIG_FILE), &bytes).context("write config.json")?;
        Ok(())
    }

    fn cookie_path(&self) -> Option<PathBuf> {
        self.root.as_ref().map(|r| r.join(COOKIE_FILE))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
