use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use time::OffsetDateTime;

use crate::model::{StoredCookie, TOKEN_COOKIE_NAME};

use super::{CredentialStore, LocalStore, write_atomic};

type CookieJar = BTreeMap<String, StoredCookie>;

fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

impl LocalStore {
    fn read_jar(&self) -> Result<CookieJar> {
        let Some(path) = self.cookie_path() else {
            return Ok(CookieJar::new());
        };
        if !path.exists() {
            return Ok(CookieJar::new());
        }
        let bytes = fs::read(&path).context("read cookies.json")?;
        let jar: CookieJar = serde_json::from_slice(&bytes).context("parse cookies.json")?;
        Ok(jar)
    }

    fn write_jar(&self, jar: &CookieJar) -> Result<()> {
        let Some(path) = self.cookie_path() else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(jar).context("serialize cookies")?;
        write_atomic(&path, &bytes).context("write cookies.json")
    }

    pub fn read_token_cookie(&self) -> Result<Option<StoredCookie>> {
        let jar = self.read_jar()?;
        Ok(jar
            .get(TOKEN_COOKIE_NAME)
            .filter(|c| !c.is_expired(now_unix()))
            .cloned())
    }

    pub fn set_token_cookie(&self, token: &str) -> Result<()> {
        let mut jar = self.read_jar().unwrap_or_default();
        jar.insert(
            TOKEN_COOKIE_NAME.to_string(),
            StoredCookie::token(token, now_unix()),
        );
        self.write_jar(&jar)
    }

    pub fn remove_token_cookie(&self) -> Result<()> {
        let Some(path) = self.cookie_path() else {
            return Ok(());
        };
        if !path.exists() {
            return Ok(());
        }
        let mut jar = self.read_jar().unwrap_or_default();
        jar.remove(TOKEN_COOKIE_NAME);
        self.write_jar(&jar)
    }
}

impl CredentialStore for LocalStore {
    fn is_available(&self) -> bool {
        self.root().is_some()
    }

    fn save(&self, token: &str) {
        if !self.is_available() {
            return;
        }
        if let Err(err) = self.set_token_cookie(token) {
            tracing::warn!("saving token cookie failed: {:#}", err);
        }
    }

    fn read(&self) -> String {
        if !self.is_available() {
            return String::new();
        }
        match self.read_token_cookie() {
            Ok(cookie) => cookie.map(|c| c.value).unwrap_or_default(),
            Err(err) => {
                tracing::warn!("reading token cookie failed: {:#}", err);
                String::new()
            }
        }
    }

    fn clear(&self) {
        if let Err(err) = self.remove_token_cookie() {
            tracing::warn!("removing token cookie failed: {:#}", err);
        }
    }
}
