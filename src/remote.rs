use anyhow::{Context, Result};

use crate::error::GistError;
use crate::model::{AppConfig, Gist, GistPatch, NewGist};

mod http_client;
mod operations;

/// The remote gist API, one HTTP request per call.
///
/// Every call is single-attempt: failures are returned to the caller as-is.
pub trait GistGateway: Send + Sync {
    fn list(&self, token: &str) -> Result<Vec<Gist>, GistError>;
    fn get_detail(&self, token: &str, id: &str) -> Result<Gist, GistError>;
    fn create(&self, token: &str, gist: &NewGist) -> Result<Gist, GistError>;
    fn update(&self, token: &str, id: &str, patch: &GistPatch) -> Result<Gist, GistError>;
    fn delete(&self, token: &str, id: &str) -> Result<(), GistError>;
}

pub struct RemoteClient {
    base_url: String,
    api_version: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(cfg: &AppConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            api_version: cfg.api_version.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
