use reqwest::StatusCode;
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};

use super::*;

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

pub(super) fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

impl RemoteClient {
    pub(super) fn auth(&self, token: &str) -> String {
        format!("token {}", token)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Adds the auth and API version headers every call carries.
    pub(super) fn authed(&self, req: RequestBuilder, token: &str) -> RequestBuilder {
        req.header(AUTHORIZATION, self.auth(token))
            .header(ACCEPT, ACCEPT_GITHUB_JSON)
            .header(API_VERSION_HEADER, self.api_version.as_str())
    }

    pub(super) fn send(
        &self,
        req: RequestBuilder,
        action: &'static str,
    ) -> Result<Response, GistError> {
        req.send().map_err(|err| {
            tracing::warn!(action, "request failed: {}", err);
            GistError::fetch(action, err.to_string())
        })
    }

    pub(super) fn ensure_ok(
        &self,
        resp: Response,
        action: &'static str,
    ) -> Result<Response, GistError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        tracing::debug!(action, status = status.as_u16(), "non-success status");
        Err(GistError::Fetch {
            action,
            status: Some(status.as_u16()),
            status_text: status_text(status),
        })
    }

    pub(super) fn parse<T: serde::de::DeserializeOwned>(
        &self,
        resp: Response,
        action: &'static str,
    ) -> Result<T, GistError> {
        let status = resp.status().as_u16();
        resp.json().map_err(|err| GistError::Fetch {
            action,
            status: Some(status),
            status_text: format!("invalid response body ({})", err),
        })
    }
}
