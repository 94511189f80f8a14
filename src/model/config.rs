use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

pub const TOKEN_COOKIE_NAME: &str = "github_token";
/// 30 days in seconds.
pub const TOKEN_COOKIE_MAX_AGE: u64 = 30 * 24 * 60 * 60;

fn default_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_settle_delay_ms() -> u64 {
    100
}

fn default_user_agent() -> String {
    "gistdeck".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Sent as `X-GitHub-Api-Version`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Pause before the TUI bootstraps the session.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            api_base_url: default_api_base_url(),
            api_version: default_api_version(),
            settle_delay_ms: default_settle_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// The persisted credential, shaped like the browser cookie it replaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub same_site: String,
    pub max_age: u64,
    /// Unix seconds.
    pub expires_at: i64,
}

impl StoredCookie {
    pub fn token(value: &str, now: i64) -> Self {
        Self {
            name: TOKEN_COOKIE_NAME.to_string(),
            value: value.to_string(),
            path: "/".to_string(),
            same_site: "strict".to_string(),
            max_age: TOKEN_COOKIE_MAX_AGE,
            expires_at: now + TOKEN_COOKIE_MAX_AGE as i64,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}
