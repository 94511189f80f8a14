mod config;
mod gist;

pub use self::config::{
    AppConfig, DEFAULT_API_BASE_URL, DEFAULT_API_VERSION, StoredCookie, TOKEN_COOKIE_MAX_AGE,
    TOKEN_COOKIE_NAME,
};
pub use self::gist::{FileContent, FilePatch, Gist, GistFile, GistPatch, NewGist};
