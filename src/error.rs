//! Error taxonomy shared by the gateway and the controllers.

/// Failures surfaced by gist operations.
///
/// Gateway errors are never retried; controllers record the message for the
/// user and leave their state untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GistError {
    /// Non-2xx response or transport failure. `status` is `None` when no
    /// response arrived.
    #[error("{action}: {status_text}")]
    Fetch {
        action: &'static str,
        status: Option<u16>,
        status_text: String,
    },

    /// 403 on update: the token lacks the `gist` scope.
    #[error("Forbidden: Your token may not have 'gist' scope permissions")]
    Permission,

    /// 404 on update.
    #[error("Gist not found or you don't have permission to edit it")]
    NotFound,

    /// Rejected locally before any network call.
    #[error("{0}")]
    Validation(String),

    /// The credential was rejected while listing gists.
    #[error("Failed to fetch gists. Please check your token.")]
    CredentialInvalid,
}

impl GistError {
    pub(crate) fn fetch(action: &'static str, status_text: impl Into<String>) -> Self {
        GistError::Fetch {
            action,
            status: None,
            status_text: status_text.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GistError::Fetch { status, .. } => *status,
            GistError::Permission => Some(403),
            GistError::NotFound => Some(404),
            GistError::Validation(_) | GistError::CredentialInvalid => None,
        }
    }
}
