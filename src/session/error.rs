use thiserror::Error;

use crate::api::ApiError;

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("session file is malformed: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("authentication failed: {0}")]
    AuthError(#[from] ApiError),
    #[error("not logged in")]
    NotLoggedIn,
}

impl SessionError {
    /// Message meant for the end user.
    pub fn client_display(&self) -> String {
        match self {
            Self::AuthError(e) => e.client_display(),
            Self::NotLoggedIn => String::from("Please log in first."),
            Self::IoError(_) | Self::JsonError(_) => {
                String::from("Unable to access the local session.")
            }
        }
    }
}
