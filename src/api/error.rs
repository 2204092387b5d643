use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Shown for every failure that isn't an answer from the backend.
pub const CONNECTION_FAILED: &str = "Failed to connect to server";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("NetworkError: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rejected: {message}")]
    Rejected { message: String },

    #[error("DecodeError: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("InvalidUrl: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Message meant for the end user.
    pub fn client_display(&self) -> String {
        match self {
            Self::Rejected { message } => message.clone(),
            Self::Network(_) | Self::Decode(_) | Self::InvalidUrl(_) => {
                String::from(CONNECTION_FAILED)
            }
        }
    }
}
