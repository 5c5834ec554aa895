use thiserror::Error;

/// Errors talking to the Record Store.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Record Store answered with an error status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// No token, or the Record Store rejected it.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Error body as sent by the Record Store, which isn't consistent about the key.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
