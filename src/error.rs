use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Error creating directory: {source}")]
pub struct DirectoryError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Reasons a single download attempt produced no file.
///
/// The `Display` text is the message shown to the user, so every variant
/// reads differently.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error: Connection timed out. The server took too long to respond.")]
    Timeout,

    #[error("Error: Connection failed. Check your internet connection or the URL.")]
    Connection,

    #[error("Error: HTTP error occurred - {code} {reason}")]
    HttpStatus { code: u16, reason: String },

    #[error("Error: Too many redirects. The URL might be broken.")]
    TooManyRedirects,

    #[error("Error: Failed to download image - {0}")]
    Transport(String),

    #[error("Error: Failed to save file - {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl FetchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Maps a failure while reading the response body.
    pub fn body_read(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::TimedOut {
            return Self::Timeout;
        }

        match err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
        {
            Some(inner) if inner.is_timeout() => Self::Timeout,
            _ => Self::Transport(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_redirect() {
            Self::TooManyRedirects
        } else if err.is_connect() {
            Self::Connection
        } else if let Some(status) = err.status() {
            Self::HttpStatus {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}
