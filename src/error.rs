use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the fetch layer, configuration and startup paths.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
}

impl Error {
    /// Short message suitable for the status bar or stderr.
    pub fn user_message(&self) -> String {
        match self {
            Error::Http(e) => format!("Network error: {}", e),
            Error::Status { status, .. } => format!("API returned HTTP {}", status),
            Error::Json(e) => format!("Unexpected API response: {}", e),
            Error::Io(e) => format!("File system error: {}", e),
            Error::ConfigParse { path, .. } => {
                format!("Could not parse {}", path.display())
            }
            Error::ConfigInvalid(msg) => format!("Configuration error: {}", msg),
        }
    }
}
