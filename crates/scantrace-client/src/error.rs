use std::fmt;

/// Result type for scantrace-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the client layer
#[derive(Debug)]
pub enum Error {
    /// HTTP transport failure (connection, timeout, TLS)
    Http(reqwest::Error),

    /// Service returned a non-success status
    Api { status: u16, message: String },

    /// Response body could not be decoded
    Decode(serde_json::Error),

    /// Scan could not be launched
    Launch(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(err) => write!(f, "HTTP error: {}", err),
            Error::Api { status, message } => write!(f, "API error ({}): {}", status, message),
            Error::Decode(err) => write!(f, "Decode error: {}", err),
            Error::Launch(msg) => write!(f, "Launch error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(err) => Some(err),
            Error::Decode(err) => Some(err),
            Error::Api { .. } | Error::Launch(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err)
    }
}
