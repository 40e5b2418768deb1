/// Error type shared by the transport and the resource adapters
use thiserror::Error;

/// Errors surfaced by management API operations.
///
/// Adapters never construct these themselves; whatever the transport returns
/// reaches the caller unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection failure, TLS failure or a broken response body
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON for the expected type
    #[error("failed to decode API response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialised
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The caller's cancellation token fired before the exchange finished
    #[error("request cancelled")]
    Cancelled,

    /// The base URL or a request path could not be turned into a URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The client could not be built from the supplied settings
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status for [`Error::Status`], `None` for every other kind
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessors() {
        let err = Error::Status {
            status: 404,
            body: "{}".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("404"));

        assert_eq!(Error::Cancelled.status(), None);
        assert!(!Error::Cancelled.is_not_found());
    }
}
