use http::StatusCode;
use thiserror::Error;

/// Server errors and rate limiting may go away on their own.
#[must_use]
pub fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Reqwest client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Response failed with status: {}", reqwest::Response::status(.0))]
    StatusCode(Box<reqwest::Response>),

    #[error(transparent)]
    Http(#[from] http::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Operation timed out")]
    Timeout,
}

impl Error {
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::StatusCode(response) => Some(response.status()),
            Self::Client(err) => err.status(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Client(err) => err.is_connect() || err.is_timeout(),
            Self::StatusCode(response) => is_transient_status(response.status()),
            Self::Http(_) | Self::Decode(_) | Self::Timeout => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_status() {
        assert!(is_transient_status(StatusCode::BAD_GATEWAY));
        assert!(is_transient_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_transient_status(StatusCode::NOT_FOUND));
        assert!(!is_transient_status(StatusCode::OK));
        assert!(!Error::Timeout.is_transient());
    }
}
