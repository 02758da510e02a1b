//! Feed retrieval error types.

use std::fmt;

/// A non-200 answer from the feed provider, by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStatus {
    /// 302: the provider moved the resource
    Moved,
    /// 404: no feed for the requested line
    NotFound,
    /// 503: the provider is down or overloaded
    Unavailable,
    /// Any other status code
    Other(u16),
}

impl UpstreamStatus {
    /// Classify a status code; `None` means 200 OK.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => None,
            302 => Some(Self::Moved),
            404 => Some(Self::NotFound),
            503 => Some(Self::Unavailable),
            other => Some(Self::Other(other)),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::Moved => 302,
            Self::NotFound => 404,
            Self::Unavailable => 503,
            Self::Other(code) => *code,
        }
    }
}

impl fmt::Display for UpstreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved => write!(f, "resource moved (302)"),
            Self::NotFound => write!(f, "resource not found (404)"),
            Self::Unavailable => write!(f, "service unavailable (503)"),
            Self::Other(code) => write!(f, "unexpected status ({code})"),
        }
    }
}

/// Errors that can occur when retrieving a line's feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Network failure: DNS, connect, timeout, reset
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with something other than 200
    #[error("feed provider error: {0}")]
    Upstream(UpstreamStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_status_codes() {
        assert_eq!(UpstreamStatus::from_code(200), None);
        assert_eq!(UpstreamStatus::from_code(302), Some(UpstreamStatus::Moved));
        assert_eq!(UpstreamStatus::from_code(404), Some(UpstreamStatus::NotFound));
        assert_eq!(
            UpstreamStatus::from_code(503),
            Some(UpstreamStatus::Unavailable)
        );
        assert_eq!(
            UpstreamStatus::from_code(418),
            Some(UpstreamStatus::Other(418))
        );
        // Only 200 counts as success
        assert_eq!(
            UpstreamStatus::from_code(204),
            Some(UpstreamStatus::Other(204))
        );
    }

    #[test]
    fn code_roundtrip() {
        for code in [302, 404, 503, 500, 301] {
            let status = UpstreamStatus::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
    }

    #[test]
    fn error_display() {
        let err = FeedError::Upstream(UpstreamStatus::NotFound);
        assert_eq!(
            err.to_string(),
            "feed provider error: resource not found (404)"
        );

        let err = FeedError::Upstream(UpstreamStatus::Other(500));
        assert_eq!(err.to_string(), "feed provider error: unexpected status (500)");
    }
}
