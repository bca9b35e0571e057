use thiserror::Error;

/// Failure of a remote analytics call
///
/// Callers treat every variant the same way; the split only feeds the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Request-level failures; body decoding maps to `Parse` at the call site
impl From<gloo_net::Error> for FetchError {
    fn from(err: gloo_net::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(FetchError::from(bad_json), FetchError::Parse(_)));

        let offline = gloo_net::Error::GlooError("offline".to_string());
        assert_eq!(
            FetchError::from(offline),
            FetchError::Network("offline".to_string())
        );
        assert_eq!(FetchError::Status(503).to_string(), "HTTP error: 503");
    }
}
