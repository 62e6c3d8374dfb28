use thiserror::Error;

/// Technical failure of one round trip to the chat endpoint.
///
/// Never shown to the user; collapsed into [`ChatError::Unavailable`] at the
/// controller boundary and only logged.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("unexpected HTTP status {0}")]
    BadStatus(u16),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("request timed out")]
    Timeout,
}

/// The single user-visible failure category of a chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("chat service unavailable")]
    Unavailable,
}

impl From<TransportError> for ChatError {
    fn from(_: TransportError) -> Self {
        ChatError::Unavailable
    }
}

/// Errors from a speech dictation provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictationError {
    #[error("dictation is not supported on this platform")]
    Unsupported,

    #[error("dictation failed: {0}")]
    Failed(String),
}

/// Errors from reading the widget configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        assert_eq!(
            TransportError::BadStatus(500).to_string(),
            "unexpected HTTP status 500"
        );
        assert_eq!(TransportError::Timeout.to_string(), "request timed out");
    }

    #[test]
    fn test_every_transport_error_collapses_to_unavailable() {
        for err in [
            TransportError::NetworkUnavailable("refused".to_string()),
            TransportError::BadStatus(502),
            TransportError::MalformedResponse("eof".to_string()),
            TransportError::Timeout,
        ] {
            assert_eq!(ChatError::from(err), ChatError::Unavailable);
        }
    }

    #[test]
    fn test_dictation_error_display() {
        let err = DictationError::Failed("no-speech".to_string());
        assert_eq!(err.to_string(), "dictation failed: no-speech");
    }
}
