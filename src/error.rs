/// Error types for the translation client
///
/// The decoder is deliberately lenient: individual missing or mistyped
/// response positions degrade to zero values and never surface here. Only
/// three stages can fail as a whole: building the request, talking to the
/// endpoint, and a response whose top level is not a JSON array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Error while constructing the outgoing request (URL, client setup)
    Request(String),
    /// Network failure, timeout, or non-200 status from the endpoint
    Transport(String),
    /// Response body is not valid JSON or not a top-level array
    MalformedPayload(String),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::Request(msg) => write!(f, "Request error: {}", msg),
            TranslateError::Transport(msg) => write!(f, "Transport error: {}", msg),
            TranslateError::MalformedPayload(msg) => write!(f, "Malformed payload: {}", msg),
        }
    }
}

impl std::error::Error for TranslateError {}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranslateError::Transport(format!("request timed out: {}", err))
        } else {
            TranslateError::Transport(err.to_string())
        }
    }
}

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;
