// Oracle failure taxonomy

use reqwest::StatusCode;
use thiserror::Error;

/// Why an oracle call produced no usable text
///
/// None of these abort a comparison; the aggregator turns them into
/// `ai_available = false`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("quota exhausted: {0}")]
    Quota(String),

    #[error("oracle call timed out: {0}")]
    Timeout(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl OracleError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = format!("status {}: {}", status.as_u16(), truncate(body, 300));
        match status.as_u16() {
            401 | 403 => OracleError::Auth(detail),
            429 => OracleError::Quota(detail),
            400 | 404 | 413 | 422 => OracleError::MalformedRequest(detail),
            408 | 504 => OracleError::Timeout(detail),
            _ => OracleError::Network(detail),
        }
    }

    /// Classify a transport-level failure
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OracleError::Timeout(err.to_string())
        } else if err.is_decode() {
            OracleError::MalformedResponse(err.to_string())
        } else if err.is_builder() {
            OracleError::MalformedRequest(err.to_string())
        } else {
            OracleError::Network(err.to_string())
        }
    }

    /// Short machine-readable kind for logs and responses
    pub fn kind(&self) -> &'static str {
        match self {
            OracleError::Network(_) => "network",
            OracleError::Auth(_) => "auth",
            OracleError::Quota(_) => "quota",
            OracleError::Timeout(_) => "timeout",
            OracleError::MalformedRequest(_) => "malformed_request",
            OracleError::MalformedResponse(_) => "malformed_response",
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
