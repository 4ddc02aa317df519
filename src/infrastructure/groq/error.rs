use thiserror::Error;

/// Errors that can occur when calling the chat completions API
#[derive(Error, Debug)]
pub enum LlmApiError {
    /// Invalid request parameters or malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed due to invalid or missing API key
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limit exceeded, retry after waiting
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// API server encountered an internal error
    #[error("API server error: {0}")]
    ServerError(String),

    /// Network error occurred during request
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization or deserialization error
    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The response carried no completion content
    #[error("Completion response contained no choices")]
    EmptyCompletion,

    /// Unknown error occurred
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl LlmApiError {
    /// Returns true if this error is transient and should be retried
    pub fn is_transient(&self) -> bool {
        match self {
            LlmApiError::RateLimitExceeded | LlmApiError::ServerError(_) => true,
            LlmApiError::NetworkError(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }

    /// Create error from HTTP status code and response body
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 | 404 | 422 => LlmApiError::InvalidRequest(body),
            401 | 403 => LlmApiError::AuthenticationFailed(body),
            429 => LlmApiError::RateLimitExceeded,
            500..=599 => LlmApiError::ServerError(body),
            _ => LlmApiError::Unknown(format!("HTTP {status}: {body}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn rate_limit_is_transient() {
        assert!(LlmApiError::RateLimitExceeded.is_transient());
    }

    #[test]
    fn server_error_is_transient() {
        assert!(LlmApiError::ServerError("boom".to_string()).is_transient());
    }

    #[test]
    fn auth_failure_is_permanent() {
        assert!(!LlmApiError::AuthenticationFailed("bad key".to_string()).is_transient());
    }

    #[test]
    fn invalid_request_is_permanent() {
        assert!(!LlmApiError::InvalidRequest("bad params".to_string()).is_transient());
    }

    #[test]
    fn empty_completion_is_permanent() {
        assert!(!LlmApiError::EmptyCompletion.is_transient());
    }

    #[test]
    fn from_status_maps_client_and_server_codes() {
        assert!(matches!(
            LlmApiError::from_status(StatusCode::BAD_REQUEST, String::new()),
            LlmApiError::InvalidRequest(_)
        ));
        assert!(matches!(
            LlmApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            LlmApiError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            LlmApiError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            LlmApiError::RateLimitExceeded
        ));
        assert!(matches!(
            LlmApiError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            LlmApiError::ServerError(_)
        ));
        assert!(matches!(
            LlmApiError::from_status(StatusCode::IM_A_TEAPOT, String::new()),
            LlmApiError::Unknown(_)
        ));
    }
}
