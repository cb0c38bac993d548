//! Remote API related error types

use thiserror::Error;

/// Errors raised while talking to the Feishu open platform or a bot webhook
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Server answered with a non-200 HTTP status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Platform answered 200 but reported a non-zero business code
    #[error("Feishu API error: {code} - {message}")]
    Api { code: i64, message: String },

    /// Request never completed (connect failure, timeout, ...)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Response body could not be decoded
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },
}

impl ProtocolError {
    /// Create an HTTP status error
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create a business-code error
    pub fn api(code: i64, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Whether the request reached the server at all
    pub fn reached_server(&self) -> bool {
        !matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error() {
        let error = ProtocolError::http(500, "Internal server error");
        assert_eq!(error.to_string(), "HTTP 500: Internal server error");
        assert!(error.reached_server());
    }

    #[test]
    fn test_api_error() {
        let error = ProtocolError::api(19001, "param invalid");
        assert!(error.to_string().contains("19001"));
        assert!(error.to_string().contains("param invalid"));
    }

    #[test]
    fn test_transport_error() {
        let error = ProtocolError::transport("connection refused");
        assert!(error.to_string().contains("connection refused"));
        assert!(!error.reached_server());
    }
}
