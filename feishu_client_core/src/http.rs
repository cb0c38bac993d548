//! Shared HTTP client construction

use crate::error::{Error, ProtocolError, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("feishu-tools/", env!("CARGO_PKG_VERSION"));

/// Build a client with the given request timeout
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| {
            Error::from(ProtocolError::transport(format!(
                "failed to build HTTP client: {e}"
            )))
        })
}

/// Read the body of a response as text, used for error reporting
pub(crate) async fn body_text(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}
