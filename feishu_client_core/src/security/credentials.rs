//! App credential resolution
//!
//! Explicit arguments win; the `FEISHU_APP_ID` / `FEISHU_APP_SECRET`
//! environment variables fill in whatever was not passed. Empty strings
//! count as absent.

use super::SecureString;
use crate::error::{Result, ValidationError};

/// Environment variable consulted when no app id argument is given
pub const APP_ID_ENV: &str = "FEISHU_APP_ID";

/// Environment variable consulted when no app secret argument is given
pub const APP_SECRET_ENV: &str = "FEISHU_APP_SECRET";

/// Credentials of a self-built Feishu app
#[derive(Debug, Clone)]
pub struct AppCredentials {
    pub app_id: String,
    pub app_secret: SecureString,
}

impl AppCredentials {
    /// Create credentials from already-validated values
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<SecureString>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Resolve credentials from arguments with process environment fallback
    pub fn resolve(app_id: Option<String>, app_secret: Option<String>) -> Result<Self> {
        Self::resolve_with(app_id, app_secret, |key| std::env::var(key).ok())
    }

    /// Resolve credentials using a caller-supplied environment lookup
    pub fn resolve_with<F>(
        app_id: Option<String>,
        app_secret: Option<String>,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_id = non_empty(app_id).or_else(|| non_empty(env(APP_ID_ENV)));
        let app_secret = non_empty(app_secret).or_else(|| non_empty(env(APP_SECRET_ENV)));

        match (app_id, app_secret) {
            (Some(app_id), Some(app_secret)) => Ok(Self::new(app_id, app_secret)),
            (None, _) => Err(ValidationError::missing_field("app_id").into()),
            (_, None) => Err(ValidationError::missing_field("app_secret").into()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
