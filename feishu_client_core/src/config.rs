//! Configuration handed to the core components at construction time
//!
//! Every endpoint and file location is carried in one of these structs so
//! tests can point the components at a mock server or a temporary file.

use crate::error::{Error, Result, ValidationError};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default Feishu open platform host
pub const DEFAULT_OPEN_API_BASE: &str = "https://open.feishu.cn";

/// Default time of day for the duty reminder
pub const DEFAULT_REMINDER_TIME: &str = "09:00";

/// Group bot webhook settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Full webhook URL, including the hook token
    pub url: String,
    pub timeout_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_seconds: 30,
        }
    }
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Check the URL is set and uses an HTTP scheme
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::missing_field("webhook.url").into());
        }
        validate_http_url("webhook.url", &self.url)?;
        validate_timeout("webhook.timeout_seconds", self.timeout_seconds)
    }
}

/// Text surrounding the mention tag in the reminder message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    pub prefix: String,
    pub suffix: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            prefix: "Today's cleaning duty: ".to_string(),
            suffix: " please remember to finish the cleaning today!".to_string(),
        }
    }
}

/// Location of the persisted duty roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub path: PathBuf,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("schedule.json"),
        }
    }
}

/// When the daily reminder fires
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Local wall-clock time, `HH:MM` or `HH:MM:SS`
    pub time: String,
    pub poll_interval_seconds: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            time: DEFAULT_REMINDER_TIME.to_string(),
            poll_interval_seconds: 60,
        }
    }
}

impl ScheduleConfig {
    /// Parse the configured time of day
    pub fn time_of_day(&self) -> Result<NaiveTime> {
        parse_time_of_day(&self.time)
    }

    pub fn poll_interval(&self) -> Result<Duration> {
        if self.poll_interval_seconds == 0 {
            return Err(ValidationError::invalid_parameter(
                "schedule.poll_interval_seconds",
                "must be greater than 0",
            )
            .into());
        }
        Ok(Duration::from_secs(self.poll_interval_seconds))
    }
}

/// Contact API settings for the user id lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    pub base_url: String,
    /// Identifier flavour returned by the batch lookup (`open_id`, `union_id`, `user_id`)
    pub user_id_type: String,
    pub timeout_seconds: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPEN_API_BASE.to_string(),
            user_id_type: "open_id".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ContactConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        validate_http_url("contact.base_url", &self.base_url)?;
        validate_timeout("contact.timeout_seconds", self.timeout_seconds)?;
        match self.user_id_type.as_str() {
            "open_id" | "union_id" | "user_id" => Ok(()),
            other => Err(ValidationError::invalid_parameter(
                "contact.user_id_type",
                &format!("unsupported id type '{other}'"),
            )
            .into()),
        }
    }
}

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| {
            Error::from(ValidationError::invalid_parameter(
                "schedule.time",
                "expected HH:MM or HH:MM:SS",
            ))
        })
}

fn validate_http_url(key: &str, url: &str) -> Result<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(ValidationError::invalid_parameter(key, "must start with http:// or https://").into())
    }
}

/// A zero timeout makes every request fail immediately
fn validate_timeout(key: &str, seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(ValidationError::invalid_parameter(key, "must be greater than 0").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(
            parse_time_of_day("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day(" 17:45:30 ").unwrap(),
            NaiveTime::from_hms_opt(17, 45, 30).unwrap()
        );
        assert!(parse_time_of_day("25:00").is_err());
        assert!(parse_time_of_day("nine").is_err());
    }

    #[test]
    fn test_webhook_requires_url() {
        let err = WebhookConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("webhook.url"));

        assert!(WebhookConfig::new("ftp://example.com/hook").validate().is_err());
        assert!(
            WebhookConfig::new("https://open.feishu.cn/open-apis/bot/v2/hook/abc")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let config = ScheduleConfig {
            poll_interval_seconds: 0,
            ..ScheduleConfig::default()
        };
        assert!(config.poll_interval().is_err());
        assert_eq!(
            ScheduleConfig::default().poll_interval().unwrap(),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let webhook = WebhookConfig {
            timeout_seconds: 0,
            ..WebhookConfig::new("https://open.feishu.cn/open-apis/bot/v2/hook/abc")
        };
        let err = webhook.validate().unwrap_err();
        assert!(err.to_string().contains("webhook.timeout_seconds"));

        let contact = ContactConfig {
            timeout_seconds: 0,
            ..ContactConfig::default()
        };
        let err = contact.validate().unwrap_err();
        assert!(err.to_string().contains("contact.timeout_seconds"));
    }

    #[test]
    fn test_contact_id_type_validation() {
        assert!(ContactConfig::default().validate().is_ok());

        let config = ContactConfig {
            user_id_type: "email".to_string(),
            ..ContactConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
