//! Group bot webhook notification
//!
//! Builds the text message that mentions the duty member and posts it to
//! the configured webhook. Delivery counts as successful only when the
//! server answers HTTP 200 *and* the JSON body carries `"code": 0`.

use crate::config::{MessageConfig, WebhookConfig};
use crate::error::{ProtocolError, Result};
use crate::http;
use crate::roster::Member;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Destination for duty reminders
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver the reminder for `member`
    async fn notify(&self, member: &Member) -> Result<()>;
}

/// Body of a text message sent to a bot webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookMessage {
    pub msg_type: String,
    pub content: TextContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

impl WebhookMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            msg_type: "text".to_string(),
            content: TextContent { text: text.into() },
        }
    }
}

/// Webhook reply; only `code` decides success
#[derive(Debug, Deserialize)]
struct WebhookReply {
    code: Option<i64>,
    #[serde(default)]
    msg: Option<String>,
}

/// Inline tag that makes the client render an @-mention
pub fn mention_tag(member: &Member) -> String {
    format!("<at user_id=\"{}\">{}</at>", member.platform_id, member.name)
}

/// Full reminder text for `member`
pub fn reminder_text(message: &MessageConfig, member: &Member) -> String {
    format!("{}{}{}", message.prefix, mention_tag(member), message.suffix)
}

/// Posts reminders to a group bot webhook
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook: WebhookConfig,
    message: MessageConfig,
}

impl WebhookNotifier {
    /// Create a notifier; fails if the webhook URL is missing or not HTTP(S)
    pub fn new(webhook: WebhookConfig, message: MessageConfig) -> Result<Self> {
        webhook.validate()?;
        let client = http::build_client(webhook.timeout())?;
        Ok(Self {
            client,
            webhook,
            message,
        })
    }

    /// Message that would be posted for `member`
    pub fn build_message(&self, member: &Member) -> WebhookMessage {
        WebhookMessage::text(reminder_text(&self.message, member))
    }

    /// Post the reminder and report the typed outcome
    pub async fn deliver(&self, member: &Member) -> Result<()> {
        let message = self.build_message(member);
        log::debug!("Posting reminder to webhook: {}", message.content.text);

        let response = self
            .client
            .post(&self.webhook.url)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = http::body_text(response).await;
            return Err(ProtocolError::http(status.as_u16(), body).into());
        }

        let body = http::body_text(response).await;
        let reply: WebhookReply = serde_json::from_str(&body)
            .map_err(|e| ProtocolError::malformed_response(format!("{e}: {body}")))?;

        match reply.code {
            Some(0) => Ok(()),
            Some(code) => Err(ProtocolError::api(code, reply.msg.unwrap_or(body)).into()),
            None => Err(
                ProtocolError::malformed_response(format!("missing code field: {body}")).into(),
            ),
        }
    }

    /// Post the reminder, logging the outcome; `true` on success
    pub async fn send(&self, member: &Member) -> bool {
        match self.deliver(member).await {
            Ok(()) => {
                log::info!("Reminder sent: {}", self.build_message(member).content.text);
                true
            }
            Err(e) => {
                log::error!("Failed to send reminder for {}: {e}", member.name);
                false
            }
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, member: &Member) -> Result<()> {
        self.deliver(member).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_mention_tag() {
        let member = Member::new("Alice", "ou_7d8a6e6df7621556ce0d21922b676706");
        assert_eq!(
            mention_tag(&member),
            "<at user_id=\"ou_7d8a6e6df7621556ce0d21922b676706\">Alice</at>"
        );
    }

    #[test]
    fn test_message_body_shape() {
        let message = MessageConfig {
            prefix: "On duty: ".to_string(),
            suffix: " sweep the floor!".to_string(),
        };
        let body = WebhookMessage::text(reminder_text(&message, &Member::new("Bob", "ou_b")));

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "msg_type": "text",
                "content": {"text": "On duty: <at user_id=\"ou_b\">Bob</at> sweep the floor!"}
            })
        );
    }

    #[test]
    fn test_notifier_requires_webhook_url() {
        let result = WebhookNotifier::new(WebhookConfig::default(), MessageConfig::default());
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
