//! Mock Feishu open platform built on wiremock

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the reminder webhook is mounted on
pub const WEBHOOK_PATH: &str = "/open-apis/bot/v2/hook/test-hook";

const TENANT_TOKEN_PATH: &str = "/open-apis/auth/v3/tenant_access_token/internal";
const BATCH_GET_ID_PATH: &str = "/open-apis/contact/v3/users/batch_get_id";

/// Token handed out by [`MockFeishu::expect_tenant_token`]
pub const TEST_TENANT_TOKEN: &str = "t-test-tenant-token";

/// Mock server for the webhook and contact endpoints
pub struct MockFeishu {
    server: MockServer,
}

impl MockFeishu {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to use as `contact.base_url`
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// URL to use as `webhook.url`
    pub fn webhook_url(&self) -> String {
        format!("{}{WEBHOOK_PATH}", self.server.uri())
    }

    /// Webhook answers with the given status and JSON body
    pub async fn expect_webhook_reply(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(WEBHOOK_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Webhook accepts every message
    pub async fn expect_webhook_success(&self) {
        self.expect_webhook_reply(200, json!({"code": 0, "msg": "success", "data": {}}))
            .await;
    }

    /// Token endpoint issues [`TEST_TENANT_TOKEN`]
    pub async fn expect_tenant_token(&self) {
        Mock::given(method("POST"))
            .and(path(TENANT_TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "msg": "ok",
                "tenant_access_token": TEST_TENANT_TOKEN,
                "expire": 7200
            })))
            .mount(&self.server)
            .await;
    }

    /// Token endpoint rejects the app credentials
    pub async fn expect_tenant_token_rejected(&self, code: i64, msg: &str) {
        Mock::given(method("POST"))
            .and(path(TENANT_TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": code,
                "msg": msg
            })))
            .mount(&self.server)
            .await;
    }

    /// Batch lookup answers `data` for requests carrying the test token
    pub async fn expect_batch_get_id(&self, data: Value) {
        self.expect_batch_get_id_reply(json!({"code": 0, "msg": "success", "data": data}))
            .await;
    }

    /// Batch lookup answers the raw envelope `reply`
    pub async fn expect_batch_get_id_reply(&self, reply: Value) {
        Mock::given(method("POST"))
            .and(path(BATCH_GET_ID_PATH))
            .and(query_param("user_id_type", "open_id"))
            .and(header(
                "authorization",
                format!("Bearer {TEST_TENANT_TOKEN}").as_str(),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request received so far
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or_default()
    }
}
