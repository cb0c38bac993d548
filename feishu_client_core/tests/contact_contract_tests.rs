//! Contact API contract tests
//!
//! Token exchange, batch lookup request format, response normalization and
//! the mapping of failures onto `{success: false, error}`.

use feishu_client_core::contact::IdKind;
use feishu_client_core::error::{Error, ValidationError};
use feishu_client_core::{AppCredentials, ContactClient, ContactConfig, LookupRequest};
use feishu_test_utils::MockFeishu;
use serde_json::json;

fn client(mock: &MockFeishu) -> ContactClient {
    ContactClient::new(
        ContactConfig::default().with_base_url(mock.uri()),
        AppCredentials::new("cli_test_app", "test_secret"),
    )
    .unwrap()
}

fn mobiles(values: &[&str]) -> LookupRequest {
    LookupRequest::new(values.iter().map(|v| v.to_string()).collect(), Vec::new())
}

#[tokio::test]
async fn test_token_request_carries_credentials() {
    let mock = MockFeishu::start().await;
    mock.expect_tenant_token().await;

    let token = client(&mock).tenant_access_token().await.unwrap();

    assert_eq!(token, "t-test-tenant-token");
    assert_eq!(
        mock.received_bodies().await,
        vec![json!({"app_id": "cli_test_app", "app_secret": "test_secret"})]
    );
}

#[tokio::test]
async fn test_batch_lookup_normalizes_response() {
    let mock = MockFeishu::start().await;
    mock.expect_tenant_token().await;
    mock.expect_batch_get_id(json!({
        "user_list": [
            {"user_id": "ou_111", "mobile": "13800138000"},
            {"mobile": "13900000000"},
            {"user_id": "ou_222", "email": "bob@example.com"}
        ],
        "errors": [
            {"email": "bad@", "msg": "invalid email"}
        ]
    }))
    .await;

    let request = LookupRequest::new(
        vec!["13800138000".to_string(), "13900000000".to_string()],
        vec!["bob@example.com".to_string(), "bad@".to_string()],
    );
    let result = client(&mock).lookup(&request).await.unwrap();

    assert!(result.is_success());
    let data = result.data.unwrap();
    assert_eq!(data.user_list.len(), 3);
    assert_eq!(data.user_list[0].user_id.as_deref(), Some("ou_111"));
    assert_eq!(data.user_list[1].user_id, None);
    assert_eq!(data.errors[0].input(), Some((IdKind::Email, "bad@")));
    assert_eq!(data.errors[0].reason.as_deref(), Some("invalid email"));

    let bodies = mock.received_bodies().await;
    assert_eq!(
        bodies[1],
        json!({
            "mobiles": ["13800138000", "13900000000"],
            "emails": ["bob@example.com", "bad@"]
        })
    );
}

#[tokio::test]
async fn test_empty_request_fails_before_network() {
    let mock = MockFeishu::start().await;

    let result = client(&mock).lookup(&LookupRequest::default()).await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::MissingField { .. }))
    ));
    assert_eq!(mock.request_count().await, 0);
}

#[tokio::test]
async fn test_remote_rejection_becomes_failed_result() {
    let mock = MockFeishu::start().await;
    mock.expect_tenant_token().await;
    mock.expect_batch_get_id_reply(json!({"code": 40001, "msg": "no dept authority"}))
        .await;

    let result = client(&mock).lookup(&mobiles(&["13800138000"])).await.unwrap();

    assert!(!result.is_success());
    assert_eq!(
        result.error.as_deref(),
        Some("failed to resolve user ids: 40001, no dept authority")
    );
    assert!(result.data.is_none());
}

#[tokio::test]
async fn test_rejected_credentials_skip_lookup() {
    let mock = MockFeishu::start().await;
    mock.expect_tenant_token_rejected(10014, "app secret invalid")
        .await;

    let result = client(&mock).lookup(&mobiles(&["13800138000"])).await.unwrap();

    assert!(!result.is_success());
    assert!(result.error.unwrap().contains("app secret invalid"));
    assert_eq!(mock.request_count().await, 1);
}

#[tokio::test]
async fn test_missing_data_yields_empty_lists() {
    let mock = MockFeishu::start().await;
    mock.expect_tenant_token().await;
    mock.expect_batch_get_id_reply(json!({"code": 0, "msg": "success"}))
        .await;

    let result = client(&mock).lookup(&mobiles(&["13800138000"])).await.unwrap();

    let data = result.data.unwrap();
    assert!(data.user_list.is_empty());
    assert!(data.errors.is_empty());
}
