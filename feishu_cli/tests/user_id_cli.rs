use assert_cmd::Command;
use feishu_test_utils::MockFeishu;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// `feishu-user-id` with an empty config dir and no ambient credentials
fn user_id(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("feishu-user-id").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env_remove("FEISHU_APP_ID")
        .env_remove("FEISHU_APP_SECRET")
        .env_remove("FEISHU_TOOLS_CONTACT__BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn with_mock(home: &TempDir, mock: &MockFeishu) -> Command {
    let mut cmd = user_id(home);
    cmd.env("FEISHU_TOOLS_CONTACT__BASE_URL", mock.uri())
        .env("FEISHU_APP_ID", "cli_test_app")
        .env("FEISHU_APP_SECRET", "test_secret");
    cmd
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    user_id(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_credentials_exit_one_without_network() {
    let mock = MockFeishu::start().await;
    let home = TempDir::new().unwrap();

    user_id(&home)
        .env("FEISHU_TOOLS_CONTACT__BASE_URL", mock.uri())
        .args(["--mobile", "13800138000"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FEISHU_APP_ID"));

    assert_eq!(mock.request_count().await, 0);
}

#[test]
fn test_blank_credential_counts_as_missing() {
    let home = TempDir::new().unwrap();
    user_id(&home)
        .args(["-m", "13800138000", "--app-id", "cli_x", "--app-secret", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("App Secret"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_inputs_exit_one_without_network() {
    let mock = MockFeishu::start().await;
    let home = TempDir::new().unwrap();

    with_mock(&home, &mock)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--mobile"));

    assert_eq!(mock.request_count().await, 0);
}

#[test]
fn test_unknown_output_format_exit_one() {
    let home = TempDir::new().unwrap();
    user_id(&home)
        .args(["-m", "13800138000", "-o", "csv"])
        .assert()
        .code(1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_table_output() {
    let mock = MockFeishu::start().await;
    mock.expect_tenant_token().await;
    mock.expect_batch_get_id(json!({
        "user_list": [
            {"user_id": "ou_7d8a6e6df7621556ce0d21922b676706", "mobile": "13800138000"},
            {"mobile": "13900000000"}
        ],
        "errors": [{"email": "nobody@example.com", "msg": "user not found"}]
    }))
    .await;
    let home = TempDir::new().unwrap();

    with_mock(&home, &mock)
        .args(["-m", "13800138000", "-m", "13900000000", "-e", "nobody@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-".repeat(80)))
        .stdout(predicate::str::contains(format!(
            "{:<40} | {:<10} | {}",
            "ou_7d8a6e6df7621556ce0d21922b676706", "Mobile", "13800138000"
        )))
        .stdout(predicate::str::contains("N/A"))
        .stdout(predicate::str::contains(
            "Email: nobody@example.com - user not found",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_output() {
    let mock = MockFeishu::start().await;
    mock.expect_tenant_token().await;
    mock.expect_batch_get_id(json!({
        "user_list": [{"user_id": "ou_abc", "email": "alice@example.com"}]
    }))
    .await;
    let home = TempDir::new().unwrap();

    let output = with_mock(&home, &mock)
        .args(["--email", "alice@example.com", "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        json!({
            "success": true,
            "data": {
                "user_list": [{"user_id": "ou_abc", "email": "alice@example.com"}],
                "errors": []
            }
        })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_rejection_exit_one() {
    let mock = MockFeishu::start().await;
    mock.expect_tenant_token().await;
    mock.expect_batch_get_id_reply(json!({"code": 40001, "msg": "no permission"}))
        .await;
    let home = TempDir::new().unwrap();

    with_mock(&home, &mock)
        .args(["-m", "13800138000"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "failed to resolve user ids: 40001, no permission",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_flags_override_environment_credentials() {
    let mock = MockFeishu::start().await;
    mock.expect_tenant_token().await;
    mock.expect_batch_get_id(json!({"user_list": []})).await;
    let home = TempDir::new().unwrap();

    with_mock(&home, &mock)
        .args(["-m", "13800138000", "--app-id", "cli_flag_app", "--app-secret", "flag_secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching users found"));

    let bodies = mock.received_bodies().await;
    assert_eq!(bodies[0]["app_id"], "cli_flag_app");
    assert_eq!(bodies[0]["app_secret"], "flag_secret");
}
