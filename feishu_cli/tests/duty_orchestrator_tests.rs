//! Duty orchestrator tests against a mock webhook

use feishu_cli::config::AppConfig;
use feishu_cli::error::ErrorCategory;
use feishu_cli::orchestrators::duty_orchestrator::{
    DutyOrchestrator, OnceOptions, OnceOutcome, render_status,
};
use feishu_client_core::Member;
use feishu_test_utils::{MockFeishu, RosterBuilder, TempRoster};

fn config_for(roster: &TempRoster, webhook_url: Option<String>) -> AppConfig {
    let mut config = AppConfig::default();
    config.apply_cli_overrides(Some(roster.path().to_path_buf()));
    if let Some(url) = webhook_url {
        config.webhook.url = url;
    }
    config
}

#[tokio::test]
async fn test_run_stops_on_shutdown_and_initializes_roster() {
    let roster = TempRoster::empty_dir();
    let config = config_for(&roster, Some("https://example.invalid/hook".to_string()));

    DutyOrchestrator::new(config)
        .run_until(async {})
        .await
        .unwrap();

    assert!(roster.path().exists());
    assert!(roster.reload().is_empty());
}

#[tokio::test]
async fn test_run_requires_webhook() {
    let roster = RosterBuilder::new().with_member("Alice").write_temp();

    let err = DutyOrchestrator::new(config_for(&roster, None))
        .run_until(async {})
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Misuse);
    assert!(err.to_string().contains("webhook.url"));
}

#[tokio::test]
async fn test_run_rejects_bad_schedule_time() {
    let roster = RosterBuilder::new().with_member("Alice").write_temp();
    let mut config = config_for(&roster, Some("https://example.invalid/hook".to_string()));
    config.schedule.time = "noon".to_string();

    let err = DutyOrchestrator::new(config)
        .run_until(async {})
        .await
        .unwrap_err();

    assert!(err.to_string().contains("schedule.time"));
}

#[tokio::test]
async fn test_once_dry_run_previews_without_sending() {
    let mock = MockFeishu::start().await;
    let roster = RosterBuilder::new().with_members(&["Alice", "Bob"]).write_temp();
    let orchestrator = DutyOrchestrator::new(config_for(&roster, Some(mock.webhook_url())));

    let outcome = orchestrator
        .once(OnceOptions {
            dry_run: true,
            ..OnceOptions::default()
        })
        .await
        .unwrap();

    assert_eq!(outcome, OnceOutcome::Previewed(Member::new("Alice", "ou_alice")));
    assert_eq!(mock.request_count().await, 0);
    assert_eq!(roster.reload().last_index, None);
}

#[tokio::test]
async fn test_once_sends_next_member() {
    let mock = MockFeishu::start().await;
    mock.expect_webhook_success().await;
    let roster = RosterBuilder::new()
        .with_members(&["Alice", "Bob"])
        .with_last_index(0)
        .write_temp();
    let orchestrator = DutyOrchestrator::new(config_for(&roster, Some(mock.webhook_url())));

    let outcome = orchestrator
        .once(OnceOptions {
            assume_yes: true,
            ..OnceOptions::default()
        })
        .await
        .unwrap();

    assert_eq!(outcome, OnceOutcome::Sent(Member::new("Bob", "ou_bob")));
    let saved = roster.reload();
    assert_eq!(saved.last_index, Some(1));
    assert!(saved.last_date.is_some());
}

#[tokio::test]
async fn test_once_unreachable_webhook_is_network_error() {
    let mock = MockFeishu::start().await;
    let url = mock.webhook_url();
    drop(mock);
    let roster = RosterBuilder::new().with_member("Alice").write_temp();

    let err = DutyOrchestrator::new(config_for(&roster, Some(url)))
        .once(OnceOptions {
            assume_yes: true,
            ..OnceOptions::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Network);
}

#[test]
fn test_status_marks_last_and_next() {
    let roster = RosterBuilder::new()
        .with_members(&["Alice", "Bob", "Carol"])
        .with_last_index(2)
        .build();
    let config = AppConfig::default();

    let status = render_status(&roster, &config, std::path::Path::new("schedule.json"));

    assert!(status.contains("Roster file: schedule.json"));
    assert!(status.contains("Alice  ou_alice  <- next"));
    assert!(status.contains("Carol  ou_carol  <- last on duty"));
    assert!(status.contains("Reminder time: 09:00"));
}
