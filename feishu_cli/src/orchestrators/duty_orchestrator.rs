//! Duty reminder orchestrator
//!
//! Backs the `run`, `once` and `status` commands of `feishu-duty`.

use crate::config::AppConfig;
use crate::error::{CliError, CliResult, ErrorContext};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use colored::*;
use dialoguer::Confirm;
use feishu_client_core::notify::reminder_text;
use feishu_client_core::{
    CycleOutcome, DutyCycle, DutyRoster, Member, RosterStore, Scheduler, WebhookMessage,
    WebhookNotifier,
};
use log::{debug, info, warn};
use std::future::Future;
use std::sync::Arc;

/// Options of `feishu-duty once`
#[derive(Debug, Clone, Copy, Default)]
pub struct OnceOptions {
    /// Print the message without advancing or sending
    pub dry_run: bool,
    /// Skip the confirmation prompt
    pub assume_yes: bool,
    /// Whether a confirmation prompt can be shown
    pub interactive: bool,
}

/// Result of `feishu-duty once` that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnceOutcome {
    /// Dry run: message printed, roster untouched
    Previewed(Member),
    /// User declined the prompt, roster untouched
    Cancelled(Member),
    /// Roster advanced and reminder delivered
    Sent(Member),
}

/// Orchestrator for the duty bot commands
pub struct DutyOrchestrator {
    config: AppConfig,
    store: RosterStore,
}

impl DutyOrchestrator {
    pub fn new(config: AppConfig) -> Self {
        let store = RosterStore::new(&config.roster.path);
        Self { config, store }
    }

    fn notifier(&self) -> CliResult<WebhookNotifier> {
        WebhookNotifier::new(self.config.webhook.clone(), self.config.message.clone()).map_err(
            |e| {
                CliError::from(e).with_suggestion(
                    "Set it with 'feishu-duty config set webhook.url <url>' or FEISHU_TOOLS_WEBHOOK__URL",
                )
            },
        )
    }

    fn cycle(&self) -> CliResult<DutyCycle> {
        let notifier = self.notifier()?;
        Ok(DutyCycle::new(self.store.clone(), Arc::new(notifier)))
    }

    /// Run the daily scheduler until Ctrl-C
    pub async fn run(&self) -> CliResult<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Run the daily scheduler until `shutdown` resolves
    pub async fn run_until<S>(&self, shutdown: S) -> CliResult<()>
    where
        S: Future<Output = ()>,
    {
        let cycle = self.cycle()?;
        let scheduler = Scheduler::from_config(&self.config.schedule)?;

        let roster = self.store.load_or_init()?;
        if roster.is_empty() {
            warn!(
                "Roster {} has no members; reminders are skipped until members are added",
                self.store.path().display()
            );
        } else {
            info!(
                "Loaded roster with {} member(s) from {}",
                roster.members.len(),
                self.store.path().display()
            );
        }

        info!(
            "Duty reminder scheduled daily at {}, next run {}",
            self.config.schedule.time,
            scheduler.next_run()
        );

        let cycle = &cycle;
        scheduler
            .run(
                move || async move {
                    cycle.run(today()).await;
                },
                shutdown,
            )
            .await;

        info!("Duty reminder stopped");
        Ok(())
    }

    /// Rotate once and send immediately
    pub async fn once(&self, options: OnceOptions) -> CliResult<OnceOutcome> {
        let roster = self.store.load_or_init()?;
        println!("{}", roster_summary(&roster));

        let Some(next) = roster.next_index().and_then(|i| roster.members.get(i)) else {
            return Err(CliError::misuse("Roster has no members").with_suggestion(&format!(
                "Add entries to duty_members in {}",
                self.store.path().display()
            )));
        };

        let message = WebhookMessage::text(reminder_text(&self.config.message, next));
        println!("Next on duty: {} ({})", next.name, next.platform_id);

        if options.dry_run {
            let json = serde_json::to_string_pretty(&message)
                .context("Failed to serialize webhook message")?;
            println!("{json}");
            println!("{}", "Dry run: roster unchanged, nothing sent".yellow());
            return Ok(OnceOutcome::Previewed(next.clone()));
        }

        let cycle = self.cycle()?;

        if !options.assume_yes && options.interactive {
            let confirmed = Confirm::new()
                .with_prompt(format!("Send the reminder for {} to the group?", next.name))
                .default(false)
                .interact()
                .context("Failed to read confirmation")?;
            if !confirmed {
                println!("Cancelled, nothing sent");
                return Ok(OnceOutcome::Cancelled(next.clone()));
            }
        }

        match cycle.run(today()).await {
            CycleOutcome::Sent(member) => {
                println!("{}", format!("Reminder sent for {}", member.name).green());
                Ok(OnceOutcome::Sent(member))
            }
            CycleOutcome::DeliveryFailed { member, error } => Err(CliError::network(&format!(
                "Reminder for {} was not delivered: {error}",
                member.name
            ))
            .with_context("roster", &self.store.path().display().to_string())),
            CycleOutcome::NoMembers => Err(CliError::misuse("Roster has no members")),
            CycleOutcome::RosterUnavailable(error) => Err(CliError::filesystem(&error)),
        }
    }

    /// Render the roster and schedule for `feishu-duty status`
    pub fn status(&self) -> CliResult<String> {
        let roster = self.store.load()?;
        debug!("Status for roster {}", self.store.path().display());
        Ok(render_status(&roster, &self.config, self.store.path()))
    }
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupt received, stopping"),
        Err(e) => {
            warn!("Cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    }
}

/// One-line roster summary
pub fn roster_summary(roster: &DutyRoster) -> String {
    let last_index = roster
        .last_index
        .map(|i| i.to_string())
        .unwrap_or_else(|| "-1".to_string());
    let last_date = roster
        .last_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "never".to_string());
    format!(
        "Roster: {} member(s), last index {last_index}, last date {last_date}",
        roster.members.len()
    )
}

/// Multi-line status report
pub fn render_status(roster: &DutyRoster, config: &AppConfig, path: &std::path::Path) -> String {
    let mut output = String::new();
    output.push_str(&format!("Roster file: {}\n", path.display()));
    output.push_str(&format!("{}\n", roster_summary(roster)));

    let next = roster.next_index();
    for (i, member) in roster.members.iter().enumerate() {
        let marker = if Some(i) == roster.last_index {
            "  <- last on duty"
        } else if Some(i) == next {
            "  <- next"
        } else {
            ""
        };
        output.push_str(&format!(
            "  {i:>3}  {}  {}{marker}\n",
            member.name, member.platform_id
        ));
    }

    output.push_str(&format!("Reminder time: {}\n", config.schedule.time));
    let webhook = if config.webhook.url.trim().is_empty() {
        "not configured"
    } else {
        "configured"
    };
    output.push_str(&format!("Webhook: {webhook}\n"));
    output
}
