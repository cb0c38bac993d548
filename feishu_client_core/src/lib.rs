//! Feishu Client Core Library
//!
//! Shared pieces of the two Feishu utilities: the batch user id lookup
//! used by `feishu-user-id`, and the duty roster, webhook notifier and
//! daily scheduler used by `feishu-duty`.

pub mod config;
pub mod contact;
pub mod duty;
pub mod error;
pub mod http;
pub mod notify;
pub mod roster;
pub mod rotation;
pub mod scheduler;
pub mod security;

// Re-export main types
pub use config::{ContactConfig, MessageConfig, RosterConfig, ScheduleConfig, WebhookConfig};
pub use contact::{ContactClient, LookupData, LookupRequest, LookupResult};
pub use duty::{CycleOutcome, DutyCycle};
pub use error::{Error, Result};
pub use notify::{Notifier, WebhookMessage, WebhookNotifier};
pub use roster::{DutyRoster, Member, RosterStore};
pub use rotation::DutyRotation;
pub use scheduler::{DailyTrigger, Scheduler};
pub use security::{AppCredentials, SecureString};
