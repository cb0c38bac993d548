//! One reminder cycle: load roster, rotate, notify
//!
//! Nothing here returns an error to the caller. Every failure is logged
//! and reported as a [`CycleOutcome`] so the scheduler loop keeps going.

use crate::notify::Notifier;
use crate::roster::{Member, RosterStore};
use crate::rotation::DutyRotation;
use chrono::NaiveDate;
use std::sync::Arc;

/// What happened during one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Reminder delivered for the member
    Sent(Member),
    /// Cursor advanced but the reminder could not be delivered
    DeliveryFailed { member: Member, error: String },
    /// Roster has no members; nothing was sent
    NoMembers,
    /// Roster file could not be read
    RosterUnavailable(String),
}

impl CycleOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

/// Rotation plus notification for the daily reminder
pub struct DutyCycle {
    rotation: DutyRotation,
    notifier: Arc<dyn Notifier>,
}

impl DutyCycle {
    pub fn new(store: RosterStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            rotation: DutyRotation::new(store),
            notifier,
        }
    }

    pub fn store(&self) -> &RosterStore {
        self.rotation.store()
    }

    /// Run one cycle for `today`
    pub async fn run(&self, today: NaiveDate) -> CycleOutcome {
        log::info!("Running daily duty reminder for {today}");

        let mut roster = match self.store().load_or_init() {
            Ok(roster) => roster,
            Err(e) => {
                log::error!("Cannot load roster: {e}");
                return CycleOutcome::RosterUnavailable(e.to_string());
            }
        };

        let Some(member) = self.rotation.advance(&mut roster, today) else {
            log::error!("No duty member available, skipping this cycle");
            return CycleOutcome::NoMembers;
        };

        match self.notifier.notify(&member).await {
            Ok(()) => {
                log::info!("Reminder for {} sent", member.name);
                CycleOutcome::Sent(member)
            }
            Err(e) => {
                log::error!("Reminder for {} failed: {e}", member.name);
                CycleOutcome::DeliveryFailed {
                    member,
                    error: e.to_string(),
                }
            }
        }
    }
}
