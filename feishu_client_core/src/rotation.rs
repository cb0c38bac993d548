//! Persisting rotation step
//!
//! Advances the roster cursor and writes the roster straight back. A
//! failed write is logged and the selected member is still returned, so a
//! restart may repeat the same member.

use crate::roster::{DutyRoster, Member, RosterStore};
use chrono::NaiveDate;

/// Rotation over a roster backed by a [`RosterStore`]
#[derive(Debug, Clone)]
pub struct DutyRotation {
    store: RosterStore,
}

impl DutyRotation {
    pub fn new(store: RosterStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    /// Select today's member, update the cursor and persist the roster
    pub fn advance(&self, roster: &mut DutyRoster, today: NaiveDate) -> Option<Member> {
        let Some(member) = roster.advance(today) else {
            log::warn!("Roster has no members");
            return None;
        };

        log::info!(
            "Today's duty member: {} (index {})",
            member.name,
            roster.last_index.unwrap_or_default()
        );

        if let Err(e) = self.store.save(roster) {
            log::error!(
                "Failed to save roster to {}: {e}",
                self.store.path().display()
            );
        }

        Some(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    #[test]
    fn test_advance_persists_cursor() {
        let dir = TempDir::new().unwrap();
        let store = RosterStore::new(dir.path().join("schedule.json"));
        let rotation = DutyRotation::new(store.clone());
        let mut roster = DutyRoster::new(vec![Member::new("A", "ou_a"), Member::new("B", "ou_b")]);

        let member = rotation.advance(&mut roster, today()).unwrap();

        assert_eq!(member.name, "A");
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.last_index, Some(0));
        assert_eq!(reloaded.last_date, Some(today()));
    }

    #[test]
    fn test_save_failure_still_returns_member() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the write fail
        let path = dir.path().join("schedule.json");
        std::fs::create_dir(&path).unwrap();
        let rotation = DutyRotation::new(RosterStore::new(&path));
        let mut roster = DutyRoster::new(vec![Member::new("A", "ou_a")]);

        let member = rotation.advance(&mut roster, today());

        assert_eq!(member.map(|m| m.name), Some("A".to_string()));
        assert_eq!(roster.last_index, Some(0));
    }

    #[test]
    fn test_empty_roster_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schedule.json");
        let rotation = DutyRotation::new(RosterStore::new(&path));
        let mut roster = DutyRoster::default();

        assert!(rotation.advance(&mut roster, today()).is_none());
        assert!(!path.exists());
    }
}
