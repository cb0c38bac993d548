//! Roster builders and temporary roster files

use chrono::NaiveDate;
use feishu_client_core::{DutyRoster, Member, RosterStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for [`DutyRoster`] fixtures
#[derive(Debug, Default)]
pub struct RosterBuilder {
    members: Vec<Member>,
    last_index: Option<usize>,
    last_date: Option<NaiveDate>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member; the platform id is derived from the name
    pub fn with_member(mut self, name: &str) -> Self {
        let platform_id = format!("ou_{}", name.to_lowercase());
        self.members.push(Member::new(name, platform_id));
        self
    }

    /// Add several members at once
    pub fn with_members(self, names: &[&str]) -> Self {
        names.iter().fold(self, |b, name| b.with_member(name))
    }

    pub fn with_last_index(mut self, index: usize) -> Self {
        self.last_index = Some(index);
        self
    }

    pub fn with_last_date(mut self, date: NaiveDate) -> Self {
        self.last_date = Some(date);
        self
    }

    pub fn build(self) -> DutyRoster {
        DutyRoster {
            members: self.members,
            last_index: self.last_index,
            last_date: self.last_date,
        }
    }

    /// Write the roster into a fresh temporary directory
    pub fn write_temp(self) -> TempRoster {
        let roster = TempRoster::empty_dir();
        roster
            .store()
            .save(&self.build())
            .expect("failed to write test roster");
        roster
    }
}

/// A roster file living in its own temporary directory
pub struct TempRoster {
    _dir: TempDir,
    path: PathBuf,
}

impl TempRoster {
    /// Temporary directory with no roster file in it yet
    pub fn empty_dir() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("schedule.json");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> RosterStore {
        RosterStore::new(&self.path)
    }

    /// Read the roster back from disk
    pub fn reload(&self) -> DutyRoster {
        self.store().load().expect("failed to reload test roster")
    }
}
