//! Duty roster model, rotation cursor and JSON persistence
//!
//! The on-disk layout is the flat record the reminder bot has always used:
//!
//! ```json
//! {
//!   "duty_members": [{ "name": "Alice", "open_id": "ou_xxx" }],
//!   "last_index": -1,
//!   "last_date": ""
//! }
//! ```

use crate::error::{Error, IoError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A person taking part in the rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    /// Platform user identifier used in the mention tag
    #[serde(rename = "open_id")]
    pub platform_id: String,
}

impl Member {
    pub fn new(name: impl Into<String>, platform_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform_id: platform_id.into(),
        }
    }
}

/// Ordered members plus the round-robin cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyRoster {
    #[serde(rename = "duty_members", default)]
    pub members: Vec<Member>,

    /// Index of the most recently selected member; `None` is stored as `-1`
    #[serde(default, with = "cursor")]
    pub last_index: Option<usize>,

    /// Informational only, never consulted by `advance`
    #[serde(default, with = "rotation_date")]
    pub last_date: Option<NaiveDate>,
}

impl DutyRoster {
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members,
            last_index: None,
            last_date: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Index `advance` would select next, if any member exists
    pub fn next_index(&self) -> Option<usize> {
        if self.members.is_empty() {
            return None;
        }
        let next = match self.last_index {
            None => 0,
            Some(last) => (last + 1) % self.members.len(),
        };
        Some(next)
    }

    /// Move the cursor to the next member and return it
    ///
    /// Not date-aware: two calls on the same day advance twice. An empty
    /// roster returns `None` and leaves the cursor and date untouched.
    pub fn advance(&mut self, today: NaiveDate) -> Option<Member> {
        let next = self.next_index()?;
        self.last_index = Some(next);
        self.last_date = Some(today);
        Some(self.members[next].clone())
    }

    /// Member at the cursor, if the cursor points inside the roster
    pub fn current(&self) -> Option<&Member> {
        self.last_index.and_then(|i| self.members.get(i))
    }
}

/// Reads and writes the roster file
#[derive(Debug, Clone)]
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the roster from disk
    pub fn load(&self) -> Result<DutyRoster> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| IoError::from_std(e).with_path(&self.path))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::from(IoError::malformed(e).with_path(&self.path)))
    }

    /// Load the roster, creating an empty one on disk if the file is missing
    pub fn load_or_init(&self) -> Result<DutyRoster> {
        if !self.path.exists() {
            log::warn!(
                "Roster file {} does not exist, creating an empty roster",
                self.path.display()
            );
            let roster = DutyRoster::default();
            self.save(&roster)?;
            return Ok(roster);
        }
        self.load()
    }

    /// Write the whole roster, pretty-printed
    pub fn save(&self, roster: &DutyRoster) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| IoError::from_std(e).with_path(parent))?;
        }

        let mut json = serde_json::to_string_pretty(roster)?;
        json.push('\n');
        fs::write(&self.path, json).map_err(|e| IoError::from_std(e).with_path(&self.path))?;
        Ok(())
    }
}

/// `Option<usize>` <-> integer with `-1` for "never rotated"
mod cursor {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<usize>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(index) => serializer.serialize_i64(*index as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(usize::try_from(raw).ok())
    }
}

/// `Option<NaiveDate>` <-> `YYYY-MM-DD` string, empty for none
mod rotation_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw.trim(), FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
