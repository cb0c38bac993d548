//! Builders for test scenarios

mod roster;

pub use roster::{RosterBuilder, TempRoster};
