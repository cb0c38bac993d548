//! Test utilities for the Feishu tools
//!
//! This crate provides roster builders, a recording notifier and a mock
//! Feishu server for exercising the lookup and reminder flows.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{RosterBuilder, TempRoster};
pub use mocks::{MockFeishu, MockNotifier};
