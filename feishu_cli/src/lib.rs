//! Command line layer for the Feishu tools
//!
//! Shared by the `feishu-user-id` and `feishu-duty` binaries.

pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrators;
pub mod output;
pub mod paths;
pub mod terminal;
