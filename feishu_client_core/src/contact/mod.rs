//! User id lookup by phone number and email
//!
//! - Tenant access token exchange
//! - One batch `batch_get_id` call per lookup, no pagination or retry
//! - Normalization into [`LookupResult`]

pub mod client;
pub mod types;

pub use client::ContactClient;
pub use types::{
    IdKind, LookupData, LookupRequest, LookupResult, ResolvedUser, UnresolvedEntry,
};
