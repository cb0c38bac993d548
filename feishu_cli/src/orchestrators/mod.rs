//! Command orchestrators
//!
//! Glue between the clap front ends and the core library services.

pub mod duty_orchestrator;
pub mod lookup_orchestrator;
