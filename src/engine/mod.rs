//! Studio orchestrator.
//!
//! This module provides the coordinator that turns a validated
//! generation request into exactly one backend call and one history
//! record, and that runs the two-phase record deletion.

mod orchestrator;

pub use orchestrator::{DeleteOutcome, Studio, StudioError};
