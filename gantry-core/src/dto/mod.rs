//! Data Transfer Objects for control-plane communication
//!
//! This module contains the request and response payloads exchanged with the
//! cluster control plane. Domain snapshots travel inside these envelopes.

pub mod task;
pub mod task_definition;
