//! Core domain types
//!
//! This module contains the domain structures shared across gantry crates.
//! They model the control-plane entities the engine reads and mutates:
//! image references, task definitions, and per-poll service/task snapshots.

pub mod image;
pub mod service;
pub mod task;
pub mod task_definition;
