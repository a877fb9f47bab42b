//! Gantry Core
//!
//! Core types and abstractions for the gantry deploy tool.
//!
//! This crate contains:
//! - Domain types: Core entities of the cluster control plane (images,
//!   task definitions, service and task snapshots)
//! - DTOs: Data transfer objects for control-plane requests and responses

pub mod domain;
pub mod dto;
