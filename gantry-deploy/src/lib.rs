//! Gantry Deploy Engine
//!
//! Orchestrates a single mutate-submit-observe cycle against a cluster
//! scheduler's control plane.
//!
//! Architecture:
//! - Task definition mutation: substitute a container image while carrying
//!   the rest of the definition verbatim (`taskdef`)
//! - Command tokenization: shell-style argument parsing for task overrides
//!   (`command`)
//! - Observation: a shared polling state machine with a hard deadline
//!   (`watch`)
//! - Orchestrators: [`ServiceDeployer`] drives a service rollout with
//!   optional rollback; [`TaskRunner`] executes a one-off task and maps its
//!   exit codes
//!
//! Each invocation is stateless: nothing is cached between runs and the
//! control plane remains the only authority on entity state.

pub mod command;
pub mod error;
pub mod service;
pub mod task;

mod taskdef;
mod watch;

#[cfg(test)]
mod testing;

pub use error::DeployError;
pub use service::{DeployOutcome, ServiceDeployer};
pub use task::{RunOutcome, TaskRunner};
