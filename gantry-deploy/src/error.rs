//! Error types for the deploy engine

use std::time::Duration;

use gantry_client::ClientError;
use gantry_core::domain::image::ImageError;
use thiserror::Error;

/// Errors that abort a deploy or run invocation
///
/// Transient poll errors never appear here; they are swallowed inside the
/// observation loop and retried on the next tick.
#[derive(Debug, Error)]
pub enum DeployError {
    /// An image string failed validation
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The task command string could not be tokenized
    #[error("failed to parse task command: {0}")]
    CommandParse(#[from] shell_words::ParseError),

    /// The control plane rejected a request outside the poll loop
    #[error(transparent)]
    ControlPlane(#[from] ClientError),

    /// The control plane reported inline entity failures at submission time
    #[error("control plane rejected submission: {reason}")]
    Submission { reason: String },

    /// The service rollout reached a terminal failure
    #[error("service rollout failed: {reason}")]
    Rollout { reason: String },

    /// A task container exited with a non-zero code
    #[error("exit code: {code}")]
    ExitCode { code: i64 },

    /// The deadline elapsed before all entities converged
    #[error("process timeout after {}s", .0.as_secs())]
    Timeout(Duration),
}
