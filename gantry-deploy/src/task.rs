//! One-off task execution
//!
//! Submits a single task run against a base task definition, optionally
//! with an image substitution and a per-container command override, then
//! watches the submitted tasks until every container has exited.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use gantry_client::{ClientError, ControlPlane};
use gantry_core::domain::image::ImageRef;
use gantry_core::domain::task::TaskSnapshot;
use gantry_core::dto::task::TaskOverride;

use crate::command;
use crate::error::DeployError;
use crate::taskdef;
use crate::watch::{self, PollVerdict, WatchOutcome};

/// Successful run report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Revision the tasks ran under
    pub task_definition: String,
    /// Identifiers of the submitted tasks
    pub task_arns: Vec<String>,
}

/// Orchestrates one one-off task execution
pub struct TaskRunner {
    control_plane: Arc<dyn ControlPlane>,
    cluster: String,
    container_name: String,
    base_task_definition: String,
    image: Option<ImageRef>,
    command: Vec<String>,
    timeout: Duration,
}

impl TaskRunner {
    /// Create a runner, validating the image reference and tokenizing the
    /// command string up front
    ///
    /// Unlike the deploy path there is no service to infer a definition
    /// from, so `base_task_definition` is required.
    pub fn new(
        control_plane: Arc<dyn ControlPlane>,
        cluster: impl Into<String>,
        container_name: impl Into<String>,
        image: Option<&str>,
        command: &str,
        base_task_definition: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DeployError> {
        let image = image.map(ImageRef::parse).transpose()?;
        let command = command::parse_command(command)?;
        Ok(Self {
            control_plane,
            cluster: cluster.into(),
            container_name: container_name.into(),
            base_task_definition: base_task_definition.into(),
            image,
            command,
            timeout,
        })
    }

    /// Run the full submit-observe cycle
    pub async fn run(&self) -> Result<RunOutcome, DeployError> {
        let base = self
            .control_plane
            .describe_task_definition(&self.base_task_definition)
            .await?;

        // Without an image override the base revision is reused as-is; a
        // plain command run does not mint a revision.
        let definition = match &self.image {
            Some(image) => {
                taskdef::register_with_image(self.control_plane.as_ref(), &base, Some(image))
                    .await?
            }
            None => base,
        };

        let overrides = if self.command.is_empty() {
            None
        } else {
            Some(TaskOverride::for_container(
                &self.container_name,
                self.command.clone(),
            ))
        };

        let response = self
            .control_plane
            .run_task(&self.cluster, &definition.arn, overrides)
            .await?;

        if let Some(failure) = response.failures.first() {
            error!(reason = %failure.reason, "control plane reported submission failures");
            return Err(DeployError::Submission {
                reason: failure.reason.clone(),
            });
        }

        let task_arns: Vec<String> = response.tasks.iter().map(|t| t.arn.clone()).collect();
        info!(
            tasks = task_arns.len(),
            revision = %definition.arn,
            "task submitted, waiting for exit"
        );

        let outcome = watch::observe(self.timeout, || self.poll_tasks(&task_arns)).await;

        match outcome {
            WatchOutcome::Succeeded => {
                info!("run task succeeded");
                Ok(RunOutcome {
                    task_definition: definition.arn,
                    task_arns,
                })
            }
            WatchOutcome::Failed(code) => Err(DeployError::ExitCode { code }),
            WatchOutcome::TimedOut => Err(DeployError::Timeout(self.timeout)),
        }
    }

    async fn poll_tasks(&self, arns: &[String]) -> Result<PollVerdict<i64>, ClientError> {
        let response = self.control_plane.describe_tasks(&self.cluster, arns).await?;
        for task in &response.tasks {
            debug!(arn = %task.arn, status = %task.last_status, "task status");
        }
        Ok(evaluate_tasks(&response.tasks))
    }
}

/// Evaluate one poll's snapshots, failing with the first non-zero exit code
///
/// Every task must individually stop before any exit code is judged. A
/// stopped container whose exit code is not yet readable leaves the whole
/// cycle pending rather than failing it.
fn evaluate_tasks(tasks: &[TaskSnapshot]) -> PollVerdict<i64> {
    if tasks.iter().any(|task| !task.is_stopped()) {
        return PollVerdict::Pending;
    }

    for task in tasks {
        for container in &task.containers {
            match container.exit_code {
                None => return PollVerdict::Pending,
                Some(code) if code != 0 => return PollVerdict::Failed(code),
                Some(_) => {}
            }
        }
    }

    PollVerdict::Succeeded
}
