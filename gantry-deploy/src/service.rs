//! Service deploy orchestration
//!
//! Drives a cluster service onto a new task definition revision and watches
//! the rollout: describe the service, mutate and register its definition,
//! update the service, observe until convergence or the deadline, and
//! optionally roll back to the revision that was active beforehand.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use gantry_client::{ClientError, ControlPlane};
use gantry_core::domain::image::ImageRef;

use crate::error::DeployError;
use crate::taskdef;
use crate::watch::{self, PollVerdict, WatchOutcome};

/// Successful deploy report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    /// Revision the service targeted before this deploy
    pub previous_revision: String,
    /// Revision the service is now running
    pub deployed_revision: String,
}

/// Orchestrates one deploy of a cluster service
pub struct ServiceDeployer {
    control_plane: Arc<dyn ControlPlane>,
    cluster: String,
    service_name: String,
    image: Option<ImageRef>,
    timeout: Duration,
    enable_rollback: bool,
}

impl ServiceDeployer {
    /// Create a deployer, validating the image reference up front
    ///
    /// `image` is the `repository:tag` to deploy; `None` redeploys the
    /// current image, forcing a fresh revision to pick up definition
    /// changes.
    pub fn new(
        control_plane: Arc<dyn ControlPlane>,
        cluster: impl Into<String>,
        service_name: impl Into<String>,
        image: Option<&str>,
        timeout: Duration,
        enable_rollback: bool,
    ) -> Result<Self, DeployError> {
        let image = image.map(ImageRef::parse).transpose()?;
        Ok(Self {
            control_plane,
            cluster: cluster.into(),
            service_name: service_name.into(),
            image,
            timeout,
            enable_rollback,
        })
    }

    /// Run the full deploy cycle
    ///
    /// On failure or timeout with rollback enabled, a single fire-and-forget
    /// update back to the previous revision is issued; its own rollout is
    /// not re-observed, and the caller receives the original failure.
    pub async fn deploy(&self) -> Result<DeployOutcome, DeployError> {
        let service = self
            .control_plane
            .describe_service(&self.cluster, &self.service_name)
            .await?;
        let previous = service.task_definition.clone();
        info!(
            service = %service.name,
            revision = %previous,
            desired = service.desired_count,
            "starting deploy"
        );

        let base = self.control_plane.describe_task_definition(&previous).await?;
        let new_definition =
            taskdef::register_with_image(self.control_plane.as_ref(), &base, self.image.as_ref())
                .await?;

        self.control_plane
            .update_service(&self.cluster, &self.service_name, &new_definition.arn)
            .await?;
        info!(revision = %new_definition.arn, "service updated, waiting for rollout");

        let outcome =
            watch::observe(self.timeout, || self.poll_rollout(&new_definition.arn)).await;

        match outcome {
            WatchOutcome::Succeeded => {
                info!(revision = %new_definition.arn, "deploy succeeded");
                Ok(DeployOutcome {
                    previous_revision: previous,
                    deployed_revision: new_definition.arn,
                })
            }
            WatchOutcome::Failed(reason) => {
                self.fail(&previous, DeployError::Rollout { reason }).await
            }
            WatchOutcome::TimedOut => {
                self.fail(&previous, DeployError::Timeout(self.timeout)).await
            }
        }
    }

    /// One rollout poll: converged means the service targets `revision` and
    /// its running count equals the desired count
    ///
    /// A terminal failure carries the rollout failure reason reported by the
    /// control plane.
    async fn poll_rollout(&self, revision: &str) -> Result<PollVerdict<String>, ClientError> {
        let service = self
            .control_plane
            .describe_service(&self.cluster, &self.service_name)
            .await?;

        if let Some(reason) = service.failure_reason {
            return Ok(PollVerdict::Failed(reason));
        }

        if service.is_converged(revision) {
            Ok(PollVerdict::Succeeded)
        } else {
            debug!(
                running = service.running_count,
                desired = service.desired_count,
                "rollout in progress"
            );
            Ok(PollVerdict::Pending)
        }
    }

    async fn fail(
        &self,
        previous: &str,
        failure: DeployError,
    ) -> Result<DeployOutcome, DeployError> {
        error!(error = %failure, "deploy failed");

        if self.enable_rollback {
            match self
                .control_plane
                .update_service(&self.cluster, &self.service_name, previous)
                .await
            {
                Ok(()) => warn!(revision = %previous, "rolled back service to previous revision"),
                Err(rollback_error) => {
                    error!(error = %rollback_error, "rollback request failed")
                }
            }
        }

        Err(failure)
    }
}
