//! Task definition mutation
//!
//! Produces a new task definition revision from a base revision, rewriting
//! at most one container image and carrying everything else verbatim.

use tracing::{info, warn};

use gantry_client::ControlPlane;
use gantry_core::domain::image::{ImageError, ImageRef};
use gantry_core::domain::task_definition::{ContainerDefinition, TaskDefinition};
use gantry_core::dto::task_definition::RegisterTaskDefinition;

use crate::error::DeployError;

/// Register a new revision of `base`, with `target` substituted into the
/// matching container
///
/// Without a target image the base containers are re-registered untouched,
/// minting a fresh revision with identical content. Every call mints a new
/// revision; the base stays addressable for rollback.
pub(crate) async fn register_with_image(
    control_plane: &dyn ControlPlane,
    base: &TaskDefinition,
    target: Option<&ImageRef>,
) -> Result<TaskDefinition, DeployError> {
    let containers = match target {
        Some(image) => {
            let (containers, replaced) = substitute_image(&base.container_definitions, image)?;
            if !replaced {
                warn!(
                    image = %image,
                    family = %base.family,
                    "no container references this repository; registering definition unchanged"
                );
            }
            containers
        }
        None => base.container_definitions.clone(),
    };

    let request = RegisterTaskDefinition::from_base(base, containers);
    let registered = control_plane.register_task_definition(request).await?;
    info!(revision = %registered.arn, "registered task definition revision");
    Ok(registered)
}

/// Rewrite the image of the first container whose repository matches
/// `target`; all other containers pass through unchanged
///
/// Containers are matched by their current image's repository, not by name.
/// A malformed existing image is a hard error even on containers that would
/// not match.
fn substitute_image(
    containers: &[ContainerDefinition],
    target: &ImageRef,
) -> Result<(Vec<ContainerDefinition>, bool), ImageError> {
    let mut replaced = false;
    let mut out = Vec::with_capacity(containers.len());

    for container in containers {
        let current = ImageRef::parse(&container.image)?;
        if !replaced && current.repository() == target.repository() {
            out.push(container.with_image(target.to_string()));
            replaced = true;
        } else {
            out.push(container.clone());
        }
    }

    Ok((out, replaced))
}
