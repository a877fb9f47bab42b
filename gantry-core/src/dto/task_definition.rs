//! Task definition registration DTO

use serde::{Deserialize, Serialize};

use crate::domain::task_definition::{ContainerDefinition, TaskDefinition};

/// Request to register a new task definition revision
///
/// Carries the (possibly rewritten) container list together with the
/// cluster-level fields copied verbatim from the base revision. The control
/// plane assigns the new revision number and identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTaskDefinition {
    pub family: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_role_arn: Option<String>,

    #[serde(default)]
    pub volumes: Vec<serde_json::Value>,

    #[serde(default)]
    pub placement_constraints: Vec<serde_json::Value>,

    pub container_definitions: Vec<ContainerDefinition>,
}

impl RegisterTaskDefinition {
    /// Build a registration request from a base revision and a container
    /// list, copying every cluster-level field untouched
    pub fn from_base(base: &TaskDefinition, containers: Vec<ContainerDefinition>) -> Self {
        Self {
            family: base.family.clone(),
            network_mode: base.network_mode.clone(),
            task_role_arn: base.task_role_arn.clone(),
            volumes: base.volumes.clone(),
            placement_constraints: base.placement_constraints.clone(),
            container_definitions: containers,
        }
    }
}
