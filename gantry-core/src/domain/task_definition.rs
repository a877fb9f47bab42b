//! Task definition domain model
//!
//! A task definition is an immutable, versioned specification owned by the
//! control plane. The engine only ever interprets the container image
//! fields; everything else is pass-through payload carried verbatim between
//! describe and register calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered task definition revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    /// Immutable identifier of this revision
    pub arn: String,

    /// Family this revision belongs to
    pub family: String,

    /// Revision number within the family
    pub revision: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_role_arn: Option<String>,

    /// Opaque volume specifications, never interpreted
    #[serde(default)]
    pub volumes: Vec<serde_json::Value>,

    /// Opaque placement constraints, never interpreted
    #[serde(default)]
    pub placement_constraints: Vec<serde_json::Value>,

    pub container_definitions: Vec<ContainerDefinition>,

    /// When the control plane registered this revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

/// A single container within a task definition
///
/// Only `image` is meaningful to the engine. All remaining container
/// settings (ports, environment, limits, ...) ride along in `settings`
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    pub name: String,

    pub image: String,

    #[serde(flatten)]
    pub settings: serde_json::Map<String, serde_json::Value>,
}

impl ContainerDefinition {
    /// Returns a copy of this container with a different image, everything
    /// else identical
    pub fn with_image(&self, image: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            image: image.into(),
            settings: self.settings.clone(),
        }
    }
}
