//! One-off task submission and polling DTOs

use serde::{Deserialize, Serialize};

use crate::domain::task::TaskSnapshot;

/// Command override applied to one container at task submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerOverride {
    pub name: String,
    pub command: Vec<String>,
}

/// Overrides attached to a one-off task run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOverride {
    pub container_overrides: Vec<ContainerOverride>,
}

impl TaskOverride {
    /// Override the command of a single named container
    pub fn for_container(name: impl Into<String>, command: Vec<String>) -> Self {
        Self {
            container_overrides: vec![ContainerOverride {
                name: name.into(),
                command,
            }],
        }
    }
}

/// Inline entity-level failure reported by the control plane
///
/// Distinct from a transport error: the request itself succeeded but the
/// control plane could not act on one of the named entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    pub reason: String,
}

/// Response to a one-off task submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTaskResponse {
    #[serde(default)]
    pub tasks: Vec<TaskSnapshot>,
    #[serde(default)]
    pub failures: Vec<Failure>,
}

/// Response to a task status poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTasksResponse {
    #[serde(default)]
    pub tasks: Vec<TaskSnapshot>,
    #[serde(default)]
    pub failures: Vec<Failure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_container_scopes_override_to_one_container() {
        let overrides = TaskOverride::for_container(
            "migrate",
            vec!["echo".to_string(), "hello".to_string()],
        );

        assert_eq!(overrides.container_overrides.len(), 1);
        assert_eq!(overrides.container_overrides[0].name, "migrate");
        assert_eq!(overrides.container_overrides[0].command, ["echo", "hello"]);
    }

    #[test]
    fn run_task_response_defaults_to_empty_lists() {
        let response: RunTaskResponse = serde_json::from_str("{}").unwrap();
        assert!(response.tasks.is_empty());
        assert!(response.failures.is_empty());
    }
}
