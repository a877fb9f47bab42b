//! Task snapshot domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status reported by the control plane for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Provisioning,
    Pending,
    Activating,
    Running,
    Deactivating,
    Stopping,
    Deprovisioning,
    Stopped,
    /// Any status this client does not model
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Terminal state: the control plane will make no further transitions
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::Provisioning => "PROVISIONING",
            Self::Pending => "PENDING",
            Self::Activating => "ACTIVATING",
            Self::Running => "RUNNING",
            Self::Deactivating => "DEACTIVATING",
            Self::Stopping => "STOPPING",
            Self::Deprovisioning => "DEPROVISIONING",
            Self::Stopped => "STOPPED",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{}", status)
    }
}

/// A per-poll snapshot of a one-off task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
    pub arn: String,

    /// Status the control plane is driving the task towards
    pub desired_status: TaskStatus,

    /// Status the task was last observed in
    pub last_status: TaskStatus,

    pub containers: Vec<ContainerStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TaskSnapshot {
    /// Terminal predicate: the control plane wants this task stopped
    pub fn is_stopped(&self) -> bool {
        self.desired_status.is_stopped()
    }
}

/// Per-container status within a task snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStatus {
    pub name: String,

    /// Absent until the container has actually exited and the control plane
    /// has observed the code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stopped_is_terminal() {
        assert!(TaskStatus::Stopped.is_stopped());
        assert!(!TaskStatus::Running.is_stopped());
        assert!(!TaskStatus::Stopping.is_stopped());
    }

    #[test]
    fn status_round_trips_through_wire_format() {
        let json = serde_json::to_string(&TaskStatus::Stopped).unwrap();
        assert_eq!(json, "\"STOPPED\"");

        let status: TaskStatus = serde_json::from_str("\"RUNNING\"").unwrap();
        assert_eq!(status, TaskStatus::Running);
    }

    #[test]
    fn unrecognized_status_parses_as_unknown() {
        let status: TaskStatus = serde_json::from_str("\"HIBERNATING\"").unwrap();
        assert_eq!(status, TaskStatus::Unknown);
    }

    #[test]
    fn snapshot_terminality_follows_desired_status() {
        let task = TaskSnapshot {
            arn: "task/1".to_string(),
            desired_status: TaskStatus::Stopped,
            last_status: TaskStatus::Running,
            containers: vec![],
            stopped_reason: None,
            created_at: None,
        };
        assert!(task.is_stopped());
    }
}
