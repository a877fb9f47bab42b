//! Service snapshot domain model

use serde::{Deserialize, Serialize};

/// A per-poll snapshot of a control-plane service
///
/// Snapshots are ephemeral: fetched on each poll, evaluated, and discarded.
/// Nothing in the engine caches control-plane state beyond one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSnapshot {
    pub name: String,

    /// Task definition revision the service currently targets
    pub task_definition: String,

    pub desired_count: i64,

    pub running_count: i64,

    /// Rollout failure reason reported by the control plane, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl ServiceSnapshot {
    /// True once the service targets `revision` and its running count has
    /// reached the desired count
    pub fn is_converged(&self, revision: &str) -> bool {
        self.task_definition == revision && self.running_count == self.desired_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(task_definition: &str, desired: i64, running: i64) -> ServiceSnapshot {
        ServiceSnapshot {
            name: "web".to_string(),
            task_definition: task_definition.to_string(),
            desired_count: desired,
            running_count: running,
            failure_reason: None,
        }
    }

    #[test]
    fn converged_when_counts_match_on_target_revision() {
        assert!(snapshot("family:2", 3, 3).is_converged("family:2"));
    }

    #[test]
    fn not_converged_while_tasks_still_starting() {
        assert!(!snapshot("family:2", 3, 1).is_converged("family:2"));
    }

    #[test]
    fn not_converged_on_a_different_revision() {
        // The old revision can be fully scaled while the new one is pending.
        assert!(!snapshot("family:1", 3, 3).is_converged("family:2"));
    }
}
