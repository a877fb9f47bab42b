//! Scripted control-plane fake and snapshot builders for engine tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use gantry_client::{ClientError, ControlPlane, Result};
use gantry_core::domain::service::ServiceSnapshot;
use gantry_core::domain::task::{ContainerStatus, TaskSnapshot, TaskStatus};
use gantry_core::domain::task_definition::{ContainerDefinition, TaskDefinition};
use gantry_core::dto::task::{DescribeTasksResponse, RunTaskResponse, TaskOverride};
use gantry_core::dto::task_definition::RegisterTaskDefinition;

/// A scripted response: `Err` becomes a transient `ClientError`
pub(crate) type Scripted<T> = std::result::Result<T, String>;

/// Control-plane fake driven by per-operation response queues
///
/// Read queues replay their last entry forever once drained down to one
/// element, so a test scripts only the polls that differ. Mutating calls are
/// recorded for assertion.
#[derive(Default)]
pub(crate) struct FakeControlPlane {
    pub services: Mutex<VecDeque<Scripted<ServiceSnapshot>>>,
    pub task_definitions: Mutex<VecDeque<TaskDefinition>>,
    pub run_responses: Mutex<VecDeque<Scripted<RunTaskResponse>>>,
    pub task_polls: Mutex<VecDeque<Scripted<DescribeTasksResponse>>>,

    /// Every register request, in order
    pub registered: Mutex<Vec<RegisterTaskDefinition>>,
    /// Revision targeted by each update_service call, in order
    pub updates: Mutex<Vec<String>>,
    /// Revision and overrides of each run_task call, in order
    pub runs: Mutex<Vec<(String, Option<TaskOverride>)>>,
}

fn next<T: Clone>(queue: &Mutex<VecDeque<Scripted<T>>>) -> Result<T> {
    let mut queue = queue.lock().unwrap();
    let entry = if queue.len() > 1 {
        queue.pop_front().unwrap()
    } else {
        queue.front().cloned().expect("scripted queue exhausted")
    };
    entry.map_err(|message| ClientError::api_error(503, message))
}

#[async_trait]
impl ControlPlane for FakeControlPlane {
    async fn describe_service(&self, _cluster: &str, _service: &str) -> Result<ServiceSnapshot> {
        next(&self.services)
    }

    async fn describe_task_definition(&self, _reference: &str) -> Result<TaskDefinition> {
        Ok(self
            .task_definitions
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted task definition"))
    }

    async fn register_task_definition(
        &self,
        input: RegisterTaskDefinition,
    ) -> Result<TaskDefinition> {
        let mut registered = self.registered.lock().unwrap();
        registered.push(input);
        let input = registered.last().unwrap();
        // Base definitions in tests are revision 1; minted revisions count up
        // from 2.
        let revision = registered.len() as i64 + 1;
        Ok(TaskDefinition {
            arn: format!("arn:def/{}:{}", input.family, revision),
            family: input.family.clone(),
            revision,
            network_mode: input.network_mode.clone(),
            task_role_arn: input.task_role_arn.clone(),
            volumes: input.volumes.clone(),
            placement_constraints: input.placement_constraints.clone(),
            container_definitions: input.container_definitions.clone(),
            registered_at: None,
        })
    }

    async fn update_service(&self, _cluster: &str, _service: &str, revision: &str) -> Result<()> {
        self.updates.lock().unwrap().push(revision.to_string());
        Ok(())
    }

    async fn run_task(
        &self,
        _cluster: &str,
        revision: &str,
        overrides: Option<TaskOverride>,
    ) -> Result<RunTaskResponse> {
        self.runs
            .lock()
            .unwrap()
            .push((revision.to_string(), overrides));
        next(&self.run_responses)
    }

    async fn describe_tasks(
        &self,
        _cluster: &str,
        _arns: &[String],
    ) -> Result<DescribeTasksResponse> {
        next(&self.task_polls)
    }
}

pub(crate) fn container(name: &str, image: &str) -> ContainerDefinition {
    ContainerDefinition {
        name: name.to_string(),
        image: image.to_string(),
        settings: serde_json::Map::new(),
    }
}

pub(crate) fn definition(
    family: &str,
    revision: i64,
    containers: Vec<ContainerDefinition>,
) -> TaskDefinition {
    TaskDefinition {
        arn: format!("arn:def/{}:{}", family, revision),
        family: family.to_string(),
        revision,
        network_mode: None,
        task_role_arn: None,
        volumes: vec![],
        placement_constraints: vec![],
        container_definitions: containers,
        registered_at: None,
    }
}

pub(crate) fn service(revision: &str, desired: i64, running: i64) -> ServiceSnapshot {
    ServiceSnapshot {
        name: "web".to_string(),
        task_definition: revision.to_string(),
        desired_count: desired,
        running_count: running,
        failure_reason: None,
    }
}

pub(crate) fn running_task(arn: &str) -> TaskSnapshot {
    TaskSnapshot {
        arn: arn.to_string(),
        desired_status: TaskStatus::Running,
        last_status: TaskStatus::Running,
        containers: vec![ContainerStatus {
            name: "app".to_string(),
            exit_code: None,
            reason: None,
        }],
        stopped_reason: None,
        created_at: None,
    }
}

pub(crate) fn stopped_task(arn: &str, exit_code: Option<i64>) -> TaskSnapshot {
    TaskSnapshot {
        arn: arn.to_string(),
        desired_status: TaskStatus::Stopped,
        last_status: TaskStatus::Stopped,
        containers: vec![ContainerStatus {
            name: "app".to_string(),
            exit_code,
            reason: None,
        }],
        stopped_reason: None,
        created_at: None,
    }
}
