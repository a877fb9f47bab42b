//! Gantry control-plane client
//!
//! A type-safe client for the cluster scheduler's control plane. The
//! [`ControlPlane`] trait is the seam the deploy engine works against; it is
//! trait-based to enable testing with scripted fakes. [`HttpControlPlane`]
//! is the JSON-over-HTTP implementation used in production.
//!
//! # Example
//!
//! ```no_run
//! use gantry_client::{ControlPlane, HttpControlPlane};
//!
//! # async fn example() -> gantry_client::Result<()> {
//! let client = HttpControlPlane::new("http://localhost:8080");
//! let service = client.describe_service("prod", "web").await?;
//! println!("{} running {}/{}", service.name, service.running_count, service.desired_count);
//! # Ok(())
//! # }
//! ```

pub mod error;

pub use error::{ClientError, Result};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use gantry_core::domain::service::ServiceSnapshot;
use gantry_core::domain::task_definition::TaskDefinition;
use gantry_core::dto::task::{DescribeTasksResponse, RunTaskResponse, TaskOverride};
use gantry_core::dto::task_definition::RegisterTaskDefinition;

/// Operations the deploy engine needs from the cluster control plane
///
/// One method per remote operation; implementations own the wire format.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Fetch the current snapshot of a service: targeted revision,
    /// desired/running counts, and any rollout failure reason
    async fn describe_service(&self, cluster: &str, service: &str) -> Result<ServiceSnapshot>;

    /// Fetch a full task definition revision by reference
    async fn describe_task_definition(&self, reference: &str) -> Result<TaskDefinition>;

    /// Register a new task definition revision
    ///
    /// Every call mints a fresh revision; the control plane never mutates an
    /// existing one.
    async fn register_task_definition(
        &self,
        input: RegisterTaskDefinition,
    ) -> Result<TaskDefinition>;

    /// Point a service at a different task definition revision
    async fn update_service(&self, cluster: &str, service: &str, revision: &str) -> Result<()>;

    /// Submit a one-off task run, optionally overriding one container's
    /// command
    async fn run_task(
        &self,
        cluster: &str,
        revision: &str,
        overrides: Option<TaskOverride>,
    ) -> Result<RunTaskResponse>;

    /// Fetch current snapshots for a set of tasks
    async fn describe_tasks(&self, cluster: &str, arns: &[String]) -> Result<DescribeTasksResponse>;
}

/// JSON-over-HTTP implementation of [`ControlPlane`]
///
/// Credentials are injected at construction; this crate never reads the
/// process environment.
#[derive(Debug, Clone)]
pub struct HttpControlPlane {
    /// Base URL of the control plane (e.g. "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Optional bearer token attached to every request
    auth_token: Option<String>,
}

impl HttpControlPlane {
    /// Create a new control-plane client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new control-plane client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            auth_token: None,
        }
    }

    /// Attach a bearer token to every request
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Get the base URL of the control plane
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.get(url))
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.post(url))
    }

    fn put(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.put(url))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn describe_service(&self, cluster: &str, service: &str) -> Result<ServiceSnapshot> {
        let url = format!(
            "{}/api/clusters/{}/services/{}",
            self.base_url, cluster, service
        );
        debug!(%cluster, %service, "describing service");
        let response = self.get(&url).send().await?;

        self.handle_response(response).await
    }

    async fn describe_task_definition(&self, reference: &str) -> Result<TaskDefinition> {
        // References contain ':' and '/', so they travel as a query
        // parameter rather than a path segment.
        let url = format!("{}/api/task-definitions", self.base_url);
        let response = self
            .get(&url)
            .query(&[("reference", reference)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn register_task_definition(
        &self,
        input: RegisterTaskDefinition,
    ) -> Result<TaskDefinition> {
        let url = format!("{}/api/task-definitions", self.base_url);
        debug!(family = %input.family, "registering task definition revision");
        let response = self.post(&url).json(&input).send().await?;

        self.handle_response(response).await
    }

    async fn update_service(&self, cluster: &str, service: &str, revision: &str) -> Result<()> {
        let url = format!(
            "{}/api/clusters/{}/services/{}",
            self.base_url, cluster, service
        );
        debug!(%cluster, %service, %revision, "updating service");
        let response = self
            .put(&url)
            .json(&UpdateServiceRequest {
                task_definition: revision.to_string(),
            })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    async fn run_task(
        &self,
        cluster: &str,
        revision: &str,
        overrides: Option<TaskOverride>,
    ) -> Result<RunTaskResponse> {
        let url = format!("{}/api/clusters/{}/tasks", self.base_url, cluster);
        debug!(%cluster, %revision, "submitting one-off task");
        let response = self
            .post(&url)
            .json(&RunTaskRequest {
                task_definition: revision.to_string(),
                overrides,
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        arns: &[String],
    ) -> Result<DescribeTasksResponse> {
        let url = format!("{}/api/clusters/{}/tasks/describe", self.base_url, cluster);
        let response = self
            .post(&url)
            .json(&DescribeTasksRequest {
                tasks: arns.to_vec(),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateServiceRequest {
    task_definition: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunTaskRequest {
    task_definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    overrides: Option<TaskOverride>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DescribeTasksRequest {
    tasks: Vec<String>,
}
