//! Serde models for the common YARN response payloads.
//!
//! # Design
//! Models are read through `Response::json::<T>()`; nothing forces a caller
//! to use them, and `Response::data()` still exposes the raw tree. Fields
//! the server may omit are defaulted so older or newer Hadoop versions
//! deserialize cleanly. State fields stay `String`, exactly as sent; the
//! `*_state()` helpers parse them into the vocabulary enums on demand.
//!
//! YARN wraps empty collections as `null` (`{"apps": null}`), so every list
//! wrapper is an `Option` with an `into_vec()` accessor.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ApplicationState, ContainerState, FinalApplicationStatus, JobState, NodeState,
    YarnApplicationState,
};
use crate::error::Result;

// ---------------------------------------------------------------------------
// ResourceManager
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfoResponse {
    pub cluster_info: ClusterInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterInfo {
    pub id: i64,
    pub started_on: i64,
    pub state: String,
    pub ha_state: Option<String>,
    pub resource_manager_version: String,
    pub hadoop_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMetricsResponse {
    pub cluster_metrics: ClusterMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterMetrics {
    pub apps_submitted: u64,
    pub apps_completed: u64,
    pub apps_pending: u64,
    pub apps_running: u64,
    pub apps_failed: u64,
    pub apps_killed: u64,
    #[serde(rename = "allocatedMB")]
    pub allocated_mb: u64,
    #[serde(rename = "availableMB")]
    pub available_mb: u64,
    #[serde(rename = "totalMB")]
    pub total_mb: u64,
    pub containers_allocated: u64,
    pub total_nodes: u64,
    pub active_nodes: u64,
    pub lost_nodes: u64,
    pub unhealthy_nodes: u64,
    pub decommissioned_nodes: u64,
    pub rebooted_nodes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationsResponse {
    pub apps: Option<Applications>,
}

impl ApplicationsResponse {
    pub fn into_vec(self) -> Vec<Application> {
        self.apps.map(|a| a.app).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Applications {
    #[serde(default)]
    pub app: Vec<Application>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub app: Application,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: String,
    pub user: String,
    pub name: String,
    pub queue: String,
    pub state: String,
    pub final_status: String,
    pub progress: f64,
    #[serde(rename = "trackingUI")]
    pub tracking_ui: Option<String>,
    pub tracking_url: Option<String>,
    pub diagnostics: Option<String>,
    pub cluster_id: i64,
    pub application_type: Option<String>,
    pub started_time: i64,
    pub finished_time: i64,
    pub elapsed_time: i64,
    pub am_container_logs: Option<String>,
    pub am_host_http_address: Option<String>,
    #[serde(rename = "allocatedMB")]
    pub allocated_mb: i64,
    pub allocated_v_cores: i64,
    pub running_containers: i64,
}

impl Application {
    pub fn yarn_state(&self) -> Result<YarnApplicationState> {
        self.state.parse()
    }

    pub fn final_application_status(&self) -> Result<FinalApplicationStatus> {
        self.final_status.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAttemptsResponse {
    pub app_attempts: Option<ApplicationAttempts>,
}

impl ApplicationAttemptsResponse {
    pub fn into_vec(self) -> Vec<ApplicationAttempt> {
        self.app_attempts.map(|a| a.app_attempt).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAttempts {
    #[serde(default)]
    pub app_attempt: Vec<ApplicationAttempt>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationAttempt {
    pub id: i64,
    pub start_time: i64,
    pub container_id: String,
    pub node_http_address: String,
    pub node_id: String,
    pub logs_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodesResponse {
    pub nodes: Option<Nodes>,
}

impl NodesResponse {
    pub fn into_vec(self) -> Vec<Node> {
        self.nodes.map(|n| n.node).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nodes {
    #[serde(default)]
    pub node: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResponse {
    pub node: Node,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    pub id: String,
    pub rack: String,
    pub state: String,
    pub node_host_name: String,
    #[serde(rename = "nodeHTTPAddress")]
    pub node_http_address: String,
    pub health_status: Option<String>,
    pub last_health_update: i64,
    pub health_report: String,
    pub num_containers: i64,
    #[serde(rename = "usedMemoryMB")]
    pub used_memory_mb: i64,
    #[serde(rename = "availMemoryMB")]
    pub avail_memory_mb: i64,
}

impl Node {
    pub fn node_state(&self) -> Result<NodeState> {
        self.state.parse()
    }
}

/// Body of `cluster_new_application`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NewApplication {
    pub application_id: String,
    pub maximum_resource_capability: ResourceCapability,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceCapability {
    pub memory: i64,
    pub v_cores: i64,
}

// ---------------------------------------------------------------------------
// NodeManager
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfoResponse {
    pub node_info: NodeInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeInfo {
    pub id: String,
    pub node_host_name: String,
    pub health_report: String,
    pub node_healthy: bool,
    pub last_node_update_time: i64,
    #[serde(rename = "totalVmemAllocatedContainersMB")]
    pub total_vmem_allocated_containers_mb: i64,
    #[serde(rename = "totalPmemAllocatedContainersMB")]
    pub total_pmem_allocated_containers_mb: i64,
    pub node_manager_version: String,
    pub hadoop_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeApplicationsResponse {
    pub apps: Option<NodeApplications>,
}

impl NodeApplicationsResponse {
    pub fn into_vec(self) -> Vec<NodeApplication> {
        self.apps.map(|a| a.app).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeApplications {
    #[serde(default)]
    pub app: Vec<NodeApplication>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeApplicationResponse {
    pub app: NodeApplication,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeApplication {
    pub id: String,
    pub state: String,
    pub user: String,
    pub containerids: Vec<String>,
}

impl NodeApplication {
    pub fn application_state(&self) -> Result<ApplicationState> {
        self.state.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainersResponse {
    pub containers: Option<Containers>,
}

impl ContainersResponse {
    pub fn into_vec(self) -> Vec<Container> {
        self.containers.map(|c| c.container).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Containers {
    #[serde(default)]
    pub container: Vec<Container>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerResponse {
    pub container: Container,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    pub id: String,
    pub state: String,
    pub exit_code: i64,
    pub diagnostics: String,
    pub user: String,
    #[serde(rename = "totalMemoryNeededMB")]
    pub total_memory_needed_mb: i64,
    pub total_v_cores_needed: i64,
    pub container_logs_link: String,
    pub node_id: String,
}

impl Container {
    pub fn container_state(&self) -> Result<ContainerState> {
        self.state.parse()
    }
}

// ---------------------------------------------------------------------------
// MapReduce (ApplicationMaster and HistoryServer)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobsResponse {
    pub jobs: Option<Jobs>,
}

impl JobsResponse {
    pub fn into_vec(self) -> Vec<Job> {
        self.jobs.map(|j| j.job).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Jobs {
    #[serde(default)]
    pub job: Vec<Job>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResponse {
    pub job: Job,
}

/// A MapReduce job. The AM reports live progress fields; the HistoryServer
/// reports submit/finish times; both share the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    pub id: String,
    pub name: String,
    pub user: String,
    pub queue: Option<String>,
    pub state: String,
    pub start_time: i64,
    pub finish_time: i64,
    pub elapsed_time: Option<i64>,
    pub submit_time: Option<i64>,
    pub maps_total: i64,
    pub maps_completed: i64,
    pub reduces_total: i64,
    pub reduces_completed: i64,
    pub map_progress: Option<f64>,
    pub reduce_progress: Option<f64>,
    pub uberized: bool,
    pub diagnostics: Option<String>,
}

impl Job {
    pub fn job_state(&self) -> Result<JobState> {
        self.state.parse()
    }
}
