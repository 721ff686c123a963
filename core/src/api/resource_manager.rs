//! ResourceManager REST API (`/ws/v1/cluster`).

use crate::client::{ApiClient, ApiRole, ClientConfig};
use crate::constants::{
    FinalApplicationStatus, Healthy, NodeState, YarnApplicationState, FINAL_APPLICATION_STATUS,
    HEALTHY, NODE_STATE, YARN_APPLICATION_STATE,
};
use crate::error::Result;
use crate::http::{Transport, UreqTransport};
use crate::operation::{OperationDescriptor, ParamSpec};
use crate::request::Params;
use crate::response::Response;

pub static CLUSTER_INFORMATION: OperationDescriptor = OperationDescriptor {
    name: "cluster_information",
    path: "/info",
    ..OperationDescriptor::GET
};

pub static CLUSTER_METRICS: OperationDescriptor = OperationDescriptor {
    name: "cluster_metrics",
    path: "/metrics",
    ..OperationDescriptor::GET
};

pub static CLUSTER_SCHEDULER: OperationDescriptor = OperationDescriptor {
    name: "cluster_scheduler",
    path: "/scheduler",
    ..OperationDescriptor::GET
};

pub static CLUSTER_APPLICATIONS: OperationDescriptor = OperationDescriptor {
    name: "cluster_applications",
    path: "/apps",
    params: &[
        ParamSpec::query("state", "state").one_of(&YARN_APPLICATION_STATE),
        ParamSpec::query("final_status", "finalStatus").one_of(&FINAL_APPLICATION_STATUS),
        ParamSpec::query("user", "user"),
        ParamSpec::query("queue", "queue"),
        ParamSpec::query("limit", "limit"),
        ParamSpec::query("started_time_begin", "startedTimeBegin"),
        ParamSpec::query("started_time_end", "startedTimeEnd"),
        ParamSpec::query("finished_time_begin", "finishedTimeBegin"),
        ParamSpec::query("finished_time_end", "finishedTimeEnd"),
    ],
    ..OperationDescriptor::GET
};

pub static CLUSTER_APPLICATION: OperationDescriptor = OperationDescriptor {
    name: "cluster_application",
    path: "/apps/{application_id}",
    params: &[ParamSpec::path("application_id")],
    ..OperationDescriptor::GET
};

pub static CLUSTER_APPLICATION_ATTEMPTS: OperationDescriptor = OperationDescriptor {
    name: "cluster_application_attempts",
    path: "/apps/{application_id}/appattempts",
    params: &[ParamSpec::path("application_id")],
    ..OperationDescriptor::GET
};

pub static CLUSTER_NODES: OperationDescriptor = OperationDescriptor {
    name: "cluster_nodes",
    path: "/nodes",
    params: &[
        ParamSpec::query("state", "state").one_of(&NODE_STATE),
        ParamSpec::query("healthy", "healthy").one_of(&HEALTHY),
    ],
    ..OperationDescriptor::GET
};

pub static CLUSTER_NODE: OperationDescriptor = OperationDescriptor {
    name: "cluster_node",
    path: "/nodes/{node_id}",
    params: &[ParamSpec::path("node_id")],
    ..OperationDescriptor::GET
};

/// Asks the RM to allocate an application id and report the maximum
/// resource capability.
pub static CLUSTER_NEW_APPLICATION: OperationDescriptor = OperationDescriptor {
    name: "cluster_new_application",
    path: "/apps/new-application",
    ..OperationDescriptor::POST
};

pub static OPERATIONS: &[&OperationDescriptor] = &[
    &CLUSTER_INFORMATION,
    &CLUSTER_METRICS,
    &CLUSTER_SCHEDULER,
    &CLUSTER_APPLICATIONS,
    &CLUSTER_APPLICATION,
    &CLUSTER_APPLICATION_ATTEMPTS,
    &CLUSTER_NODES,
    &CLUSTER_NODE,
    &CLUSTER_NEW_APPLICATION,
];

/// Filters for `cluster_applications`. Time bounds are epoch milliseconds,
/// passed through as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationsQuery {
    pub state: Option<YarnApplicationState>,
    pub final_status: Option<FinalApplicationStatus>,
    pub user: Option<String>,
    pub queue: Option<String>,
    pub limit: Option<String>,
    pub started_time_begin: Option<String>,
    pub started_time_end: Option<String>,
    pub finished_time_begin: Option<String>,
    pub finished_time_end: Option<String>,
}

impl ApplicationsQuery {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with_opt("state", self.state)
            .with_opt("final_status", self.final_status)
            .with_opt("user", self.user.clone())
            .with_opt("queue", self.queue.clone())
            .with_opt("limit", self.limit.clone())
            .with_opt("started_time_begin", self.started_time_begin.clone())
            .with_opt("started_time_end", self.started_time_end.clone())
            .with_opt("finished_time_begin", self.finished_time_begin.clone())
            .with_opt("finished_time_end", self.finished_time_end.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodesQuery {
    pub state: Option<NodeState>,
    pub healthy: Option<Healthy>,
}

impl NodesQuery {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with_opt("state", self.state)
            .with_opt("healthy", self.healthy)
    }
}

/// Typed handle for the ResourceManager.
#[derive(Debug, Clone)]
pub struct ResourceManager<T = UreqTransport> {
    client: ApiClient<T>,
}

impl ResourceManager<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl Default for ResourceManager<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::for_role(ApiRole::ResourceManager))
    }
}

impl<T: Transport> ResourceManager<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: ApiClient::with_transport(ApiRole::ResourceManager, config, transport),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn cluster_information(&self) -> Result<Response> {
        self.client.call(&CLUSTER_INFORMATION, &Params::new())
    }

    pub fn cluster_metrics(&self) -> Result<Response> {
        self.client.call(&CLUSTER_METRICS, &Params::new())
    }

    pub fn cluster_scheduler(&self) -> Result<Response> {
        self.client.call(&CLUSTER_SCHEDULER, &Params::new())
    }

    pub fn cluster_applications(&self, query: &ApplicationsQuery) -> Result<Response> {
        self.client.call(&CLUSTER_APPLICATIONS, &query.to_params())
    }

    pub fn cluster_application(&self, application_id: &str) -> Result<Response> {
        let params = Params::new().with("application_id", application_id);
        self.client.call(&CLUSTER_APPLICATION, &params)
    }

    pub fn cluster_application_attempts(&self, application_id: &str) -> Result<Response> {
        let params = Params::new().with("application_id", application_id);
        self.client.call(&CLUSTER_APPLICATION_ATTEMPTS, &params)
    }

    pub fn cluster_nodes(&self, query: &NodesQuery) -> Result<Response> {
        self.client.call(&CLUSTER_NODES, &query.to_params())
    }

    pub fn cluster_node(&self, node_id: &str) -> Result<Response> {
        let params = Params::new().with("node_id", node_id);
        self.client.call(&CLUSTER_NODE, &params)
    }

    pub fn cluster_new_application(&self) -> Result<Response> {
        self.client.call(&CLUSTER_NEW_APPLICATION, &Params::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn build(op: &OperationDescriptor, params: &Params) -> crate::http::HttpRequest {
        ResourceManager::default()
            .client()
            .build_request(op, params)
            .unwrap()
    }

    #[test]
    fn applications_query_scenario() {
        let query = ApplicationsQuery {
            state: Some(YarnApplicationState::Running),
            limit: Some("10".to_string()),
            ..Default::default()
        };
        let req = build(&CLUSTER_APPLICATIONS, &query.to_params());
        assert_eq!(req.query_string(), "state=RUNNING&limit=10");
    }

    #[test]
    fn empty_queries_have_no_query_string() {
        let req = build(&CLUSTER_APPLICATIONS, &ApplicationsQuery::default().to_params());
        assert_eq!(req.query_string(), "");
        let req = build(&CLUSTER_NODES, &NodesQuery::default().to_params());
        assert_eq!(req.query_string(), "");
    }

    #[test]
    fn nodes_query_serializes_healthy() {
        let query = NodesQuery {
            state: Some(NodeState::Unhealthy),
            healthy: Some(Healthy::from(false)),
        };
        let req = build(&CLUSTER_NODES, &query.to_params());
        assert_eq!(req.query_string(), "state=UNHEALTHY&healthy=false");
    }

    #[test]
    fn healthy_rejects_non_boolean() {
        let params = Params::new().with("healthy", "yes");
        let err = ResourceManager::default()
            .client()
            .build_request(&CLUSTER_NODES, &params)
            .unwrap_err();
        assert!(matches!(err, crate::YarnError::Validation { .. }));
    }

    #[test]
    fn new_application_is_post() {
        let req = build(&CLUSTER_NEW_APPLICATION, &Params::new());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/ws/v1/cluster/apps/new-application");
    }
}
