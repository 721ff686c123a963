//! NodeManager REST API (`/ws/v1/node`).

use crate::client::{ApiClient, ApiRole, ClientConfig};
use crate::constants::{ApplicationState, APPLICATION_STATE};
use crate::error::Result;
use crate::http::{Transport, UreqTransport};
use crate::operation::{OperationDescriptor, ParamSpec, ResponseFormat};
use crate::request::Params;
use crate::response::Response;

pub static NODE_INFORMATION: OperationDescriptor = OperationDescriptor {
    name: "node_information",
    path: "/info",
    ..OperationDescriptor::GET
};

/// `state` takes NodeManager application states (`INITING`, `RUNNING`, ...),
/// not the ResourceManager's `YarnApplicationState` values.
pub static NODE_APPLICATIONS: OperationDescriptor = OperationDescriptor {
    name: "node_applications",
    path: "/apps",
    params: &[
        ParamSpec::query("state", "state").one_of(&APPLICATION_STATE),
        ParamSpec::query("user", "user"),
    ],
    ..OperationDescriptor::GET
};

pub static NODE_APPLICATION: OperationDescriptor = OperationDescriptor {
    name: "node_application",
    path: "/apps/{application_id}",
    params: &[ParamSpec::path("application_id")],
    ..OperationDescriptor::GET
};

pub static NODE_CONTAINERS: OperationDescriptor = OperationDescriptor {
    name: "node_containers",
    path: "/containers",
    ..OperationDescriptor::GET
};

pub static NODE_CONTAINER: OperationDescriptor = OperationDescriptor {
    name: "node_container",
    path: "/containers/{container_id}",
    params: &[ParamSpec::path("container_id")],
    ..OperationDescriptor::GET
};

/// Raw contents of one log file of a container.
pub static NODE_CONTAINER_LOG: OperationDescriptor = OperationDescriptor {
    name: "node_container_log",
    path: "/containerlogs/{container_id}/{filename}",
    params: &[ParamSpec::path("container_id"), ParamSpec::path("filename")],
    format: ResponseFormat::Text,
    ..OperationDescriptor::GET
};

pub static OPERATIONS: &[&OperationDescriptor] = &[
    &NODE_INFORMATION,
    &NODE_APPLICATIONS,
    &NODE_APPLICATION,
    &NODE_CONTAINERS,
    &NODE_CONTAINER,
    &NODE_CONTAINER_LOG,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeApplicationsQuery {
    pub state: Option<ApplicationState>,
    pub user: Option<String>,
}

impl NodeApplicationsQuery {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with_opt("state", self.state)
            .with_opt("user", self.user.clone())
    }
}

/// Typed handle for one NodeManager.
#[derive(Debug, Clone)]
pub struct NodeManager<T = UreqTransport> {
    client: ApiClient<T>,
}

impl NodeManager<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl Default for NodeManager<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::for_role(ApiRole::NodeManager))
    }
}

impl<T: Transport> NodeManager<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: ApiClient::with_transport(ApiRole::NodeManager, config, transport),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn node_information(&self) -> Result<Response> {
        self.client.call(&NODE_INFORMATION, &Params::new())
    }

    pub fn node_applications(&self, query: &NodeApplicationsQuery) -> Result<Response> {
        self.client.call(&NODE_APPLICATIONS, &query.to_params())
    }

    pub fn node_application(&self, application_id: &str) -> Result<Response> {
        let params = Params::new().with("application_id", application_id);
        self.client.call(&NODE_APPLICATION, &params)
    }

    pub fn node_containers(&self) -> Result<Response> {
        self.client.call(&NODE_CONTAINERS, &Params::new())
    }

    pub fn node_container(&self, container_id: &str) -> Result<Response> {
        let params = Params::new().with("container_id", container_id);
        self.client.call(&NODE_CONTAINER, &params)
    }

    pub fn node_container_log(&self, container_id: &str, filename: &str) -> Result<Response> {
        let params = Params::new()
            .with("container_id", container_id)
            .with("filename", filename);
        self.client.call(&NODE_CONTAINER_LOG, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applications_filter() {
        let query = NodeApplicationsQuery {
            state: Some(ApplicationState::Running),
            user: Some("hdfs".to_string()),
        };
        let req = NodeManager::default()
            .client()
            .build_request(&NODE_APPLICATIONS, &query.to_params())
            .unwrap();
        assert_eq!(req.url, "http://localhost:8042/ws/v1/node/apps?state=RUNNING&user=hdfs");
    }

    #[test]
    fn container_path() {
        let params = Params::new().with("container_id", "container_1326821518301_0005_01_000001");
        let req = NodeManager::default()
            .client()
            .build_request(&NODE_CONTAINER, &params)
            .unwrap();
        assert_eq!(
            req.path,
            "/ws/v1/node/containers/container_1326821518301_0005_01_000001"
        );
    }
}
