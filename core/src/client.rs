//! Connection configuration and the generic client handle.
//!
//! # Design
//! `ApiClient` binds one API role to a host/port and a `Transport`, and runs
//! any `OperationDescriptor` through the same three steps:
//! `build_request` (pure), `Transport::execute` (I/O), `parse_response`
//! (pure). The build and parse halves are public so callers that own their
//! own I/O can use them without a transport.
//!
//! The handle holds no mutable state; one instance can serve concurrent
//! callers whenever its transport can.

use std::fmt;

use tracing::debug;

use crate::api;
use crate::error::{Result, YarnError};
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::operation::OperationDescriptor;
use crate::request::{self, Params};
use crate::response::Response;

/// The four YARN REST roles, each with a fixed base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiRole {
    ResourceManager,
    NodeManager,
    /// MapReduce ApplicationMaster, reached through the RM web proxy.
    ApplicationMaster,
    HistoryServer,
}

impl ApiRole {
    pub const ALL: [ApiRole; 4] = [
        ApiRole::ResourceManager,
        ApiRole::NodeManager,
        ApiRole::ApplicationMaster,
        ApiRole::HistoryServer,
    ];

    pub const fn base_path(self) -> &'static str {
        match self {
            ApiRole::ResourceManager => "/ws/v1/cluster",
            ApiRole::NodeManager => "/ws/v1/node",
            ApiRole::ApplicationMaster => "/proxy",
            ApiRole::HistoryServer => "/ws/v1/history",
        }
    }

    pub const fn default_port(self) -> u16 {
        match self {
            ApiRole::ResourceManager | ApiRole::ApplicationMaster => 8088,
            ApiRole::NodeManager => 8042,
            ApiRole::HistoryServer => 19888,
        }
    }

    pub fn operations(self) -> &'static [&'static OperationDescriptor] {
        match self {
            ApiRole::ResourceManager => api::resource_manager::OPERATIONS,
            ApiRole::NodeManager => api::node_manager::OPERATIONS,
            ApiRole::ApplicationMaster => api::application_master::OPERATIONS,
            ApiRole::HistoryServer => api::history_server::OPERATIONS,
        }
    }

    pub fn operation(self, name: &str) -> Option<&'static OperationDescriptor> {
        self.operations().iter().copied().find(|op| op.name == name)
    }
}

impl fmt::Display for ApiRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiRole::ResourceManager => "ResourceManager",
            ApiRole::NodeManager => "NodeManager",
            ApiRole::ApplicationMaster => "ApplicationMaster",
            ApiRole::HistoryServer => "HistoryServer",
        };
        f.write_str(name)
    }
}

pub const DEFAULT_HOST: &str = "localhost";

/// Host and port of one API endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `localhost` on the role's conventional port.
    pub fn for_role(role: ApiRole) -> Self {
        Self::new(DEFAULT_HOST, role.default_port())
    }

    /// Fill unset fields from the role's defaults.
    pub fn resolve(role: ApiRole, host: Option<String>, port: Option<u16>) -> Self {
        Self {
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port.unwrap_or_else(|| role.default_port()),
        }
    }
}

/// Executes operations of one role against one endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport> {
    role: ApiRole,
    config: ClientConfig,
    transport: T,
}

impl ApiClient<UreqTransport> {
    pub fn new(role: ApiRole, config: ClientConfig) -> Self {
        Self::with_transport(role, config, UreqTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(role: ApiRole, config: ClientConfig, transport: T) -> Self {
        Self {
            role,
            config,
            transport,
        }
    }

    pub fn role(&self) -> ApiRole {
        self.role
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_request(&self, op: &OperationDescriptor, params: &Params) -> Result<HttpRequest> {
        request::build_request(self.role, &self.config, op, params)
    }

    pub fn parse_response(&self, op: &OperationDescriptor, response: HttpResponse) -> Response {
        Response::new(response, op.format)
    }

    /// Build, execute, and wrap one call. Validation failures return before
    /// the transport is touched.
    pub fn call(&self, op: &OperationDescriptor, params: &Params) -> Result<Response> {
        let request = self.build_request(op, params)?;
        let response = self.transport.execute(&request)?;
        debug!(
            role = %self.role,
            operation = op.name,
            status = response.status,
            "operation completed"
        );
        Ok(self.parse_response(op, response))
    }

    /// Look up `name` in this role's operation table and call it.
    pub fn call_by_name(&self, name: &str, params: &Params) -> Result<Response> {
        let op = self.role.operation(name).ok_or_else(|| {
            YarnError::validation(
                "operation",
                format!("{} has no operation `{name}`", self.role),
            )
        })?;
        self.call(op, params)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::api::resource_manager::{CLUSTER_APPLICATION, CLUSTER_APPLICATIONS};

    /// Records every request and answers with a canned response.
    struct Recording {
        seen: Mutex<Vec<HttpRequest>>,
        status: u16,
        body: &'static str,
    }

    impl Recording {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                status,
                body,
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    impl Transport for Recording {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.into(),
            })
        }
    }

    fn rm(transport: &Recording) -> ApiClient<&Recording> {
        ApiClient::with_transport(
            ApiRole::ResourceManager,
            ClientConfig::for_role(ApiRole::ResourceManager),
            transport,
        )
    }

    #[test]
    fn role_defaults() {
        assert_eq!(ClientConfig::for_role(ApiRole::NodeManager).port, 8042);
        assert_eq!(ClientConfig::for_role(ApiRole::HistoryServer).port, 19888);
        assert_eq!(ApiRole::ResourceManager.base_path(), "/ws/v1/cluster");

        let config = ClientConfig::resolve(ApiRole::NodeManager, Some("nm1".to_string()), None);
        assert_eq!(config, ClientConfig::new("nm1", 8042));
    }

    #[test]
    fn call_executes_and_wraps() {
        let transport = Recording::new(200, r#"{"apps":null}"#);
        let resp = rm(&transport).call(&CLUSTER_APPLICATIONS, &Params::new()).unwrap();
        assert_eq!(resp.status_code(), 200);
        assert!(resp.data().unwrap()["apps"].is_null());

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "http://localhost:8088/ws/v1/cluster/apps");
    }

    #[test]
    fn invalid_value_never_reaches_transport() {
        let transport = Recording::new(200, "{}");
        let params = Params::new().with("final_status", "MAYBE");
        let err = rm(&transport).call(&CLUSTER_APPLICATIONS, &params).unwrap_err();
        assert!(matches!(err, YarnError::Validation { .. }));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn missing_path_parameter_never_reaches_transport() {
        let transport = Recording::new(200, "{}");
        let err = rm(&transport).call(&CLUSTER_APPLICATION, &Params::new()).unwrap_err();
        assert!(matches!(err, YarnError::MissingParameter { .. }));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn error_status_is_returned_not_raised() {
        let transport = Recording::new(500, "boom");
        let params = Params::new().with("application_id", "application_1");
        let resp = rm(&transport).call(&CLUSTER_APPLICATION, &params).unwrap();
        assert_eq!(resp.status_code(), 500);
        assert_eq!(resp.raw_body(), "boom");
        assert!(resp.data().is_err());
    }

    #[test]
    fn call_by_name_uses_role_table() {
        let transport = Recording::new(200, "{}");
        let client = rm(&transport);
        client.call_by_name("cluster_metrics", &Params::new()).unwrap();
        assert_eq!(
            transport.seen.lock().unwrap()[0].path,
            "/ws/v1/cluster/metrics"
        );

        let err = client.call_by_name("node_containers", &Params::new()).unwrap_err();
        assert!(matches!(err, YarnError::Validation { ref parameter, .. } if parameter == "operation"));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn transport_errors_propagate() {
        struct Refusing;
        impl Transport for Refusing {
            fn execute(&self, _: &HttpRequest) -> Result<HttpResponse> {
                Err(YarnError::Connection("connection refused".to_string()))
            }
        }
        let client = ApiClient::with_transport(
            ApiRole::ResourceManager,
            ClientConfig::for_role(ApiRole::ResourceManager),
            Refusing,
        );
        let err = client.call(&CLUSTER_APPLICATIONS, &Params::new()).unwrap_err();
        assert!(matches!(err, YarnError::Connection(_)));
    }
}
