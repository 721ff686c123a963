//! Client core for the Hadoop YARN REST APIs.
//!
//! # Overview
//! Turns typed method calls into HTTP requests against a ResourceManager,
//! NodeManager, MapReduce ApplicationMaster, or JobHistory Server, and wraps
//! each reply in a `Response` envelope.
//!
//! # Design
//! - Every operation is a static `OperationDescriptor`; one generic request
//!   builder validates and serializes arguments for all of them.
//! - `ApiClient` splits a call into `build_request` (pure), a pluggable
//!   `Transport` (I/O), and `parse_response` (pure).
//! - Validation failures and missing path parameters are raised before the
//!   transport is touched. Non-2xx statuses are returned, not raised.
//! - Response models in `types` are defined independently of the mock
//!   server; integration tests catch schema drift.

pub mod api;
pub mod client;
pub mod constants;
pub mod error;
pub mod http;
pub mod operation;
pub mod request;
pub mod response;
pub mod types;

pub use api::{
    ApplicationMaster, ApplicationsQuery, HistoryServer, JobsQuery, NodeApplicationsQuery,
    NodeManager, NodesQuery, ResourceManager,
};
pub use client::{ApiClient, ApiRole, ClientConfig};
pub use constants::{
    ApplicationState, ContainerState, FinalApplicationStatus, Healthy, JobState, NodeState,
    TaskType, Vocabulary, YarnApplicationState,
};
pub use error::YarnError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use operation::{OperationDescriptor, ParamLocation, ParamSpec, ResponseFormat};
pub use request::Params;
pub use response::{RemoteException, Response};
