//! Static metadata describing one callable API method.
//!
//! Every API surface declares its operations as `static` descriptor literals
//! built on the `GET`/`POST` bases. The request builder consumes them
//! generically, so adding an operation is a table entry, not new code.

use crate::constants::Vocabulary;
use crate::http::HttpMethod;

/// Where a parameter is placed in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Substituted into a `{name}` placeholder of the path template. Required.
    Path,
    /// Appended to the query string when supplied. Optional.
    Query,
}

/// Expected body format of an operation's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Text,
}

/// One parameter an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Name callers use, and the placeholder name for path parameters.
    pub name: &'static str,
    /// Query-string key sent on the wire. Unused for path parameters.
    pub wire_name: &'static str,
    pub location: ParamLocation,
    /// Closed set of values the parameter accepts, if constrained.
    pub vocabulary: Option<&'static Vocabulary>,
}

impl ParamSpec {
    pub const fn path(name: &'static str) -> Self {
        Self {
            name,
            wire_name: name,
            location: ParamLocation::Path,
            vocabulary: None,
        }
    }

    pub const fn query(name: &'static str, wire_name: &'static str) -> Self {
        Self {
            name,
            wire_name,
            location: ParamLocation::Query,
            vocabulary: None,
        }
    }

    pub const fn one_of(mut self, vocabulary: &'static Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }
}

/// Immutable description of one API method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path relative to the role's base path, with `{name}` placeholders.
    pub path: &'static str,
    /// Accepted parameters; query parameters are emitted in this order.
    pub params: &'static [ParamSpec],
    pub format: ResponseFormat,
}

impl OperationDescriptor {
    /// Base for GET operations; declarations override `name`, `path`, and
    /// `params` with struct update syntax.
    pub const GET: OperationDescriptor = OperationDescriptor {
        name: "",
        method: HttpMethod::Get,
        path: "",
        params: &[],
        format: ResponseFormat::Json,
    };

    pub const POST: OperationDescriptor = OperationDescriptor {
        method: HttpMethod::Post,
        ..OperationDescriptor::GET
    };

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn path_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params
            .iter()
            .filter(|p| p.location == ParamLocation::Path)
    }

    pub fn query_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params
            .iter()
            .filter(|p| p.location == ParamLocation::Query)
    }

    /// Names inside `{...}` in the path template, in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NODE_STATE;

    static NODE: OperationDescriptor = OperationDescriptor {
        name: "cluster_node",
        path: "/nodes/{node_id}",
        params: &[ParamSpec::path("node_id")],
        ..OperationDescriptor::GET
    };

    static NODES: OperationDescriptor = OperationDescriptor {
        name: "cluster_nodes",
        path: "/nodes",
        params: &[
            ParamSpec::query("state", "state").one_of(&NODE_STATE),
            ParamSpec::query("healthy", "healthy"),
        ],
        ..OperationDescriptor::GET
    };

    #[test]
    fn placeholders_in_template_order() {
        let op = OperationDescriptor {
            name: "task_attempt",
            path: "/jobs/{job_id}/tasks/{task_id}/attempts/{attempt_id}",
            ..OperationDescriptor::GET
        };
        let names: Vec<_> = op.placeholders().collect();
        assert_eq!(names, ["job_id", "task_id", "attempt_id"]);
    }

    #[test]
    fn params_split_by_location() {
        assert_eq!(NODE.path_params().count(), 1);
        assert_eq!(NODE.query_params().count(), 0);
        assert_eq!(NODES.path_params().count(), 0);
        let wire: Vec<_> = NODES.query_params().map(|p| p.wire_name).collect();
        assert_eq!(wire, ["state", "healthy"]);
    }

    #[test]
    fn lookup_by_name() {
        assert!(NODES.param("state").unwrap().vocabulary.is_some());
        assert!(NODES.param("healthy").unwrap().vocabulary.is_none());
        assert!(NODES.param("queue").is_none());
    }

    #[test]
    fn post_base_keeps_json_format() {
        assert_eq!(OperationDescriptor::POST.method, HttpMethod::Post);
        assert_eq!(OperationDescriptor::POST.format, ResponseFormat::Json);
        assert_eq!(NODE.method, HttpMethod::Get);
    }
}
