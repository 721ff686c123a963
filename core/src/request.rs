//! Turns an operation descriptor plus caller arguments into an `HttpRequest`.
//!
//! # Design
//! All checks run before anything touches the network:
//! - every supplied name must be declared by the operation;
//! - every `{placeholder}` in the path template needs a non-empty value;
//! - values of vocabulary-bound parameters must be members.
//!
//! Query parameters are emitted in the order the descriptor declares them,
//! never in caller order, so identical arguments always produce identical
//! URLs. Absent values are dropped entirely rather than sent empty.

use std::net::Ipv6Addr;

use tracing::debug;
use url::Url;

use crate::client::{ApiRole, ClientConfig};
use crate::error::{Result, YarnError};
use crate::http::HttpRequest;
use crate::operation::{OperationDescriptor, ParamSpec, ResponseFormat};

/// Caller-supplied arguments for one operation, keyed by parameter name.
///
/// A `None` value means "not supplied" and is treated the same as an absent
/// key: omitted from the query, missing for a path parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Option<String>)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_opt(name, Some(value))
    }

    #[must_use]
    pub fn with_opt<V: Into<String>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.set(name, value.map(Into::into));
        self
    }

    /// Insert or replace `name`.
    pub fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Params::new(), |params, (k, v)| params.with(k, v))
    }
}

/// Build the request for `op` against the endpoint described by `role` and
/// `config`.
pub fn build_request(
    role: ApiRole,
    config: &ClientConfig,
    op: &OperationDescriptor,
    params: &Params,
) -> Result<HttpRequest> {
    for name in params.names() {
        if op.param(name).is_none() {
            return Err(YarnError::validation(
                name,
                format!("not accepted by operation `{}`", op.name),
            ));
        }
    }

    let mut url = endpoint(config)?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| YarnError::validation("host", "not usable as a base URL"))?;
        segments.clear();
        for segment in role.base_path().split('/').filter(|s| !s.is_empty()) {
            segments.push(segment);
        }
        for segment in op.path.split('/').filter(|s| !s.is_empty()) {
            match placeholder(segment) {
                Some(name) => segments.push(path_value(op, name, params)?),
                None => segments.push(segment),
            };
        }
    }

    let mut query = Vec::new();
    for spec in op.query_params() {
        if let Some(value) = params.get(spec.name) {
            check_vocabulary(spec, value)?;
            query.push((spec.wire_name.to_string(), value.to_string()));
        }
    }
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(&query);
    }

    let accept = match op.format {
        ResponseFormat::Json => "application/json",
        ResponseFormat::Text => "text/plain",
    };

    let request = HttpRequest {
        method: op.method,
        path: url.path().to_string(),
        url: url.to_string(),
        query,
        headers: vec![("accept".to_string(), accept.to_string())],
    };
    debug!(operation = op.name, url = %request.url, "built request");
    Ok(request)
}

/// `http://{host}:{port}` with the host parsed on its own, so delimiters in
/// it are rejected instead of reshaping the URL. A bare IPv6 literal is
/// bracketed first.
fn endpoint(config: &ClientConfig) -> Result<Url> {
    let invalid = |e: &dyn std::fmt::Display| {
        YarnError::validation("host", format!("`{}`: {e}", config.host))
    };
    let mut url = Url::parse("http://localhost").map_err(|e| invalid(&e))?;
    let host = match config.host.parse::<Ipv6Addr>() {
        Ok(_) => format!("[{}]", config.host),
        // `set_host` would cut the host at the colon.
        Err(_) if config.host.contains(':') && !config.host.starts_with('[') => {
            return Err(invalid(&"the port is configured separately"));
        }
        Err(_) => config.host.clone(),
    };
    url.set_host(Some(&host)).map_err(|e| invalid(&e))?;
    url.set_port(Some(config.port))
        .map_err(|()| invalid(&"cannot carry a port"))?;
    Ok(url)
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

fn path_value<'a>(op: &OperationDescriptor, name: &str, params: &'a Params) -> Result<&'a str> {
    let spec = op.param(name);
    let missing = || YarnError::MissingParameter {
        operation: op.name,
        parameter: spec.map_or("<undeclared>", |s| s.name),
    };
    let spec = spec.ok_or_else(missing)?;
    let value = params
        .get(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(missing)?;
    // The URL serializer would drop these segments.
    if value == "." || value == ".." {
        return Err(YarnError::validation(
            spec.name,
            format!("`{value}` is not a usable path segment"),
        ));
    }
    check_vocabulary(spec, value)?;
    Ok(value)
}

fn check_vocabulary(spec: &ParamSpec, value: &str) -> Result<()> {
    match spec.vocabulary {
        Some(vocabulary) => vocabulary.validate(spec.name, value),
        None => Ok(()),
    }
}
