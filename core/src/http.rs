//! HTTP transport types and the `Transport` seam.
//!
//! # Design
//! Requests and responses are plain data. The request builder produces an
//! `HttpRequest` without touching the network; a `Transport` executes it and
//! hands back an `HttpResponse`. Keeping the seam as a trait lets tests swap
//! in a recording stub and verify that rejected calls never reach the wire.
//!
//! `UreqTransport` is the default implementation. It treats every HTTP status
//! as data: 4xx/5xx come back as `Ok(HttpResponse)`, and only failures that
//! prevent a round-trip map to `YarnError::Connection`.

use std::fmt;

use tracing::{debug, trace};

use crate::error::YarnError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` is the base path plus the interpolated operation template, already
/// percent-encoded. `query` keeps the pairs in declared order; `url` is the
/// absolute URL the transport should hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// The form-urlencoded query, without the leading `?`. Empty when no
    /// parameters were supplied.
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// Body bytes exactly as received.
    pub body: Vec<u8>,
}

/// Executes one `HttpRequest`.
///
/// Implementations must return non-2xx responses as `Ok` and reserve `Err`
/// for transport-level failures.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, YarnError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, YarnError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a shared `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, YarnError> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.send_empty()
            }
        };

        let mut response = result.map_err(|e| YarnError::Connection(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // Unbounded, and left undecoded.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| YarnError::Connection(e.to_string()))?;

        trace!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: Vec<(&str, &str)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost:8088/ws/v1/cluster/apps".to_string(),
            path: "/ws/v1/cluster/apps".to_string(),
            query: query
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers: Vec::new(),
        }
    }

    #[test]
    fn query_string_empty_without_pairs() {
        assert_eq!(request(Vec::new()).query_string(), "");
    }

    #[test]
    fn query_string_keeps_order_and_encodes() {
        let req = request(vec![("user", "a b"), ("queue", "root.x&y")]);
        assert_eq!(req.query_string(), "user=a+b&queue=root.x%26y");
    }

    #[test]
    fn method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn connection_refused_is_connection_error() {
        // Bind then drop to obtain a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let mut req = request(Vec::new());
        req.url = format!("http://127.0.0.1:{port}/ws/v1/cluster/info");

        let err = UreqTransport::new().execute(&req).unwrap_err();
        assert!(matches!(err, YarnError::Connection(_)), "got {err:?}");
    }

    /// Answer one connection with a canned `200 OK` carrying `body`.
    fn serve_once(body: Vec<u8>) -> u16 {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let status = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(status.as_bytes()).unwrap();
            stream.write_all(&body).unwrap();
        });
        port
    }

    #[test]
    fn large_body_is_read_in_full() {
        let size = 11 * 1024 * 1024;
        let port = serve_once(vec![b'x'; size]);
        let mut req = request(Vec::new());
        req.url = format!("http://127.0.0.1:{port}/ws/v1/node/containerlogs/c1/stdout");

        let resp = UreqTransport::new().execute(&req).unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body.len(), size);
    }

    #[test]
    fn body_bytes_are_not_decoded() {
        let port = serve_once(vec![0xff, 0xfe, b'o', b'k']);
        let mut req = request(Vec::new());
        req.url = format!("http://127.0.0.1:{port}/ws/v1/node/containerlogs/c1/stdout");

        let resp = UreqTransport::new().execute(&req).unwrap();
        assert_eq!(resp.body, [0xff, 0xfe, b'o', b'k']);
    }
}
