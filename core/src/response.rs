//! Typed wrapper around one HTTP response.
//!
//! # Design
//! `Response` is built once per call and never mutated. The body is parsed
//! eagerly at construction so `data()` is deterministic and cheap to call
//! repeatedly; a parse failure is stored rather than raised, keeping
//! `raw_bytes()` and `status_code()` available for inspection.
//!
//! The body is held as received. `raw_body()` and text `data()` decode it
//! lossily, replacing invalid UTF-8 with U+FFFD; `raw_bytes()` never does.
//!
//! Non-2xx statuses are not errors here. YARN reports failures as a JSON
//! `RemoteException` body, exposed through `remote_exception()`.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, YarnError};
use crate::http::HttpResponse;
use crate::operation::ResponseFormat;

/// Status, headers, raw body, and parsed data of one response.
#[derive(Debug, Clone)]
pub struct Response {
    status_code: u16,
    headers: Vec<(String, String)>,
    raw_body: Vec<u8>,
    data: std::result::Result<Value, String>,
}

impl Response {
    pub fn new(response: HttpResponse, format: ResponseFormat) -> Self {
        let data = match format {
            ResponseFormat::Text => Ok(Value::String(
                String::from_utf8_lossy(&response.body).into_owned(),
            )),
            ResponseFormat::Json if response.body.iter().all(u8::is_ascii_whitespace) => {
                Ok(Value::Null)
            }
            ResponseFormat::Json => {
                serde_json::from_slice(&response.body).map_err(|e| e.to_string())
            }
        };
        Self {
            status_code: response.status,
            headers: response.headers,
            raw_body: response.body,
            data,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as text, lossily decoded.
    pub fn raw_body(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw_body)
    }

    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw_body
    }

    /// Parsed body. `null` for an empty body; a JSON string for text
    /// operations.
    pub fn data(&self) -> Result<&Value> {
        self.data
            .as_ref()
            .map_err(|msg| YarnError::Deserialization(msg.clone()))
    }

    /// Deserialize the body into a typed model.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.data()?;
        T::deserialize(value).map_err(|e| YarnError::Deserialization(e.to_string()))
    }

    /// The server-side exception carried by an error response, if any.
    pub fn remote_exception(&self) -> Option<RemoteException> {
        if self.is_success() {
            return None;
        }
        self.json::<RemoteExceptionBody>()
            .ok()
            .map(|body| body.remote_exception)
    }
}

/// YARN's error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteException {
    pub exception: String,
    pub message: String,
    #[serde(default)]
    pub java_class_name: Option<String>,
}

#[derive(Deserialize)]
struct RemoteExceptionBody {
    #[serde(rename = "RemoteException")]
    remote_exception: RemoteException,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.into(),
        }
    }

    #[test]
    fn parses_json_body() {
        let resp = Response::new(response(200, r#"{"clusterInfo":{"id":1}}"#), ResponseFormat::Json);
        assert_eq!(resp.status_code(), 200);
        assert!(resp.is_success());
        assert_eq!(resp.data().unwrap()["clusterInfo"]["id"], 1);
    }

    #[test]
    fn malformed_json_keeps_raw_body() {
        let resp = Response::new(response(200, "<html>oops</html>"), ResponseFormat::Json);
        let err = resp.data().unwrap_err();
        assert!(matches!(err, YarnError::Deserialization(_)));
        assert_eq!(resp.raw_body(), "<html>oops</html>");
        assert_eq!(resp.status_code(), 200);
        // Repeated calls fail the same way.
        assert!(resp.data().is_err());
    }

    #[test]
    fn empty_body_is_null() {
        let resp = Response::new(response(204, ""), ResponseFormat::Json);
        assert_eq!(resp.data().unwrap(), &Value::Null);
    }

    #[test]
    fn text_body_is_passed_through() {
        let resp = Response::new(response(200, "line 1\nline 2\n"), ResponseFormat::Text);
        assert_eq!(resp.data().unwrap().as_str(), Some("line 1\nline 2\n"));
    }

    #[test]
    fn invalid_utf8_kept_in_raw_bytes() {
        let raw = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: vec![0xff, 0xfe, b'o', b'k'],
        };
        let resp = Response::new(raw, ResponseFormat::Text);
        assert_eq!(resp.raw_bytes(), [0xff, 0xfe, b'o', b'k']);
        assert_eq!(resp.raw_body(), "\u{fffd}\u{fffd}ok");
        assert_eq!(resp.data().unwrap().as_str(), Some("\u{fffd}\u{fffd}ok"));
    }

    #[test]
    fn typed_deserialization_mismatch() {
        #[derive(Debug, Deserialize)]
        struct Expected {
            #[allow(dead_code)]
            needed: u32,
        }
        let resp = Response::new(response(200, r#"{"other":true}"#), ResponseFormat::Json);
        let err = resp.json::<Expected>().unwrap_err();
        assert!(matches!(err, YarnError::Deserialization(_)));
    }

    #[test]
    fn not_found_exposes_remote_exception() {
        let body = r#"{"RemoteException":{"exception":"NotFoundException","message":"app with id: application_9 not found","javaClassName":"org.apache.hadoop.yarn.webapp.NotFoundException"}}"#;
        let resp = Response::new(response(404, body), ResponseFormat::Json);
        assert!(!resp.is_success());
        assert_eq!(resp.raw_body(), body);

        let exception = resp.remote_exception().unwrap();
        assert_eq!(exception.exception, "NotFoundException");
        assert!(exception.message.contains("application_9"));
    }

    #[test]
    fn success_has_no_remote_exception() {
        let resp = Response::new(response(200, "{}"), ResponseFormat::Json);
        assert!(resp.remote_exception().is_none());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let resp = Response::new(response(200, "{}"), ResponseFormat::Json);
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("x-missing"), None);
    }
}
