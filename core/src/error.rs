//! Error types for the YARN API client.
//!
//! # Design
//! Four failure kinds, all surfaced to the immediate caller. A non-2xx HTTP
//! status is deliberately absent: the server answered, so the status lands in
//! the `Response` envelope instead of here. Only failures that prevent the
//! client from completing a request, or from interpreting its body, are errors.

use thiserror::Error;

/// Errors returned while building, executing, or interpreting a request.
#[derive(Debug, Error)]
pub enum YarnError {
    /// A caller-supplied value was rejected before any request was sent:
    /// outside its vocabulary, an undeclared parameter, or an unknown
    /// operation name.
    #[error("invalid value for `{parameter}`: {message}")]
    Validation { parameter: String, message: String },

    /// A path placeholder had no value.
    #[error("operation `{operation}` requires path parameter `{parameter}`")]
    MissingParameter {
        operation: &'static str,
        parameter: &'static str,
    },

    /// The transport could not complete the round-trip (refused, unreachable,
    /// timed out, or the body could not be read).
    #[error("connection failed: {0}")]
    Connection(String),

    /// The response body did not match the declared format.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl YarnError {
    pub(crate) fn validation(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        YarnError::Validation {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, YarnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_parameter() {
        let err = YarnError::validation("state", "`BOGUS` is not one of NEW, RUNNING");
        assert_eq!(
            err.to_string(),
            "invalid value for `state`: `BOGUS` is not one of NEW, RUNNING"
        );

        let err = YarnError::MissingParameter {
            operation: "cluster_application",
            parameter: "application_id",
        };
        assert_eq!(
            err.to_string(),
            "operation `cluster_application` requires path parameter `application_id`"
        );
    }
}
