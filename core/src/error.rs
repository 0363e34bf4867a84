//! Error types for the httpbin client.
//!
//! # Design
//! `ClientError` is closed: every failed `get()` lands in exactly one of
//! three variants, one per checkpoint, and each wraps the cause that tripped
//! it. Callers match on the variant to handle one kind, or treat the enum as
//! a whole to handle all of them. Configuration problems happen before a
//! client exists and get their own `ConfigError`.

use std::net::AddrParseError;

use crate::http::TransportError;

const BODY_SNIPPET_MAX: usize = 512;

/// Errors returned by `Client::get` and `Client::parse_get`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("status error: {0}")]
    Status(#[from] StatusError),

    /// The body was not JSON or did not match the expected shape.
    #[error("response error: {0}")]
    Response(#[from] ResponseError),
}

impl ClientError {
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Status(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, ClientError::Response(_))
    }

    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status(err) => Some(err.status),
            _ => None,
        }
    }
}

/// A response whose status is outside 2xx.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("HTTP {status} from {url}")]
pub struct StatusError {
    pub status: u16,
    pub url: String,
    /// Leading part of the response body, for diagnostics.
    pub body: String,
}

impl StatusError {
    pub fn new(status: u16, url: impl Into<String>, body: &str) -> Self {
        Self {
            status,
            url: url.into(),
            body: truncate_body(body),
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// The body failed to parse or to validate.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// Not JSON, not an object, or `origin` missing or not a string.
    #[error("invalid payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("origin {origin:?} is not an IPv4 address")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: AddrParseError,
    },
}

/// The base URL could not be resolved into something the client can call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL {value:?}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL {value:?} has unsupported scheme {scheme:?}")]
    UnsupportedScheme { value: String, scheme: String },
}

pub(crate) fn truncate_body(body: &str) -> String {
    if body.len() <= BODY_SNIPPET_MAX {
        return body.to_string();
    }
    let mut end = BODY_SNIPPET_MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::*;

    #[test]
    fn status_is_recoverable() {
        let err = ClientError::from(StatusError::new(503, "http://x/get", "down"));
        assert!(err.is_status());
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "status error: HTTP 503 from http://x/get");
    }

    #[test]
    fn kinds_are_exclusive() {
        let network = ClientError::from(TransportError::from(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "refused",
        )));
        assert!(network.is_network());
        assert!(!network.is_status());
        assert!(!network.is_response());
        assert_eq!(network.status(), None);

        let response = ClientError::from(ResponseError::from(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        ));
        assert!(response.is_response());
        assert!(!response.is_network());
        assert!(!response.is_status());
    }

    #[test]
    fn network_error_keeps_cause_chain() {
        let err = ClientError::from(TransportError::from(io::Error::new(
            io::ErrorKind::TimedOut,
            "deadline",
        )));
        let transport = err.source().expect("transport cause");
        let cause = transport.source().expect("io cause");
        assert_eq!(cause.to_string(), "deadline");
    }

    #[test]
    fn status_classes() {
        assert!(StatusError::new(404, "u", "").is_client_error());
        assert!(!StatusError::new(404, "u", "").is_server_error());
        assert!(StatusError::new(500, "u", "").is_server_error());
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(BODY_SNIPPET_MAX + 10);
        let err = StatusError::new(500, "u", &body);
        assert!(err.body.ends_with("...[truncated]"));
        assert_eq!(err.body.len(), BODY_SNIPPET_MAX + "...[truncated]".len());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = "é".repeat(BODY_SNIPPET_MAX);
        let snippet = truncate_body(&body);
        assert!(snippet.ends_with("...[truncated]"));
    }

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("oops"), "oops");
    }
}
