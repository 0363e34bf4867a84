//! HTTP transport seam for the httpbin client.
//!
//! # Design
//! Requests and responses are plain owned data. `Client` builds an
//! `HttpRequest`, hands it to a `Transport`, and classifies whatever comes
//! back. The transport only moves bytes: it must return 4xx/5xx responses as
//! `Ok(HttpResponse)` and reserve `Err` for faults below HTTP (connect, DNS,
//! timeout, broken body stream). Bodies stay raw bytes; decoding them is the
//! client's schema checkpoint, not a transport fault. Swapping the transport
//! for a stub keeps the client testable without a network.

use std::error::Error as StdError;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Boxed underlying cause carried by a `TransportError`.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// `body` is whatever the server sent, undecoded.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A fault raised below the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    #[error("request timed out: {0}")]
    Timeout(#[source] BoxError),

    #[error("host lookup failed: {0}")]
    Dns(#[source] BoxError),

    #[error("transport error: {0}")]
    Other(#[source] BoxError),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, TransportError::Connect(_))
    }
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                TransportError::Timeout(err.into())
            }
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::AddrNotAvailable
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => TransportError::Connect(err.into()),
            _ => TransportError::Other(err.into()),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Io(io_err) => io_err.into(),
            ureq::Error::Timeout(_) => TransportError::Timeout(err.into()),
            ureq::Error::HostNotFound => TransportError::Dns(err.into()),
            ureq::Error::ConnectionFailed => TransportError::Connect(err.into()),
            other => TransportError::Other(other.into()),
        }
    }
}

/// Executes one HTTP round trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a reusable `ureq::Agent`.
///
/// The agent keeps its connection pool for the lifetime of the transport and
/// is safe to share between threads. Status codes are never turned into
/// errors here; that is the client's job.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    /// Agent without a timeout: a call blocks until the peer answers or the
    /// OS gives up on the connection.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Agent with a global per-call timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let body = request.body.as_deref();
        let headers = request
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()));

        let mut response = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), headers).call(),
            HttpMethod::Post => {
                let builder = with_headers(self.agent.post(url), headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Put => {
                let builder = with_headers(self.agent.put(url), headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        }?;

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
        // Uncapped and undecoded; the client's checkpoints classify the body.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<'a, B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: impl Iterator<Item = (&'a str, &'a str)>,
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        let mut response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: Vec::new(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 301;
        assert!(!response.is_success());
        response.status = 404;
        assert!(!response.is_success());
        response.status = 500;
        assert!(!response.is_success());
    }

    #[test]
    fn refused_connection_maps_to_connect() {
        let err: TransportError = io::Error::new(io::ErrorKind::ConnectionRefused, "refused").into();
        assert!(err.is_connect());
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn timed_out_io_maps_to_timeout() {
        let err: TransportError = io::Error::new(io::ErrorKind::TimedOut, "slow").into();
        assert!(err.is_timeout());
    }

    #[test]
    fn unknown_io_maps_to_other() {
        let err: TransportError = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert!(matches!(err, TransportError::Other(_)));
    }

    #[test]
    fn ureq_host_not_found_maps_to_dns() {
        let err: TransportError = ureq::Error::HostNotFound.into();
        assert!(matches!(err, TransportError::Dns(_)));
    }

    #[test]
    fn source_is_preserved() {
        let err: TransportError = io::Error::new(io::ErrorKind::ConnectionReset, "reset").into();
        let source = StdError::source(&err).expect("source");
        assert_eq!(source.to_string(), "reset");
    }
}
