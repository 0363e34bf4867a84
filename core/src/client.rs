//! Blocking client for the httpbin `/get` endpoint.
//!
//! # Design
//! `get()` runs three checkpoints in order and stops at the first failure:
//!
//! 1. transport: the round trip itself (`ClientError::Network`)
//! 2. status: anything outside 2xx (`ClientError::Status`)
//! 3. schema: JSON with an IPv4 `origin` (`ClientError::Response`)
//!
//! As in the host-does-IO split, `build_get` and `parse_get` are pure and
//! usable on their own; `get` glues them to the owned `Transport`. Nothing is
//! retried or cached, and no state survives between calls.

use crate::config::Config;
use crate::error::{ClientError, StatusError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::GetResponse;

const GET_PATH: &str = "/get";

/// Client for a single httpbin-compatible service.
pub struct Client<T = UreqTransport> {
    config: Config,
    transport: T,
}

impl Client<UreqTransport> {
    /// Client backed by a default `UreqTransport`.
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn build_get(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.config.endpoint(GET_PATH),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    /// Status and schema checkpoints for a response to `build_get`.
    pub fn parse_get(&self, response: HttpResponse) -> Result<GetResponse, ClientError> {
        let url = self.config.endpoint(GET_PATH);
        check_status(&url, &response)?;

        GetResponse::from_slice(&response.body).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "unexpected response payload");
            ClientError::Response(e)
        })
    }

    /// Fetch the caller's origin. Blocks for one round trip.
    pub fn get(&self) -> Result<GetResponse, ClientError> {
        let request = self.build_get();
        tracing::debug!(url = %request.url, "GET");

        let response = self.transport.execute(&request).map_err(|e| {
            tracing::warn!(url = %request.url, error = %e, "request failed");
            ClientError::Network(e)
        })?;

        let parsed = self.parse_get(response)?;
        tracing::debug!(origin = %parsed, "GET succeeded");
        Ok(parsed)
    }
}

fn check_status(url: &str, response: &HttpResponse) -> Result<(), StatusError> {
    if response.is_success() {
        return Ok(());
    }
    let err = StatusError::new(response.status, url, &String::from_utf8_lossy(&response.body));
    tracing::warn!(status = err.status, url = %url, body = %err.body, "request failed with status");
    Err(err)
}
