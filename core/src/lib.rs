//! Blocking client for an httpbin-compatible `/get` endpoint.
//!
//! # Overview
//! Issues one GET to `{base_url}/get`, classifies what went wrong into a
//! closed three-way taxonomy (network, status, response), and otherwise
//! returns a `GetResponse` whose `origin` is a validated IPv4 address.
//!
//! # Design
//! - `Config` resolves the base URL once: explicit value, then
//!   `HTTPBIN_BASE_URL`, then `https://httpbin.org`.
//! - `Client` owns an injected `Transport`; the default is a pooled
//!   `ureq::Agent`, tests substitute a stub.
//! - No retries, caching, or timeouts of its own; timeout policy lives on
//!   the transport.
//! - Logging goes through `tracing`; the crate never installs a subscriber.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::Client;
pub use config::{Config, BASE_URL_ENV, DEFAULT_BASE_URL, ENV_PREFIX};
pub use error::{ClientError, ConfigError, ResponseError, StatusError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use types::GetResponse;
