//! Validated payload of the `/get` endpoint.
//!
//! # Design
//! `GetResponse` can only be built through a fallible constructor, and its
//! `Deserialize` impl goes through the same gate via `serde(try_from)`, so a
//! value that exists always holds a well-formed IPv4 origin. Only `origin` is
//! read from the payload; the rest of what httpbin sends back is ignored.

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::error::ResponseError;

/// The caller's network origin as reported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGetResponse")]
pub struct GetResponse {
    origin: Ipv4Addr,
}

/// Shape of the payload before validation.
#[derive(Deserialize)]
struct RawGetResponse {
    origin: String,
}

impl GetResponse {
    pub fn new(origin: &str) -> Result<Self, ResponseError> {
        let addr = origin
            .parse::<Ipv4Addr>()
            .map_err(|source| ResponseError::InvalidOrigin {
                origin: origin.to_string(),
                source,
            })?;
        Ok(Self { origin: addr })
    }

    /// Parse and validate a JSON body.
    pub fn from_json(body: &str) -> Result<Self, ResponseError> {
        Self::from_slice(body.as_bytes())
    }

    /// Parse and validate a raw body. Bytes that are not UTF-8 fail as JSON.
    pub fn from_slice(body: &[u8]) -> Result<Self, ResponseError> {
        let raw: RawGetResponse = serde_json::from_slice(body)?;
        Self::try_from(raw)
    }

    pub fn origin(&self) -> Ipv4Addr {
        self.origin
    }
}

impl TryFrom<RawGetResponse> for GetResponse {
    type Error = ResponseError;

    fn try_from(raw: RawGetResponse) -> Result<Self, Self::Error> {
        Self::new(&raw.origin)
    }
}

impl From<Ipv4Addr> for GetResponse {
    fn from(origin: Ipv4Addr) -> Self {
        Self { origin }
    }
}

impl fmt::Display for GetResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)
    }
}
