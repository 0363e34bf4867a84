//! Base URL resolution for the httpbin client.
//!
//! Precedence: explicit argument, then `HTTPBIN_BASE_URL`, then
//! `https://httpbin.org`. The result is validated once and never changes.

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://httpbin.org";

/// Prefix shared by every environment variable this crate reads.
pub const ENV_PREFIX: &str = "HTTPBIN_";

pub const BASE_URL_ENV: &str = "HTTPBIN_BASE_URL";

/// Immutable client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: Url,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }
}

impl Config {
    /// Resolve against the process environment.
    pub fn new(base_url: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve(base_url, |key| std::env::var(key).ok())
    }

    /// Resolve with only the environment and the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(None)
    }

    /// Resolve with an explicit variable lookup in place of `std::env`.
    pub fn resolve<F>(explicit: Option<&str>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = match explicit {
            Some(url) => url.to_string(),
            None => lookup(BASE_URL_ENV)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = parse_base_url(value.trim())?;
        tracing::debug!(base_url = %base_url, "resolved httpbin config");
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join `path` onto the base URL's path, keeping any path prefix and
    /// query the base has. The fragment is dropped.
    pub fn endpoint(&self, path: &str) -> String {
        let mut url = self.base_url.clone();
        url.set_fragment(None);
        // http(s) URLs always have a path to extend.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url.into()
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ConfigError::UnsupportedScheme {
                value: value.to_string(),
                scheme: scheme.to_string(),
            })
        }
    }
    Ok(url)
}
