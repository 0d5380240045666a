//! Transport-level settings that extend or override request-derived ones.
//!
//! # Design
//! Every field is optional. A set field wins over the value the request
//! supplies for the same setting; unset fields leave the request's value in
//! place. The struct is serde-enabled so applications can keep transport
//! settings next to the rest of their configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::http::SslVersion;
use crate::params::Params;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportOptions {
    /// Connect timeout in seconds; `0` disables the bound.
    pub connect_timeout: Option<u64>,
    /// Total timeout in seconds; `0` disables the bound.
    pub timeout: Option<u64>,
    pub user_agent: Option<String>,
    /// Proxy URL, e.g. `http://proxy:3128` or `socks5://127.0.0.1:1080`.
    pub proxy: Option<String>,
    /// libcurl-style version code, see `SslVersion`.
    pub ssl_version: Option<i32>,
    pub headers: BTreeMap<String, String>,
}

fn seconds(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}

impl TransportOptions {
    pub fn connect_timeout_or(&self, request_value: Option<Duration>) -> Option<Duration> {
        self.connect_timeout.map_or(request_value, seconds)
    }

    pub fn timeout_or(&self, request_value: Option<Duration>) -> Option<Duration> {
        self.timeout.map_or(request_value, seconds)
    }

    pub fn ssl_version_or(&self, request_value: SslVersion) -> Result<SslVersion, ConfigurationError> {
        match self.ssl_version {
            Some(code) => SslVersion::try_from(code),
            None => Ok(request_value),
        }
    }

    /// Request headers with the transport's own headers layered on top.
    pub fn merge_headers(&self, request_headers: &Params) -> Params {
        let mut merged = request_headers.clone();
        if let Some(agent) = &self.user_agent {
            merged.remove_ignore_case("user-agent");
            merged.insert("User-Agent", agent.as_str());
        }
        for (name, value) in &self.headers {
            merged.remove_ignore_case(name);
            merged.insert(name.as_str(), value.as_str());
        }
        merged
    }
}
