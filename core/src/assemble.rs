//! Turns a configured `Request` into an `HttpRequest`.
//!
//! # Design
//! Assembly is pure: URL segments, query string, body and method are all
//! resolved here without any I/O, so every transport sends exactly the same
//! thing and the rules can be tested in isolation. Order matters: segments
//! first, then the query, then the body, then the method (which depends on
//! whether a body was produced).

use std::time::Duration;

use crate::body::encode_body;
use crate::error::{ConfigurationError, Error};
use crate::http::{HttpMethod, HttpRequest, SslVersion};
use crate::params::Params;
use crate::request::{Method, Request};

/// `application/x-www-form-urlencoded` encoding of `params`, in order.
pub fn form_encode(params: &Params) -> Result<String, ConfigurationError> {
    serde_urlencoded::to_string(params.as_slice()).map_err(|e| ConfigurationError::Serialization(e.to_string()))
}

fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Append `/key/value` segments to `url`.
///
/// A URL that already carries a query string cannot take segments.
pub fn append_url_data(url: &str, url_data: &Params) -> Result<String, ConfigurationError> {
    if url_data.is_empty() {
        return Ok(url.to_string());
    }
    if url.contains('?') {
        return Err(ConfigurationError::QueryInSegmentedUrl(url.to_string()));
    }

    let base = url.strip_prefix('/').unwrap_or(url);
    let base = base.strip_suffix('/').unwrap_or(base);
    let mut assembled = base.to_string();
    for (key, value) in url_data.iter() {
        assembled.push('/');
        assembled.push_str(&encode_component(key));
        if !value.is_empty() {
            assembled.push('/');
            assembled.push_str(&encode_component(value));
        }
    }
    Ok(assembled)
}

/// Append `?` and the encoded query when `get_data` is non-empty.
pub fn append_get_data(url: &str, get_data: &Params) -> Result<String, ConfigurationError> {
    if get_data.is_empty() {
        return Ok(url.to_string());
    }
    Ok(format!("{url}?{}", form_encode(get_data)?))
}

/// Full URL for a request: segments, then query.
pub fn build_url(url: &str, url_data: &Params, get_data: &Params) -> Result<String, ConfigurationError> {
    let url = append_url_data(url, url_data)?;
    append_get_data(&url, get_data)
}

fn timeout(seconds: u64) -> Option<Duration> {
    match seconds {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}

pub(crate) fn assemble(request: &Request) -> Result<HttpRequest, Error> {
    let url = build_url(request.url(), request.url_data(), request.get_data())?;

    let body = match request.post_data() {
        Some(data) if !data.is_empty() => Some(encode_body(request.content_type(), data)?),
        _ => None,
    };

    let method = match request.method() {
        Method::Get => HttpMethod::Get,
        Method::Post => HttpMethod::Post,
        Method::Auto if body.is_some() => HttpMethod::Post,
        Method::Auto => HttpMethod::Get,
    };
    let body = match method {
        HttpMethod::Get => None,
        HttpMethod::Post => body,
    };

    let mut headers = request.headers().clone();
    if body.is_some() && !headers.contains_ignore_case("content-type") {
        headers.insert("Content-Type", request.content_type().mime());
    }

    Ok(HttpRequest {
        method,
        url,
        headers,
        body,
        connect_timeout: timeout(request.connect_timeout()),
        timeout: timeout(request.timeout()),
        ssl_version: SslVersion::try_from(request.ssl_version())?,
    })
}
