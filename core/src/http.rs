//! Wire-level request and response types.
//!
//! # Design
//! `HttpRequest` is the fully assembled form of a `Request`: final URL,
//! concrete method, headers and an already serialized body. Transports only
//! ever see this plain data, never the builder. The helpers at the bottom
//! split and parse raw response text the way a header-returning native client
//! hands it over.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigurationError;
use crate::params::Params;

/// Concrete method put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// TLS protocol pin, numbered like libcurl's `CURL_SSLVERSION_*` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslVersion {
    #[default]
    Default,
    TlsV1,
    SslV2,
    SslV3,
    TlsV1_0,
    TlsV1_1,
    TlsV1_2,
    TlsV1_3,
}

impl SslVersion {
    pub fn code(self) -> i32 {
        match self {
            SslVersion::Default => 0,
            SslVersion::TlsV1 => 1,
            SslVersion::SslV2 => 2,
            SslVersion::SslV3 => 3,
            SslVersion::TlsV1_0 => 4,
            SslVersion::TlsV1_1 => 5,
            SslVersion::TlsV1_2 => 6,
            SslVersion::TlsV1_3 => 7,
        }
    }
}

impl TryFrom<i32> for SslVersion {
    type Error = ConfigurationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(SslVersion::Default),
            1 => Ok(SslVersion::TlsV1),
            2 => Ok(SslVersion::SslV2),
            3 => Ok(SslVersion::SslV3),
            4 => Ok(SslVersion::TlsV1_0),
            5 => Ok(SslVersion::TlsV1_1),
            6 => Ok(SslVersion::TlsV1_2),
            7 => Ok(SslVersion::TlsV1_3),
            other => Err(ConfigurationError::UnsupportedSslVersion(other)),
        }
    }
}

/// An assembled HTTP request described as plain data.
///
/// Produced by `Request::prepare` and handed to a `Transport`.
/// `None` timeouts mean "unbounded".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Params,
    pub body: Option<String>,
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub ssl_version: SslVersion,
}

/// Parsed response headers keyed by lowercase name. A repeated name keeps its
/// last value.
pub type ResponseHeaders = HashMap<String, String>;

/// A received response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: ResponseHeaders,
    pub body: String,
}

impl HttpResponse {
    /// Parse full response text: status line and headers, blank line, body.
    pub fn from_raw(raw: &str) -> Self {
        let (header_block, body) = split_response(raw, header_block_size(raw));
        Self {
            status: parse_status_line(header_block),
            headers: parse_header_block(header_block),
            body: body.to_string(),
        }
    }
}

/// Store a header under its trimmed lowercase name, replacing any earlier value.
pub fn insert_header(headers: &mut ResponseHeaders, name: &str, value: &str) {
    headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
}

/// Store one header line if it contains a colon. Returns whether it did.
pub fn insert_header_line(headers: &mut ResponseHeaders, line: &str) -> bool {
    match line.split_once(':') {
        Some((name, value)) => {
            insert_header(headers, name, value);
            true
        }
        None => false,
    }
}

/// Parse a raw header block into a name → value map.
pub fn parse_header_block(block: &str) -> ResponseHeaders {
    let mut headers = ResponseHeaders::new();
    for line in block.split('\n') {
        insert_header_line(&mut headers, line);
    }
    headers
}

/// Size of the header block at the start of `raw`, including the blank line.
/// When no blank line exists the whole text is headers.
pub fn header_block_size(raw: &str) -> usize {
    let crlf = raw.find("\r\n\r\n").map(|i| i + 4);
    let lf = raw.find("\n\n").map(|i| i + 2);
    match (crlf, lf) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => raw.len(),
    }
}

/// Split `raw` into `(header_block, body)` at `header_size`.
pub fn split_response(raw: &str, header_size: usize) -> (&str, &str) {
    if header_size >= raw.len() {
        return (raw, "");
    }
    if !raw.is_char_boundary(header_size) {
        return (raw, "");
    }
    raw.split_at(header_size)
}

/// Status code from an `HTTP/x.y NNN Reason` line; `0` when malformed.
pub fn parse_status_line(block: &str) -> u16 {
    block
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_block_trims_and_skips_status_line() {
        let block = "HTTP/1.1 200 OK\r\nContent-Type:  text/html \r\nX-Id: 42\r\n\r\n";
        let headers = parse_header_block(block);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["content-type"], "text/html");
        assert_eq!(headers["x-id"], "42");
    }

    #[test]
    fn header_value_keeps_text_after_first_colon() {
        let headers = parse_header_block("Location: http://example.com:8080/path\r\n");
        assert_eq!(headers["location"], "http://example.com:8080/path");
    }

    #[test]
    fn repeated_header_keeps_last_value() {
        let headers = parse_header_block("Set-Cookie: a=1\r\nSet-Cookie: b=2\r\n");
        assert_eq!(headers["set-cookie"], "b=2");
    }

    #[test]
    fn header_names_are_lowercased() {
        let headers = parse_header_block("X-Dup: first\r\nx-dup: second\r\nETag: \"v1\"\r\n");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["x-dup"], "second");
        assert_eq!(headers["etag"], "\"v1\"");
    }

    #[test]
    fn header_block_round_trip() {
        let original: ResponseHeaders = [("server", "mock"), ("x-trace", "abc"), ("cache-control", "no-cache")]
            .into_iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        let block: String = original
            .iter()
            .map(|(name, value)| format!("{name}:   {value}  \r\n"))
            .collect();
        assert_eq!(parse_header_block(&block), original);
    }

    #[test]
    fn split_response_at_blank_line() {
        let raw = "HTTP/1.1 200 OK\r\nA: b\r\n\r\nhello\r\n\r\nworld";
        let size = header_block_size(raw);
        let (headers, body) = split_response(raw, size);
        assert_eq!(headers, "HTTP/1.1 200 OK\r\nA: b\r\n\r\n");
        assert_eq!(body, "hello\r\n\r\nworld");
    }

    #[test]
    fn split_response_without_body() {
        let raw = "HTTP/1.1 204 No Content\r\n";
        let (headers, body) = split_response(raw, header_block_size(raw));
        assert_eq!(headers, raw);
        assert_eq!(body, "");
    }

    #[test]
    fn response_from_raw_text() {
        let response = HttpResponse::from_raw("HTTP/1.1 503 Service Unavailable\r\nRetry-After: 120\r\n\r\ndown");
        assert_eq!(response.status, 503);
        assert_eq!(response.headers["retry-after"], "120");
        assert_eq!(response.body, "down");
    }

    #[test]
    fn status_line_parsing() {
        assert_eq!(parse_status_line("HTTP/1.1 404 Not Found\r\n"), 404);
        assert_eq!(parse_status_line("HTTP/2 200\r\n"), 200);
        assert_eq!(parse_status_line("garbage"), 0);
        assert_eq!(parse_status_line(""), 0);
    }

    #[test]
    fn ssl_version_codes() {
        assert_eq!(SslVersion::try_from(0).unwrap(), SslVersion::Default);
        assert_eq!(SslVersion::try_from(6).unwrap(), SslVersion::TlsV1_2);
        assert_eq!(SslVersion::TlsV1_3.code(), 7);
        assert_eq!(
            SslVersion::try_from(42).unwrap_err(),
            ConfigurationError::UnsupportedSslVersion(42)
        );
    }
}
