//! ureq-based transport.

use std::io;

use tracing::{debug, warn};
use ureq::Agent;

use crate::error::{ConfigurationError, Error, TransportErrorCode};
use crate::http::{insert_header, HttpMethod, HttpRequest, ResponseHeaders, SslVersion};
use crate::options::TransportOptions;
use crate::params::Params;
use crate::transport::{classify, Transport};

/// Blocking transport backed by `ureq`.
///
/// Redirects are never followed and every status code comes back as data, so
/// classification stays in `classify`. A fresh agent is built per call from
/// the request's timeouts and the transport's `TransportOptions`.
#[derive(Debug, Default)]
pub struct UreqTransport {
    request: Option<HttpRequest>,
    response_headers: ResponseHeaders,
    options: TransportOptions,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TransportOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut TransportOptions {
        &mut self.options
    }

    fn agent(&self, request: &HttpRequest) -> Result<Agent, Error> {
        check_tls(self.options.ssl_version_or(request.ssl_version)?)?;

        let mut config = Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .timeout_connect(self.options.connect_timeout_or(request.connect_timeout))
            .timeout_global(self.options.timeout_or(request.timeout));
        if let Some(proxy) = &self.options.proxy {
            let proxy = ureq::Proxy::new(proxy).map_err(|e| ConfigurationError::InvalidProxy(e.to_string()))?;
            config = config.proxy(Some(proxy));
        }
        Ok(config.build().new_agent())
    }
}

/// rustls negotiates TLS 1.2 or 1.3 and ureq cannot narrow that range, so only
/// pins that range always satisfies are accepted.
fn check_tls(version: SslVersion) -> Result<(), ConfigurationError> {
    match version {
        SslVersion::Default | SslVersion::TlsV1 | SslVersion::TlsV1_2 => Ok(()),
        other => Err(ConfigurationError::UnsupportedSslVersion(other.code())),
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &Params) -> ureq::RequestBuilder<B> {
    for (name, value) in headers.iter() {
        builder = builder.header(name, value);
    }
    builder
}

fn transport_error(err: ureq::Error) -> Error {
    let code = match &err {
        ureq::Error::Timeout(_) => TransportErrorCode::Timeout,
        ureq::Error::HostNotFound => TransportErrorCode::HostNotFound,
        ureq::Error::ConnectionFailed => TransportErrorCode::ConnectionFailed,
        ureq::Error::Tls(_) | ureq::Error::Rustls(_) => TransportErrorCode::Tls,
        ureq::Error::Protocol(_) => TransportErrorCode::Protocol,
        ureq::Error::Io(io_err) => match io_err.kind() {
            io::ErrorKind::TimedOut => TransportErrorCode::Timeout,
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected => TransportErrorCode::ConnectionFailed,
            _ => TransportErrorCode::Io,
        },
        _ => TransportErrorCode::Other,
    };
    warn!(%code, error = %err, "http call failed");
    Error::transport(code, err.to_string())
}

impl Transport for UreqTransport {
    fn set_request(&mut self, request: HttpRequest) {
        self.request = Some(request);
    }

    fn request(&self) -> Option<&HttpRequest> {
        self.request.as_ref()
    }

    fn response_headers(&self) -> &ResponseHeaders {
        &self.response_headers
    }

    fn reset(&mut self) {
        self.request = None;
        self.response_headers.clear();
    }

    fn make_http_request(&mut self) -> Result<String, Error> {
        self.response_headers.clear();
        let request = self.request.as_ref().ok_or(ConfigurationError::NoRequest)?;
        let agent = self.agent(request)?;
        let headers = self.options.merge_headers(&request.headers);

        debug!(method = ?request.method, url = %request.url, "sending request");
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(agent.get(&request.url), &headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(agent.post(&request.url), &headers).send(body.as_bytes()),
            (HttpMethod::Post, None) => with_headers(agent.post(&request.url), &headers).send_empty(),
        };
        let mut response = result.map_err(transport_error)?;

        let status = response.status().as_u16();
        for (name, value) in response.headers() {
            insert_header(&mut self.response_headers, name.as_str(), &String::from_utf8_lossy(value.as_bytes()));
        }
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(transport_error)?;
        debug!(status, bytes = bytes.len(), "received response");

        Ok(classify(status, String::from_utf8_lossy(&bytes).into_owned())?)
    }
}
