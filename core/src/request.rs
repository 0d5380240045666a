//! The mutable request builder.
//!
//! # Design
//! `Request` only stores configuration. Nothing is validated against the
//! network until `send`, which assembles an `HttpRequest` and hands it to the
//! attached transport. Setters return `&mut Self` so configuration chains;
//! setters that can reject input return `Result<&mut Self, Error>` instead.

use crate::assemble;
use crate::body::{ContentType, PostData};
use crate::error::{ConfigurationError, Error};
use crate::http::{HttpRequest, ResponseHeaders};
use crate::params::Params;
use crate::transport::{Transport, TransportKind};

/// Timeout applied to new requests, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 1;

/// Method requested by the caller. `Auto` becomes POST when a body is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Auto,
    Get,
    Post,
}

impl Method {
    pub fn code(self) -> i32 {
        match self {
            Method::Auto => 0,
            Method::Get => 1,
            Method::Post => 2,
        }
    }
}

impl TryFrom<i32> for Method {
    type Error = ConfigurationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Method::Auto),
            1 => Ok(Method::Get),
            2 => Ok(Method::Post),
            other => Err(ConfigurationError::UnknownMethod(other)),
        }
    }
}

/// An HTTP request under construction.
#[derive(Debug)]
pub struct Request {
    url: String,
    method: Method,
    content_type: ContentType,
    headers: Params,
    connect_timeout: u64,
    timeout: u64,
    url_data: Params,
    get_data: Params,
    post_data: Option<PostData>,
    ssl_version: i32,
    transport: Option<Box<dyn Transport>>,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: Method::Auto,
            content_type: ContentType::Undefined,
            headers: Params::new(),
            connect_timeout: DEFAULT_TIMEOUT_SECS,
            timeout: DEFAULT_TIMEOUT_SECS,
            url_data: Params::new(),
            get_data: Params::new(),
            post_data: None,
            ssl_version: 0,
            transport: None,
        }
    }
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble and execute the request through the attached transport.
    ///
    /// When assembly fails the transport is reset, so neither the previous
    /// request nor its response headers survive the failed call.
    pub fn send(&mut self) -> Result<String, Error> {
        let prepared = self.prepare();
        let transport = self.transport.as_mut().ok_or(ConfigurationError::NoTransport)?;
        match prepared {
            Ok(prepared) => {
                transport.set_request(prepared);
                transport.make_http_request()
            }
            Err(err) => {
                transport.reset();
                Err(err)
            }
        }
    }

    /// Assemble the wire request without sending it.
    pub fn prepare(&self) -> Result<HttpRequest, Error> {
        assemble::assemble(self)
    }

    /// Headers parsed from the last response seen by the attached transport.
    pub fn response_headers(&self) -> Option<&ResponseHeaders> {
        self.transport.as_deref().map(|t| t.response_headers())
    }

    /// Compute a caller-defined signature over this request.
    pub fn signature<F>(&self, sign: F) -> String
    where
        F: FnOnce(&Request) -> String,
    {
        sign(self)
    }

    pub fn set_transport(&mut self, transport: impl Transport + 'static) -> &mut Self {
        self.transport = Some(Box::new(transport));
        self
    }

    pub fn set_boxed_transport(&mut self, transport: Box<dyn Transport>) -> &mut Self {
        self.transport = Some(transport);
        self
    }

    /// Attach a built-in transport by its numeric code.
    pub fn set_transport_code(&mut self, code: i32) -> Result<&mut Self, Error> {
        let kind = TransportKind::try_from(code)?;
        self.transport = Some(kind.build());
        Ok(self)
    }

    pub fn transport(&self) -> Option<&dyn Transport> {
        self.transport.as_deref()
    }

    pub fn transport_mut(&mut self) -> Option<&mut (dyn Transport + 'static)> {
        self.transport.as_deref_mut()
    }

    pub fn set_url(&mut self, url: &str) -> &mut Self {
        self.url = url.to_string();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    pub fn set_method_code(&mut self, code: i32) -> Result<&mut Self, Error> {
        self.method = Method::try_from(code)?;
        Ok(self)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn set_content_type(&mut self, content_type: ContentType) -> &mut Self {
        self.content_type = content_type;
        self
    }

    pub fn set_content_type_code(&mut self, code: i32) -> Result<&mut Self, Error> {
        self.content_type = ContentType::try_from(code)?;
        Ok(self)
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Connect timeout in whole seconds; `0` disables the bound.
    pub fn set_connect_timeout(&mut self, seconds: i64) -> Result<&mut Self, Error> {
        self.connect_timeout = non_negative("connect", seconds)?;
        Ok(self)
    }

    pub fn connect_timeout(&self) -> u64 {
        self.connect_timeout
    }

    /// Total timeout in whole seconds; `0` disables the bound.
    pub fn set_timeout(&mut self, seconds: i64) -> Result<&mut Self, Error> {
        self.timeout = non_negative("request", seconds)?;
        Ok(self)
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn add_header(&mut self, name: &str, value: &str) -> &mut Self {
        self.headers.insert(name, value);
        self
    }

    pub fn set_headers(&mut self, headers: Params) -> &mut Self {
        self.headers = headers;
        self
    }

    pub fn headers(&self) -> &Params {
        &self.headers
    }

    pub fn add_get_field(&mut self, name: &str, value: &str) -> &mut Self {
        self.get_data.insert(name, value);
        self
    }

    pub fn get_data(&self) -> &Params {
        &self.get_data
    }

    /// Add a named body field. Fails when the body was set to a non-field value.
    pub fn add_post_field(&mut self, name: &str, value: &str) -> Result<&mut Self, Error> {
        match self.post_data.get_or_insert_with(|| PostData::Fields(Params::new())) {
            PostData::Fields(fields) => fields.insert(name, value),
            _ => return Err(ConfigurationError::PostDataNotFields.into()),
        }
        Ok(self)
    }

    pub fn set_post_data(&mut self, data: impl Into<PostData>) -> &mut Self {
        self.post_data = Some(data.into());
        self
    }

    pub fn clear_post_data(&mut self) -> &mut Self {
        self.post_data = None;
        self
    }

    pub fn post_data(&self) -> Option<&PostData> {
        self.post_data.as_ref()
    }

    /// Add a `/name/value` path segment. An empty value adds `/name` alone.
    pub fn add_url_field(&mut self, name: &str, value: &str) -> &mut Self {
        self.url_data.insert(name, value);
        self
    }

    pub fn add_url_key(&mut self, name: &str) -> &mut Self {
        self.add_url_field(name, "")
    }

    pub fn url_data(&self) -> &Params {
        &self.url_data
    }

    pub fn set_ssl_version(&mut self, code: i32) -> &mut Self {
        self.ssl_version = code;
        self
    }

    pub fn ssl_version(&self) -> i32 {
        self.ssl_version
    }

    pub fn is_default_ssl_version(&self) -> bool {
        self.ssl_version == 0
    }
}

fn non_negative(name: &'static str, value: i64) -> Result<u64, ConfigurationError> {
    u64::try_from(value).map_err(|_| ConfigurationError::NegativeTimeout { name, value })
}
