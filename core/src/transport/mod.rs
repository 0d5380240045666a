//! The transport seam and the status classification shared by transports.
//!
//! # Design
//! A transport has two states: idle, with no request assigned, and executing a
//! single blocking call. `make_http_request` takes `&mut self`, so one
//! transport can never serve two calls at once. Response headers belong to the
//! last call only and are cleared when the next one starts.

mod scripted;
mod ureq_backend;

pub use scripted::ScriptedTransport;
pub use ureq_backend::UreqTransport;

use std::fmt;

use crate::error::{ConfigurationError, Error, HttpStatusError};
use crate::http::{HttpRequest, ResponseHeaders};

/// Executes assembled requests.
pub trait Transport: fmt::Debug + Send {
    /// Assign the request the next `make_http_request` call will execute.
    fn set_request(&mut self, request: HttpRequest);

    fn request(&self) -> Option<&HttpRequest>;

    fn response_headers(&self) -> &ResponseHeaders;

    /// Drop the assigned request and the last response headers.
    fn reset(&mut self);

    /// Perform the call and return the body of a successful response.
    fn make_http_request(&mut self) -> Result<String, Error>;
}

/// Built-in transports selectable by numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Ureq,
}

impl TransportKind {
    pub fn build(self) -> Box<dyn Transport> {
        match self {
            TransportKind::Ureq => Box::new(UreqTransport::new()),
        }
    }
}

impl TryFrom<i32> for TransportKind {
    type Error = ConfigurationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TransportKind::Ureq),
            other => Err(ConfigurationError::UnknownTransport(other)),
        }
    }
}

/// Map a response to its body or to the error for its status class.
///
/// Classes outside 1–5 are treated as success.
pub fn classify(status: u16, body: String) -> Result<String, HttpStatusError> {
    match status / 100 {
        1 => Err(HttpStatusError::Informational { status, body }),
        3 => Err(HttpStatusError::Redirection { status, body }),
        4 => Err(HttpStatusError::ClientError { status, body }),
        5 => Err(HttpStatusError::ServerError { status, body }),
        _ => Ok(body),
    }
}
