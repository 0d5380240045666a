//! Error types for request assembly and transport execution.
//!
//! # Design
//! Three families reach the caller of `Request::send`: configuration mistakes
//! detected before any I/O, transport failures where no response arrived, and
//! HTTP status errors keyed to the status class. Status errors always carry
//! the numeric code and the raw body so callers can inspect what the server
//! said.

use std::fmt;

use thiserror::Error;

/// Top-level error returned by `Request::send` and `Transport::make_http_request`.
#[derive(Debug, Error)]
pub enum Error {
    /// The request or transport was misconfigured; nothing was sent.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The network call could not complete.
    #[error("transport failure ({code}): {message}")]
    Transport {
        code: TransportErrorCode,
        message: String,
    },

    /// The server answered with a non-success status class.
    #[error(transparent)]
    Status(#[from] HttpStatusError),
}

impl Error {
    pub fn transport(code: TransportErrorCode, message: impl Into<String>) -> Self {
        Error::Transport {
            code,
            message: message.into(),
        }
    }

    /// Status code of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(err) => Some(err.status()),
            _ => None,
        }
    }
}

/// Mistakes in how a request or transport was set up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no transport configured")]
    NoTransport,

    #[error("no request assigned to the transport")]
    NoRequest,

    #[error("negative {name} timeout: {value}")]
    NegativeTimeout { name: &'static str, value: i64 },

    #[error("cannot set field for non-field post data")]
    PostDataNotFields,

    #[error("unsupported content type code {0}")]
    UnsupportedContentType(i32),

    #[error("unknown method code {0}")]
    UnknownMethod(i32),

    #[error("unknown transport code {0}")]
    UnknownTransport(i32),

    #[error("unsupported ssl version code {0}")]
    UnsupportedSslVersion(i32),

    #[error("url segments cannot be added to a url with a query string: {0}")]
    QueryInSegmentedUrl(String),

    #[error("invalid proxy: {0}")]
    InvalidProxy(String),

    #[error("body serialization failed: {0}")]
    Serialization(String),
}

/// Coarse cause of a failed network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorCode {
    Timeout,
    HostNotFound,
    ConnectionFailed,
    Tls,
    Protocol,
    Io,
    Other,
}

impl fmt::Display for TransportErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportErrorCode::Timeout => "timeout",
            TransportErrorCode::HostNotFound => "host not found",
            TransportErrorCode::ConnectionFailed => "connection failed",
            TransportErrorCode::Tls => "tls",
            TransportErrorCode::Protocol => "protocol",
            TransportErrorCode::Io => "io",
            TransportErrorCode::Other => "other",
        };
        f.write_str(name)
    }
}

/// A response whose status class is not 2xx (nor an unmapped class).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpStatusError {
    #[error("informational code {status}: {body}")]
    Informational { status: u16, body: String },

    #[error("redirection code {status}: {body}")]
    Redirection { status: u16, body: String },

    #[error("client error code {status}: {body}")]
    ClientError { status: u16, body: String },

    #[error("server error code {status}: {body}")]
    ServerError { status: u16, body: String },
}

impl HttpStatusError {
    pub fn status(&self) -> u16 {
        match self {
            HttpStatusError::Informational { status, .. }
            | HttpStatusError::Redirection { status, .. }
            | HttpStatusError::ClientError { status, .. }
            | HttpStatusError::ServerError { status, .. } => *status,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            HttpStatusError::Informational { body, .. }
            | HttpStatusError::Redirection { body, .. }
            | HttpStatusError::ClientError { body, .. }
            | HttpStatusError::ServerError { body, .. } => body,
        }
    }
}
