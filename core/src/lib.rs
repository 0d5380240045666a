//! Builder-plus-transport HTTP request façade.
//!
//! # Overview
//! A caller configures a `Request` (URL, method, headers, timeouts, URL
//! segments, query and body), attaches a `Transport`, and calls `send`. The
//! request is assembled into a plain `HttpRequest`, executed by the
//! transport, and the response body is returned or turned into an error keyed
//! to its status class.
//!
//! # Design
//! - Assembly (`assemble`) is pure and shared by every transport.
//! - `Transport` is the only seam: `UreqTransport` for real calls,
//!   `ScriptedTransport` for tests that replay raw responses.
//! - Everything is blocking and single-call; there is no pooling, retrying
//!   or redirect following.
//!
//! ```no_run
//! use netreq_core::{Request, UreqTransport};
//!
//! # fn main() -> Result<(), netreq_core::Error> {
//! let mut request = Request::new();
//! request
//!     .set_url("https://www.googleapis.com/androidpublisher/v1/")
//!     .add_url_field("applications", "com.my.application")
//!     .set_transport(UreqTransport::new());
//! request.set_connect_timeout(3)?.set_timeout(5)?;
//! let body = request.send()?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod body;
pub mod error;
pub mod http;
pub mod options;
pub mod params;
pub mod request;
pub mod transport;

pub use assemble::{build_url, form_encode};
pub use body::{encode_body, ContentType, PostData, XmlBody, XmlDocument};
pub use error::{ConfigurationError, Error, HttpStatusError, TransportErrorCode};
pub use http::{parse_header_block, split_response, HttpMethod, HttpRequest, HttpResponse, ResponseHeaders, SslVersion};
pub use options::TransportOptions;
pub use params::Params;
pub use request::{Method, Request, DEFAULT_TIMEOUT_SECS};
pub use transport::{classify, ScriptedTransport, Transport, TransportKind, UreqTransport};
