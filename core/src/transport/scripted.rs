//! Transport double that replays canned raw responses.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::{ConfigurationError, Error, TransportErrorCode};
use crate::http::{HttpRequest, HttpResponse, ResponseHeaders};
use crate::transport::{classify, Transport};

#[derive(Debug, Clone)]
enum Reply {
    Raw(String),
    Failure { code: TransportErrorCode, message: String },
}

/// Replays queued replies in order and records every request it executes.
///
/// Raw replies are full HTTP response text, e.g.
/// `"HTTP/1.1 404 Not Found\r\nServer: mock\r\n\r\nnot found"`. They go
/// through the same split, header parsing and classification a native
/// header-returning client would need.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    request: Option<HttpRequest>,
    response_headers: ResponseHeaders,
    replies: VecDeque<Reply>,
    sent: Vec<HttpRequest>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&mut self, raw: impl Into<String>) -> &mut Self {
        self.replies.push_back(Reply::Raw(raw.into()));
        self
    }

    /// Queue a response built from parts.
    pub fn push_status(&mut self, status: u16, headers: &[(&str, &str)], body: &str) -> &mut Self {
        let mut raw = format!("HTTP/1.1 {status}\r\n");
        for (name, value) in headers {
            raw.push_str(&format!("{name}: {value}\r\n"));
        }
        raw.push_str("\r\n");
        raw.push_str(body);
        self.push_response(raw)
    }

    pub fn push_failure(&mut self, code: TransportErrorCode, message: impl Into<String>) -> &mut Self {
        self.replies.push_back(Reply::Failure {
            code,
            message: message.into(),
        });
        self
    }

    /// Requests executed so far, oldest first.
    pub fn sent(&self) -> &[HttpRequest] {
        &self.sent
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Transport for ScriptedTransport {
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
        let request = self.request.clone().ok_or(ConfigurationError::NoRequest)?;
        debug!(method = ?request.method, url = %request.url, "scripted request");
        self.sent.push(request);

        let raw = match self.replies.pop_front() {
            Some(Reply::Raw(raw)) => raw,
            Some(Reply::Failure { code, message }) => return Err(Error::transport(code, message)),
            None => return Err(Error::transport(TransportErrorCode::Other, "no scripted reply left")),
        };

        let response = HttpResponse::from_raw(&raw);
        self.response_headers = response.headers;
        Ok(classify(response.status, response.body)?)
    }
}
