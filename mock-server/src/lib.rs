use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;
use uuid::Uuid;

/// What the server saw, returned by every unrouted path.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Deserialize)]
pub struct StatusParams {
    pub body: Option<String>,
}

/// How long `/slow` waits before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(3);

/// Size of the `/large` body, past ureq's default 10 MiB read limit.
pub const LARGE_BODY_LEN: usize = 11 * 1024 * 1024;

/// Body of `/bytes/{code}`: not valid UTF-8.
pub const INVALID_UTF8: &[u8] = &[b'o', b'k', 0xff, 0xfe];

pub fn app() -> Router {
    Router::new()
        .route("/status/{code}", any(status))
        .route("/headers", any(headers))
        .route("/slow", any(slow))
        .route("/large", any(large))
        .route("/bytes/{code}", any(bytes))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    debug!(%method, %uri, "echo");
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    })
}

async fn status(Path(code): Path<u16>, Query(params): Query<StatusParams>) -> Response {
    let Ok(status) = StatusCode::from_u16(code) else {
        return (StatusCode::BAD_REQUEST, "invalid status code").into_response();
    };
    let body = params
        .body
        .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());
    let request_id = Uuid::new_v4().to_string();
    (status, [("x-request-id", request_id)], body).into_response()
}

async fn headers() -> (HeaderMap, &'static str) {
    let mut headers = HeaderMap::new();
    headers.insert("x-trace", HeaderValue::from_static("a:b:c"));
    headers.append("x-dup", HeaderValue::from_static("first"));
    headers.append("x-dup", HeaderValue::from_static("second"));
    (headers, "headers")
}

async fn large() -> String {
    "a".repeat(LARGE_BODY_LEN)
}

async fn bytes(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, INVALID_UTF8).into_response()
}

async fn slow() -> &'static str {
    tokio::time::sleep(SLOW_DELAY).await;
    "done"
}
