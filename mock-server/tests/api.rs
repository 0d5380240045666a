use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, INVALID_UTF8, LARGE_BODY_LEN};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn form_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_get_request() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/v1/applications/com.my.app?a=1&b=two")
                .header("x-token", "abc")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/v1/applications/com.my.app");
    assert_eq!(echo.query.as_deref(), Some("a=1&b=two"));
    assert_eq!(echo.headers["x-token"], "abc");
    assert!(echo.body.is_empty());
}

#[tokio::test]
async fn echo_reports_post_body() {
    let resp = app()
        .oneshot(form_request("POST", "/submit", "field1=value1&field2=value2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, "field1=value1&field2=value2");
    assert_eq!(echo.headers["content-type"], "application/x-www-form-urlencoded");
    assert!(echo.query.is_none());
}

// --- status ---

#[tokio::test]
async fn status_returns_requested_code_and_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/status/404?body=not%20found")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(body_bytes(resp).await, "not found");
}

#[tokio::test]
async fn status_defaults_body_to_reason() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/503").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_bytes(resp).await, "Service Unavailable");
}

#[tokio::test]
async fn status_accepts_any_method() {
    let resp = app()
        .oneshot(form_request("POST", "/status/201", "a=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn status_rejects_out_of_range_code() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/42").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- headers ---

#[tokio::test]
async fn headers_route_sends_repeated_and_colon_values() {
    let resp = app()
        .oneshot(Request::builder().uri("/headers").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-trace"], "a:b:c");
    let dups: Vec<_> = resp.headers().get_all("x-dup").iter().collect();
    assert_eq!(dups, vec!["first", "second"]);
}

// --- bodies ---

#[tokio::test]
async fn large_route_sends_full_body() {
    let resp = app()
        .oneshot(Request::builder().uri("/large").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await.len(), LARGE_BODY_LEN);
}

#[tokio::test]
async fn bytes_route_sends_invalid_utf8_with_status() {
    let resp = app()
        .oneshot(Request::builder().uri("/bytes/404").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], INVALID_UTF8);
    assert!(std::str::from_utf8(&body).is_err());
}
