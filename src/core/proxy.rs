//! Same-origin forwarder for the backend REST API
//!
//! The browser calls `/api/v1/...` on the server that served the page; this
//! router passes those requests to `BACKEND_URL` unchanged and relays the
//! answer. Failures to reach the backend are reported in the backend's own
//! error shape, `{"detail": "..."}`.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::any,
};
use serde_json::json;

use super::config::Config;

/// Request headers passed through to the backend
const FORWARDED_HEADERS: [HeaderName; 3] =
    [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    backend_url: Option<Arc<str>>,
}

impl ProxyState {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            backend_url: config.backend_url.as_deref().map(Arc::from),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// Create the API forwarding router
///
/// Routes:
/// - `ANY /api/{*path}` - forwarded to `{BACKEND_URL}/api/{path}?{query}`
pub fn api_proxy_router(config: &Config) -> Router {
    Router::new()
        .route("/api/{*path}", any(forward))
        .with_state(ProxyState::new(config))
}

async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(backend) = state.backend_url.as_deref() else {
        tracing::warn!(%uri, "BACKEND_URL is not set, rejecting API request");
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "Backend is not configured");
    };

    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let target = format!("{}{}", backend, path);
    tracing::debug!(%method, %target, "Forwarding API request");

    let mut request = state.client.request(method.clone(), &target).body(body);
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(&name) {
            request = request.header(name, value);
        }
    }

    let upstream = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(%method, %target, error = %e, "Backend unreachable");
            return error_response(StatusCode::BAD_GATEWAY, "Backend is unreachable");
        }
    };

    let status = upstream.status();
    let mut response_headers = HeaderMap::new();
    if let Some(content_type) = upstream.headers().get(header::CONTENT_TYPE) {
        response_headers.insert(header::CONTENT_TYPE, content_type.clone());
    }

    match upstream.bytes().await {
        Ok(bytes) => {
            tracing::debug!(%method, %target, status = status.as_u16(), "Backend responded");
            (status, response_headers, bytes).into_response()
        }
        Err(e) => {
            tracing::error!(%method, %target, error = %e, "Failed to read backend response");
            error_response(StatusCode::BAD_GATEWAY, "Backend response was interrupted")
        }
    }
}

fn error_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn spawn_backend() -> String {
        async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Response {
            let header_value = |name: HeaderName| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            (
                StatusCode::CREATED,
                Json(json!({
                    "method": method.as_str(),
                    "uri": uri.to_string(),
                    "authorization": header_value(header::AUTHORIZATION),
                    "content_type": header_value(header::CONTENT_TYPE),
                    "body": body,
                })),
            )
                .into_response()
        }

        async fn rejected() -> Response {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Could not validate credentials" })),
            )
                .into_response()
        }

        let app = Router::new()
            .route("/api/v1/auth/me", any(rejected))
            .route("/api/v1/{*rest}", any(echo));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn proxy_to(backend_url: Option<String>) -> Router {
        api_proxy_router(&Config { backend_url })
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unconfigured_backend_returns_503() {
        let app = proxy_to(None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/patients")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["detail"], "Backend is not configured");
    }

    #[tokio::test]
    async fn test_forwards_method_path_query_headers_and_body() {
        let app = proxy_to(Some(spawn_backend().await));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/patients?skip=0&limit=10")
                    .header("Authorization", "Bearer tok123")
                    .header("Content-Type", "application/json")
                    .header("X-Internal", "dropped")
                    .body(Body::from(r#"{"first_name":"John"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let echoed = json_body(response).await;
        assert_eq!(echoed["method"], "POST");
        assert_eq!(echoed["uri"], "/api/v1/patients?skip=0&limit=10");
        assert_eq!(echoed["authorization"], "Bearer tok123");
        assert_eq!(echoed["content_type"], "application/json");
        assert_eq!(echoed["body"], r#"{"first_name":"John"}"#);
    }

    #[tokio::test]
    async fn test_request_without_token_has_no_authorization() {
        let app = proxy_to(Some(spawn_backend().await));

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/doctors/4")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let echoed = json_body(response).await;
        assert_eq!(echoed["method"], "DELETE");
        assert!(echoed["authorization"].is_null());
    }

    #[tokio::test]
    async fn test_upstream_error_status_passes_through() {
        let app = proxy_to(Some(spawn_backend().await));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/auth/me")
                    .header("Authorization", "Bearer expired")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await["detail"],
            "Could not validate credentials"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_returns_502() {
        // Reserve a port, then free it so nothing is listening there
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let app = proxy_to(Some(format!("http://{}", addr)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/patients")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["detail"], "Backend is unreachable");
    }

    #[tokio::test]
    async fn test_non_api_paths_are_not_routed() {
        let app = proxy_to(Some("http://127.0.0.1:9".to_string()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
