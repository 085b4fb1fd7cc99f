//! HTTP transport: serves a `Service` with axum.
//!
//! Requires the `http` feature.
//!
//! Every method and every path goes through `Service::handle`; routing is the
//! service's own business, so the axum router is a single fallback. Handlers
//! are synchronous and may block, so each dispatch runs on tokio's blocking
//! pool.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use remisc::{http, Service};
//!
//! let service = Arc::new(Service::new(Catalog::default())?);
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "127.0.0.1:8000").await?;
//! ```

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response as HttpResponse};
use axum::Router;

use crate::registry::Operations;
use crate::request::Request;
use crate::response::{Response, Status};
use crate::service::Service;

/// Build an axum `Router` that hands every request to the service.
pub fn router<S: Operations>(service: Arc<Service<S>>) -> Router {
    Router::new()
        .fallback(dispatch_handler::<S>)
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"127.0.0.1:8000"`).
pub async fn serve<S: Operations>(service: Arc<Service<S>>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        service = std::any::type_name::<S>(),
        addr = %listener.local_addr()?,
        "serving"
    );
    axum::serve(listener, app).await
}

async fn dispatch_handler<S: Operations>(
    State(service): State<Arc<Service<S>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> HttpResponse {
    let request = request_from_parts(&method, &uri, &headers);

    let response = match tokio::task::spawn_blocking(move || service.handle(&request)).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "dispatch task failed");
            Response::new(
                Status::InternalServerError,
                crate::reply::TEXT_PLAIN,
                Status::InternalServerError.to_string(),
            )
        }
    };

    into_http(response)
}

/// Normalize the transport-level parts into a `Request`.
fn request_from_parts(method: &Method, uri: &Uri, headers: &HeaderMap) -> Request {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or_default();
    let scheme = uri.scheme_str().unwrap_or("http");

    Request::new(
        method.as_str(),
        scheme,
        host,
        uri.path(),
        uri.query().unwrap_or_default(),
    )
}

fn into_http(response: Response) -> HttpResponse {
    let status = StatusCode::from_u16(response.status().code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = response.content_type();
    (status, [(header::CONTENT_TYPE, content_type)], response.into_body()).into_response()
}
