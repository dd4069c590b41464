//! Per-request context and logging middleware
//!
//! A [`RequestContext`] is created for every request, placed in the request
//! extensions for handlers to pick up, and used to instrument the request
//! future with an `http_request` span. Errors are logged here exactly once,
//! from the [`ErrorReport`] that [`crate::error::ApiError`] leaves on the
//! response.

use axum::{
    extract::{ConnectInfo, Request},
    http::{HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, SocketAddr};
use std::time::Instant;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

use crate::error::ErrorReport;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request correlation data threaded through handlers
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub method: Method,
    pub path: String,
    /// Peer address, when the server was started with connect info
    pub client_ip: Option<IpAddr>,
    started: Instant,
}

impl RequestContext {
    /// Create a context with a freshly generated request id
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            method,
            path: path.into(),
            client_ip: None,
            started: Instant::now(),
        }
    }

    /// Create a context for an incoming request
    pub fn from_request(request: &Request) -> Self {
        let mut context = Self::new(request.method().clone(), request.uri().path());
        context.client_ip = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        context
    }

    /// Milliseconds since the request arrived
    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

/// Attach a [`RequestContext`], log request start/completion and any
/// classified error, and echo the request id in `x-request-id`
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
    let context = RequestContext::from_request(&request);
    request.extensions_mut().insert(context.clone());

    let span = tracing::info_span!(
        "http_request",
        request_id = %context.request_id,
        method = %context.method,
        path = %context.path,
        ip_address = tracing::field::Empty,
    );
    if let Some(ip) = context.client_ip {
        span.record("ip_address", tracing::field::display(ip));
    }

    async move {
        info!("Request started");

        let mut response = next.run(request).await;
        let status = response.status().as_u16();
        let duration_ms = context.elapsed_ms();

        match response.extensions_mut().remove::<ErrorReport>() {
            Some(report) => log_error(&context, &report, status, duration_ms),
            None => info!(status, duration_ms, "Request completed"),
        }

        if let Ok(value) = HeaderValue::from_str(&context.request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}

fn log_error(context: &RequestContext, report: &ErrorReport, status: u16, duration_ms: f64) {
    if status >= 500 {
        error!(
            request_id = %context.request_id,
            method = %context.method,
            path = %context.path,
            status,
            duration_ms,
            error_type = report.kind.type_name(),
            error = %report.detail,
            "Request failed"
        );
    } else {
        warn!(
            request_id = %context.request_id,
            method = %context.method,
            path = %context.path,
            status,
            duration_ms,
            error_type = report.kind.type_name(),
            error = %report.detail,
            "Request rejected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_ids_are_unique() {
        let a = RequestContext::new(Method::GET, "/recipes");
        let b = RequestContext::new(Method::GET, "/recipes");
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.path, "/recipes");
        assert!(a.elapsed_ms() >= 0.0);
        assert!(a.client_ip.is_none());
    }

    #[test]
    fn test_context_reads_client_ip() {
        let mut request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/recipes?page=2")
            .body(axum::body::Body::empty())
            .unwrap();
        let peer: SocketAddr = "203.0.113.7:51234".parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));

        let context = RequestContext::from_request(&request);
        assert_eq!(context.method, Method::POST);
        assert_eq!(context.path, "/recipes");
        assert_eq!(context.client_ip, Some(peer.ip()));
    }
}
