//! Request context and middleware for the partsnavi REST API
//!
//! Every request gets a [`RequestContext`] in its extensions and runs inside
//! a tracing span carrying the request id, so log lines from the pipeline can
//! be correlated with the HTTP exchange that caused them.

use axum::{
  extract::Request,
  http::{HeaderMap, Method, Uri},
  middleware::Next,
  response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Request context containing request metadata
#[derive(Debug, Clone)]
pub struct RequestContext {
  /// Unique ID for this request
  pub request_id: Uuid,
  /// HTTP method
  pub method: Method,
  /// Request URI
  pub uri: Uri,
  /// Request headers
  pub headers: HeaderMap,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
    Self { request_id: Uuid::new_v4(), method, uri, headers }
  }

  pub fn user_agent(&self) -> &str {
    self.headers.get("user-agent").and_then(|v| v.to_str().ok()).unwrap_or("none")
  }
}

/// Middleware to inject RequestContext into all requests
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
  let context =
    RequestContext::new(request.method().clone(), request.uri().clone(), request.headers().clone());

  let span = info_span!(
    "request",
    request_id = %context.request_id,
    method = %context.method,
    path = %context.uri.path(),
  );

  async move {
    let start_time = Instant::now();
    info!(user_agent = context.user_agent(), "request started");

    request.extensions_mut().insert(context);
    let response = next.run(request).await;

    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
    info!(status = response.status().as_u16(), duration_ms, "request completed");

    response
  }
  .instrument(span)
  .await
}
