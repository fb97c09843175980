//! HTTP middleware

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Request logging middleware
pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_us = start.elapsed().as_micros() as u64;
    if response.status().is_server_error() {
        warn!(%method, path = %path, status, elapsed_us, "Request failed");
    } else {
        info!(%method, path = %path, status, elapsed_us, "Request completed");
    }

    response
}
