//! Logging middleware
//!
//! Provides request logging functionality.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::info;
use std::time::Instant;

/// Log every request with its response status and duration
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} -> {} ({} ms)",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
