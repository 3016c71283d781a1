//! Per-request connection log.
//!
//! The service usually runs behind a reverse proxy, so the client address is
//! taken from the first `X-Forwarded-For` hop when present and from the
//! socket peer otherwise.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Log every incoming request, then pass it on unchanged.
pub async fn log_request(request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_ip = client_ip(request.headers(), peer);

    tracing::info!(
        method = %request.method(),
        uri = %request.uri(),
        client_ip = %client_ip,
        "Incoming request"
    );

    next.run(request).await
}

/// Best-effort client address for logging.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
