//! # Request/Response Logging Middleware
//!
//! Structured logging for every request and response, correlated by the
//! request id from [`stamp_req`](super::stamp_req).
//!
//! Logged per request:
//! - request id and receive time, method, path, query, user agent, client ip
//! - headers at debug level, with credentials redacted
//! - status, duration and size of the response
//!
//! Bodies are never logged. Both auth endpoints carry passwords in the
//! request and tokens in the response.

use axum::{
    extract::Request,
    http::{header::SET_COOKIE, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use lib_utils::format_time;
use tracing::{debug, error, info, warn};

use super::mw_req_stamp::RequestStamp;

/// Headers whose values are replaced before logging
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "x-api-key",
    "x-auth-token",
    "authentication",
];

const REDACTED: &str = "***REDACTED***";

/// Header name/value pairs with credential-bearing values redacted.
pub fn sanitize_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.iter().any(|h| name_lower.contains(h)) {
                Some((name.to_string(), REDACTED.to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

/// Request id and RFC 3339 receive time from the request's [`RequestStamp`].
fn stamp_fields(req: &Request) -> (String, Option<String>) {
    match req.extensions().get::<RequestStamp>() {
        Some(stamp) => (stamp.id.clone(), Some(format_time(stamp.received_at))),
        None => ("unknown".to_string(), None),
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Request/response logging middleware
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());

    let (request_id, received_at) = stamp_fields(&req);

    let user_agent = header_str(req.headers(), "user-agent");
    let client_ip = header_str(req.headers(), "x-forwarded-for")
        .or_else(|| header_str(req.headers(), "x-real-ip"));

    info!(
        request_id = %request_id,
        received_at = ?received_at,
        method = %method,
        path = %path,
        query = ?query,
        user_agent = ?user_agent,
        client_ip = ?client_ip,
        "[REQUEST] {} {}",
        method,
        path
    );
    debug!(
        request_id = %request_id,
        headers = ?sanitize_headers(req.headers()),
        "[REQUEST HEADERS]"
    );

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();
    let status_code = status.as_u16();
    let content_length = header_str(response.headers(), "content-length")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0);
    let sets_cookie = response.headers().contains_key(SET_COOKIE);

    if status.is_success() {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms = duration.as_millis(),
            size_bytes = content_length,
            sets_cookie,
            "[RESPONSE] {} {} -> {} ({}ms, {} bytes)",
            method,
            path,
            status_code,
            duration.as_millis(),
            content_length
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method,
            path,
            status_code,
            duration.as_millis()
        );
    } else if status.is_server_error() {
        error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method,
            path,
            status_code,
            duration.as_millis()
        );
    }

    response
}
