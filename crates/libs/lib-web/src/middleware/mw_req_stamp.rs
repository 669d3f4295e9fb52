//! # Request Stamping Middleware
//!
//! Gives every request an id and a receive time, and echoes the id back in
//! the `X-Request-ID` response header. A well-formed id sent by the caller
//! (for example by a proxy) is reused instead of generating a new one.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use axum::{Router, middleware};
//! use lib_web::middleware::stamp_req;
//!
//! let app: Router = Router::new()
//!     .layer(middleware::from_fn(stamp_req));
//! ```
//!
//! The stamp is available in handlers via `Extension<RequestStamp>`.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use lib_utils::now_utc;
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest caller-supplied id that is reused.
const MAX_INCOMING_ID_LEN: usize = 128;

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    pub id: String,
    pub received_at: DateTime<Utc>,
}

impl RequestStamp {
    fn for_request(req: &Request) -> Self {
        let id = req
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|id| is_usable_id(id))
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            id,
            received_at: now_utc(),
        }
    }
}

fn is_usable_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_INCOMING_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Request stamping middleware.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::for_request(&req);
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER.clone(), header_value);
    }

    res
}
