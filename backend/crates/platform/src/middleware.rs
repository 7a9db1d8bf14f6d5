//! Admission control middleware
//!
//! Runs the rate limiter before any handler. Install it only when a
//! limiter exists; disabled mode simply has no layer.

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use std::net::SocketAddr;
use std::time::Duration;

use crate::client::client_key;
use crate::rate_limit::RateLimiter;
use crate::rate_limit::window::humanize;

/// Header carrying the requests left in the current window
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Error returned to rejected clients
///
/// 429 with `Retry-After` set to the window length in seconds.
pub fn rate_limit_exceeded(retry_after: Duration) -> AppError {
    AppError::too_many_requests(format!(
        "rate limit exceeded, retry after: {}",
        humanize(retry_after)
    ))
    .with_retry_after(retry_after)
}

/// Middleware that rejects clients over their window quota
///
/// ```ignore
/// router.layer(axum::middleware::from_fn_with_state(
///     limiter,
///     enforce_rate_limit::<FixedWindowLimiter>,
/// ))
/// ```
pub async fn enforce_rate_limit<L>(
    State(limiter): State<L>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    L: RateLimiter + Clone + 'static,
{
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let key = client_key(req.headers(), direct_ip);

    let decision = limiter.allow(&key);
    if !decision.allowed {
        tracing::warn!(
            client = %key,
            method = %req.method(),
            path = %req.uri().path(),
            "Rate limit exceeded"
        );
        return rate_limit_exceeded(decision.retry_after).into_response();
    }

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(RATE_LIMIT_REMAINING, HeaderValue::from(decision.remaining));
    response
}
