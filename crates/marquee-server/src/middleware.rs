//! Request-scoped middleware: request ids and the catalogue rate limit.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

const REQUEST_ID: &str = "x-request-id";

/// Id of the current request, available to handlers as an extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[derive(Debug)]
struct Window {
    opened: Instant,
    admitted: usize,
}

/// Fixed-window limiter shared by every route it is layered on.
///
/// Each movie request costs one upstream TMDB call, so this also caps the
/// rate at which the server spends the API quota.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    current: Arc<Mutex<Window>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            current: Arc::new(Mutex::new(Window {
                opened: Instant::now(),
                admitted: 0,
            })),
        }
    }

    #[must_use]
    pub fn per_minute(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    /// Counts one request against the window, or returns how long until the
    /// window reopens.
    async fn admit(&self) -> Result<(), Duration> {
        let mut current = self.current.lock().await;
        let age = current.opened.elapsed();
        if age >= self.window {
            *current = Window {
                opened: Instant::now(),
                admitted: 0,
            };
        } else if current.admitted >= self.max_requests {
            return Err(self.window - age);
        }
        current.admitted += 1;
        Ok(())
    }
}

/// Reuses a non-blank incoming `x-request-id` or mints a `UUIDv4`, then
/// echoes it on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let incoming = req
        .headers()
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned);
    let id = incoming.unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(id.clone()));
    let mut res = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID, value);
    }
    res
}

/// Rejects requests past the window budget with `429` and `Retry-After`.
///
/// Must sit inside [`request_id`] so the error envelope carries the id.
pub async fn enforce_rate_limit(
    State(limiter): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let Err(retry_after) = limiter.admit().await else {
        return next.run(req).await;
    };

    let secs = retry_after.as_secs().max(1);
    tracing::warn!(
        max_requests = limiter.max_requests,
        retry_after_secs = secs,
        "rate limit exceeded"
    );
    let id = req
        .extensions()
        .get::<RequestId>()
        .map_or_else(|| Uuid::new_v4().to_string(), |id| id.0.clone());
    let mut res = ApiError::new(id, "rate_limited", "rate limit exceeded").into_response();
    if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
        res.headers_mut().insert(header::RETRY_AFTER, value);
    }
    res
}
