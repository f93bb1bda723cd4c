//! Global per-IP request limiter
//!
//! 200 requests per 15-minute window per client IP, applied to the
//! whole API surface. Windows are fixed, not sliding.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

const MAX_REQUESTS: u32 = 200;
const WINDOW_SECS: u64 = 15 * 60;

struct IpEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<HashMap<String, IpEntry>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    pub async fn check(&self, ip: &str) -> bool {
        let mut map = self.inner.lock().await;
        let now = Instant::now();

        let entry = map.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        if now.duration_since(entry.window_start).as_secs() >= WINDOW_SECS {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= MAX_REQUESTS
    }

    /// Remove entries whose window has passed
    pub async fn cleanup(&self) {
        let mut map = self.inner.lock().await;
        let cutoff = std::time::Duration::from_secs(WINDOW_SECS);
        let now = Instant::now();
        map.retain(|_, entry| now.duration_since(entry.window_start) < cutoff);
    }
}

/// Extract client IP: X-Forwarded-For header first (reverse proxy), then
/// peer address.
fn extract_ip(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
    {
        // X-Forwarded-For can be comma-separated; first entry is the original client
        if let Some(first) = val.split(',').next() {
            let ip = first.trim();
            if !ip.is_empty() {
                return ip.to_owned();
            }
        }
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware applying the global limiter
pub async fn rate_limit_middleware(
    State(state): State<crate::core::AppState>,
    request: Request,
    next: Next,
) -> Response {
    let ip = extract_ip(&request);
    if !state.rate_limiter.check(&ip).await {
        tracing::warn!(ip = %ip, "rate limit exceeded");
        let body = serde_json::json!({ "message": "Too many requests" });
        return (StatusCode::TOO_MANY_REQUESTS, axum::Json(body)).into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_limit_then_blocks() {
        let limiter = RateLimiter::new();
        for _ in 0..MAX_REQUESTS {
            assert!(limiter.check("10.0.0.1").await);
        }
        assert!(!limiter.check("10.0.0.1").await);
        // Other IPs are unaffected
        assert!(limiter.check("10.0.0.2").await);
    }

    #[tokio::test]
    async fn cleanup_keeps_live_windows() {
        let limiter = RateLimiter::new();
        assert!(limiter.check("10.0.0.1").await);
        limiter.cleanup().await;
        assert_eq!(limiter.inner.lock().await.len(), 1);
    }
}
