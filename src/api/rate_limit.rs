//! Per-IP rate limiting middleware
//!
//! Each client IP gets a token bucket refilled at
//! `requests_per_second` up to `burst_size`. Paths and IPs listed in
//! [`RateLimitConfig`] bypass the limiter; long-lived SSE streams are exempt
//! by default.

use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::config::RateLimitConfig;
use crate::error::{ApiError, ErrorDetail};

struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
    rate: f64,
    capacity: f64,
}

impl TokenBucket {
    fn new(rate: f64, capacity: u32) -> Self {
        Self {
            tokens: f64::from(capacity),
            last_refill: Instant::now(),
            rate,
            capacity: f64::from(capacity),
        }
    }

    /// Take one token, or return how many seconds until one is available
    fn try_consume(&mut self, now: Instant) -> Option<u64> {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_refill = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            None
        } else {
            Some(((1.0 - self.tokens) / self.rate).ceil() as u64)
        }
    }
}

struct Buckets {
    by_ip: HashMap<IpAddr, TokenBucket>,
    last_sweep: Instant,
}

/// Rate limiter with per-IP tracking.
///
/// A bucket left idle for a full refill window is back at capacity, so it is
/// dropped and recreated on the client's next request.
pub struct RateLimiter {
    buckets: Mutex<Buckets>,
    idle_window: Duration,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a new rate limiter from configuration
    pub fn new(config: RateLimitConfig) -> Self {
        let idle_window = if config.requests_per_second == 0 {
            Duration::MAX
        } else {
            Duration::from_secs_f64(
                f64::from(config.burst_size.max(1)) / f64::from(config.requests_per_second),
            )
        };
        Self {
            buckets: Mutex::new(Buckets {
                by_ip: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            idle_window,
            config,
        }
    }

    fn is_exempt(&self, path: &str, ip: IpAddr) -> bool {
        self.config.exempt_ips.contains(&ip)
            || self
                .config
                .exempt_paths
                .iter()
                .any(|exempt| path.starts_with(exempt.as_str()))
    }

    /// `None` when the request may proceed, otherwise the retry delay in seconds
    pub async fn check(&self, path: &str, ip: IpAddr) -> Option<u64> {
        self.check_at(path, ip, Instant::now()).await
    }

    async fn check_at(&self, path: &str, ip: IpAddr, now: Instant) -> Option<u64> {
        if self.is_exempt(path, ip) {
            return None;
        }

        let mut buckets = self.buckets.lock().await;
        if now.saturating_duration_since(buckets.last_sweep) >= self.idle_window {
            let idle_window = self.idle_window;
            buckets
                .by_ip
                .retain(|_, bucket| now.saturating_duration_since(bucket.last_refill) < idle_window);
            buckets.last_sweep = now;
        }

        buckets
            .by_ip
            .entry(ip)
            .or_insert_with(|| {
                TokenBucket::new(
                    f64::from(self.config.requests_per_second),
                    self.config.burst_size,
                )
            })
            .try_consume(now)
    }
}

/// Rate limiting middleware function
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    match limiter.check(req.uri().path(), addr.ip()).await {
        None => next.run(req).await,
        Some(retry_after) => {
            tracing::warn!(ip = %addr.ip(), path = req.uri().path(), retry_after, "rate limited");
            let body = ApiError {
                error: ErrorDetail {
                    code: "rate_limited".to_string(),
                    message: "Too many requests".to_string(),
                    details: Some(serde_json::json!({ "retry_after_seconds": retry_after })),
                },
            };
            (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response()
        }
    }
}
