//! Fixed-window request rate limiting.
//!
//! Each `(policy, client)` pair owns a counter scoped to the current
//! wall-clock window: `window_start = now - now % window`. The counter is
//! reset in place when its window elapses, so a long-lived client costs a
//! single map entry. When the number of tracked clients reaches the cap,
//! entries from elapsed windows are swept before a new client is admitted.
//!
//! Counters live in process memory only and are lost on restart.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Ceiling and window size for one class of traffic.
#[derive(Clone, Copy, Debug)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window_secs: u64,
}

#[derive(Debug)]
struct WindowCounter {
    window_start: u64,
    count: u32,
}

const DEFAULT_MAX_TRACKED_KEYS: usize = 100_000;

/// Per-client fixed-window counter store for a single policy.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    policy: RateLimitPolicy,
    counters: Mutex<HashMap<String, WindowCounter>>,
    max_tracked_keys: usize,
}

impl FixedWindowLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self::with_max_tracked_keys(policy, DEFAULT_MAX_TRACKED_KEYS)
    }

    pub fn with_max_tracked_keys(policy: RateLimitPolicy, max_tracked_keys: usize) -> Self {
        assert!(policy.window_secs > 0, "rate limit window must be non-zero");
        Self {
            policy,
            counters: Mutex::new(HashMap::new()),
            max_tracked_keys,
        }
    }

    /// Records a request from `key` and decides whether it may proceed.
    /// On rejection returns the seconds remaining until the window ends.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        self.check_at(key, unix_now())
    }

    /// Clock-explicit variant of [`check`](Self::check); the wall clock is
    /// only consulted by the caller, which keeps window math deterministic
    /// under test.
    pub fn check_at(&self, key: &str, now: u64) -> Result<(), u64> {
        let window_start = now - now % self.policy.window_secs;

        let mut counters = match self.counters.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if counters.len() >= self.max_tracked_keys && !counters.contains_key(key) {
            counters.retain(|_, counter| counter.window_start == window_start);
        }

        let counter = counters.entry(key.to_string()).or_insert(WindowCounter {
            window_start,
            count: 0,
        });

        if counter.window_start != window_start {
            counter.window_start = window_start;
            counter.count = 0;
        }

        counter.count += 1;

        if counter.count > self.policy.max_requests {
            Err(window_start + self.policy.window_secs - now)
        } else {
            Ok(())
        }
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        match self.counters.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Middleware applying the general policy to every API route.
pub async fn general_rate_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    enforce(&state.rate_limits.general, req, next).await
}

/// Middleware applying the stricter auth policy. Auth routes carry this in
/// addition to the general layer, so either ceiling can reject.
pub async fn auth_rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    enforce(&state.rate_limits.auth, req, next).await
}

async fn enforce(limiter: &FixedWindowLimiter, req: Request, next: Next) -> Response {
    let key = client_key(&req);

    match limiter.check(&key) {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            tracing::warn!(client = %key, retry_after, "rate limit exceeded");
            AppError::RateLimited { retry_after }.into_response()
        }
    }
}

/// Client identity for counting: first `X-Forwarded-For` hop when present
/// (the service is expected to sit behind a proxy), otherwise the peer
/// address.
fn client_key(req: &Request) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
