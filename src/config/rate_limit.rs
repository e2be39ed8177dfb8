use std::env;

use crate::middleware::rate_limit::RateLimitPolicy;

/// Rate limit configuration. Two independent policies are active at once:
/// a general one covering every API route and a stricter one covering the
/// authentication routes, which pass through both.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Requests per window for general endpoints.
    pub general_max_requests: u32,
    /// Window size in seconds for general endpoints.
    pub general_window_secs: u64,
    /// Requests per window for auth endpoints (stricter).
    pub auth_max_requests: u32,
    /// Window size in seconds for auth endpoints.
    pub auth_window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_max_requests: 100,
            general_window_secs: 60,
            auth_max_requests: 5,
            auth_window_secs: 60,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            general_max_requests: env::var("RATE_LIMIT_GENERAL_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.general_max_requests),
            general_window_secs: env::var("RATE_LIMIT_GENERAL_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.general_window_secs),
            auth_max_requests: env::var("RATE_LIMIT_AUTH_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auth_max_requests),
            auth_window_secs: env::var("RATE_LIMIT_AUTH_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auth_window_secs),
        }
    }

    pub fn general_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            max_requests: self.general_max_requests,
            window_secs: self.general_window_secs.max(1),
        }
    }

    pub fn auth_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            max_requests: self.auth_max_requests,
            window_secs: self.auth_window_secs.max(1),
        }
    }
}
