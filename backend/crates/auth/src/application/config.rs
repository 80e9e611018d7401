//! Application Configuration
//!
//! Configuration for the Auth application layer. All values are fixed at
//! construction and handed to the components that need them; nothing is
//! re-read from ambient settings at call time.

use platform::rate_limit::RateLimitPolicy;
use std::time::Duration;

/// Default access-token lifetime (120 minutes)
pub const DEFAULT_TOKEN_TTL_MINUTES: u64 = 120;

/// Default login throttle: 5 failures per 300 seconds per source
pub const DEFAULT_LOGIN_MAX_FAILURES: u32 = 5;
pub const DEFAULT_LOGIN_WINDOW_SECONDS: u64 = 300;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Process-wide token signing secret
    pub token_secret: Vec<u8>,
    /// Access-token lifetime
    pub token_ttl: Duration,
    /// Login failure throttle per source address
    pub login_limit: RateLimitPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // Placeholder secret; deployments must provide their own
            token_secret: vec![0u8; 32],
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_MINUTES * 60),
            login_limit: RateLimitPolicy::new(
                DEFAULT_LOGIN_MAX_FAILURES,
                DEFAULT_LOGIN_WINDOW_SECONDS,
            ),
        }
    }
}

impl AuthConfig {
    pub fn new(token_secret: Vec<u8>, token_ttl: Duration, login_limit: RateLimitPolicy) -> Self {
        Self {
            token_secret,
            token_ttl,
            login_limit,
        }
    }
}
