//! Application Configuration
//!
//! Configuration for the Comments application layer. Fixed at construction;
//! the submission limiter is built from it once and owns its window table.

use platform::rate_limit::RateLimitPolicy;

/// Default submission throttle: 5 comments per 60 seconds per source
pub const DEFAULT_SUBMISSION_MAX: u32 = 5;
pub const DEFAULT_SUBMISSION_WINDOW_SECONDS: u64 = 60;

/// Public page size bounds (thread view)
pub const PUBLIC_DEFAULT_PAGE_SIZE: u32 = 10;
pub const PUBLIC_MAX_PAGE_SIZE: u32 = 50;

/// Moderator page size bounds (queue view)
pub const MODERATION_DEFAULT_PAGE_SIZE: u32 = 50;
pub const MODERATION_MAX_PAGE_SIZE: u32 = 100;

/// Comments application configuration
#[derive(Debug, Clone)]
pub struct CommentConfig {
    /// Comment submission throttle per source address
    pub submission_limit: RateLimitPolicy,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            submission_limit: RateLimitPolicy::new(
                DEFAULT_SUBMISSION_MAX,
                DEFAULT_SUBMISSION_WINDOW_SECONDS,
            ),
        }
    }
}

impl CommentConfig {
    pub fn new(submission_limit: RateLimitPolicy) -> Self {
        Self { submission_limit }
    }
}
