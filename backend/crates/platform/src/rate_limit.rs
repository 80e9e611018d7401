//! Sliding-Window Rate Limiting
//!
//! Per-source sliding-window counters used for login brute-force throttling
//! and comment spam throttling. Each limiter instance owns its key → window
//! table and its policy; thresholds are fixed at construction, never re-read
//! from ambient configuration.
//!
//! State is per-process: multiple instances of the service each count
//! independently. Windows are pruned lazily on access; there is no background
//! sweep.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// ============================================================================
// Clock
// ============================================================================

/// Time source for the limiter
///
/// Injected so tests can move time deterministically instead of sleeping.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Wall-clock backed [`Clock`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// ============================================================================
// Policy
// ============================================================================

/// Rate limit policy: at most `max_attempts` events per `window`
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    /// Maximum events allowed inside the window
    pub max_attempts: u32,
    /// Sliding window duration
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn new(max_attempts: u32, window_secs: u64) -> Self {
        Self {
            max_attempts,
            window: Duration::from_secs(window_secs),
        }
    }
}

// ============================================================================
// Decision
// ============================================================================

/// Outcome of a rate-limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Under the threshold
    Allowed,
    /// At or over the threshold; `retry_after` is the time until the oldest
    /// counted event falls out of the window
    Blocked { retry_after: Duration },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

// ============================================================================
// Limiter
// ============================================================================

/// Per-source sliding-window limiter
///
/// The whole key table sits behind one mutex, so `check` + `record_failure`
/// (and the single-shot `check_and_record`) compose atomically for a given
/// source: two concurrent requests from the same address cannot both observe
/// "allowed" on the threshold boundary.
pub struct SlidingWindowLimiter {
    policy: RateLimitPolicy,
    clock: Arc<dyn Clock>,
    windows: Mutex<HashMap<String, Vec<Instant>>>,
}

impl SlidingWindowLimiter {
    /// Create a limiter on the system clock
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Create a limiter with an injected clock
    pub fn with_clock(policy: RateLimitPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    /// Check whether `source` is under the threshold; records nothing
    pub fn check(&self, source: &str) -> Decision {
        let now = self.clock.now();
        let mut windows = self.windows.lock().expect("limiter mutex poisoned");
        Self::prune(&mut windows, source, now, self.policy.window);
        self.decide(&windows, source, now)
    }

    /// Record a failed attempt from `source`
    pub fn record_failure(&self, source: &str) {
        let now = self.clock.now();
        let mut windows = self.windows.lock().expect("limiter mutex poisoned");
        Self::prune(&mut windows, source, now, self.policy.window);
        windows.entry(source.to_string()).or_default().push(now);
    }

    /// Discard the window for `source` entirely
    pub fn clear(&self, source: &str) {
        let mut windows = self.windows.lock().expect("limiter mutex poisoned");
        windows.remove(source);
    }

    /// Check and, if allowed, record — in one critical section
    ///
    /// Used where the attempt itself is the throttled event (comment
    /// submission): a blocked attempt is not counted.
    pub fn check_and_record(&self, source: &str) -> Decision {
        let now = self.clock.now();
        let mut windows = self.windows.lock().expect("limiter mutex poisoned");
        Self::prune(&mut windows, source, now, self.policy.window);
        let decision = self.decide(&windows, source, now);
        if decision.is_allowed() {
            windows.entry(source.to_string()).or_default().push(now);
        }
        decision
    }

    /// Drop entries that have aged past the window; empty windows are
    /// removed from the table so idle sources cost nothing
    fn prune(
        windows: &mut HashMap<String, Vec<Instant>>,
        source: &str,
        now: Instant,
        window: Duration,
    ) {
        if let Some(entries) = windows.get_mut(source) {
            entries.retain(|t| now.duration_since(*t) < window);
            if entries.is_empty() {
                windows.remove(source);
            }
        }
    }

    fn decide(
        &self,
        windows: &HashMap<String, Vec<Instant>>,
        source: &str,
        now: Instant,
    ) -> Decision {
        let entries = match windows.get(source) {
            Some(entries) => entries,
            None => return Decision::Allowed,
        };

        if (entries.len() as u32) < self.policy.max_attempts {
            return Decision::Allowed;
        }

        // Entries are appended in clock order, so the first one is the oldest
        let retry_after = entries
            .first()
            .map(|oldest| {
                self.policy
                    .window
                    .saturating_sub(now.duration_since(*oldest))
            })
            .unwrap_or(self.policy.window);

        Decision::Blocked { retry_after }
    }
}
