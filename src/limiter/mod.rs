//! Per-client sliding-window rate limiting.
//!
//! Each client keeps the (timestamp, count) observations that fall inside
//! the trailing window. An admission check purges expired observations,
//! sums what remains, and either rejects without recording the attempt or
//! appends a new observation. The whole purge-sum-append sequence runs
//! under the client's map entry lock, so concurrent checks for the same
//! client serialize.

use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

/// Rate limiter policy.
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Admissions allowed per window.
    pub limit: u32,
    /// Trailing window length in seconds.
    pub window_seconds: u64,
    /// Upper bound on tracked clients; the sweep evicts beyond this.
    pub max_clients: usize,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self { limit: 30, window_seconds: 60, max_clients: 10_000 }
    }
}

#[derive(Debug)]
struct ClientWindow {
    /// (epoch millis, count) observations inside the trailing window.
    observations: Vec<(i64, u32)>,
    /// Last contact, admitted or not; drives sweep eviction.
    last_seen: i64,
}

/// Sliding-window request throttle keyed by client address.
pub struct SlidingWindowLimiter {
    clients: DashMap<String, ClientWindow>,
    config: RateLimiterConfig,
}

impl SlidingWindowLimiter {
    pub fn new(config: RateLimiterConfig) -> Self {
        Self { clients: DashMap::new(), config }
    }

    /// Admit or reject a request from `client_id` at the current time.
    pub fn is_allowed(&self, client_id: &str) -> bool {
        self.check_at(client_id, Utc::now().timestamp_millis())
    }

    /// Drop clients idle past the window, then enforce `max_clients` by
    /// evicting the least recently seen. Runs on a timer, decoupled from
    /// the per-request purge.
    pub fn sweep(&self) {
        self.sweep_at(Utc::now().timestamp_millis());
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }

    fn window_millis(&self) -> i64 {
        self.config.window_seconds as i64 * 1000
    }

    fn check_at(&self, client_id: &str, now_ms: i64) -> bool {
        let cutoff = now_ms - self.window_millis();
        let mut window = self
            .clients
            .entry(client_id.to_string())
            .or_insert_with(|| ClientWindow { observations: Vec::new(), last_seen: now_ms });
        window.last_seen = now_ms;
        window.observations.retain(|&(t, _)| t > cutoff);

        let total: u32 = window.observations.iter().map(|&(_, count)| count).sum();
        if total >= self.config.limit {
            debug!(client = client_id, total, "rate limit exceeded");
            return false;
        }

        window.observations.push((now_ms, 1));
        true
    }

    fn sweep_at(&self, now_ms: i64) {
        let cutoff = now_ms - self.window_millis();
        self.clients.retain(|_, window| window.last_seen > cutoff);

        let excess = self.clients.len().saturating_sub(self.config.max_clients);
        if excess == 0 {
            return;
        }

        let mut by_age: Vec<(String, i64)> = self
            .clients
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().last_seen))
            .collect();
        by_age.sort_by_key(|&(_, last_seen)| last_seen);
        for (key, _) in by_age.into_iter().take(excess) {
            self.clients.remove(&key);
        }
        debug!(evicted = excess, "rate limiter sweep evicted clients over capacity");
    }
}
