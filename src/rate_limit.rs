use axum::http::HeaderMap;
use chrono::{SecondsFormat, TimeZone, Utc};
use dashmap::DashMap;

// Chance that a single check also sweeps expired entries out of the store.
// Tunable; only has to be low enough that no request pays for cleanup often.
const SWEEP_PROBABILITY: f64 = 0.01;

// Rate limit policy - window length + max attempts per window
#[derive(Clone, Copy, Debug)]
pub struct RateLimitPolicy {
    pub window_ms: i64,
    pub max_attempts: u32,
}

impl RateLimitPolicy {
    // Panics on non-positive values so misconfiguration dies at startup,
    // not per request.
    pub fn new(window_ms: i64, max_attempts: u32) -> Self {
        assert!(window_ms > 0, "rate limit window must be positive");
        assert!(max_attempts > 0, "rate limit max attempts must be positive");
        Self {
            window_ms,
            max_attempts,
        }
    }
}

// Rate limit entry - tracks attempts per caller identity
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at_ms: i64,
}

// Result of a single rate limit check
#[derive(Clone, Copy, Debug)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    // Window end as an ISO-8601 timestamp, e.g. "2025-01-01T00:00:00.000Z"
    pub fn reset_at(&self) -> String {
        Utc.timestamp_millis_opt(self.reset_at_ms)
            .unwrap()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

// Process-wide counter store, one entry per caller identity.
// Fixed-window counting: the quota resets completely when a window ends, so
// a burst right before expiry plus one right after can get double quota.
// Known approximation of a sliding window, kept on purpose.
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    // Check and increment in one step. Rejected attempts still consume a
    // slot, so a retry storm cannot hold a window open.
    pub fn check(&self, identity: &str, policy: &RateLimitPolicy) -> RateLimitResult {
        let now_ms = Utc::now().timestamp_millis();
        let result = self.check_at(identity, policy, now_ms);

        // amortized cleanup so one-off callers don't accumulate forever
        if rand::random::<f64>() < SWEEP_PROBABILITY {
            self.sweep_at(now_ms);
        }

        result
    }

    // The entry guard holds the shard lock for this identity across the
    // whole read-modify-write, so concurrent checks for one identity
    // serialize even on a multi-threaded runtime.
    fn check_at(&self, identity: &str, policy: &RateLimitPolicy, now_ms: i64) -> RateLimitResult {
        let mut entry = self
            .entries
            .entry(identity.to_string())
            .or_insert_with(|| RateLimitEntry {
                count: 0,
                reset_at_ms: now_ms + policy.window_ms,
            });

        // window expired? hard reset to a fresh one
        if now_ms > entry.reset_at_ms {
            entry.count = 0;
            entry.reset_at_ms = now_ms + policy.window_ms;
        }

        entry.count += 1;

        RateLimitResult {
            allowed: entry.count <= policy.max_attempts,
            limit: policy.max_attempts,
            remaining: policy.max_attempts.saturating_sub(entry.count),
            reset_at_ms: entry.reset_at_ms,
        }
    }

    // Drop every entry whose window has already ended
    pub fn sweep(&self) {
        self.sweep_at(Utc::now().timestamp_millis());
    }

    fn sweep_at(&self, now_ms: i64) {
        self.entries.retain(|_, entry| now_ms <= entry.reset_at_ms);
    }

    // Number of identities currently tracked
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// Caller identity from proxy headers, in order: first address in
// X-Forwarded-For, then X-Real-IP, then CF-Connecting-IP, then "unknown".
// All of these are forgeable by a direct caller; good enough for abuse
// deterrence, not for identifying clients.
pub fn client_identity(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        return real_ip.trim().to_string();
    }

    if let Some(cf_ip) = headers.get("cf-connecting-ip").and_then(|v| v.to_str().ok()) {
        return cf_ip.trim().to_string();
    }

    "unknown".to_string()
}

// X-RateLimit-* trio, attached to every response from a guarded endpoint
pub fn rate_limit_headers(result: &RateLimitResult) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "X-RateLimit-Limit",
        result.limit.to_string().parse().expect("valid header"),
    );
    headers.insert(
        "X-RateLimit-Remaining",
        result.remaining.to_string().parse().expect("valid header"),
    );
    headers.insert(
        "X-RateLimit-Reset",
        result.reset_at().parse().expect("valid header"),
    );
    headers
}
