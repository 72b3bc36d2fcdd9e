use crate::email::Mailer;
use crate::rate_limit::{RateLimitPolicy, RateLimiter};

// app's shared state
pub struct AppState {
    pub client: reqwest::Client,
    pub limiter: RateLimiter, // per-caller counters, both endpoints share it
    pub activity_policy: RateLimitPolicy,
    pub send_policy: RateLimitPolicy,
    pub github_api_url: String,
    pub github_user: String,
    pub mailer: Mailer,
}
