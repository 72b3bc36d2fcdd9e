use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("portfolio_requests_total", "Total number of API requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "portfolio_rate_limited_total",
        "Total requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref EMAILS_SENT_TOTAL: Counter =
        register_counter!("portfolio_emails_sent_total", "Total emails delivered").unwrap();
    pub static ref EMAIL_FAILURES_TOTAL: Counter = register_counter!(
        "portfolio_email_failures_total",
        "Total email delivery failures"
    )
    .unwrap();
    pub static ref ACTIVITY_FETCH_ERRORS: Counter = register_counter!(
        "portfolio_activity_fetch_errors_total",
        "Total failed GitHub activity fetches"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "portfolio_request_latency_seconds",
        "Upstream action latency in seconds"
    )
    .unwrap();
    pub static ref RATE_LIMIT_ENTRIES: Gauge = register_gauge!(
        "portfolio_rate_limit_entries",
        "Current number of tracked caller identities"
    )
    .unwrap();
}
