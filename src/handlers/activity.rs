use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::github;
use crate::metrics::{
    ACTIVITY_FETCH_ERRORS, RATE_LIMIT_ENTRIES, RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL,
};
use crate::models::{ActivityData, ActivityResponse};
use crate::rate_limit::{client_identity, rate_limit_headers};
use crate::state::AppState;

// GET /api/activity - latest GitHub commit for the live widget.
// An upstream failure never turns into an error status: the feed comes
// back null with a per-source message and the widget degrades on its own.
pub async fn activity_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    REQUEST_TOTAL.inc();

    let identity = client_identity(&headers);
    let verdict = state.limiter.check(&identity, &state.activity_policy);
    RATE_LIMIT_ENTRIES.set(state.limiter.len() as f64);

    if !verdict.allowed {
        RATE_LIMITED_TOTAL.inc();
        return (
            StatusCode::TOO_MANY_REQUESTS,
            rate_limit_headers(&verdict),
            Json(serde_json::json!({
                "error": "Too many requests. Please try again later."
            })),
        )
            .into_response();
    }

    let start_time = Instant::now();

    let mut errors = HashMap::new();
    let github = match github::fetch_latest_activity(
        &state.client,
        &state.github_api_url,
        &state.github_user,
    )
    .await
    {
        Ok(activity) => activity,
        Err(e) => {
            ACTIVITY_FETCH_ERRORS.inc();
            eprintln!("[activity] GitHub fetch failed: {}", e);
            errors.insert("github".to_string(), e);
            None
        }
    };

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    let body = ActivityResponse {
        data: ActivityData { github },
        errors: if errors.is_empty() { None } else { Some(errors) },
        fetched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    let mut response_headers = rate_limit_headers(&verdict);
    response_headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    (StatusCode::OK, response_headers, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{spawn, test_state};
    use crate::rate_limit::RateLimitPolicy;
    use axum::Router;
    use axum::routing::get;

    // nothing listens on the discard port, so upstream calls fail fast
    const DEAD_UPSTREAM: &str = "http://127.0.0.1:9";

    fn activity_app(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/api/activity", get(activity_handler))
            .with_state(state)
    }

    fn policies(activity_max: u32) -> (RateLimitPolicy, RateLimitPolicy) {
        (
            RateLimitPolicy::new(60_000, activity_max),
            RateLimitPolicy::new(3_600_000, 5),
        )
    }

    #[tokio::test]
    async fn relays_latest_activity_with_headers() {
        let mock = Router::new().route(
            "/users/{user}/events/public",
            get(|| async {
                Json(serde_json::json!([{
                    "type": "PushEvent",
                    "repo": {"name": "octocat/hello"},
                    "created_at": "2025-01-02T03:04:05Z",
                    "payload": {
                        "ref": "refs/heads/main",
                        "commits": [{"sha": "abc123", "message": "ship it"}]
                    }
                }]))
            }),
        );
        let upstream = spawn(mock).await;

        let (activity_policy, send_policy) = policies(30);
        let state = test_state(&upstream, DEAD_UPSTREAM, activity_policy, send_policy);
        let base = spawn(activity_app(state)).await;

        let res = reqwest::get(format!("{}/api/activity", base)).await.unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.headers().get("x-ratelimit-limit").unwrap(), "30");
        assert_eq!(res.headers().get("x-ratelimit-remaining").unwrap(), "29");
        assert!(res.headers().contains_key("x-ratelimit-reset"));
        assert_eq!(res.headers().get("cache-control").unwrap(), "no-store");

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["data"]["github"]["repo"], "octocat/hello");
        assert_eq!(body["data"]["github"]["branch"], "main");
        assert_eq!(body["data"]["github"]["message"], "ship it");
        assert!(body.get("errors").is_none());
        assert!(body["fetchedAt"].is_string());
    }

    #[tokio::test]
    async fn upstream_failure_degrades_to_null_feed() {
        let (activity_policy, send_policy) = policies(30);
        let state = test_state(DEAD_UPSTREAM, DEAD_UPSTREAM, activity_policy, send_policy);
        let base = spawn(activity_app(state)).await;

        let res = reqwest::get(format!("{}/api/activity", base)).await.unwrap();
        assert_eq!(res.status(), 200);

        let body: serde_json::Value = res.json().await.unwrap();
        assert!(body["data"]["github"].is_null());
        assert!(!body["errors"]["github"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn throttles_past_policy_limit() {
        let (activity_policy, send_policy) = policies(2);
        let state = test_state(DEAD_UPSTREAM, DEAD_UPSTREAM, activity_policy, send_policy);
        let base = spawn(activity_app(state)).await;
        let url = format!("{}/api/activity", base);

        assert_eq!(reqwest::get(&url).await.unwrap().status(), 200);
        assert_eq!(reqwest::get(&url).await.unwrap().status(), 200);

        let res = reqwest::get(&url).await.unwrap();
        assert_eq!(res.status(), 429);
        assert_eq!(res.headers().get("x-ratelimit-remaining").unwrap(), "0");

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "Too many requests. Please try again later.");
    }
}
