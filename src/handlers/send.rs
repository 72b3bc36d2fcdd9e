use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use std::time::Instant;

use crate::metrics::{
    EMAIL_FAILURES_TOTAL, EMAILS_SENT_TOTAL, RATE_LIMIT_ENTRIES, RATE_LIMITED_TOTAL,
    REQUEST_LATENCY, REQUEST_TOTAL,
};
use crate::models::ContactRequest;
use crate::rate_limit::{client_identity, rate_limit_headers};
use crate::state::AppState;

// POST /api/send - contact form dispatch. Auto-reply to the sender first,
// then the notification copy to the owner. Only the auto-reply failing
// fails the request: the sender's confirmation must not depend on the
// internal copy getting through.
pub async fn send_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Response {
    REQUEST_TOTAL.inc();

    let identity = client_identity(&headers);
    let verdict = state.limiter.check(&identity, &state.send_policy);
    RATE_LIMIT_ENTRIES.set(state.limiter.len() as f64);

    if !verdict.allowed {
        RATE_LIMITED_TOTAL.inc();
        return (
            StatusCode::TOO_MANY_REQUESTS,
            rate_limit_headers(&verdict),
            Json(serde_json::json!({
                "error": "Too many requests. Please try again later.",
                "limit": verdict.limit,
                "remaining": verdict.remaining,
                "reset": verdict.reset_at(),
            })),
        )
            .into_response();
    }

    // malformed JSON and missing fields get the same validation answer
    let fields = match body {
        Ok(Json(request)) => request.into_fields(),
        Err(_) => None,
    };
    let (name, email, message) = match fields {
        Some(fields) => fields,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                rate_limit_headers(&verdict),
                Json(serde_json::json!({
                    "error": "Name, email, and message are required"
                })),
            )
                .into_response();
        }
    };

    let start_time = Instant::now();
    let first_name = name.split_whitespace().next().unwrap_or("there");

    let auto_reply = match state.mailer.send_auto_reply(&email, first_name).await {
        Ok(data) => {
            EMAILS_SENT_TOTAL.inc();
            data
        }
        Err(e) => {
            EMAIL_FAILURES_TOTAL.inc();
            eprintln!("[send] Auto-response failed: {}", e);
            REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                rate_limit_headers(&verdict),
                Json(serde_json::json!({"error": "Failed to send email"})),
            )
                .into_response();
        }
    };

    let response = match state.mailer.send_notification(&name, &email, &message).await {
        Ok(notification) => {
            EMAILS_SENT_TOTAL.inc();
            (
                StatusCode::OK,
                rate_limit_headers(&verdict),
                Json(serde_json::json!({
                    "success": true,
                    "message": "Email sent successfully",
                    "data": {
                        "autoResponse": auto_reply,
                        "notification": notification,
                    },
                })),
            )
                .into_response()
        }
        Err(e) => {
            EMAIL_FAILURES_TOTAL.inc();
            eprintln!("[send] Notification failed: {}", e);
            (
                StatusCode::OK,
                rate_limit_headers(&verdict),
                Json(serde_json::json!({
                    "success": true,
                    "message": "Auto-response sent, but notification failed",
                    "data": auto_reply,
                })),
            )
                .into_response()
        }
    };

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
    response
}
