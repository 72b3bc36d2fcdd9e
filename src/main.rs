use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use std::sync::Arc;

mod config;
mod email;
mod github;
mod handlers;
mod metrics;
mod models;
mod rate_limit;
mod state;
mod templates;

use config::Args;
use email::Mailer;
use handlers::{activity_handler, health_handler, metrics_handler, send_handler};
use rate_limit::{RateLimitPolicy, RateLimiter};
use state::AppState;

// this is main async function with tokio
#[tokio::main]
async fn main() {
    // parse cli arguments
    let args = Args::parse();

    let client = reqwest::Client::new();

    // creating shared state
    let state = Arc::new(AppState {
        client: client.clone(),
        limiter: RateLimiter::new(),
        activity_policy: RateLimitPolicy::new(
            args.activity_rate_window as i64 * 1000,
            args.activity_rate_limit,
        ),
        send_policy: RateLimitPolicy::new(
            args.send_rate_window as i64 * 1000,
            args.send_rate_limit,
        ),
        github_api_url: args.github_api_url.clone(),
        github_user: args.github_user.clone(),
        mailer: Mailer::new(
            client,
            args.email_api_url.clone(),
            args.email_api_key.clone(),
            args.email_sender_name.clone(),
            args.email_sender_address.clone(),
            args.email_recipient.clone(),
        ),
    });

    // creating the router with routes
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/activity", get(activity_handler))
        .route("/api/send", post(send_handler))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    println!("Portfolio API running on http://localhost:{}", args.port);
    println!("Serving GitHub activity for {}", args.github_user);
    println!(
        "Activity rate limit: {} requests per {} seconds",
        args.activity_rate_limit, args.activity_rate_window
    );
    println!(
        "Contact rate limit: {} emails per {} seconds",
        args.send_rate_limit, args.send_rate_window
    );

    axum::serve(listener, app).await.unwrap();
}
