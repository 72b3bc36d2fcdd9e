mod activity;
mod health;
mod metrics;
mod send;

pub use activity::activity_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use send::send_handler;
