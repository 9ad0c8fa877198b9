pub mod entries_handler;
pub mod health;
pub mod metrics;
pub mod pair_handler;
pub mod prompts_handler;
pub mod stats_handler;

pub use health::health_check;
pub use metrics::{metrics_handler, setup_metrics_recorder, MetricsState};

/// The server's local calendar date, used when the caller does not send one.
pub fn local_today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
