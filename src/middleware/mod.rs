pub mod basic_auth;
pub mod metrics;
pub mod request_id;

pub use basic_auth::basic_auth_gate;
pub use metrics::metrics_middleware;
pub use request_id::request_id_middleware;
