mod auth;
mod config;
mod db;
mod error;
mod extractors;
mod handlers;
mod journal;
mod middleware;
mod models;
mod openapi;
mod provisioning;
mod startup;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::{SigningKeys, SupabaseAdmin, TokenVerifier};
use db::{JournalStore, PgStore};
use provisioning::{ProvisioningConfig, ProvisioningService};

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use handlers::MetricsState;

pub struct AppState {
    pub store: Arc<dyn JournalStore>,
    pub verifier: Arc<TokenVerifier>,
    /// `None` when no service-role key is configured.
    pub provisioning: Option<Arc<ProvisioningService>>,
    pub config: AppConfig,
    pub metrics: Arc<MetricsState>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with conditional JSON/text output
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,oneline_axum=debug,tower_http=debug".into());

    if use_json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Human-readable for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        e
    })?;

    // Create database pool
    let pool = db::create_pool(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to create database pool: {}", e);
        e
    })?;
    tracing::info!("Database pool created successfully");

    db::run_migrations(&pool).await.map_err(|e| {
        tracing::error!("Failed to apply migrations: {}", e);
        e
    })?;
    let store = Arc::new(PgStore::new(pool));

    // Initialize metrics recorder
    let metrics_state = Arc::new(handlers::setup_metrics_recorder()?);
    tracing::info!("Metrics recorder initialized");

    // Access tokens: project secret when available, published keys otherwise
    let verifier = match config.supabase_jwt_secret.as_deref() {
        Some(secret) => TokenVerifier::with_secret(secret, config.token_issuer()),
        None => TokenVerifier::with_jwks(SigningKeys::new(&config.supabase_url), config.token_issuer()),
    };

    let provisioning = match config.supabase_service_role_key.as_deref() {
        Some(key) => Some(Arc::new(ProvisioningService::new(
            Arc::new(SupabaseAdmin::new(&config.supabase_url, key)),
            store.clone(),
            ProvisioningConfig {
                couple: config.couple.clone(),
                site_url: config.site_url.clone(),
            },
        ))),
        None => {
            tracing::warn!("SUPABASE_SERVICE_ROLE_KEY not set; /api/provision will fail");
            None
        }
    };

    // Create application state
    let state = Arc::new(AppState {
        store,
        verifier: Arc::new(verifier),
        provisioning,
        config,
        metrics: metrics_state,
    });

    let bind_addr = state.config.bind_addr.clone();

    // Build router
    let app = startup::build_router(state);

    // Start server
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
