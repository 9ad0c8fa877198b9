use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    middleware,
    response::Html,
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{handlers, openapi::ApiDoc};

pub fn build_router(state: Arc<crate::AppState>) -> Router {
    // CORS configuration
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true);
    match state.config.site_url.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(_) => tracing::warn!(site_url = %state.config.site_url, "SITE_URL is not a valid origin; CORS disabled"),
    }

    // Entry routes
    let entry_routes = Router::new()
        .route("/", get(handlers::entries_handler::get_entries))
        .route("/", post(handlers::entries_handler::create_entry))
        .route("/today", get(handlers::entries_handler::get_todays_entries))
        .route("/{id}", delete(handlers::entries_handler::delete_entry));

    // Prompt routes
    let prompt_routes = Router::new().route("/golden", get(handlers::prompts_handler::get_golden_prompt));

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    });

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .nest("/api/entries", entry_routes)
        .nest("/api/prompts", prompt_routes)
        .route("/api/stats", get(handlers::stats_handler::get_stats))
        .route("/api/pair", get(handlers::pair_handler::get_pair))
        .route("/api/provision", post(handlers::pair_handler::provision))
        .route("/api/moods", get(handlers::prompts_handler::get_moods))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/swagger-ui", get(swagger_ui))
        .layer(middleware::from_fn_with_state(state.clone(), crate::middleware::basic_auth_gate))
        .layer(middleware::from_fn(crate::middleware::metrics_middleware))
        .layer(middleware::from_fn(crate::middleware::request_id_middleware))
        .layer(trace)
        .layer(cors)
        .with_state(state)
}

async fn swagger_ui() -> Html<&'static str> {
    Html(r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>One-Line-A-Day API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api-docs/openapi.json',
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
    "#)
}
