use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use crate::{
    extractors::AuthenticatedUser,
    handlers::local_today,
    journal::JournalView,
    models::{PairResponse, ProvisionRequest, ProvisionResponse},
    AppError, AppResult, AppState,
};

/// GET /api/pair
#[utoipa::path(
    get,
    path = "/api/pair",
    responses(
        (status = 200, description = "The pair this account writes into, if any", body = PairResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "pairs",
    security(("bearer_auth" = []))
)]
pub async fn get_pair(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> AppResult<Json<PairResponse>> {
    let view = JournalView::attach(state.store.clone(), auth.user_id, local_today()).await?;
    Ok(Json(PairResponse {
        pair_id: view.pair_id(),
    }))
}

/// POST /api/provision - Link the couple's accounts and issue a sign-in link
#[utoipa::path(
    post,
    path = "/api/provision",
    request_body = ProvisionRequest,
    responses(
        (status = 200, description = "Sign-in link and pair id", body = ProvisionResponse),
        (status = 400, description = "Missing email, or the identity provider / store rejected a step"),
        (status = 403, description = "Email is not one of the couple's addresses"),
        (status = 500, description = "Service-role key is not configured")
    ),
    tag = "pairs"
)]
pub async fn provision(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<ProvisionResponse>> {
    let service = state.provisioning.as_ref().ok_or_else(|| {
        tracing::error!("Provisioning requested but SUPABASE_SERVICE_ROLE_KEY is not set");
        AppError::Configuration("Missing SUPABASE_SERVICE_ROLE_KEY".to_string())
    })?;

    // Unparseable bodies are treated like a missing email
    let email = serde_json::from_slice::<ProvisionRequest>(&body)
        .ok()
        .and_then(|req| req.email)
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("email required".to_string()))?;

    let response = service.provision(&email).await?;
    Ok(Json(response))
}
