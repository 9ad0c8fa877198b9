use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::{
    extractors::AuthenticatedUser,
    handlers::local_today,
    journal::{Dashboard, JournalView},
    models::StatsQuery,
    AppResult, AppState,
};

/// GET /api/stats?author=&today=
#[utoipa::path(
    get,
    path = "/api/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Streaks, word cloud, mood calendar and monthly totals", body = Dashboard),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stats",
    security(("bearer_auth" = []))
)]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<Dashboard>> {
    let today = query.today.unwrap_or_else(local_today);
    let mut view = JournalView::open(state.store.clone(), auth.user_id, today).await?;
    if let Some(author) = query.author {
        view.draft_mut().author = author;
    }

    Ok(Json(view.dashboard(today)))
}
