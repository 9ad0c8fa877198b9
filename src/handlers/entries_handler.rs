use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    extractors::AuthenticatedUser,
    handlers::local_today,
    journal::{search, JournalView},
    models::{ArchiveQuery, CreateEntryInput, DateQuery, Entry, EntryMutationResponse},
    AppResult, AppState,
};

/// GET /api/entries?q=&mood=
#[utoipa::path(
    get,
    path = "/api/entries",
    params(ArchiveQuery),
    responses(
        (status = 200, description = "Matching entries, newest day first", body = Vec<Entry>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn get_entries(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Query(query): Query<ArchiveQuery>,
) -> AppResult<Json<Vec<Entry>>> {
    let view = JournalView::open(state.store.clone(), auth.user_id, local_today()).await?;
    Ok(Json(search(view.entries(), &query)))
}

/// GET /api/entries/today?date=
#[utoipa::path(
    get,
    path = "/api/entries/today",
    params(DateQuery),
    responses(
        (status = 200, description = "Entries written for the day", body = Vec<Entry>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn get_todays_entries(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<Vec<Entry>>> {
    let date = query.date.unwrap_or_else(local_today);
    let view = JournalView::open(state.store.clone(), auth.user_id, date).await?;
    Ok(Json(view.todays_entries()))
}

/// POST /api/entries - Save one line for the pair
#[utoipa::path(
    post,
    path = "/api/entries",
    request_body = CreateEntryInput,
    responses(
        (status = 200, description = "Entry saved", body = Entry),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account is not linked to a pair"),
        (status = 422, description = "Empty or over-long text")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Json(input): Json<CreateEntryInput>,
) -> AppResult<Json<Entry>> {
    let date = input.date.unwrap_or_else(local_today);
    let mut view = JournalView::attach(state.store.clone(), auth.user_id, date).await?;

    let draft = view.draft_mut();
    draft.author = input.author;
    draft.mood = input.mood;
    draft.text = input.text;

    let entry = view.save().await?;
    metrics::counter!("journal_entries_saved_total").increment(1);

    Ok(Json(entry))
}

/// DELETE /api/entries/{id}
#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry deleted", body = EntryMutationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Entry not found in the caller's pair")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<Uuid>,
    auth: AuthenticatedUser,
) -> AppResult<Json<EntryMutationResponse>> {
    let mut view = JournalView::attach(state.store.clone(), auth.user_id, local_today()).await?;
    view.delete(entry_id).await?;
    metrics::counter!("journal_entries_deleted_total").increment(1);

    Ok(Json(EntryMutationResponse {
        success: true,
        message: Some("Entry deleted successfully".to_string()),
    }))
}
