use axum::{extract::Query, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    journal::golden_prompt,
    models::{Mood, MoodInfo, PromptQuery},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct GoldenPromptResponse {
    /// Present only for low moods
    pub prompt: Option<String>,
}

/// GET /api/moods
#[utoipa::path(
    get,
    path = "/api/moods",
    responses(
        (status = 200, description = "Mood choices with labels and scores", body = Vec<MoodInfo>)
    ),
    tag = "prompts"
)]
pub async fn get_moods() -> Json<Vec<MoodInfo>> {
    Json(Mood::ALL.into_iter().map(MoodInfo::from).collect())
}

/// GET /api/prompts/golden?mood=
#[utoipa::path(
    get,
    path = "/api/prompts/golden",
    params(PromptQuery),
    responses(
        (status = 200, description = "A writing prompt for a hard day", body = GoldenPromptResponse)
    ),
    tag = "prompts"
)]
pub async fn get_golden_prompt(Query(query): Query<PromptQuery>) -> Json<GoldenPromptResponse> {
    let prompt = golden_prompt(query.mood.unwrap_or_default()).map(str::to_string);
    Json(GoldenPromptResponse { prompt })
}
