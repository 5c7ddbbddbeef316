//! Axum route handlers for the Recommendations API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::recommendation::RecommendationRow;
use crate::models::RecordFilter;
use crate::recommendation::pipeline::{recommend, RecommendRequest, RecommendationResponse};
use crate::state::AppState;

/// POST /recommendations
///
/// Generates advice for a label, merges curated links, stores the result.
pub async fn handle_create_recommendation(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecommendationResponse>), AppError> {
    let Json(request) = payload?;
    let response = recommend(
        &state.generator,
        &state.catalog,
        state.store.as_ref(),
        &state.clock,
        request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /recommendations?emotion=&user_id=
pub async fn handle_list_recommendations(
    State(state): State<AppState>,
    query: Result<Query<RecordFilter>, QueryRejection>,
) -> Result<Json<Vec<RecommendationRow>>, AppError> {
    let Query(filter) = query?;
    let rows = state.store.list_recommendations(&filter).await?;
    Ok(Json(rows))
}
