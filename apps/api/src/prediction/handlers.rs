//! Axum route handlers for the Predictions API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::prediction::PredictionRow;
use crate::models::RecordFilter;
use crate::prediction::pipeline::{predict, PredictRequest};
use crate::state::AppState;

/// POST /predictions
///
/// Classifies the submitted text and stores the result.
pub async fn handle_create_prediction(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PredictionRow>), AppError> {
    let Json(request) = payload?;
    let row = predict(
        state.classifier.as_ref(),
        state.store.as_ref(),
        &state.clock,
        request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /predictions?emotion=&user_id=
pub async fn handle_list_predictions(
    State(state): State<AppState>,
    query: Result<Query<RecordFilter>, QueryRejection>,
) -> Result<Json<Vec<PredictionRow>>, AppError> {
    let Query(filter) = query?;
    let rows = state.store.list_predictions(&filter).await?;
    Ok(Json(rows))
}
