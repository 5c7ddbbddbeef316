//! Prediction pipeline.
//!
//! Flow: validate → classify → sanitize → persist → respond.
//! Classification failures never fail the request (the label falls back to
//! `UNABLE_TO_CLASSIFY`); a storage failure does.

use serde::Deserialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::classification::{label_or_sentinel, EmotionClassifier, UNABLE_TO_CLASSIFY};
use crate::clock::MonotonicClock;
use crate::errors::AppError;
use crate::models::prediction::{NewPrediction, PredictionRow};
use crate::store::RecordStore;
use crate::text::sanitize;

/// Request body for `POST /predictions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default, alias = "predictions")]
    pub text: Option<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

pub async fn predict(
    classifier: &dyn EmotionClassifier,
    store: &dyn RecordStore,
    clock: &MonotonicClock,
    request: PredictRequest,
) -> Result<PredictionRow, AppError> {
    let input = request
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("text is required".to_string()))?
        .to_string();

    debug!("prediction: classifying {} chars", input.len());
    let raw_label = label_or_sentinel(classifier.classify(&input).await);

    debug!("prediction: sanitizing label {raw_label:?}");
    let mut label = sanitize(&raw_label);
    if label.is_empty() {
        label = UNABLE_TO_CLASSIFY.to_string();
    }

    debug!("prediction: persisting label {label:?}");
    let record = NewPrediction {
        user_id: request.user_id,
        input,
        label,
        timestamp: clock.now(),
    };
    let row = store.insert_prediction(record.clone()).await.map_err(|e| {
        error!(
            "Failed to persist prediction (label={:?}, at={}): {e}",
            record.label, record.timestamp
        );
        AppError::Persistence(e)
    })?;

    info!("Prediction {} stored with label {:?}", row.id, row.label);
    Ok(row)
}
