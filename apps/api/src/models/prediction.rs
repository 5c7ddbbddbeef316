use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted classification: the caller's text and the label it was given.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PredictionRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub input: String,
    pub label: String,
    #[sqlx(rename = "created_at")]
    pub timestamp: DateTime<Utc>,
}

/// A classification ready to be written.
#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub user_id: Option<Uuid>,
    pub input: String,
    pub label: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
impl NewPrediction {
    pub fn into_row(self, id: Uuid) -> PredictionRow {
        PredictionRow {
            id,
            user_id: self.user_id,
            input: self.input,
            label: self.label,
            timestamp: self.timestamp,
        }
    }
}
