use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::ReferenceLink;

/// A persisted recommendation. `links` is stored as JSONB.
///
/// `generated_link` is only stored when the catalog had nothing for the label;
/// otherwise the curated links supersede it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecommendationRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub label: String,
    pub recommendation: String,
    pub links: Json<Vec<ReferenceLink>>,
    pub generated_link: Option<Json<ReferenceLink>>,
    #[sqlx(rename = "created_at")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRecommendation {
    pub user_id: Option<Uuid>,
    pub label: String,
    pub recommendation: String,
    pub links: Vec<ReferenceLink>,
    pub generated_link: Option<ReferenceLink>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
impl NewRecommendation {
    pub fn into_row(self, id: Uuid) -> RecommendationRow {
        RecommendationRow {
            id,
            user_id: self.user_id,
            label: self.label,
            recommendation: self.recommendation,
            links: Json(self.links),
            generated_link: self.generated_link.map(Json),
            timestamp: self.timestamp,
        }
    }
}
