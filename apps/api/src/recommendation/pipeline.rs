//! Recommendation pipeline.
//!
//! Flow: validate → sanitize label → generate advice + link → merge catalog
//!       links → timestamp → persist → respond.
//!
//! Curated catalog links supersede the generated link for storage. The
//! generated link is always returned to the caller but only persisted when
//! the catalog has nothing for the label.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::clock::MonotonicClock;
use crate::errors::AppError;
use crate::models::recommendation::NewRecommendation;
use crate::models::ReferenceLink;
use crate::recommendation::catalog::{placeholder_link, RecommendationCatalog};
use crate::recommendation::generator::RecommendationGenerator;
use crate::store::RecordStore;
use crate::text::sanitize;

/// Request body for `POST /recommendations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendRequest {
    #[serde(default, alias = "emotion")]
    pub label: Option<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Response envelope for `POST /recommendations`.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub label: String,
    pub recommendation: String,
    pub links: Vec<ReferenceLink>,
    pub generated_link: ReferenceLink,
    pub timestamp: DateTime<Utc>,
}

pub async fn recommend(
    generator: &RecommendationGenerator,
    catalog: &RecommendationCatalog,
    store: &dyn RecordStore,
    clock: &MonotonicClock,
    request: RecommendRequest,
) -> Result<RecommendationResponse, AppError> {
    let label = request
        .label
        .as_deref()
        .map(sanitize)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| AppError::Validation("label is required".to_string()))?;

    debug!("recommendation: generating for {label:?}");
    let generated = generator.generate(&label).await;

    let curated = catalog.lookup(&label);
    debug!("recommendation: {} curated links for {label:?}", curated.len());
    let (links, stored_generated_link) = if curated.is_empty() {
        (vec![placeholder_link()], Some(generated.link.clone()))
    } else {
        (curated.to_vec(), None)
    };

    let record = NewRecommendation {
        user_id: request.user_id,
        label,
        recommendation: generated.text,
        links,
        generated_link: stored_generated_link,
        timestamp: clock.now(),
    };

    debug!("recommendation: persisting");
    let row = store
        .insert_recommendation(record.clone())
        .await
        .map_err(|e| {
            error!("Failed to persist recommendation {record:?}: {e}");
            AppError::Persistence(e)
        })?;

    info!(
        "Recommendation {} stored for {:?} with {} links",
        row.id,
        row.label,
        row.links.len()
    );

    Ok(RecommendationResponse {
        id: row.id,
        user_id: row.user_id,
        label: row.label,
        recommendation: row.recommendation,
        links: row.links.0,
        generated_link: generated.link,
        timestamp: row.timestamp,
    })
}
