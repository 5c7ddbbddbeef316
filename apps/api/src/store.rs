//! Durable storage for classification and recommendation records.
//!
//! Both tables are append-only: rows are inserted once and never updated or deleted.
//! Handlers reach storage through `Arc<dyn RecordStore>` held in `AppState`.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::prediction::{NewPrediction, PredictionRow};
use crate::models::recommendation::{NewRecommendation, RecommendationRow};
use crate::models::RecordFilter;

/// Newest first; insertion order decides between equal timestamps.
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, seq DESC";

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_prediction(&self, record: NewPrediction) -> Result<PredictionRow, sqlx::Error>;

    async fn list_predictions(&self, filter: &RecordFilter)
        -> Result<Vec<PredictionRow>, sqlx::Error>;

    async fn insert_recommendation(
        &self,
        record: NewRecommendation,
    ) -> Result<RecommendationRow, sqlx::Error>;

    async fn list_recommendations(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<RecommendationRow>, sqlx::Error>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert_prediction(&self, record: NewPrediction) -> Result<PredictionRow, sqlx::Error> {
        sqlx::query_as::<_, PredictionRow>(
            r#"
            INSERT INTO predictions (id, user_id, input, label, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.user_id)
        .bind(&record.input)
        .bind(&record.label)
        .bind(record.timestamp)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_predictions(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<PredictionRow>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT * FROM predictions
            WHERE ($1::text IS NULL OR lower(label) = lower($1))
              AND ($2::uuid IS NULL OR user_id = $2)
            {NEWEST_FIRST}
            "#
        );
        sqlx::query_as::<_, PredictionRow>(&sql)
            .bind(filter.emotion())
            .bind(filter.user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn insert_recommendation(
        &self,
        record: NewRecommendation,
    ) -> Result<RecommendationRow, sqlx::Error> {
        sqlx::query_as::<_, RecommendationRow>(
            r#"
            INSERT INTO recommendations
                (id, user_id, label, recommendation, links, generated_link, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.user_id)
        .bind(&record.label)
        .bind(&record.recommendation)
        .bind(Json(&record.links))
        .bind(record.generated_link.as_ref().map(Json))
        .bind(record.timestamp)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_recommendations(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<RecommendationRow>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT * FROM recommendations
            WHERE ($1::text IS NULL OR lower(label) = lower($1))
              AND ($2::uuid IS NULL OR user_id = $2)
            {NEWEST_FIRST}
            "#
        );
        sqlx::query_as::<_, RecommendationRow>(&sql)
            .bind(filter.emotion())
            .bind(filter.user_id)
            .fetch_all(&self.pool)
            .await
    }
}
