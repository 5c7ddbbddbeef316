//! Test doubles for the pipeline seams: a scripted generative backend, a
//! counting classifier and an in-memory record store. Also a loopback HTTP
//! server for exercising the real clients.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use uuid::Uuid;

use crate::classification::{ClassifyError, EmotionClassifier};
use crate::clock::MonotonicClock;
use crate::llm_client::{GenerativeBackend, LlmError};
use crate::models::prediction::{NewPrediction, PredictionRow};
use crate::models::recommendation::{NewRecommendation, RecommendationRow};
use crate::models::RecordFilter;
use crate::recommendation::{RecommendationCatalog, RecommendationGenerator};
use crate::state::AppState;
use crate::store::RecordStore;
use crate::text::FirstLineExtractor;

// ────────────────────────────────────────────────────────────────────────────
// ScriptedBackend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    Status(u16),
    Unavailable,
}

impl ScriptedReply {
    pub fn text(text: &str) -> Self {
        ScriptedReply::Text(text.to_string())
    }
}

/// Replies by matching a substring of the prompt; first matching rule wins.
#[derive(Default)]
pub struct ScriptedBackend {
    rules: Vec<(String, ScriptedReply)>,
    fallback: Option<ScriptedReply>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when(mut self, needle: &str, reply: ScriptedReply) -> Self {
        self.rules.push((needle.to_string(), reply));
        self
    }

    /// Reply used when no rule matches.
    pub fn always(mut self, reply: ScriptedReply) -> Self {
        self.fallback = Some(reply);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let reply = self
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .or_else(|| self.fallback.clone());

        match reply {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Status(status)) => Err(LlmError::Api {
                status,
                message: "scripted failure".to_string(),
            }),
            Some(ScriptedReply::Unavailable) => Err(transport_error().await),
            None => Err(LlmError::EmptyContent),
        }
    }
}

/// A real `reqwest` error, produced without touching the network.
async fn transport_error() -> LlmError {
    let err = reqwest::Client::new()
        .get("http://[not-a-host")
        .send()
        .await
        .expect_err("malformed URL must fail");
    LlmError::Unavailable(err)
}

// ────────────────────────────────────────────────────────────────────────────
// StubClassifier
// ────────────────────────────────────────────────────────────────────────────

type ErrorFactory = Box<dyn Fn() -> ClassifyError + Send + Sync>;

pub struct StubClassifier {
    outcome: Result<String, ErrorFactory>,
    calls: AtomicUsize,
}

impl StubClassifier {
    pub fn returning(label: &str) -> Self {
        Self {
            outcome: Ok(label.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: impl Fn() -> ClassifyError + Send + Sync + 'static) -> Self {
        Self {
            outcome: Err(Box::new(error)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmotionClassifier for StubClassifier {
    async fn classify(&self, _text: &str) -> Result<String, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(label) => Ok(label.clone()),
            Err(make) => Err(make()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// InMemoryStore
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryStore {
    predictions: Mutex<Vec<PredictionRow>>,
    recommendations: Mutex<Vec<RecommendationRow>>,
    fail: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the pool were closed.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Stored predictions in insertion order.
    pub fn predictions(&self) -> Vec<PredictionRow> {
        self.predictions.lock().unwrap().clone()
    }

    /// Stored recommendations in insertion order.
    pub fn recommendations(&self) -> Vec<RecommendationRow> {
        self.recommendations.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.fail {
            Err(sqlx::Error::PoolClosed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn insert_prediction(&self, record: NewPrediction) -> Result<PredictionRow, sqlx::Error> {
        self.check()?;
        let row = record.into_row(Uuid::new_v4());
        self.predictions.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_predictions(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<PredictionRow>, sqlx::Error> {
        self.check()?;
        let mut rows: Vec<_> = self
            .predictions()
            .into_iter()
            .rev()
            .filter(|r| filter.matches(&r.label, r.user_id))
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(rows)
    }

    async fn insert_recommendation(
        &self,
        record: NewRecommendation,
    ) -> Result<RecommendationRow, sqlx::Error> {
        self.check()?;
        let row = record.into_row(Uuid::new_v4());
        self.recommendations.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_recommendations(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<RecommendationRow>, sqlx::Error> {
        self.check()?;
        let mut rows: Vec<_> = self
            .recommendations()
            .into_iter()
            .rev()
            .filter(|r| filter.matches(&r.label, r.user_id))
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(rows)
    }
}

/// App state wired to test doubles and the bundled catalog.
pub fn test_state(
    classifier: impl EmotionClassifier + 'static,
    backend: ScriptedBackend,
    store: InMemoryStore,
) -> AppState {
    let backend: Arc<dyn GenerativeBackend> = Arc::new(backend);
    AppState {
        store: Arc::new(store),
        classifier: Arc::new(classifier),
        generator: Arc::new(RecommendationGenerator::new(
            backend.clone(),
            Arc::new(FirstLineExtractor),
        )),
        catalog: Arc::new(RecommendationCatalog::bundled().expect("bundled catalog")),
        llm: backend,
        clock: Arc::new(MonotonicClock::new()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Loopback HTTP
// ────────────────────────────────────────────────────────────────────────────

/// Serves `app` on an ephemeral loopback port; returns `http://127.0.0.1:<port>`.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A loopback address nothing is listening on.
pub async fn unused_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
