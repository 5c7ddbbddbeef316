use std::sync::Arc;

use crate::classification::EmotionClassifier;
use crate::clock::MonotonicClock;
use crate::llm_client::GenerativeBackend;
use crate::recommendation::{RecommendationCatalog, RecommendationGenerator};
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in here is mutated per request except the
/// classifier's lazily loaded artifacts and the clock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    /// Remote or local strategy, chosen via CLASSIFIER_BACKEND.
    pub classifier: Arc<dyn EmotionClassifier>,
    pub generator: Arc<RecommendationGenerator>,
    pub catalog: Arc<RecommendationCatalog>,
    pub llm: Arc<dyn GenerativeBackend>,
    pub clock: Arc<MonotonicClock>,
}
