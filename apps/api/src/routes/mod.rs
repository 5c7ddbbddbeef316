pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers::handle_chat;
use crate::prediction::handlers as predictions;
use crate::recommendation::handlers as recommendations;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/predictions",
            post(predictions::handle_create_prediction).get(predictions::handle_list_predictions),
        )
        .route(
            "/recommendations",
            post(recommendations::handle_create_recommendation)
                .get(recommendations::handle_list_recommendations),
        )
        .route("/chat", post(handle_chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::testing::{test_state, InMemoryStore, ScriptedBackend, ScriptedReply, StubClassifier};

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn backend() -> ScriptedBackend {
        ScriptedBackend::new()
            .when("suggestion", ScriptedReply::text("Breathe in for four counts."))
            .when("URL", ScriptedReply::text("https://example.org/read"))
            .always(ScriptedReply::text("I'm here for you."))
    }

    #[tokio::test]
    async fn test_health() {
        let state = test_state(StubClassifier::returning("Joy"), backend(), InMemoryStore::new());
        let (status, body) = send(build_router(state), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_prediction_returns_created() {
        let state = test_state(StubClassifier::returning("Joy"), backend(), InMemoryStore::new());
        let (status, body) = send(
            build_router(state),
            post_json("/predictions", r#"{"text": "got the job!"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["input"], "got the job!");
        assert_eq!(body["label"], "Joy");
        assert!(body["timestamp"].is_string());
        assert!(body["id"].is_string());
    }

    #[tokio::test]
    async fn test_create_prediction_accepts_legacy_field() {
        let state = test_state(StubClassifier::returning("Fear"), backend(), InMemoryStore::new());
        let (status, body) = send(
            build_router(state),
            post_json("/predictions", r#"{"predictions": "exam tomorrow"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["input"], "exam tomorrow");
    }

    #[tokio::test]
    async fn test_create_prediction_missing_text_is_bad_request() {
        let state = test_state(StubClassifier::returning("Joy"), backend(), InMemoryStore::new());
        let (status, body) = send(build_router(state), post_json("/predictions", "{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_prediction_storage_failure_is_server_error() {
        let state = test_state(
            StubClassifier::returning("Joy"),
            backend(),
            InMemoryStore::failing(),
        );
        let (status, body) = send(
            build_router(state),
            post_json("/predictions", r#"{"text": "fine"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_list_predictions_filters_by_emotion() {
        let state = test_state(StubClassifier::returning("Joy"), backend(), InMemoryStore::new());
        let app = build_router(state);

        send(app.clone(), post_json("/predictions", r#"{"text": "one"}"#)).await;
        send(app.clone(), post_json("/predictions", r#"{"text": "two"}"#)).await;

        let (status, body) = send(app.clone(), get("/predictions?emotion=JOY")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (_, body) = send(app.clone(), get("/predictions?emotion=anger")).await;
        assert!(body.as_array().unwrap().is_empty());

        let (_, body) = send(app, get("/predictions")).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows[0]["input"], "two", "newest first");
    }

    #[tokio::test]
    async fn test_create_recommendation_merges_catalog() {
        let state = test_state(StubClassifier::returning("Joy"), backend(), InMemoryStore::new());
        let (status, body) = send(
            build_router(state),
            post_json("/recommendations", r#"{"emotion": "Sadness"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["label"], "Sadness");
        assert_eq!(body["recommendation"], "Breathe in for four counts.");
        assert_eq!(body["generated_link"]["url"], "https://example.org/read");
        assert!(body["links"].as_array().unwrap().len() >= 1);
    }

    #[tokio::test]
    async fn test_create_recommendation_missing_label_is_bad_request() {
        let state = test_state(StubClassifier::returning("Joy"), backend(), InMemoryStore::new());
        let (status, _) = send(
            build_router(state),
            post_json("/recommendations", r#"{"label": ""}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_recommendations_filters_by_user() {
        let state = test_state(StubClassifier::returning("Joy"), backend(), InMemoryStore::new());
        let app = build_router(state);
        let user = uuid::Uuid::new_v4();

        send(
            app.clone(),
            post_json(
                "/recommendations",
                &format!(r#"{{"label": "joy", "user_id": "{user}"}}"#),
            ),
        )
        .await;
        send(app.clone(), post_json("/recommendations", r#"{"label": "fear"}"#)).await;

        let (status, body) = send(app, get(&format!("/recommendations?user_id={user}"))).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["label"], "joy");
        assert!(rows[0]["links"].is_array());
    }

    #[tokio::test]
    async fn test_chat_returns_created() {
        let state = test_state(StubClassifier::returning("Joy"), backend(), InMemoryStore::new());
        let (status, body) = send(
            build_router(state),
            post_json("/chat", r#"{"chat": "rough day"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["chat"], "rough day");
        assert_eq!(body["result_chat"], "I'm here for you.");
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_envelope() {
        let state = test_state(StubClassifier::returning("Joy"), backend(), InMemoryStore::new());
        let app = build_router(state);

        let (status, body) = send(app.clone(), post_json("/predictions", r#"{"text": 5}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = send(app.clone(), post_json("/recommendations", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let without_content_type = Request::builder()
            .method("POST")
            .uri("/chat")
            .body(Body::from(r#"{"chat": "hello"}"#))
            .unwrap();
        let (status, body) = send(app, without_content_type).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_user_filter_uses_error_envelope() {
        let state = test_state(StubClassifier::returning("Joy"), backend(), InMemoryStore::new());
        let app = build_router(state);

        for uri in ["/predictions?user_id=", "/recommendations?user_id=not-a-uuid"] {
            let (status, body) = send(app.clone(), get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri}");
        }
    }
}
