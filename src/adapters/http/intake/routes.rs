//! Route configuration for intake endpoints.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{chat, end_session, get_session, health, IntakeAppState};

/// Creates the intake router with all endpoints.
///
/// Routes:
/// - `POST /api/chat` - Submit a message, starting a session if none is given
/// - `GET /api/sessions/:id` - Session snapshot
/// - `DELETE /api/sessions/:id` - End a session
/// - `GET /health` - Liveness check
pub fn intake_router() -> Router<IntakeAppState> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/sessions/:id", get(get_session).delete(end_session))
        .route("/health", get(health))
}

/// Builds the CORS layer. An empty origin list allows any origin.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return base.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
}

/// The full application: routes, state and the tower-http layer stack.
pub fn intake_app(state: IntakeAppState, cors_origins: &[String], request_timeout: Duration) -> Router {
    intake_router()
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::http::intake::dto::{ChatResponse, SessionResponse};
    use crate::adapters::notification::MockNotifier;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::intake::{HandoffSettings, PhaseStateMachine, WELCOME};
    use crate::ports::AIError;

    fn state(oracle: MockAIProvider) -> IntakeAppState {
        IntakeAppState::new(
            Arc::new(InMemorySessionStore::default()),
            Arc::new(oracle),
            Arc::new(MockNotifier::new()),
            PhaseStateMachine::new(HandoffSettings::new("team@example.com", "New idea")),
        )
    }

    fn app(oracle: MockAIProvider) -> Router {
        intake_app(state(oracle), &[], Duration::from_secs(5))
    }

    fn chat_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_without_session_id_starts_a_session() {
        let response = app(MockAIProvider::new())
            .oneshot(chat_request(serde_json::json!({ "message": "__INIT__" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ChatResponse = json(response).await;
        assert_eq!(body.reply, WELCOME);
        assert_eq!(body.phase, "Business Problem");
        assert!(body.session_id.parse::<uuid::Uuid>().is_ok());
    }

    #[tokio::test]
    async fn chat_continues_an_existing_session() {
        let app = app(MockAIProvider::new().with_response("How often does it happen?"));
        let first = app
            .clone()
            .oneshot(chat_request(serde_json::json!({ "message": "__INIT__" })))
            .await
            .unwrap();
        let first: ChatResponse = json(first).await;

        let second = app
            .clone()
            .oneshot(chat_request(serde_json::json!({
                "session_id": first.session_id,
                "message": "Orders keep getting lost"
            })))
            .await
            .unwrap();
        let second: ChatResponse = json(second).await;
        assert_eq!(second.reply, "How often does it happen?");

        let snapshot = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/sessions/{}", first.session_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(snapshot.status(), StatusCode::OK);
        let snapshot: SessionResponse = json(snapshot).await;
        assert_eq!(snapshot.transcript.len(), 3);
    }

    #[tokio::test]
    async fn empty_message_is_bad_request() {
        let response = app(MockAIProvider::new())
            .oneshot(chat_request(serde_json::json!({ "message": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_session_id_is_bad_request() {
        let response = app(MockAIProvider::new())
            .oneshot(chat_request(serde_json::json!({
                "session_id": "abc",
                "message": "hello"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oracle_failure_is_bad_gateway() {
        let oracle = MockAIProvider::new().with_error(AIError::unavailable("model not loaded"));

        let response = app(oracle)
            .oneshot(chat_request(serde_json::json!({ "message": "Orders go missing" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let response = app(MockAIProvider::new())
            .oneshot(
                Request::builder()
                    .uri(format!("/api/sessions/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_ends_session() {
        let app = app(MockAIProvider::new());
        let created = app
            .clone()
            .oneshot(chat_request(serde_json::json!({ "message": "__INIT__" })))
            .await
            .unwrap();
        let created: ChatResponse = json(created).await;

        let delete = |app: Router| {
            let uri = format!("/api/sessions/{}", created.session_id);
            async move {
                app.oneshot(
                    Request::builder()
                        .method("DELETE")
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap()
            }
        };

        assert_eq!(delete(app.clone()).await.status(), StatusCode::NO_CONTENT);
        assert_eq!(delete(app).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(MockAIProvider::new())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[test]
    fn cors_layer_accepts_configured_origins() {
        // Construction must not panic on valid or invalid entries
        let _ = cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]);
        let _ = cors_layer(&[]);
    }
}
