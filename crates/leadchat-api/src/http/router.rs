//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.
//!
//! When `server.web_dir` points at an existing directory (the built chat
//! widget), it is served as static files. API routes take priority; unknown
//! paths fall through to the widget's `index.html`.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use leadchat_core::notify::notifier::LeadNotifier;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router<N: LeadNotifier + 'static>(state: AppState<N>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let web_dir = state.config.server.web_dir.clone();

    let api_routes = Router::new()
        .route("/sessions", post(handlers::session::create_session::<N>))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session::<N>)
                .delete(handlers::session::delete_session::<N>),
        )
        .route(
            "/sessions/{id}/messages",
            post(handlers::message::send_message::<N>),
        )
        .route(
            "/sessions/{id}/lead",
            post(handlers::message::submit_lead::<N>),
        );

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Some(web_dir) = web_dir.filter(|dir| std::path::Path::new(dir).is_dir()) {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "Chat widget static file serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::{RecordingNotifier, test_state};

    async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn start(router: &Router) -> String {
        let (status, body) = call(router, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["session_id"].as_str().unwrap().to_string()
    }

    fn lead() -> Value {
        json!({"name": "Priya", "company": "Acme", "phone": "555-0100", "email": "priya@acme.test"})
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let router = build_router(test_state(&["unused"], RecordingNotifier::new()));
        let (status, body) = call(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn new_session_is_seeded() {
        let router = build_router(test_state(&["unused"], RecordingNotifier::new()));
        let (status, body) = call(&router, Method::POST, "/api/v1/sessions", None).await;

        assert_eq!(status, StatusCode::CREATED);
        let data = &body["data"];
        assert_eq!(data["turns"].as_array().unwrap().len(), 1);
        assert_eq!(data["turns"][0]["role"], "assistant");
        assert_eq!(data["turns"][0]["content"], "Hello! How can I help?");
        assert_eq!(data["state"], "normal");
        assert_eq!(data["show_lead_form"], false);
    }

    #[tokio::test]
    async fn full_lead_capture_flow() {
        let notifier = Arc::new(RecordingNotifier::new());
        let router = build_router(test_state(
            &["We sell laptops.", "Yes, we ship worldwide.", "Anything else?"],
            Arc::clone(&notifier),
        ));
        let id = start(&router).await;
        let messages = format!("/api/v1/sessions/{id}/messages");

        // Turn 1: normal reply.
        let (status, body) =
            call(&router, Method::POST, &messages, Some(json!({"message": "What do you sell?"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["show_lead_form"], false);
        let turns = body["data"]["turns"].as_array().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0]["role"], "user");
        assert_eq!(turns[1]["content"], "We sell laptops.");

        // Turn 2: reply held back, lead form shown.
        let (status, body) =
            call(&router, Method::POST, &messages, Some(json!({"message": "Do you ship?"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["show_lead_form"], true);
        assert_eq!(body["data"]["turns"].as_array().unwrap().len(), 1);

        // The pending reply is never exposed.
        let (_, view) = call(&router, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(view["data"]["state"], "awaiting_lead");
        assert!(!view.to_string().contains("ship worldwide"));

        // Chat input is rejected while the form is open.
        let (status, body) =
            call(&router, Method::POST, &messages, Some(json!({"message": "Hello?"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errors"][0]["code"], "INVALID_STATE");

        // Submitting the form releases the pending reply after the confirmation.
        let (status, body) = call(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/lead"),
            Some(lead()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["show_lead_form"], false);
        let turns = body["data"]["turns"].as_array().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(
            turns[0]["content"],
            "Thanks Priya for sharing your details! Let's continue with your inquiry."
        );
        assert_eq!(turns[1]["content"], "Yes, we ship worldwide.");
        assert_eq!(notifier.leads().len(), 1);

        // Turn 3: back to normal.
        let (_, body) =
            call(&router, Method::POST, &messages, Some(json!({"message": "Thanks"}))).await;
        assert_eq!(body["data"]["show_lead_form"], false);
        assert_eq!(body["data"]["turns"][1]["content"], "Anything else?");
    }

    #[tokio::test]
    async fn notifier_failure_keeps_form_open() {
        let notifier = Arc::new(RecordingNotifier::failing(1));
        let router = build_router(test_state(&["one", "two"], Arc::clone(&notifier)));
        let id = start(&router).await;
        let messages = format!("/api/v1/sessions/{id}/messages");
        let lead_uri = format!("/api/v1/sessions/{id}/lead");

        call(&router, Method::POST, &messages, Some(json!({"message": "a"}))).await;
        call(&router, Method::POST, &messages, Some(json!({"message": "b"}))).await;

        let (status, body) = call(&router, Method::POST, &lead_uri, Some(lead())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["errors"][0]["code"], "LEAD_NOTIFICATION_FAILED");

        let (_, view) = call(&router, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(view["data"]["show_lead_form"], true);

        let (status, body) = call(&router, Method::POST, &lead_uri, Some(lead())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["turns"][1]["content"], "two");
        assert_eq!(notifier.leads().len(), 2);
    }

    #[tokio::test]
    async fn lead_before_gate_is_conflict() {
        let router = build_router(test_state(&["unused"], RecordingNotifier::new()));
        let id = start(&router).await;

        let (status, body) = call(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/lead"),
            Some(lead()),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errors"][0]["code"], "INVALID_STATE");
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let router = build_router(test_state(&["unused"], RecordingNotifier::new()));
        let id = start(&router).await;

        let (status, body) = call(
            &router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/messages"),
            Some(json!({"message": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");

        let (_, view) = call(&router, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(view["data"]["user_message_count"], 0);
    }

    #[tokio::test]
    async fn unknown_and_deleted_sessions_are_not_found() {
        let router = build_router(test_state(&["unused"], RecordingNotifier::new()));
        let missing = uuid::Uuid::now_v7();

        let (status, body) =
            call(&router, Method::GET, &format!("/api/v1/sessions/{missing}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["code"], "SESSION_NOT_FOUND");

        let (status, _) = call(&router, Method::GET, "/api/v1/sessions/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let id = start(&router).await;
        let uri = format!("/api/v1/sessions/{id}");
        let (status, _) = call(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let router = build_router(test_state(&["r1", "r2", "r3"], RecordingNotifier::new()));
        let a = start(&router).await;
        let b = start(&router).await;

        call(&router, Method::POST, &format!("/api/v1/sessions/{a}/messages"), Some(json!({"message": "1"}))).await;
        call(&router, Method::POST, &format!("/api/v1/sessions/{a}/messages"), Some(json!({"message": "2"}))).await;
        let (_, body) =
            call(&router, Method::POST, &format!("/api/v1/sessions/{b}/messages"), Some(json!({"message": "1"}))).await;

        assert_eq!(body["data"]["show_lead_form"], false);
        let (_, view_a) = call(&router, Method::GET, &format!("/api/v1/sessions/{a}"), None).await;
        assert_eq!(view_a["data"]["show_lead_form"], true);
    }
}
