use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use sectrain_backend::app::create_router;
use sectrain_backend::app_state::AppState;
use sectrain_backend::config::{AppConfig, AuthConfig, Config, DatabaseConfig, Environment, ServerConfig};

/// Router over a lazily-connecting pool pointed at an unreachable server:
/// requests that never reach the store exercise the full middleware and
/// policy stack, and the health probe sees a connection failure.
fn test_router() -> Router {
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://localhost:1/unreachable".to_string(),
            max_connections: Some(1),
            min_connections: Some(0),
        },
        auth: AuthConfig {
            allowed_email_domain: "bootlabstech.com".to_string(),
            session_max_age_days: 7,
        },
        app: AppConfig {
            name: "test".to_string(),
            environment: Environment::Development,
        },
    };

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database.url)
        .expect("lazy pool");

    let session_layer = SessionManagerLayer::new(MemoryStore::default());
    create_router(AppState::new(pool, config), session_layer)
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn hello_responds() {
    let response = test_router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_reports_connectivity_failure() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Database connection failed"));
}

#[tokio::test]
async fn signin_rejects_foreign_domain_before_touching_the_store() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/auth/signin",
            json!({ "email": "user@otherdomain.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"]["message"], json!("Authentication required"));
}

#[tokio::test]
async fn signin_rejects_lookalike_domain() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/auth/signin",
            json!({ "email": "user@evil-bootlabstech.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signin_rejects_malformed_email() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/auth/signin",
            json!({ "email": "not-an-email" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn session_introspection_without_cookie() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/auth/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["session"], json!(false));
    assert_eq!(body["user"], Value::Null);
    assert_eq!(body["isAdmin"], json!(false));
}

#[tokio::test]
async fn learner_routes_require_a_session() {
    for uri in ["/progress", "/progress/summary", "/results", "/sections"] {
        let response = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {}", uri);
    }

    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/modules/5f0c3f9e-8c2f-4f37-9e43-0a2f6f3a2d10/complete")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_require_a_session() {
    for uri in ["/admin/users", "/admin/progress", "/admin/results"] {
        let response = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {}", uri);
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
