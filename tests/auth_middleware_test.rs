use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    middleware::from_fn,
    routing::get,
    Extension, Json, Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use empleo_deportivo_backend::error::{Error, Result};
use empleo_deportivo_backend::middleware::auth::require_bearer_auth;
use empleo_deportivo_backend::models::user::Role;
use empleo_deportivo_backend::utils::jwt::{issue_token, Claims};

const TEST_SECRET: &str = "test_secret_key";

fn init_test_config() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://localhost/unused");
    env::set_var("JWT_SECRET", TEST_SECRET);
    env::set_var("PUSH_GATEWAY_URL", "http://localhost/push");
    env::set_var("PUSH_SECRET", "push_test_secret");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("API_RPS", "100");
    // Tests in this binary share the process-wide config.
    let _ = empleo_deportivo_backend::config::init_config();
}

async fn whoami(Extension(claims): Extension<Claims>) -> Json<JsonValue> {
    Json(json!({ "sub": claims.sub, "role": claims.role }))
}

fn protected_router() -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .route_layer(from_fn(require_bearer_auth))
}

fn claims_for(sub: i64, role: &str, exp_offset_secs: i64) -> Claims {
    Claims {
        sub,
        email: format!("user{}@example.com", sub),
        role: role.to_string(),
        exp: (chrono::Utc::now().timestamp() + exp_offset_secs) as usize,
    }
}

async fn body_json(response: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn missing_authorization_header_is_rejected() {
    init_test_config();

    let response = protected_router()
        .oneshot(
            Request::builder()
                .uri("/whoami")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_authorization");
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    init_test_config();

    let response = protected_router()
        .oneshot(
            Request::builder()
                .uri("/whoami")
                .header("Authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "unsupported_scheme");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    init_test_config();

    let response = protected_router()
        .oneshot(
            Request::builder()
                .uri("/whoami")
                .header("Authorization", "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    init_test_config();

    let token = issue_token(&claims_for(3, "demandante", -120), TEST_SECRET).unwrap();
    let response = protected_router()
        .oneshot(
            Request::builder()
                .uri("/whoami")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() {
    init_test_config();

    let token = issue_token(&claims_for(4, "club", 3600), "some-other-secret").unwrap();
    let response = protected_router()
        .oneshot(
            Request::builder()
                .uri("/whoami")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn valid_token_reaches_handler_with_claims() {
    init_test_config();

    let token = issue_token(&claims_for(42, "club", 3600), TEST_SECRET).unwrap();
    let response = protected_router()
        .oneshot(
            Request::builder()
                .uri("/whoami")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sub"], 42);
    assert_eq!(body["role"], "club");
}

#[tokio::test]
async fn rate_limited_route_returns_429_when_budget_is_spent() {
    init_test_config();

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .layer(axum::middleware::from_fn_with_state(
            empleo_deportivo_backend::middleware::rate_limit::new_rps_state(2),
            empleo_deportivo_backend::middleware::rate_limit::rps_middleware,
        ));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], "rate_limit_exceeded");
}

async fn club_only(Extension(claims): Extension<Claims>) -> Result<Json<JsonValue>> {
    claims.require_role(Role::Club)?;
    Ok(Json(json!({ "ok": true })))
}

fn club_gated_router() -> Router {
    Router::new()
        .route("/club-only", get(club_only))
        .route_layer(from_fn(require_bearer_auth))
}

#[tokio::test]
async fn role_mismatch_is_forbidden() {
    init_test_config();

    let token = issue_token(&claims_for(5, "demandante", 3600), TEST_SECRET).unwrap();
    let response = club_gated_router()
        .oneshot(
            Request::builder()
                .uri("/club-only")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "You do not have permission to perform this action"
    );
}

#[tokio::test]
async fn matching_role_passes_the_gate() {
    init_test_config();

    let token = issue_token(&claims_for(6, "club", 3600), TEST_SECRET).unwrap();
    let response = club_gated_router()
        .oneshot(
            Request::builder()
                .uri("/club-only")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn handler_errors_map_to_their_statuses() {
    init_test_config();

    let app = Router::new()
        .route(
            "/missing",
            get(|| async { Err::<Json<JsonValue>, Error>(Error::NotFound("Offer not found".into())) }),
        )
        .route(
            "/conflict",
            get(|| async {
                Err::<Json<JsonValue>, Error>(Error::Conflict(
                    "You have already applied to this offer".into(),
                ))
            }),
        );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Offer not found");

    // Conflicts ride on 400, the convention this API keeps.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/conflict")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "You have already applied to this offer");
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    init_test_config();

    let app = Router::new().route(
        "/health",
        get(empleo_deportivo_backend::routes::health::health),
    );
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
