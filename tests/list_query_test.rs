use axum::{
    body::{to_bytes, Body},
    extract::Query,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use empleo_deportivo_backend::dto::application_dto::ApplicationsQuery;
use empleo_deportivo_backend::dto::notification_dto::NotificationsQuery;

async fn echo_applications_query(Query(query): Query<ApplicationsQuery>) -> Json<JsonValue> {
    Json(json!({
        "rol": query.rol,
        "page": query.page,
        "pageSize": query.page_size,
    }))
}

async fn echo_notifications_query(Query(query): Query<NotificationsQuery>) -> Json<JsonValue> {
    Json(json!({
        "usuarioId": query.usuario_id,
        "page": query.page,
        "pageSize": query.page_size,
    }))
}

fn router() -> Router {
    Router::new()
        .route("/solicitudes", get(echo_applications_query))
        .route("/notificaciones", get(echo_notifications_query))
}

async fn get_json(uri: &str) -> (StatusCode, JsonValue) {
    let response = router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

#[tokio::test]
async fn applications_query_parses_pagination_params() {
    let (status, body) = get_json("/solicitudes?rol=club&page=2&pageSize=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rol"], "club");
    assert_eq!(body["page"], 2);
    assert_eq!(body["pageSize"], 10);
}

#[tokio::test]
async fn applications_query_defaults_when_params_absent() {
    let (status, body) = get_json("/solicitudes?rol=demandante").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rol"], "demandante");
    assert!(body["page"].is_null());
    assert!(body["pageSize"].is_null());
}

#[tokio::test]
async fn notifications_query_parses_pagination_params() {
    let (status, body) = get_json("/notificaciones?usuarioId=7&page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usuarioId"], 7);
    assert_eq!(body["page"], 1);
    assert!(body["pageSize"].is_null());

    let (status, body) = get_json("/notificaciones?usuarioId=7&page=3&pageSize=25").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 3);
    assert_eq!(body["pageSize"], 25);
}

#[tokio::test]
async fn notifications_query_requires_usuario_id() {
    let (status, _) = get_json("/notificaciones?page=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn parsed_query_feeds_the_shared_pagination_contract() {
    let query = ApplicationsQuery {
        rol: "club".to_string(),
        page: Some(2),
        page_size: Some(10),
    };
    let pg = query.pagination().validate(50).unwrap();
    assert_eq!(pg.page, 2);
    assert_eq!(pg.page_size, 10);
    assert_eq!(pg.offset(), 10);

    let query = NotificationsQuery {
        usuario_id: 7,
        page: None,
        page_size: None,
    };
    let pg = query.pagination().validate(100).unwrap();
    assert_eq!(pg.page, 1);
    assert_eq!(pg.page_size, 10);
}
