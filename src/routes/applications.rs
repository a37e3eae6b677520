use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::application_dto::{ApplicationsQuery, ApplyPayload, RespondPayload},
    error::Result,
    models::user::Role,
    utils::jwt::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/solicitudes/ofertas/{id}/solicitar",
    params(("id" = i64, Path, description = "Offer ID")),
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application created as pending"),
        (status = 400, description = "Empty message, no demandante profile, or duplicate application"),
        (status = 404, description = "Offer not found")
    )
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(offer_id): Path<i64>,
    Json(payload): Json<ApplyPayload>,
) -> Result<impl IntoResponse> {
    claims.require_role(Role::Demandante)?;
    payload.validate()?;
    let application = state
        .application_service
        .apply(offer_id, claims.sub, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/solicitudes",
    params(
        ("rol" = String, Query, description = "Must equal the caller's role"),
        ("page" = Option<i64>, Query, description = "Page number, 1-based"),
        ("pageSize" = Option<i64>, Query, description = "Items per page, 1..=50")
    ),
    responses(
        (status = 200, description = "Paginated application list, newest first"),
        (status = 403, description = "rol does not match the caller's role")
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ApplicationsQuery>,
) -> Result<impl IntoResponse> {
    let role: Role = claims.role.parse()?;
    let page = state
        .application_service
        .list(claims.sub, role, query)
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    put,
    path = "/solicitudes/{id}/responder",
    params(("id" = i64, Path, description = "Application ID")),
    request_body = RespondPayload,
    responses(
        (status = 200, description = "Application accepted or rejected"),
        (status = 400, description = "Invalid decision or application already responded"),
        (status = 403, description = "Application belongs to another club's offer"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn respond(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<RespondPayload>,
) -> Result<impl IntoResponse> {
    claims.require_role(Role::Club)?;
    let application = state
        .application_service
        .respond(id, claims.sub, payload)
        .await?;
    Ok(Json(application))
}
