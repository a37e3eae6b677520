use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::{offer_dto::CreateOfferPayload, pagination::PageQuery},
    error::Result,
    models::user::Role,
    utils::jwt::Claims,
    AppState,
};

#[utoipa::path(
    get,
    path = "/ofertas",
    params(
        ("page" = Option<i64>, Query, description = "Page number, 1-based"),
        ("pageSize" = Option<i64>, Query, description = "Items per page, 1..=100")
    ),
    responses(
        (status = 200, description = "Paginated offer list, newest first"),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
#[axum::debug_handler]
pub async fn list_offers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let page = state.offer_service.list(query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/ofertas/mias",
    params(
        ("page" = Option<i64>, Query, description = "Page number, 1-based"),
        ("pageSize" = Option<i64>, Query, description = "Items per page, 1..=100")
    ),
    responses(
        (status = 200, description = "Paginated list of the acting club's offers"),
        (status = 403, description = "Caller is not a club")
    )
)]
#[axum::debug_handler]
pub async fn list_my_offers(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    claims.require_role(Role::Club)?;
    let page = state.offer_service.list_mine(claims.sub, query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/ofertas/{id}",
    params(("id" = i64, Path, description = "Offer ID")),
    responses(
        (status = 200, description = "Offer detail with the club's contact block"),
        (status = 404, description = "Offer not found")
    )
)]
#[axum::debug_handler]
pub async fn get_offer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let offer = state.offer_service.get(id).await?;
    Ok(Json(offer))
}

#[utoipa::path(
    post,
    path = "/ofertas",
    request_body = CreateOfferPayload,
    responses(
        (status = 201, description = "Offer published"),
        (status = 400, description = "Invalid payload or no club profile"),
        (status = 403, description = "Caller is not a club")
    )
)]
#[axum::debug_handler]
pub async fn create_offer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateOfferPayload>,
) -> Result<impl IntoResponse> {
    claims.require_role(Role::Club)?;
    payload.validate()?;
    let offer = state.offer_service.create(claims.sub, payload).await?;
    Ok((StatusCode::CREATED, Json(offer)))
}

#[utoipa::path(
    delete,
    path = "/ofertas/{id}",
    params(("id" = i64, Path, description = "Offer ID")),
    responses(
        (status = 204, description = "Offer and its applications deleted"),
        (status = 403, description = "Offer belongs to another club"),
        (status = 404, description = "Offer not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_offer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    claims.require_role(Role::Club)?;
    state.offer_service.delete(id, claims.sub).await?;
    Ok(StatusCode::NO_CONTENT)
}
