use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::notification_dto::{NotificationsQuery, UnreadCountQuery, UnreadCountResponse},
    error::{Error, Result},
    utils::jwt::Claims,
    AppState,
};

#[utoipa::path(
    get,
    path = "/notificaciones",
    params(
        ("usuarioId" = i64, Query, description = "Must equal the authenticated user's ID"),
        ("page" = Option<i64>, Query, description = "Page number, 1-based"),
        ("pageSize" = Option<i64>, Query, description = "Items per page, 1..=100")
    ),
    responses(
        (status = 200, description = "Paginated notification list, newest first"),
        (status = 403, description = "usuarioId does not match the caller")
    )
)]
#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<NotificationsQuery>,
) -> Result<impl IntoResponse> {
    if query.usuario_id != claims.sub {
        return Err(Error::Forbidden(
            "You can only read your own notifications".to_string(),
        ));
    }
    let page = state
        .notification_service
        .list(claims.sub, query.pagination())
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    put,
    path = "/notificaciones/{id}/leida",
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read"),
        (status = 403, description = "Notification belongs to another user"),
        (status = 404, description = "Notification not found")
    )
)]
#[axum::debug_handler]
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let notification = state.notification_service.mark_read(id, claims.sub).await?;
    Ok(Json(notification))
}

#[utoipa::path(
    get,
    path = "/notificaciones/unread-count",
    params(
        ("usuarioId" = i64, Query, description = "Must equal the authenticated user's ID")
    ),
    responses(
        (status = 200, description = "Unread notification count"),
        (status = 403, description = "usuarioId does not match the caller")
    )
)]
#[axum::debug_handler]
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<UnreadCountQuery>,
) -> Result<impl IntoResponse> {
    if query.usuario_id != claims.sub {
        return Err(Error::Forbidden(
            "You can only read your own notifications".to_string(),
        ));
    }
    let contador = state.notification_service.unread_count(claims.sub).await?;
    Ok(Json(UnreadCountResponse { contador }))
}
