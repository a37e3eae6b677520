use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::profile_dto::UpdateProfilePayload, error::Result, utils::jwt::Claims, AppState,
};

#[utoipa::path(
    get,
    path = "/perfil/usuarios/perfil",
    responses(
        (status = 200, description = "User row plus the role-specific profile block"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get(claims.sub).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/perfil/usuarios/perfil",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Updated profile"),
        (status = 400, description = "Profile block does not match the caller's role")
    )
)]
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.update(claims.sub, payload).await?;
    Ok(Json(profile))
}
