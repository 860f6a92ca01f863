use axum::{
    extract::{Path, State},
    Json,
};

use crate::constants::{
    ERR_DELETE_USER, ERR_FETCH_USER, ERR_FETCH_USERS, ERR_INVALID_USER_ID,
    ERR_UPDATE_PROFILE_IMAGE, ERR_UPDATE_USER, ERR_USERNAME_REQUIRED, ERR_USER_NOT_FOUND,
    MSG_PROFILE_IMAGE_UPDATED, MSG_USER_DELETED,
};
use crate::error::{AppError, Result};
use crate::models::{
    MessageResponse, ProfileImageRequest, ProfileImageResponse, UpdateUserRequest, User,
};
use crate::routes::validation::{parse_id, AppJson};
use crate::AppState;

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state
        .store
        .list_users()
        .await
        .map_err(AppError::store(ERR_FETCH_USERS))?;

    Ok(Json(users))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let user_id = parse_id(&id, ERR_INVALID_USER_ID)?;

    let user = state
        .store
        .get_user(user_id)
        .await
        .map_err(AppError::store(ERR_FETCH_USER))?
        .ok_or(AppError::NotFound(ERR_USER_NOT_FOUND))?;

    Ok(Json(user))
}

/// Overwrite the editable profile columns
///
/// PUT /api/users/:id
///
/// Omitted or empty optional fields are written as NULL. The username is
/// required because the column is NOT NULL; renaming onto an existing
/// username is rejected by the uniqueness constraint.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<UpdateUserRequest>,
) -> Result<Json<User>> {
    let user_id = parse_id(&id, ERR_INVALID_USER_ID)?;
    let update = body
        .into_update()
        .ok_or_else(|| AppError::invalid(ERR_USERNAME_REQUIRED))?;

    let user = state
        .store
        .update_user(user_id, &update)
        .await
        .map_err(AppError::store(ERR_UPDATE_USER))?
        .ok_or(AppError::NotFound(ERR_USER_NOT_FOUND))?;

    tracing::info!(user_id, "Updated user profile");

    Ok(Json(user))
}

/// Replace only the profile image URL
///
/// POST /api/users/:id/profile-image
pub async fn update_profile_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<ProfileImageRequest>,
) -> Result<Json<ProfileImageResponse>> {
    let user_id = parse_id(&id, ERR_INVALID_USER_ID)?;

    let user = state
        .store
        .update_profile_image(user_id, body.profile_image.as_deref())
        .await
        .map_err(AppError::store(ERR_UPDATE_PROFILE_IMAGE))?
        .ok_or(AppError::NotFound(ERR_USER_NOT_FOUND))?;

    tracing::info!(user_id, "Profile image updated");

    Ok(Json(ProfileImageResponse {
        message: MSG_PROFILE_IMAGE_UPDATED.to_string(),
        user: user.into(),
    }))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let user_id = parse_id(&id, ERR_INVALID_USER_ID)?;

    let deleted = state
        .store
        .delete_user(user_id)
        .await
        .map_err(AppError::store(ERR_DELETE_USER))?;

    if !deleted {
        return Err(AppError::NotFound(ERR_USER_NOT_FOUND));
    }

    tracing::info!(user_id, "User deleted");

    Ok(Json(MessageResponse::new(MSG_USER_DELETED)))
}
