use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::constants::{
    ERR_ADD_RABBIT, ERR_DELETE_RABBIT, ERR_FETCH_RABBIT, ERR_FETCH_RABBITS, ERR_INVALID_RABBIT_ID,
    ERR_RABBIT_NOT_FOUND, ERR_UPDATE_RABBIT, MSG_RABBIT_ADDED, MSG_RABBIT_DELETED,
    MSG_RABBIT_UPDATED,
};
use crate::error::{AppError, Result};
use crate::models::{MessageResponse, Rabbit, RabbitInput, RabbitResponse};
use crate::routes::validation::{parse_id, AppJson};
use crate::AppState;

/// List every rabbit ordered by identifier
///
/// GET /api/rabbits
pub async fn list_rabbits(State(state): State<AppState>) -> Result<Json<Vec<Rabbit>>> {
    let rabbits = state
        .store
        .list_rabbits()
        .await
        .map_err(AppError::store(ERR_FETCH_RABBITS))?;

    Ok(Json(rabbits))
}

/// GET /api/rabbits/:id
pub async fn get_rabbit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Rabbit>> {
    let rabbit_id = parse_id(&id, ERR_INVALID_RABBIT_ID)?;

    let rabbit = state
        .store
        .get_rabbit(rabbit_id)
        .await
        .map_err(AppError::store(ERR_FETCH_RABBIT))?
        .ok_or(AppError::NotFound(ERR_RABBIT_NOT_FOUND))?;

    Ok(Json(rabbit))
}

/// Create a listing
///
/// POST /api/rabbits
pub async fn create_rabbit(
    State(state): State<AppState>,
    AppJson(input): AppJson<RabbitInput>,
) -> Result<(StatusCode, Json<RabbitResponse>)> {
    let rabbit = state
        .store
        .create_rabbit(&input)
        .await
        .map_err(AppError::store(ERR_ADD_RABBIT))?;

    tracing::info!(rabbit_id = rabbit.rabbit_id, "Rabbit added");

    Ok((
        StatusCode::CREATED,
        Json(RabbitResponse {
            message: MSG_RABBIT_ADDED.to_string(),
            rabbit,
        }),
    ))
}

/// Overwrite every column of a listing
///
/// PUT /api/rabbits/:id
pub async fn update_rabbit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<RabbitInput>,
) -> Result<Json<RabbitResponse>> {
    let rabbit_id = parse_id(&id, ERR_INVALID_RABBIT_ID)?;

    let rabbit = state
        .store
        .update_rabbit(rabbit_id, &input)
        .await
        .map_err(AppError::store(ERR_UPDATE_RABBIT))?
        .ok_or(AppError::NotFound(ERR_RABBIT_NOT_FOUND))?;

    tracing::info!(rabbit_id, "Rabbit updated");

    Ok(Json(RabbitResponse {
        message: MSG_RABBIT_UPDATED.to_string(),
        rabbit,
    }))
}

/// DELETE /api/rabbits/:id
pub async fn delete_rabbit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let rabbit_id = parse_id(&id, ERR_INVALID_RABBIT_ID)?;

    let deleted = state
        .store
        .delete_rabbit(rabbit_id)
        .await
        .map_err(AppError::store(ERR_DELETE_RABBIT))?;

    if !deleted {
        return Err(AppError::NotFound(ERR_RABBIT_NOT_FOUND));
    }

    tracing::info!(rabbit_id, "Rabbit deleted");

    Ok(Json(MessageResponse::new(MSG_RABBIT_DELETED)))
}
