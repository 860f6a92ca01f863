use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

use crate::constants::{DEFAULT_ROLE, MSG_LOGGED_IN, MSG_REGISTERED};
use crate::error::AuthError;
use crate::models::{LoginRequest, LoginResponse, MessageResponse, NewUser, RegisterRequest};
use crate::security::{hash_password, verify_password};
use crate::AppState;

/// Register a new account
///
/// POST /api/register
///
/// Requires `username`, `password` and `email`. The password is stored as a
/// salted bcrypt hash and the account gets the default role. Duplicate
/// usernames are detected by the storage uniqueness constraint, so two
/// concurrent registrations for the same name cannot both succeed.
///
/// The created record is not returned.
pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthError> {
    let Json(payload) = payload?;
    tracing::info!(
        username = payload.username.as_deref().unwrap_or_default(),
        email = payload.email.as_deref().unwrap_or_default(),
        "[REGISTER ATTEMPT]"
    );

    let registration = payload.into_registration().ok_or_else(|| {
        tracing::info!("[REGISTER FAILED] Missing fields");
        AuthError::MissingRegistrationFields
    })?;

    let cost = state.config.bcrypt_cost;
    let password = registration.password;
    let password_hash =
        tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

    let new_user = NewUser {
        username: registration.username,
        password_hash,
        email: registration.email,
        role: DEFAULT_ROLE.to_string(),
    };

    let user = state.store.create_user(&new_user).await.map_err(|e| {
        let err = AuthError::from(e);
        if matches!(err, AuthError::UsernameTaken) {
            tracing::info!(username = %new_user.username, "[REGISTER FAILED] Username already exists");
        }
        err
    })?;

    tracing::info!(
        username = %user.username,
        user_id = user.user_id,
        "[REGISTER SUCCESS] New user registered"
    );

    Ok((StatusCode::CREATED, Json(MessageResponse::new(MSG_REGISTERED))))
}

/// Authenticate with username and password
///
/// POST /api/login
///
/// Unknown usernames and wrong passwords produce the same 401 response.
/// No server-side session is created; the client keeps the returned user.
pub async fn login_user(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::info!(detail = %e.body_text(), "[LOGIN FAILED] Malformed body");
        AuthError::MissingCredentials
    })?;

    let (username, password) = payload.credentials().ok_or_else(|| {
        tracing::info!("[LOGIN FAILED] Missing username or password");
        AuthError::MissingCredentials
    })?;

    let Some(user) = state.store.find_user_by_username(&username).await? else {
        tracing::info!(username = %username, "[LOGIN FAILED] Username not found");
        return Err(AuthError::InvalidCredentials);
    };

    let stored_hash = user.password.clone();
    let matches =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await?;
    if !matches {
        tracing::info!(
            username = %username,
            user_id = user.user_id,
            "[LOGIN FAILED] Wrong password"
        );
        return Err(AuthError::InvalidCredentials);
    }

    tracing::info!(
        username = %username,
        user_id = user.user_id,
        "[LOGIN SUCCESS] User logged in"
    );

    Ok(Json(LoginResponse {
        message: MSG_LOGGED_IN.to_string(),
        user: user.into(),
    }))
}
